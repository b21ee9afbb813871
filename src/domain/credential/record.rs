//! Encoded credential hash records
//!
//! A persisted credential is a single string of four `$`-delimited fields:
//!
//! ```text
//! <algorithm>$<iterations>$<salt-hex>$<digest-hex>
//! ```
//!
//! The record is self-describing: verification reads the work factor and
//! salt out of the record itself, so no parameters need to be stored out
//! of band. `CredentialRecord` is the parsed form; `FromStr` validates the
//! wire form and `Display` re-encodes it.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Algorithm tag carried in the first field of every record
pub const ALGORITHM_TAG: &str = "pbkdf2";

/// Number of `$`-delimited fields in a well-formed record
const FIELD_COUNT: usize = 4;

/// Errors that can occur while parsing an encoded record
///
/// These are diagnostic only. Verification never surfaces them to callers;
/// a record that fails to parse verifies as a plain non-match.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RecordParseError {
    #[error("Expected {FIELD_COUNT} '$'-delimited fields, found {0}")]
    FieldCount(usize),

    #[error("Unknown algorithm tag: '{0}'")]
    UnknownAlgorithm(String),

    #[error("Iteration count is not a positive integer: '{0}'")]
    InvalidIterations(String),

    #[error("Salt is not lowercase hexadecimal")]
    InvalidSalt,

    #[error("Digest is not lowercase hexadecimal")]
    InvalidDigest,
}

/// Parsed form of an encoded credential hash record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    iterations: u32,
    salt: String,
    digest: String,
}

impl CredentialRecord {
    /// Assemble a record from already-derived parts
    ///
    /// The salt and digest are expected to be lowercase hex, as produced
    /// by the hashing service. Parsing is the validating path for records
    /// of unknown provenance.
    pub fn new(iterations: u32, salt: impl Into<String>, digest: impl Into<String>) -> Self {
        Self {
            iterations,
            salt: salt.into(),
            digest: digest.into(),
        }
    }

    /// Work factor this record was derived with
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Salt field, lowercase hex
    pub fn salt(&self) -> &str {
        &self.salt
    }

    /// Digest field, lowercase hex
    pub fn digest(&self) -> &str {
        &self.digest
    }
}

impl FromStr for CredentialRecord {
    type Err = RecordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split('$').collect();

        if fields.len() != FIELD_COUNT {
            return Err(RecordParseError::FieldCount(fields.len()));
        }

        if fields[0] != ALGORITHM_TAG {
            return Err(RecordParseError::UnknownAlgorithm(fields[0].to_string()));
        }

        let iterations: u32 = fields[1]
            .parse()
            .map_err(|_| RecordParseError::InvalidIterations(fields[1].to_string()))?;

        if iterations == 0 {
            return Err(RecordParseError::InvalidIterations(fields[1].to_string()));
        }

        if !is_lowercase_hex(fields[2]) {
            return Err(RecordParseError::InvalidSalt);
        }

        if !is_lowercase_hex(fields[3]) {
            return Err(RecordParseError::InvalidDigest);
        }

        Ok(Self {
            iterations,
            salt: fields[2].to_string(),
            digest: fields[3].to_string(),
        })
    }
}

impl fmt::Display for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}${}${}${}",
            ALGORITHM_TAG, self.iterations, self.salt, self.digest
        )
    }
}

fn is_lowercase_hex(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "pbkdf2$100000$a1b2c3d4e5f60718293a4b5c6d7e8f90$0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

    #[test]
    fn test_parse_valid_record() {
        let record: CredentialRecord = SAMPLE.parse().unwrap();

        assert_eq!(record.iterations(), 100_000);
        assert_eq!(record.salt(), "a1b2c3d4e5f60718293a4b5c6d7e8f90");
        assert_eq!(record.digest().len(), 64);
    }

    #[test]
    fn test_display_round_trip() {
        let record: CredentialRecord = SAMPLE.parse().unwrap();
        assert_eq!(record.to_string(), SAMPLE);
    }

    #[test]
    fn test_new_and_display() {
        let record = CredentialRecord::new(5000, "ab12", "cd34");
        assert_eq!(record.to_string(), "pbkdf2$5000$ab12$cd34");
    }

    #[test]
    fn test_wrong_field_count() {
        assert_eq!(
            "not-a-valid-record".parse::<CredentialRecord>(),
            Err(RecordParseError::FieldCount(1))
        );
        assert_eq!(
            "pbkdf2$100000$ab12".parse::<CredentialRecord>(),
            Err(RecordParseError::FieldCount(3))
        );
        assert_eq!(
            "pbkdf2$100000$ab12$cd34$extra".parse::<CredentialRecord>(),
            Err(RecordParseError::FieldCount(5))
        );
        assert_eq!(
            "".parse::<CredentialRecord>(),
            Err(RecordParseError::FieldCount(1))
        );
    }

    #[test]
    fn test_unknown_algorithm() {
        assert_eq!(
            "bcrypt$100000$ab12$cd34".parse::<CredentialRecord>(),
            Err(RecordParseError::UnknownAlgorithm("bcrypt".to_string()))
        );
        assert_eq!(
            "PBKDF2$100000$ab12$cd34".parse::<CredentialRecord>(),
            Err(RecordParseError::UnknownAlgorithm("PBKDF2".to_string()))
        );
    }

    #[test]
    fn test_invalid_iterations() {
        assert_eq!(
            "pbkdf2$abc$ab12$cd34".parse::<CredentialRecord>(),
            Err(RecordParseError::InvalidIterations("abc".to_string()))
        );
        assert_eq!(
            "pbkdf2$0$ab12$cd34".parse::<CredentialRecord>(),
            Err(RecordParseError::InvalidIterations("0".to_string()))
        );
        assert_eq!(
            "pbkdf2$-5$ab12$cd34".parse::<CredentialRecord>(),
            Err(RecordParseError::InvalidIterations("-5".to_string()))
        );
        assert_eq!(
            "pbkdf2$$ab12$cd34".parse::<CredentialRecord>(),
            Err(RecordParseError::InvalidIterations(String::new()))
        );
    }

    #[test]
    fn test_leading_zeros_accepted() {
        let record: CredentialRecord = "pbkdf2$0100$ab12$cd34".parse().unwrap();
        assert_eq!(record.iterations(), 100);
    }

    #[test]
    fn test_invalid_salt() {
        assert_eq!(
            "pbkdf2$100000$AB12$cd34".parse::<CredentialRecord>(),
            Err(RecordParseError::InvalidSalt)
        );
        assert_eq!(
            "pbkdf2$100000$xyz$cd34".parse::<CredentialRecord>(),
            Err(RecordParseError::InvalidSalt)
        );
        assert_eq!(
            "pbkdf2$100000$$cd34".parse::<CredentialRecord>(),
            Err(RecordParseError::InvalidSalt)
        );
    }

    #[test]
    fn test_invalid_digest() {
        assert_eq!(
            "pbkdf2$100000$ab12$CD34".parse::<CredentialRecord>(),
            Err(RecordParseError::InvalidDigest)
        );
        assert_eq!(
            "pbkdf2$100000$ab12$".parse::<CredentialRecord>(),
            Err(RecordParseError::InvalidDigest)
        );
    }

    #[test]
    fn test_low_iteration_records_still_parse() {
        // Old records keep their original work factor
        let record: CredentialRecord = "pbkdf2$1$ab$cd".parse().unwrap();
        assert_eq!(record.iterations(), 1);
    }
}

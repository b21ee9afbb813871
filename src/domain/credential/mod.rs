//! Credential record domain
//!
//! This module provides the parsed form of an encoded credential hash
//! record and the codec between the parsed and wire representations.

mod record;

pub use record::{CredentialRecord, RecordParseError, ALGORITHM_TAG};

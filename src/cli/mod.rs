//! CLI module for Credlock
//!
//! Provides subcommands for working with credential records:
//! - `hash`: derive a credential record from a password
//! - `verify`: check a password against an existing record

pub mod hash;
pub mod verify;

use clap::{Parser, Subcommand};

/// Credlock - PBKDF2 credential hashing for account authentication
#[derive(Parser)]
#[command(name = "credlock")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Derive a credential record from a password
    Hash(hash::HashArgs),

    /// Check a password against an existing credential record
    Verify(verify::VerifyArgs),
}

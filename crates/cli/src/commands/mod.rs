//! CLI command implementations.

pub mod admin;
pub mod seed;

use thiserror::Error;

use belle_core::store::StoreError;
use belle_core::types::EmailError;

/// Errors that can occur during CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Store persistence failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Invalid email address.
    #[error("invalid email: {0}")]
    Email(#[from] EmailError),

    /// Account with this email already exists.
    #[error("an account already exists with email: {0}")]
    UserExists(String),

    /// Password hashing failed.
    #[error("failed to hash password: {0}")]
    Hash(String),

    /// Password too weak.
    #[error("weak password: {0}")]
    WeakPassword(String),
}

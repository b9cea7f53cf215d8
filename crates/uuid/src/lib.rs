//! Person identity tokens.
//!
//! Every patient is layered on a person record, and two patient values are the
//! same patient exactly when they share the person's identity token. The token
//! is a UUID held in a *canonical* text form: **32 lowercase hexadecimal
//! characters**, no hyphens (`Uuid::new_v4().simple().to_string()`).
//!
//! The token is minted when a person is first created in memory, before any
//! storage layer assigns an integer surrogate key, so identity comparisons work
//! for records that have never been saved.
//!
//! Externally supplied tokens (for example, from a stored record) must already
//! be canonical; [`PersonUuid::parse`] rejects uppercase, hyphenated, short or
//! non-hex input rather than normalising it.

mod token;

pub use token::{PersonUuid, Uuid};

/// Error type for identity token operations.
#[derive(Debug, thiserror::Error)]
pub enum UuidError {
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for identity token operations.
pub type UuidResult<T> = Result<T, UuidError>;

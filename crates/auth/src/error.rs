//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during authentication.
///
/// The `Display` text of the token variants is the exact message returned to
/// the client in 401 responses.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No `Authorization` header was supplied.
    #[error("No token")]
    MissingToken,

    /// The `Authorization` header is not of the form `Bearer <token>`.
    #[error("Invalid Authorization header")]
    MalformedHeader,

    /// The token signature does not match.
    #[error("Invalid token")]
    InvalidSignature,

    /// The token is past its expiry timestamp.
    #[error("Token expired")]
    Expired,

    /// The token could not be parsed at all.
    #[error("Invalid token")]
    Malformed,

    /// Signing a new token failed.
    #[error("Failed to sign token")]
    Signing(#[source] jsonwebtoken::errors::Error),

    /// Hashing a password failed.
    #[error("Failed to hash password")]
    Hash(#[source] bcrypt::BcryptError),
}

//! Password hashing and verification.

use crate::error::AuthError;

/// Produces a salted one-way digest of the plaintext.
///
/// A random salt is embedded in the output, so the same plaintext yields a
/// different digest on every call.
pub fn hash(plaintext: &str) -> Result<String, AuthError> {
    bcrypt::hash(plaintext, bcrypt::DEFAULT_COST).map_err(AuthError::Hash)
}

/// Checks the plaintext against a stored digest.
///
/// Returns `false` on mismatch and on an unparseable digest; never errors.
/// The comparison inside bcrypt is constant-time.
pub fn verify(plaintext: &str, hashed: &str) -> bool {
    bcrypt::verify(plaintext, hashed).unwrap_or(false)
}

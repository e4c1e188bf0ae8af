//! Signed identity tokens.

use chrono::{Duration, Utc};
use common::CustomerId;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// The identity payload embedded in a signed token.
///
/// Minted at login, carried unchanged through verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub customer_id: CustomerId,
    pub fullname: String,
    /// Expiry as seconds since the Unix epoch.
    pub exp: i64,
}

/// Issues and verifies signed, time-limited identity tokens.
///
/// Tokens are HS256-signed with a symmetric secret sourced from process
/// configuration. Verification uses zero leeway so expiry is exact.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
    validation: Validation,
}

impl TokenService {
    /// Creates a token service from the configured secret and token lifetime.
    pub fn new(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
            validation,
        }
    }

    /// Signs a token for the given customer, expiring `ttl` from now.
    pub fn issue(&self, customer_id: CustomerId, fullname: &str) -> Result<String, AuthError> {
        let claims = Claims {
            customer_id,
            fullname: fullname.to_string(),
            exp: (Utc::now() + self.ttl).timestamp(),
        };

        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding)
            .map_err(AuthError::Signing)
    }

    /// Verifies a token and returns the embedded claims unchanged.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    AuthError::InvalidSignature
                }
                _ => AuthError::Malformed,
            })
    }
}

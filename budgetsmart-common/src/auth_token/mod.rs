use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use uuid::Uuid;

#[derive(Debug)]
pub enum TokenError {
    EncodingError(jsonwebtoken::errors::Error),
    TokenMissing,
    TokenInvalid,
    TokenExpired,
    SystemResourceAccessFailure,
}

impl std::error::Error for TokenError {}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenError::EncodingError(e) => write!(f, "EncodingError: {}", e),
            TokenError::TokenMissing => write!(f, "TokenMissing"),
            TokenError::TokenInvalid => write!(f, "TokenInvalid"),
            TokenError::TokenExpired => write!(f, "TokenExpired"),
            TokenError::SystemResourceAccessFailure => write!(f, "SystemResourceAccessFailure"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    pub exp: u64,  // Expiration in time since UNIX epoch
    pub uid: Uuid, // User ID
    pub slt: u32,  // Random salt (makes it so two tokens generated in the same
                   //              second are different--useful for testing)
}

pub fn generate_access_token(
    user_id: Uuid,
    lifetime: Duration,
    signing_key: &[u8],
) -> Result<String, TokenError> {
    let time_since_epoch = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|_| TokenError::SystemResourceAccessFailure)?;

    let claims = TokenClaims {
        exp: time_since_epoch.as_secs() + lifetime.as_secs(),
        uid: user_id,
        slt: rand::thread_rng().gen_range(1..u32::MAX),
    };

    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )
    .map_err(TokenError::EncodingError)
}

pub fn validate_access_token(token: &str, signing_key: &[u8]) -> Result<TokenClaims, TokenError> {
    // Pinning HS256 here means a token signed with another algorithm (or no
    // algorithm at all) never verifies
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    let decoded_token = jsonwebtoken::decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(signing_key),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::TokenExpired,
        _ => TokenError::TokenInvalid,
    })?;

    Ok(decoded_token.claims)
}

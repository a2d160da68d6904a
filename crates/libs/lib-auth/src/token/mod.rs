//! # Session Tokens
//!
//! Stateless, HMAC-SHA256 signed JWTs carrying a user id and an absolute expiry.
//!
//! Nothing is persisted server-side: a token stays valid until its `exp` passes,
//! even after the client discards its cookie. Only `HS256` is accepted; a token
//! presenting any other `alg` (including `none`) fails as [`Error::InvalidSignature`].

use chrono::Duration;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use lib_utils::{b64u_decode_to_string, now_timestamp};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Token lifetime used unless configuration overrides it.
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 15;

const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;
const SIGNING_ALGORITHM_NAME: &str = "HS256";

/// Claims embedded in a session token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    /// Claims for `user_id`, issued at `issued_at` and expiring `ttl` later.
    pub fn new(user_id: i64, issued_at: i64, ttl: Duration) -> Self {
        Self {
            sub: user_id.to_string(),
            exp: issued_at + ttl.num_seconds(),
            iat: issued_at,
        }
    }

    /// The user id carried in `sub`.
    pub fn user_id(&self) -> Result<i64, Error> {
        self.sub
            .parse::<i64>()
            .map_err(|_| Error::Malformed(format!("subject is not a user id: {}", self.sub)))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("no token signing secret is configured")]
    MissingSecret,

    #[error("failed to sign token: {0}")]
    Signing(String),

    #[error("token signature or algorithm is invalid")]
    InvalidSignature,

    #[error("token has expired")]
    Expired,

    #[error("token is malformed: {0}")]
    Malformed(String),
}

#[derive(Deserialize)]
struct AlgorithmHeader {
    alg: String,
}

/// Issue a token for `user_id` valid for `ttl` from now.
pub fn encode_token(user_id: i64, secret: &str, ttl: Duration) -> Result<String, Error> {
    let claims = Claims::new(user_id, now_timestamp(), ttl);
    encode_claims(&claims, secret)
}

/// Sign arbitrary claims with the server secret.
pub fn encode_claims(claims: &Claims, secret: &str) -> Result<String, Error> {
    if secret.is_empty() {
        return Err(Error::MissingSecret);
    }

    encode(
        &Header::new(SIGNING_ALGORITHM),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| Error::Signing(e.to_string()))
}

/// Verify a token against the secret and the current clock.
pub fn decode_token(token: &str, secret: &str) -> Result<Claims, Error> {
    decode_token_at(token, secret, now_timestamp())
}

/// Verify a token as of the Unix timestamp `now`.
///
/// A token is expired once `now >= exp`. The signature is always checked before
/// expiry, so a forged token never reports `Expired`.
pub fn decode_token_at(token: &str, secret: &str, now: i64) -> Result<Claims, Error> {
    verify_at(token, secret, now).map(|(_, claims)| claims)
}

/// Verify a token and return the user id it was issued for.
pub fn verify_session(token: &str, secret: &str) -> Result<i64, Error> {
    verify_at(token, secret, now_timestamp()).map(|(user_id, _)| user_id)
}

fn verify_at(token: &str, secret: &str, now: i64) -> Result<(i64, Claims), Error> {
    if secret.is_empty() {
        return Err(Error::MissingSecret);
    }

    ensure_expected_algorithm(token)?;

    let mut validation = Validation::new(SIGNING_ALGORITHM);
    // Expiry is checked below with a strict `>=` and no leeway.
    validation.validate_exp = false;
    validation.leeway = 0;

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::InvalidSignature
        | ErrorKind::InvalidAlgorithm
        | ErrorKind::InvalidAlgorithmName => Error::InvalidSignature,
        ErrorKind::ExpiredSignature => Error::Expired,
        _ => Error::Malformed(e.to_string()),
    })?;

    if now >= claims.exp {
        return Err(Error::Expired);
    }

    let user_id = claims.user_id()?;

    Ok((user_id, claims))
}

/// Reject any header whose `alg` is not HS256 before handing the token to the
/// JWT library.
fn ensure_expected_algorithm(token: &str) -> Result<(), Error> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(Error::Malformed(format!(
            "expected 3 segments, found {}",
            segments.len()
        )));
    }

    let header_json = b64u_decode_to_string(segments[0])
        .map_err(|_| Error::Malformed("header is not base64url".to_string()))?;
    let header: AlgorithmHeader = serde_json::from_str(&header_json)
        .map_err(|e| Error::Malformed(format!("header: {}", e)))?;

    if header.alg != SIGNING_ALGORITHM_NAME {
        return Err(Error::InvalidSignature);
    }

    Ok(())
}

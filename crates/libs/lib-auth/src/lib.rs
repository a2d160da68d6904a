//! # Authentication Library
//!
//! Password hashing and signed, time-bounded session tokens.

pub mod pwd;
pub mod token;

// Re-export commonly used types
pub use pwd::{hash_password, verify_password};
pub use token::{decode_token, encode_token, verify_session, Claims, DEFAULT_TOKEN_TTL_MINUTES};

//! # Utilities Library
//!
//! Shared helpers for environment variables, base64url decoding, time and request validation.

pub mod b64;
pub mod envs;
pub mod time;
pub mod validation;

// Re-export commonly used functions
pub use b64::{b64u_decode, b64u_decode_to_string, b64u_encode};
pub use envs::{get_env, get_env_or, get_env_parse, get_env_parse_or};
pub use time::{format_time, now_timestamp, now_utc};
pub use validation::{validate_email, validate_length_range, validate_not_empty};

//! # Auth Handler Tests
//!
//! Router-level tests for registration, login and the session gate, run against
//! the in-memory stores.

mod register;

use crate::test_utils::*;
use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

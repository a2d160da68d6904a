//! # Model
//!
//! Domain records and the stores that persist them.

pub mod store;

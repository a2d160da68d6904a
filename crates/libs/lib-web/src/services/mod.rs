//! # Services
//!
//! Business rules that sit between handlers and stores.

pub mod todos;

//! Shared utilities, configuration, and error handling for the booking API
//!
//! This crate provides common functionality used across the workspace:
//! - Configuration management following 12-factor principles
//! - Error types and their HTTP mapping
//! - The `RequestInput` extractor (query string merged with the body)

pub mod config;
pub mod error;
pub mod extractors;

pub use error::{Error, Result};
pub use extractors::RequestInput;

//! API endpoint integration tests
//!
//! Drives the full application router against the mock booking repository.

#![allow(dead_code)]

mod common;
mod jobs;

//! Booking backend integration tests
//!
//! Drives the full application router against the HTTP booking repository,
//! with the backend played by a wiremock server.

#![allow(dead_code)]

mod backend;
mod common;

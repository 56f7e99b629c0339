//! Booking domain types

pub mod distance_feed;
pub mod entities;

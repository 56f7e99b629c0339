//! HTTP handlers for the Jobs domain

pub mod distance_feed;
pub mod jobs;
pub mod notifications;

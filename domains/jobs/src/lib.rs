//! Jobs domain: booking request handlers over the booking repository

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::*;
pub use repository::{
    BookingRepository, BookingRepositoryFactory, RepositoryConfig, RepositoryError,
    RepositoryResult,
};

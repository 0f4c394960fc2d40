//! Domain layer - Pure business abstractions
//!
//! This layer contains NO framework dependencies (no SeaORM, no Axum).
//! Only trait definitions, domain error types, and the clock seam.

pub mod clock;
pub mod errors;
pub mod repositories;

pub use clock::{Clock, FixedClock, SystemClock};
pub use errors::DomainError;
pub use repositories::*;

//! counsel-service
//!
//! Orchestration around the pure assessment engine: permission checks,
//! validation, and hand-off to the record store for definitions; record
//! fetching for progress reports. Storage and permission resolution are
//! collaborators behind the traits in [`store`].

pub mod audit;
pub mod config;
pub mod definitions;
pub mod error;
pub mod memory;
pub mod progress;
pub mod store;
pub mod telemetry;

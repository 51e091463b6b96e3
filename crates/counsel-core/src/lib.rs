//! counsel-core
//!
//! Pure domain types for custom assessments and progress tracking, plus
//! store key conventions. No I/O — this is the shared vocabulary of the
//! Counsel system.

pub mod error;
pub mod models;
pub mod store_keys;

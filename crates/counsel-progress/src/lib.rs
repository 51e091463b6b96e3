//! counsel-progress
//!
//! Progress analytics over dated score and activity records: per-day
//! bucketing, explicit trend windows, least-squares trend labels, and the
//! report that combines them. Pure and synchronous; callers fetch the
//! records and pass "now" in.

pub mod aggregate;
pub mod report;
pub mod trend;
pub mod window;

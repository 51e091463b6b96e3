//! Store key/path conventions.
//!
//! Pure string functions. These define the canonical layout of records in
//! whatever object store backs the service layer.

use uuid::Uuid;

pub const DEFINITIONS_PREFIX: &str = "definitions/";

pub fn definition(id: Uuid) -> String {
    format!("definitions/{id}.json")
}

/// Score series for one subject. `category` is the instrument id
/// (e.g. "phq9") or a custom assessment category name.
pub fn scores(subject_id: Uuid, category: &str) -> String {
    format!("scores/{subject_id}/{category}.json")
}

pub fn scores_prefix(subject_id: Uuid) -> String {
    format!("scores/{subject_id}/")
}

pub fn sessions(subject_id: Uuid) -> String {
    format!("activity/{subject_id}/sessions.json")
}

pub fn completed_tasks(subject_id: Uuid) -> String {
    format!("activity/{subject_id}/tasks.json")
}

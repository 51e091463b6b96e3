use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One labeled bucket of a scoring scale, identified by its upper bound.
///
/// A set of ranges partitions `[0, 100]` into half-open intervals
/// `(previous max_percent, max_percent]`; the first interval also includes 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct InterpretationRange {
    pub max_percent: f64,
    pub label: String,
    pub description: String,
}

impl InterpretationRange {
    pub fn new(max_percent: f64, label: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            max_percent,
            label: label.into(),
            description: description.into(),
        }
    }
}

/// Interpretation ranges for the questions sharing one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CategoryScoring {
    pub name: String,
    pub interpretations: Vec<InterpretationRange>,
}

impl CategoryScoring {
    pub fn new(name: impl Into<String>, interpretations: Vec<InterpretationRange>) -> Self {
        Self {
            name: name.into(),
            interpretations,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ScoringRules {
    pub categories: Vec<CategoryScoring>,
    #[serde(default)]
    pub overall_interpretations: Vec<InterpretationRange>,
}

impl ScoringRules {
    pub fn category(&self, name: &str) -> Option<&CategoryScoring> {
        self.categories.iter().find(|c| c.name == name)
    }
}

//! Historical era metadata.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A named historical period offered as a choice on the input form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "camelCase")]
pub struct Era {
    /// Unique display name, also used verbatim in prompts.
    pub name: String,
    /// Human-readable date range (e.g. `1837 – 1901`).
    pub display_range: String,
    /// One-line description of the era's technology.
    pub description: String,
    /// Example inventions shown on the timeline.
    pub sample_inventions: Vec<String>,
}

//! Serializable projection of the session served to front ends.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::ViewState;
use crate::generation::GenerationResult;
use crate::ids::RequestId;

/// Everything a front end needs to render the current screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    /// The active screen.
    pub view: ViewState,
    /// Current contents of the invention field.
    pub invention: String,
    /// Currently selected era name.
    pub era: String,
    /// Error message to show on the input form, if any.
    pub error: Option<String>,
    /// True while a generation is pending (results screen shows a spinner).
    pub loading: bool,
    /// The pending generation, if any.
    pub pending_request: Option<RequestId>,
    /// The displayed result, present only on a loaded results screen.
    pub result: Option<GenerationResult>,
}

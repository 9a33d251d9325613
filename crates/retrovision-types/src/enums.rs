//! Enumeration types shared between the session and its front ends.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The screen a session is currently showing.
///
/// Exactly one is active at a time. Transitions happen only through the
/// session reducer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum ViewState {
    /// Marketing landing page. Initial state and target of the header link.
    #[default]
    Landing,
    /// Invention and era form.
    InputForm,
    /// A generation result, or the loading indicator while one is pending.
    Results,
    /// The era timeline.
    Timeline,
}

/// Coarse classification of a failed generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum FailureKind {
    /// The input was rejected before any upstream call.
    Validation,
    /// An upstream call returned a non-success status, timed out, or could
    /// not be reached.
    Upstream,
    /// An upstream response did not match the expected shape.
    MalformedResponse,
}

impl core::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let label = match self {
            Self::Validation => "validation",
            Self::Upstream => "upstream",
            Self::MalformedResponse => "malformed response",
        };
        f.write_str(label)
    }
}

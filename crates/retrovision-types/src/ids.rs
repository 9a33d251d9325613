//! Generation request identifier.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Identifies one submitted generation.
///
/// The session remembers the id of the generation it is waiting for and
/// discards completions carrying any other id. UUID v7 keeps ids in issue
/// order when they show up in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RequestId(Uuid);

impl RequestId {
    /// A fresh, time-ordered id.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for RequestId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successive_ids_differ() {
        assert_ne!(RequestId::new(), RequestId::new());
    }

    #[test]
    fn serializes_as_bare_uuid_string() {
        let id = RequestId::new();
        let json = serde_json::to_value(id).unwrap_or_default();
        assert_eq!(json.as_str(), Some(id.to_string().as_str()));
    }
}

//! Generation records: what goes to the generator and what comes back.
//!
//! Field names serialize in camelCase so the JSON matches the schema the
//! text model is asked to produce (`imagePrompt`, `imageUrl`, ...).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::RequestId;

/// Number of materials and concepts in a [`Deconstruction`].
pub const DECONSTRUCTION_ITEMS: usize = 4;

/// One submission of the input form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// Identifies this submission for staleness checks.
    pub request_id: RequestId,
    /// The modern invention to reimagine. Never empty.
    pub invention: String,
    /// Name of a catalog era.
    pub era: String,
}

/// Materials and concepts of the chosen era that the invention maps onto.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Deconstruction {
    /// Exactly four materials available in the era.
    pub materials: [String; DECONSTRUCTION_ITEMS],
    /// Exactly four scientific or technological concepts of the era.
    pub concepts: [String; DECONSTRUCTION_ITEMS],
}

/// One reimagined version of the invention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Simulation {
    /// Period-appropriate name of the device.
    pub name: String,
    /// Short description of how it works.
    pub description: String,
}

/// Everything shown on the results screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    /// The invention as typed by the user.
    pub invention: String,
    /// The catalog era it was reimagined in.
    pub era: String,
    /// Era materials and concepts.
    pub deconstruction: Deconstruction,
    /// Reimagined versions. Never empty; the first one is the headline.
    pub simulations: Vec<Simulation>,
    /// One-paragraph historical account.
    pub narrative: String,
    /// Displayable image reference: a `data:` URI or an external URL.
    pub image_url: String,
    /// Whether the image came from the image model.
    pub image_generated: bool,
}

impl GenerationResult {
    /// The headline simulation shown at the top of the results screen.
    pub fn headline(&self) -> Option<&Simulation> {
        self.simulations.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GenerationResult {
        GenerationResult {
            invention: "Airplane".to_owned(),
            era: "Renaissance Era".to_owned(),
            deconstruction: Deconstruction {
                materials: ["Linen".into(), "Ash wood".into(), "Hemp".into(), "Pine resin".into()],
                concepts: ["Ornithopter".into(), "Lift".into(), "Pulleys".into(), "Kites".into()],
            },
            simulations: vec![Simulation {
                name: "The Aerial Screw".to_owned(),
                description: "A linen helix turned by four men.".to_owned(),
            }],
            narrative: "In 1493 a Florentine workshop...".to_owned(),
            image_url: "data:image/png;base64,AAAA".to_owned(),
            image_generated: true,
        }
    }

    #[test]
    fn result_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(sample()).unwrap_or_default();
        assert!(json.get("imageUrl").is_some());
        assert_eq!(json.get("imageGenerated"), Some(&serde_json::Value::Bool(true)));
        assert!(json.get("image_url").is_none());
    }

    #[test]
    fn headline_is_first_simulation() {
        let result = sample();
        assert_eq!(result.headline().map(|s| s.name.as_str()), Some("The Aerial Screw"));
    }

    #[test]
    fn deconstruction_rejects_wrong_length() {
        let json = serde_json::json!({
            "materials": ["a", "b", "c"],
            "concepts": ["a", "b", "c", "d"]
        });
        let parsed: Result<Deconstruction, _> = serde_json::from_value(json);
        assert!(parsed.is_err());
    }
}

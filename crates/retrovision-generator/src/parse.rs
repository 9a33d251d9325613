//! Validation of the structured payload embedded in the text response.
//!
//! The text model answers with JSON encoded as a string inside its
//! envelope. This module decodes that string against an explicit schema:
//! four materials, four concepts, at least one simulation, a narrative and a
//! non-blank image prompt. Anything else is a
//! [`GenerateError::MalformedResponse`].

use retrovision_types::{Deconstruction, GenerationResult, Simulation};
use serde::Deserialize;

use crate::error::{GenerateError, Stage};

/// The validated payload of a text response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedGeneration {
    /// Era materials and concepts.
    pub deconstruction: Deconstruction,
    /// Reimagined versions. Never empty.
    pub simulations: Vec<Simulation>,
    /// Historical account.
    pub narrative: String,
    /// Prompt for the image call. Never blank.
    pub image_prompt: String,
}

impl ParsedGeneration {
    /// Merge with the request inputs and the image reference.
    pub fn into_result(self, invention: &str, era: &str, image_url: String) -> GenerationResult {
        GenerationResult {
            invention: invention.to_owned(),
            era: era.to_owned(),
            deconstruction: self.deconstruction,
            simulations: self.simulations,
            narrative: self.narrative,
            image_url,
            image_generated: true,
        }
    }
}

/// The model's JSON, before semantic checks.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPayload {
    deconstruction: Deconstruction,
    simulations: Vec<Simulation>,
    narrative: String,
    image_prompt: String,
}

/// Parse the text model's answer into a [`ParsedGeneration`].
///
/// Accepts the JSON bare or wrapped in a markdown code block.
pub fn parse_generation(raw: &str) -> Result<ParsedGeneration, GenerateError> {
    let trimmed = raw.trim();

    let parsed = match serde_json::from_str::<RawPayload>(trimmed) {
        Ok(parsed) => parsed,
        Err(direct_err) => {
            let Some(inner) = extract_json_from_codeblock(trimmed) else {
                return Err(GenerateError::malformed(Stage::Text, direct_err.to_string()));
            };
            serde_json::from_str::<RawPayload>(inner)
                .map_err(|e| GenerateError::malformed(Stage::Text, e.to_string()))?
        }
    };

    validate(parsed)
}

fn validate(raw: RawPayload) -> Result<ParsedGeneration, GenerateError> {
    if raw.simulations.is_empty() {
        return Err(GenerateError::malformed(Stage::Text, "simulations is empty"));
    }
    let image_prompt = raw.image_prompt.trim();
    if image_prompt.is_empty() {
        return Err(GenerateError::malformed(Stage::Text, "imagePrompt is blank"));
    }

    Ok(ParsedGeneration {
        deconstruction: raw.deconstruction,
        simulations: raw.simulations,
        narrative: raw.narrative,
        image_prompt: image_prompt.to_owned(),
    })
}

/// Return the body of the first fenced code block, if any.
fn extract_json_from_codeblock(text: &str) -> Option<&str> {
    let start = text.find("```")?;
    let after_fence = text.get(start.checked_add(3)?..)?;
    // Skip an optional language tag such as `json`.
    let body_start = after_fence.find('\n').map_or(0, |i| i.saturating_add(1));
    let body = after_fence.get(body_start..)?;
    let end = body.find("```")?;
    body.get(..end).map(str::trim)
}

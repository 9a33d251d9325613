//! Prompt template loading and request payload construction.
//!
//! The text prompt is rendered from two `minijinja` templates: `system`
//! (the historian instruction and JSON schema, independent of input) and
//! `user` (the invention and era). Built-in copies are compiled in;
//! operators can override both by pointing the generator at a directory
//! containing `system.j2` and `user.j2`.

use minijinja::Environment;
use serde::Serialize;

use crate::error::{ConfigError, GenerateError};

const BUILTIN_SYSTEM: &str = include_str!("../templates/system.j2");
const BUILTIN_USER: &str = include_str!("../templates/user.j2");

/// Images requested per generation.
const SAMPLE_COUNT: u32 = 1;

/// Renders the text-generation prompt.
pub struct PromptEngine {
    env: Environment<'static>,
}

/// The two halves of a rendered text prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPrompt {
    /// Instruction establishing the task and the JSON response schema.
    pub system_instruction: String,
    /// `Invention: "<name>", Era: "<era>".`
    pub user_query: String,
}

/// Body of an image-generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRequestPayload {
    /// One instance per prompt.
    pub instances: Vec<ImageInstance>,
    /// Sampling parameters.
    pub parameters: ImageParameters,
}

/// A single image prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageInstance {
    /// The prompt text.
    pub prompt: String,
}

/// Image sampling parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageParameters {
    /// Number of images to produce. Always 1.
    pub sample_count: u32,
}

impl PromptEngine {
    /// Engine using the compiled-in templates.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_sources(BUILTIN_SYSTEM.to_owned(), BUILTIN_USER.to_owned())
    }

    /// Engine loading `system.j2` and `user.j2` from `templates_dir`.
    pub fn from_dir(templates_dir: &str) -> Result<Self, ConfigError> {
        let system = load_template(templates_dir, "system.j2")?;
        let user = load_template(templates_dir, "user.j2")?;
        Self::from_sources(system, user)
    }

    fn from_sources(system: String, user: String) -> Result<Self, ConfigError> {
        let mut env = Environment::new();
        env.add_template_owned("system", system)
            .map_err(|e| ConfigError::Template(format!("failed to add system template: {e}")))?;
        env.add_template_owned("user", user)
            .map_err(|e| ConfigError::Template(format!("failed to add user template: {e}")))?;
        Ok(Self { env })
    }

    /// Render the prompt for one invention and era.
    ///
    /// Callers validate the inputs first; this only renders.
    pub fn build_text_prompt(
        &self,
        invention: &str,
        era: &str,
    ) -> Result<TextPrompt, GenerateError> {
        let ctx = minijinja::context! { invention => invention, era => era };

        let system_instruction = self
            .env
            .get_template("system")
            .map_err(|e| GenerateError::Prompt(format!("missing system template: {e}")))?
            .render(&ctx)
            .map_err(|e| GenerateError::Prompt(format!("system render failed: {e}")))?;

        let user_query = self
            .env
            .get_template("user")
            .map_err(|e| GenerateError::Prompt(format!("missing user template: {e}")))?
            .render(&ctx)
            .map_err(|e| GenerateError::Prompt(format!("user render failed: {e}")))?;

        Ok(TextPrompt {
            system_instruction,
            user_query,
        })
    }
}

/// Body of a text-generation request, asking for a JSON-only answer.
pub fn text_payload(prompt: &TextPrompt) -> serde_json::Value {
    serde_json::json!({
        "contents": [
            {"parts": [{"text": prompt.user_query}]}
        ],
        "systemInstruction": {
            "parts": [{"text": prompt.system_instruction}]
        },
        "generationConfig": {"responseMimeType": "application/json"}
    })
}

/// Wrap an image prompt into the image endpoint's request shape.
pub fn build_image_prompt(image_prompt: &str) -> Result<ImageRequestPayload, GenerateError> {
    if image_prompt.trim().is_empty() {
        return Err(GenerateError::Validation("image prompt is empty".to_owned()));
    }
    Ok(ImageRequestPayload {
        instances: vec![ImageInstance {
            prompt: image_prompt.to_owned(),
        }],
        parameters: ImageParameters {
            sample_count: SAMPLE_COUNT,
        },
    })
}

/// Read a template file from disk.
fn load_template(dir: &str, filename: &str) -> Result<String, ConfigError> {
    let path = format!("{dir}/{filename}");
    std::fs::read_to_string(&path)
        .map_err(|e| ConfigError::Template(format!("failed to read {path}: {e}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use retrovision_core::catalog;

    use super::*;

    #[test]
    fn user_query_contains_inputs_verbatim() {
        let engine = PromptEngine::builtin().unwrap();
        for era in catalog::eras() {
            for invention in ["Smartphone", "3D \"printer\"", "Café <robot> & co"] {
                let prompt = engine.build_text_prompt(invention, &era.name).unwrap();
                assert_eq!(
                    prompt.user_query,
                    format!("Invention: \"{invention}\", Era: \"{}\".", era.name)
                );
            }
        }
    }

    #[test]
    fn system_instruction_is_input_independent() {
        let engine = PromptEngine::builtin().unwrap();
        let a = engine.build_text_prompt("Smartphone", "Victorian Era").unwrap();
        let b = engine.build_text_prompt("Airplane", "Ancient Era").unwrap();
        assert_eq!(a.system_instruction, b.system_instruction);
        assert!(a.system_instruction.contains("\"imagePrompt\""));
        assert!(a.system_instruction.contains("Respond ONLY with a valid JSON object."));
    }

    #[test]
    fn builtin_templates_load() {
        assert!(PromptEngine::builtin().is_ok());
    }

    #[test]
    fn text_payload_shape() {
        let prompt = TextPrompt {
            system_instruction: "sys".to_owned(),
            user_query: "user".to_owned(),
        };
        let payload = text_payload(&prompt);
        assert_eq!(payload["contents"][0]["parts"][0]["text"], "user");
        assert_eq!(payload["systemInstruction"]["parts"][0]["text"], "sys");
        assert_eq!(payload["generationConfig"]["responseMimeType"], "application/json");
    }

    #[test]
    fn image_payload_shape() {
        let payload = build_image_prompt("a brass telephone, sepia").unwrap();
        let json = serde_json::to_value(payload).unwrap();
        assert_eq!(json["instances"][0]["prompt"], "a brass telephone, sepia");
        assert_eq!(json["parameters"]["sampleCount"], 1);
    }

    #[test]
    fn empty_image_prompt_is_rejected() {
        assert!(build_image_prompt("  ").is_err());
    }

    #[test]
    fn templates_load_from_directory() {
        let unique = format!(
            "retrovision_test_templates_{}_{:?}",
            std::process::id(),
            std::thread::current().id(),
        );
        let dir = std::env::temp_dir().join(unique);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("system.j2"), "Be brief.").unwrap();
        std::fs::write(dir.join("user.j2"), "{{ invention }} in the {{ era }}").unwrap();

        let engine = PromptEngine::from_dir(dir.to_str().unwrap()).unwrap();
        let prompt = engine.build_text_prompt("Radio", "Medieval Era").unwrap();
        assert_eq!(prompt.system_instruction, "Be brief.");
        assert_eq!(prompt.user_query, "Radio in the Medieval Era");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_template_directory_is_an_error() {
        let dir = std::env::temp_dir().join("retrovision_templates_that_do_not_exist");
        assert!(PromptEngine::from_dir(dir.to_str().unwrap()).is_err());
    }
}

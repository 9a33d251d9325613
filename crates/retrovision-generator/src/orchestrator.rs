//! The end-to-end generation: text call, payload validation, image call.
//!
//! # Pipeline
//!
//! ```text
//! validate --> text prompt --> text endpoint --> parse payload
//!          --> image payload --> image endpoint --> data URI --> result
//! ```
//!
//! The two calls are strictly sequential: the image prompt only exists once
//! the text response has been parsed. The first failure ends the pipeline
//! and nothing partial is returned.

use retrovision_core::catalog;
use retrovision_types::{GenerationRequest, GenerationResult};
use tracing::{debug, info, warn};

use crate::backend::{ImageBackend, TextBackend};
use crate::config::GeneratorConfig;
use crate::error::{ConfigError, GenerateError};
use crate::image::to_data_uri;
use crate::parse::parse_generation;
use crate::prompt::{PromptEngine, build_image_prompt, text_payload};

/// Runs generations against the configured endpoints.
pub struct Generator {
    prompts: PromptEngine,
    text: TextBackend,
    image: ImageBackend,
}

impl Generator {
    /// Build a generator from configuration.
    ///
    /// Loads prompt templates (from disk when `templates_dir` is set) and
    /// creates one HTTP client shared by both endpoints.
    pub fn new(config: &GeneratorConfig) -> Result<Self, ConfigError> {
        let prompts = match &config.templates_dir {
            Some(dir) => PromptEngine::from_dir(dir)?,
            None => PromptEngine::builtin()?,
        };

        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;

        Ok(Self {
            prompts,
            text: TextBackend::new(
                client.clone(),
                &config.text_api_url,
                &config.api_key,
                config.request_timeout,
            ),
            image: ImageBackend::new(
                client,
                &config.image_api_url,
                &config.api_key,
                config.request_timeout,
            ),
        })
    }

    /// Run the generation described by a session request.
    pub async fn run(&self, request: &GenerationRequest) -> Result<GenerationResult, GenerateError> {
        self.generate(&request.invention, &request.era).await
    }

    /// Generate a result for `invention` reimagined in `era`.
    ///
    /// # Errors
    ///
    /// - [`GenerateError::Validation`] for an empty invention or an unknown
    ///   era; no network call is made.
    /// - [`GenerateError::Upstream`] when either call fails or times out.
    /// - [`GenerateError::MalformedResponse`] when either response does not
    ///   match its schema. A malformed text response stops the pipeline
    ///   before the image call.
    pub async fn generate(
        &self,
        invention: &str,
        era: &str,
    ) -> Result<GenerationResult, GenerateError> {
        let invention = invention.trim();
        if invention.is_empty() {
            return Err(GenerateError::Validation("invention must not be empty".to_owned()));
        }
        if !catalog::is_known_era(era) {
            return Err(GenerateError::Validation(format!("unknown era: {era}")));
        }

        info!(invention, era, "generation started");

        let prompt = self.prompts.build_text_prompt(invention, era)?;
        let answer = self.text.complete(&text_payload(&prompt)).await?;
        let parsed = parse_generation(&answer).inspect_err(|e| {
            warn!(error = %e, raw_response = answer.as_str(), "text response rejected");
        })?;
        debug!(
            simulations = parsed.simulations.len(),
            "text response parsed"
        );

        let image_payload = build_image_prompt(&parsed.image_prompt)?;
        let blob = self.image.render(&image_payload).await?;
        let image_url = to_data_uri(&blob)?;

        info!(invention, era, "generation finished");
        Ok(parsed.into_result(invention, era, image_url))
    }
}

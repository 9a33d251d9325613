//! Configuration for the generator.
//!
//! All configuration is loaded from environment variables. The API key has
//! no default and is never printed, not even through `Debug`.

use std::time::Duration;

use crate::error::ConfigError;

/// Default text-generation endpoint.
pub const DEFAULT_TEXT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash-preview-05-20:generateContent";

/// Default image-generation endpoint.
pub const DEFAULT_IMAGE_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/imagen-3.0-generate-002:predict";

/// Default per-call deadline in milliseconds.
const DEFAULT_TIMEOUT_MS: u64 = 60_000;

/// Complete generator configuration.
#[derive(Clone)]
pub struct GeneratorConfig {
    /// API key appended to both endpoint URLs as the `key` query parameter.
    pub api_key: String,
    /// Text-generation endpoint URL.
    pub text_api_url: String,
    /// Image-generation endpoint URL.
    pub image_api_url: String,
    /// Deadline applied to each upstream call separately.
    pub request_timeout: Duration,
    /// Directory with `system.j2` and `user.j2` overriding the built-in
    /// prompt templates.
    pub templates_dir: Option<String>,
}

impl GeneratorConfig {
    /// Configuration with default endpoints and timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            text_api_url: DEFAULT_TEXT_API_URL.to_owned(),
            image_api_url: DEFAULT_IMAGE_API_URL.to_owned(),
            request_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            templates_dir: None,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Required variables:
    /// - `RETROVISION_API_KEY` -- key for both generative endpoints
    ///
    /// Optional variables:
    /// - `RETROVISION_TEXT_API_URL` -- text endpoint (default: Gemini `generateContent`)
    /// - `RETROVISION_IMAGE_API_URL` -- image endpoint (default: Imagen `predict`)
    /// - `RETROVISION_REQUEST_TIMEOUT_MS` -- per-call deadline (default 60000)
    /// - `RETROVISION_TEMPLATES_DIR` -- prompt template override directory
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("RETROVISION_API_KEY")
            .map_err(|_e| ConfigError::Missing("RETROVISION_API_KEY".to_owned()))?;
        if api_key.trim().is_empty() {
            return Err(ConfigError::Invalid {
                name: "RETROVISION_API_KEY".to_owned(),
                detail: "must not be empty".to_owned(),
            });
        }

        let text_api_url = std::env::var("RETROVISION_TEXT_API_URL")
            .unwrap_or_else(|_| DEFAULT_TEXT_API_URL.to_owned());
        let image_api_url = std::env::var("RETROVISION_IMAGE_API_URL")
            .unwrap_or_else(|_| DEFAULT_IMAGE_API_URL.to_owned());

        let timeout_ms = parse_timeout_ms(std::env::var("RETROVISION_REQUEST_TIMEOUT_MS").ok())?;

        let templates_dir = std::env::var("RETROVISION_TEMPLATES_DIR").ok();

        Ok(Self {
            api_key,
            text_api_url,
            image_api_url,
            request_timeout: Duration::from_millis(timeout_ms),
            templates_dir,
        })
    }
}

impl core::fmt::Debug for GeneratorConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GeneratorConfig")
            .field("api_key", &"<redacted>")
            .field("text_api_url", &self.text_api_url)
            .field("image_api_url", &self.image_api_url)
            .field("request_timeout", &self.request_timeout)
            .field("templates_dir", &self.templates_dir)
            .finish()
    }
}

/// Parse the timeout override, falling back to the default when unset.
fn parse_timeout_ms(raw: Option<String>) -> Result<u64, ConfigError> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_TIMEOUT_MS);
    };
    let ms: u64 = raw.trim().parse().map_err(|e| ConfigError::Invalid {
        name: "RETROVISION_REQUEST_TIMEOUT_MS".to_owned(),
        detail: format!("{e}"),
    })?;
    if ms == 0 {
        return Err(ConfigError::Invalid {
            name: "RETROVISION_REQUEST_TIMEOUT_MS".to_owned(),
            detail: "must be greater than zero".to_owned(),
        });
    }
    Ok(ms)
}

//! Error types for configuration and generation.
//!
//! [`GenerateError`] is the single failure type of
//! [`Generator::generate`](crate::Generator::generate). Every failure at any
//! step surfaces as exactly one of its variants; no partial result escapes.

use retrovision_types::FailureKind;

/// Which upstream call a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// The text-generation call.
    Text,
    /// The image-generation call.
    Image,
}

impl core::fmt::Display for Stage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Image => f.write_str("image"),
        }
    }
}

/// Why an upstream call failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamReason {
    /// The endpoint answered with a non-success HTTP status.
    Status(u16),
    /// The call exceeded the configured deadline.
    Timeout,
    /// The request could not be sent or the body could not be read.
    Transport(String),
}

impl core::fmt::Display for UpstreamReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Status(code) => write!(f, "status {code}"),
            Self::Timeout => f.write_str("timeout"),
            Self::Transport(detail) => write!(f, "transport error: {detail}"),
        }
    }
}

/// Errors produced by a generation.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// The request was rejected before any network call.
    #[error("validation error: {0}")]
    Validation(String),

    /// An upstream call did not succeed.
    #[error("{stage} generation failed: {reason}")]
    Upstream {
        /// The failing call.
        stage: Stage,
        /// What went wrong.
        reason: UpstreamReason,
    },

    /// An upstream response did not have the expected shape.
    #[error("{stage} response malformed: {detail}")]
    MalformedResponse {
        /// The call whose response was rejected.
        stage: Stage,
        /// Which check failed.
        detail: String,
    },

    /// A prompt template failed to render.
    #[error("prompt render error: {0}")]
    Prompt(String),
}

impl GenerateError {
    /// Shorthand for a [`GenerateError::MalformedResponse`].
    pub fn malformed(stage: Stage, detail: impl Into<String>) -> Self {
        Self::MalformedResponse {
            stage,
            detail: detail.into(),
        }
    }

    /// Coarse kind, for user-facing messaging.
    ///
    /// Prompt rendering happens before any network call, so it reports as
    /// a validation failure.
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Validation(_) | Self::Prompt(_) => FailureKind::Validation,
            Self::Upstream { .. } => FailureKind::Upstream,
            Self::MalformedResponse { .. } => FailureKind::MalformedResponse,
        }
    }

    /// The HTTP status carried by an upstream failure, if any.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream {
                reason: UpstreamReason::Status(code),
                ..
            } => Some(*code),
            _ => None,
        }
    }
}

/// Errors raised while loading generator configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is unset.
    #[error("missing required env var {0}")]
    Missing(String),

    /// An environment variable has an unusable value.
    #[error("invalid {name}: {detail}")]
    Invalid {
        /// The variable name.
        name: String,
        /// Why it was rejected.
        detail: String,
    },

    /// Prompt templates could not be loaded.
    #[error("template error: {0}")]
    Template(String),

    /// The HTTP client could not be built.
    #[error("http client error: {0}")]
    Client(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_map_to_failure_kinds() {
        let validation = GenerateError::Validation("empty".to_owned());
        assert_eq!(validation.kind(), FailureKind::Validation);

        let upstream = GenerateError::Upstream {
            stage: Stage::Text,
            reason: UpstreamReason::Status(503),
        };
        assert_eq!(upstream.kind(), FailureKind::Upstream);
        assert_eq!(upstream.status(), Some(503));

        let malformed = GenerateError::malformed(Stage::Image, "no predictions");
        assert_eq!(malformed.kind(), FailureKind::MalformedResponse);
        assert_eq!(malformed.status(), None);
    }

    #[test]
    fn display_names_the_stage() {
        let err = GenerateError::Upstream {
            stage: Stage::Image,
            reason: UpstreamReason::Timeout,
        };
        assert_eq!(err.to_string(), "image generation failed: timeout");
    }
}

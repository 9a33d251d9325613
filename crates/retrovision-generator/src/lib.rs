//! Text and image generation for the Retro-Vision generator.
//!
//! A generation sends the invention and era to a text model, validates the
//! JSON it returns, sends the extracted image prompt to an image model, and
//! merges everything into a [`GenerationResult`].
//!
//! # Architecture
//!
//! ```text
//! PromptEngine --> TextBackend --> parse --> ImageBackend --> image --> GenerationResult
//! ```
//!
//! - [`config`] -- environment configuration (API key, endpoints, timeout)
//! - [`prompt`] -- `minijinja` prompt templates and request payloads
//! - [`backend`] -- `reqwest` clients and envelope extraction
//! - [`parse`] -- schema validation of the text payload
//! - [`image`] -- base64 validation and `data:` URI construction
//! - [`orchestrator`] -- the sequential pipeline
//!
//! [`GenerationResult`]: retrovision_types::GenerationResult

pub mod backend;
pub mod config;
pub mod error;
pub mod image;
pub mod orchestrator;
pub mod parse;
pub mod prompt;

pub use config::GeneratorConfig;
pub use error::{ConfigError, GenerateError, Stage, UpstreamReason};
pub use orchestrator::Generator;

//! Shared type definitions for the Retro-Vision generator.
//!
//! Types defined here are used by the session state machine, the
//! generator, and the HTTP service, and flow to `TypeScript` via `ts-rs`
//! for front ends.
//!
//! # Modules
//!
//! - [`ids`] -- UUID wrapper for request identifiers
//! - [`enums`] -- View states and failure kinds
//! - [`era`] -- Historical era metadata
//! - [`generation`] -- Generation requests and results
//! - [`snapshot`] -- Session projection served to front ends

pub mod enums;
pub mod era;
pub mod generation;
pub mod ids;
pub mod snapshot;

pub use enums::{FailureKind, ViewState};
pub use era::Era;
pub use generation::{
    DECONSTRUCTION_ITEMS, Deconstruction, GenerationRequest, GenerationResult, Simulation,
};
pub use ids::RequestId;
pub use snapshot::SessionSnapshot;

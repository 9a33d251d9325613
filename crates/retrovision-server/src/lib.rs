//! Session API server for the Retro-Vision generator.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **JSON endpoints** for driving the session (navigation, form edits,
//!   submit) and reading its snapshot
//! - **A server-rendered page** (`GET /`) for the current view, with
//!   plain form posts for every action
//!
//! # Architecture
//!
//! The server owns exactly one [`Session`](retrovision_core::Session)
//! behind a lock. Handlers translate requests into session actions; a
//! submit starts the generation on a background task, and its outcome is
//! fed back through the same reducer, which drops it if the user has
//! moved on in the meantime.

pub mod error;
pub mod handlers;
pub mod pages;
pub mod router;
pub mod server;
pub mod state;

pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::{AppState, Applied, FormUpdate};

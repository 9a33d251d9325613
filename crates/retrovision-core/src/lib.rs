//! Era catalog and session state machine for the Retro-Vision generator.
//!
//! This crate holds everything that does not talk to the network:
//!
//! - [`catalog`] -- static era list, default era, canned example result
//! - [`session`] -- the view state machine, driven by a single reducer
//!
//! The generator crate runs the upstream calls requested by
//! [`session::Effect::Generate`]; the server crate owns the session value
//! and feeds completions back in.

pub mod catalog;
pub mod session;

pub use session::{Action, Effect, FormState, ResultsPane, Screen, Session, Transition};

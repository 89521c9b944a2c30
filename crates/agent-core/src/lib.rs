//! Core abstractions for the news agent workspace
//!
//! This crate defines the traits and types shared by every other crate:
//! the [`Agent`] trait the console loop talks to, the per-turn [`Context`],
//! and the common [`Error`] type.

pub mod agent;
pub mod context;
pub mod error;

pub use agent::Agent;
pub use context::Context;
pub use error::{Error, Result};

//! Tool framework for the news agent
//!
//! The set of tools is closed: every tool has a [`ToolId`], takes one text
//! argument and returns text. The [`ToolRegistry`] maps ids to
//! implementations and resolves the names the model writes back.

pub mod error;
pub mod id;
pub mod registry;
pub mod tool;

pub use error::{Result, ToolError};
pub use id::ToolId;
pub use registry::ToolRegistry;
pub use tool::Tool;

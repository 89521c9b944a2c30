//! Tool errors

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ToolError>;

/// Errors raised while resolving or feeding a tool
///
/// Tools themselves never fail: their problems come back as text. These
/// errors are about the model asking for something that cannot be run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    /// The model named a tool that does not exist
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// The tool exists but is not registered
    #[error("Tool not registered: {0}")]
    NotRegistered(String),

    /// The arguments do not carry the expected text input
    #[error("Invalid input for {tool}: {reason}")]
    InvalidInput { tool: String, reason: String },
}

impl From<ToolError> for agent_core::Error {
    fn from(err: ToolError) -> Self {
        agent_core::Error::ParseFailed(err.to_string())
    }
}

//! Error types for news retrieval and the console agent

use thiserror::Error;

/// News agent errors
#[derive(Debug, Error)]
pub enum NewsError {
    /// The search provider answered with something unusable
    #[error("Search error: {0}")]
    Search(String),

    /// The search provider is throttling us
    #[error("Rate limited by {provider}")]
    RateLimited { provider: String },

    /// Search call took longer than the configured bound
    #[error("Search timed out after {secs}s")]
    Timeout { secs: u64 },

    /// Network or HTTP error
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    /// Console I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required credential is absent
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Prompt template error
    #[error("Prompt error: {0}")]
    Prompt(#[from] agent_prompt::PromptError),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Result type alias for news operations
pub type Result<T> = std::result::Result<T, NewsError>;

impl From<NewsError> for agent_core::Error {
    fn from(err: NewsError) -> Self {
        agent_core::Error::ProcessingFailed(err.to_string())
    }
}

impl From<agent_core::Error> for NewsError {
    fn from(err: agent_core::Error) -> Self {
        NewsError::Other(err.to_string())
    }
}

impl From<agent_utils::ConfigError> for NewsError {
    fn from(err: agent_utils::ConfigError) -> Self {
        match err {
            agent_utils::ConfigError::Missing { key } => NewsError::MissingCredential(key),
            other => NewsError::Config(other.to_string()),
        }
    }
}

impl From<agent_llm::LLMError> for NewsError {
    fn from(err: agent_llm::LLMError) -> Self {
        NewsError::Other(err.to_string())
    }
}

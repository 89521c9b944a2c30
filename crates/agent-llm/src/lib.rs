//! LLM provider abstraction for the news agent
//!
//! - Message types for LLM communication
//! - Completion request/response types, including typed token usage
//! - Tool definitions for function calling
//! - The [`LLMProvider`] trait and the Gemini implementation

pub mod completion;
pub mod error;
pub mod messages;
pub mod provider;
pub mod providers;
pub mod tools;
pub mod usage;

// Re-export main types
pub use completion::{CompletionRequest, CompletionResponse, StopReason};
pub use error::{LLMError, Result};
pub use messages::{ContentBlock, Message, MessageContent, Role};
pub use provider::LLMProvider;
pub use providers::{GeminiConfig, GeminiProvider};
pub use tools::{MALFORMED_ARGUMENTS, ToolDefinition, malformed_arguments, malformed_arguments_raw};
pub use usage::{TokenUsage, UsageRecord};

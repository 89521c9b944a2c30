//! Gemini provider
//!
//! Talks to Gemini through Google's OpenAI-compatible chat completions
//! endpoint, so the wire format is the familiar `chat/completions` one.
//! See: https://ai.google.dev/gemini-api/docs/openai
//!
//! ```no_run
//! use agent_llm::{CompletionRequest, GeminiProvider, LLMProvider, Message};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! // Reads GOOGLE_API_KEY (and GEMINI_API_BASE if set)
//! let provider = GeminiProvider::from_env()?;
//!
//! let request = CompletionRequest::builder("gemini-2.0-flash")
//!     .add_message(Message::user("Hello!"))
//!     .temperature(0.0)
//!     .build();
//!
//! let response = provider.complete(request).await?;
//! println!("{}", response.message.text().unwrap_or_default());
//! # Ok(())
//! # }
//! ```

use crate::{
    CompletionRequest, CompletionResponse, ContentBlock, LLMError, LLMProvider, Message,
    MessageContent, Result, Role, StopReason, TokenUsage, ToolDefinition, malformed_arguments,
    malformed_arguments_raw,
};
use agent_utils::Config;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, instrument, warn};

pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Environment key holding the credential
pub const API_KEY_VAR: &str = "GOOGLE_API_KEY";
/// Environment key overriding the endpoint
pub const API_BASE_VAR: &str = "GEMINI_API_BASE";

/// Configuration for the Gemini provider
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,

    /// Base URL, without the trailing `/chat/completions`
    pub api_base: String,

    /// Request timeout in seconds (default: 120)
    pub timeout_secs: u64,
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Read `GOOGLE_API_KEY` (required) and `GEMINI_API_BASE` (optional)
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.require(API_KEY_VAR)?;
        let api_base = config.get_or(API_BASE_VAR, DEFAULT_GEMINI_API_BASE);

        Ok(Self::new(api_key).with_api_base(api_base))
    }

    /// Same as [`GeminiConfig::from_config`] over the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_config(&Config::from_env("gemini"))
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }
}

/// Gemini chat provider
pub struct GeminiProvider {
    client: Client,
    config: GeminiConfig,
}

impl GeminiProvider {
    pub fn with_config(config: GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(GeminiConfig::new(api_key))
    }

    pub fn from_env() -> Result<Self> {
        Self::with_config(GeminiConfig::from_env()?)
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }
}

#[async_trait]
impl LLMProvider for GeminiProvider {
    #[instrument(skip(self, request), fields(model = %request.model, messages = request.messages.len()))]
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let body = ChatRequest {
            model: request.model.clone(),
            messages: build_chat_messages(request.system, request.messages),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            tools: request.tools.as_deref().map(convert_tools),
        };

        debug!("POST {}", self.config.endpoint());
        let response = self
            .client
            .post(self.config.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Gemini request rejected");

            return Err(match status.as_u16() {
                401 | 403 => LLMError::AuthenticationFailed,
                429 => LLMError::RateLimitExceeded(error_text),
                400 => LLMError::InvalidRequest(error_text),
                404 => LLMError::ModelNotFound(request.model),
                _ => LLMError::RequestFailed(format!("HTTP {status}: {error_text}")),
            });
        }

        let raw = response.text().await?;
        parse_chat_response(&raw)
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<ChatTool>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<ChatToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

impl ChatMessage {
    fn text(role: &'static str, content: String) -> Self {
        Self {
            role,
            content: Some(content),
            tool_calls: None,
            tool_call_id: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatTool {
    #[serde(rename = "type")]
    tool_type: &'static str,
    function: ChatFunction,
}

#[derive(Debug, Serialize)]
struct ChatFunction {
    name: String,
    description: String,
    parameters: serde_json::Value,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatToolCall {
    #[serde(default)]
    id: Option<String>,
    #[serde(rename = "type", default = "function_type")]
    tool_type: String,
    function: ChatFunctionCall,
}

fn function_type() -> String {
    "function".to_string()
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatFunctionCall {
    name: String,
    #[serde(default)]
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<ChatToolCall>>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: Option<usize>,
    #[serde(default)]
    completion_tokens: Option<usize>,
    #[serde(default)]
    total_tokens: Option<usize>,
}

// ============================================================================
// Conversion functions
// ============================================================================

/// System prompt first, then every message flattened into chat messages
fn build_chat_messages(system: Option<String>, messages: Vec<Message>) -> Vec<ChatMessage> {
    let mut result = Vec::new();

    if let Some(sys) = system {
        result.push(ChatMessage::text("system", sys));
    }

    for msg in messages {
        result.extend(convert_message(msg));
    }

    result
}

fn role_name(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Assistant => "assistant",
        Role::System => "system",
    }
}

/// Tool results become one `tool` message each
fn convert_message(msg: Message) -> Vec<ChatMessage> {
    let role = role_name(msg.role);

    match msg.content {
        Some(MessageContent::Text(text)) => vec![ChatMessage::text(role, text)],
        Some(MessageContent::Blocks(blocks)) => convert_blocks(role, blocks),
        None => vec![ChatMessage::text(role, String::new())],
    }
}

fn convert_blocks(role: &'static str, blocks: Vec<ContentBlock>) -> Vec<ChatMessage> {
    let mut texts = Vec::new();
    let mut tool_calls = Vec::new();
    let mut tool_messages = Vec::new();

    for block in blocks {
        match block {
            ContentBlock::Text { text } => texts.push(text),
            ContentBlock::ToolUse { id, name, input } => {
                let arguments = match malformed_arguments_raw(&input) {
                    Some(raw) => raw.to_string(),
                    None => match input {
                        serde_json::Value::String(raw) => raw,
                        other => other.to_string(),
                    },
                };
                tool_calls.push(ChatToolCall {
                    id: Some(id),
                    tool_type: function_type(),
                    function: ChatFunctionCall { name, arguments },
                });
            }
            ContentBlock::ToolResult {
                tool_use_id,
                content,
                ..
            } => tool_messages.push(ChatMessage {
                role: "tool",
                content: Some(content),
                tool_calls: None,
                tool_call_id: Some(tool_use_id),
            }),
        }
    }

    let mut messages = Vec::new();
    if !texts.is_empty() || !tool_calls.is_empty() {
        messages.push(ChatMessage {
            role,
            content: if texts.is_empty() {
                None
            } else {
                Some(texts.join("\n"))
            },
            tool_calls: if tool_calls.is_empty() {
                None
            } else {
                Some(tool_calls)
            },
            tool_call_id: None,
        });
    }
    messages.extend(tool_messages);
    messages
}

fn convert_tools(tools: &[ToolDefinition]) -> Vec<ChatTool> {
    tools
        .iter()
        .map(|tool| ChatTool {
            tool_type: "function",
            function: ChatFunction {
                name: tool.name.clone(),
                description: tool.description.clone(),
                parameters: tool.input_schema.clone(),
            },
        })
        .collect()
}

/// Parse a raw response body
fn parse_chat_response(raw: &str) -> Result<CompletionResponse> {
    let response: ChatResponse = serde_json::from_str(raw)
        .map_err(|e| LLMError::UnexpectedResponse(format!("Failed to parse response: {e}")))?;

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| LLMError::UnexpectedResponse("No choices in response".to_string()))?;

    let usage = response.usage.map(|u| TokenUsage {
        input_tokens: u.prompt_tokens,
        output_tokens: u.completion_tokens,
        total_tokens: u.total_tokens,
    });

    let finish_reason = choice.finish_reason.unwrap_or_default();
    let message = convert_response_message(choice.message);

    // Gemini reports "stop" even when it asks for tools
    let stop_reason = if message.has_tool_uses() {
        StopReason::ToolUse
    } else {
        map_stop_reason(&finish_reason)
    };

    debug!(finish_reason = %finish_reason, ?stop_reason, ?usage, "Received completion");

    Ok(CompletionResponse {
        message,
        stop_reason,
        usage,
    })
}

/// Arguments that are not valid JSON are wrapped with
/// [`malformed_arguments`] for the executor to reject
fn convert_response_message(msg: ChatResponseMessage) -> Message {
    let mut blocks = Vec::new();

    if let Some(content) = msg.content.filter(|c| !c.is_empty()) {
        blocks.push(ContentBlock::Text { text: content });
    }

    for (i, call) in msg.tool_calls.unwrap_or_default().into_iter().enumerate() {
        let arguments = call.function.arguments;
        let input = if arguments.trim().is_empty() {
            serde_json::json!({})
        } else {
            serde_json::from_str(&arguments).unwrap_or_else(|_| malformed_arguments(arguments))
        };

        blocks.push(ContentBlock::ToolUse {
            id: call.id.unwrap_or_else(|| format!("call_{i}")),
            name: call.function.name,
            input,
        });
    }

    Message::assistant_blocks(blocks)
}

fn map_stop_reason(reason: &str) -> StopReason {
    match reason {
        "length" => StopReason::MaxTokens,
        "tool_calls" => StopReason::ToolUse,
        "stop" | "" => StopReason::EndTurn,
        other => {
            debug!("Unknown finish reason: {}", other);
            StopReason::EndTurn
        }
    }
}

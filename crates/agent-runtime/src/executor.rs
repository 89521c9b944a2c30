//! Agent executor for running agent loops
//!
//! The AgentExecutor implements the core agent loop pattern:
//! 1. Call the LLM with the conversation and the available tools
//! 2. If it asked for tools, run them, append the results and loop back
//! 3. If it answered in text, return that answer
//!
//! A model reply that cannot be acted on (unknown tool, bad arguments, an
//! empty reply) is fed back once as a corrective message when
//! `handle_parsing_errors` is on. A second one in the same turn is an error.

use agent_core::{Error, Result};
use agent_llm::{
    CompletionRequest, CompletionResponse, ContentBlock, LLMProvider, Message, StopReason,
    ToolDefinition, malformed_arguments_raw,
};
use agent_tools::{Tool, ToolError, ToolId, ToolRegistry};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Callbacks fired while a turn runs
///
/// Handlers return nothing, so whatever goes wrong inside one stays there.
#[async_trait]
pub trait ExecutorEventHandler: Send + Sync {
    /// Called after every model call with that call's response
    async fn on_llm_end(&self, _response: &CompletionResponse) {}

    /// Called before a tool runs
    async fn on_tool_start(&self, _call_id: &str, _tool: ToolId, _input: &str) {}

    /// Called after a tool returns
    async fn on_tool_done(&self, _call_id: &str, _tool: ToolId, _output: &str, _duration_ms: u64) {}

    /// Called with the final answer
    async fn on_complete(&self, _answer: &str) {}

    /// Called when the turn fails
    async fn on_error(&self, _error: &str) {}
}

/// Configuration for agent execution
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Maximum number of model calls per turn
    pub max_iterations: usize,

    pub model: String,

    pub system_prompt: Option<String>,

    /// Max tokens per completion
    pub max_tokens: usize,

    pub temperature: Option<f32>,

    /// Give the model one corrective pass per turn for replies that
    /// cannot be acted on
    pub handle_parsing_errors: bool,

    /// Answer returned when `max_iterations` runs out
    pub stopped_message: String,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            max_iterations: 8,
            model: "gemini-2.0-flash".to_string(),
            system_prompt: None,
            max_tokens: 2048,
            temperature: Some(0.0),
            handle_parsing_errors: true,
            stopped_message: "Agent stopped due to iteration limit.".to_string(),
        }
    }
}

/// Executes an agent loop: LLM → tool calls → execution → loop back
pub struct AgentExecutor {
    provider: Arc<dyn LLMProvider>,
    tools: ToolRegistry,
    config: ExecutorConfig,
    handlers: Vec<Arc<dyn ExecutorEventHandler>>,
}

impl AgentExecutor {
    pub fn new(provider: Arc<dyn LLMProvider>, tools: ToolRegistry, config: ExecutorConfig) -> Self {
        Self {
            provider,
            tools,
            config,
            handlers: Vec::new(),
        }
    }

    /// Attach an event handler. Handlers run in the order they were added.
    pub fn with_event_handler(mut self, handler: Arc<dyn ExecutorEventHandler>) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Run one turn for `instruction` and return the final answer
    pub async fn run(&self, instruction: String) -> Result<String> {
        let mut conversation = vec![Message::user(instruction)];
        let mut corrections_left = usize::from(self.config.handle_parsing_errors);
        let tools = self.build_tool_definitions();

        for iteration in 1..=self.config.max_iterations {
            info!(
                iteration,
                max_iterations = self.config.max_iterations,
                "Agent iteration started"
            );

            let mut builder = CompletionRequest::builder(&self.config.model)
                .messages(conversation.clone())
                .max_tokens(self.config.max_tokens)
                .tools(tools.clone());
            if let Some(system) = &self.config.system_prompt {
                builder = builder.system(system.clone());
            }
            if let Some(temperature) = self.config.temperature {
                builder = builder.temperature(temperature);
            }

            let response = match self.provider.complete(builder.build()).await {
                Ok(response) => response,
                Err(e) => {
                    let err = Error::from(e);
                    self.emit_error(&err).await;
                    return Err(err);
                }
            };

            for handler in &self.handlers {
                handler.on_llm_end(&response).await;
            }

            info!(
                stop_reason = ?response.stop_reason,
                tool_calls = response.message.tool_uses().len(),
                "LLM response received"
            );
            conversation.push(response.message.clone());

            if response.message.has_tool_uses() {
                let (results, failure) = self.execute_tools(&response.message).await;
                conversation.push(Message::tool_results(results));

                if let Some(problem) = failure {
                    self.spend_correction(&mut corrections_left, &problem).await?;
                }
                continue;
            }

            match response.message.text().filter(|t| !t.trim().is_empty()) {
                Some(answer) => {
                    if response.stop_reason == StopReason::MaxTokens {
                        warn!("Answer truncated at the token limit");
                    }
                    info!(iteration, answer_length = answer.len(), "Agent completed");
                    for handler in &self.handlers {
                        handler.on_complete(&answer).await;
                    }
                    return Ok(answer);
                }
                None => {
                    let problem = "the reply had neither text nor a tool call".to_string();
                    self.spend_correction(&mut corrections_left, &problem).await?;
                    conversation.push(Message::user(self.correction_prompt(&problem)));
                }
            }
        }

        warn!(
            max_iterations = self.config.max_iterations,
            "Max iterations reached, stopping"
        );
        let stopped = self.config.stopped_message.clone();
        for handler in &self.handlers {
            handler.on_complete(&stopped).await;
        }
        Ok(stopped)
    }

    fn build_tool_definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .list()
            .iter()
            .map(|tool| {
                ToolDefinition::new(tool.id().as_str(), tool.description(), tool.input_schema())
            })
            .collect()
    }

    /// Run every tool call in `message`, in order
    ///
    /// Calls that cannot run get an error result carrying a corrective
    /// message; the first such problem is returned alongside the results.
    async fn execute_tools(&self, message: &Message) -> (Vec<ContentBlock>, Option<String>) {
        let mut results = Vec::new();
        let mut failure = None;

        for block in message.tool_uses() {
            let ContentBlock::ToolUse { id, name, input } = block else {
                continue;
            };

            match self.prepare_call(name, input) {
                Ok((tool, text)) => {
                    let output = self.call_tool(id, tool.as_ref(), &text).await;
                    results.push(ContentBlock::ToolResult {
                        tool_use_id: id.clone(),
                        content: output,
                        is_error: None,
                    });
                }
                Err(e) => {
                    warn!(tool_name = %name, error = %e, "Cannot run tool call");
                    let problem = e.to_string();
                    results.push(ContentBlock::ToolResult {
                        tool_use_id: id.clone(),
                        content: self.correction_prompt(&problem),
                        is_error: Some(true),
                    });
                    failure.get_or_insert(problem);
                }
            }
        }

        (results, failure)
    }

    fn prepare_call(
        &self,
        name: &str,
        input: &Value,
    ) -> std::result::Result<(Arc<dyn Tool>, String), ToolError> {
        let tool = self.tools.resolve(name)?;
        let text = extract_input(tool.id(), input)?;
        Ok((tool, text))
    }

    async fn call_tool(&self, call_id: &str, tool: &dyn Tool, input: &str) -> String {
        let id = tool.id();
        let input_preview: String = input.chars().take(200).collect();
        info!(tool = %id, call_id, input = %input_preview, "Executing tool");

        for handler in &self.handlers {
            handler.on_tool_start(call_id, id, input).await;
        }

        let started = Instant::now();
        let output = tool.call(input).await;
        let duration_ms = started.elapsed().as_millis() as u64;

        let output_preview: String = output.chars().take(300).collect();
        debug!(tool = %id, duration_ms, output = %output_preview, "Tool finished");

        for handler in &self.handlers {
            handler.on_tool_done(call_id, id, &output, duration_ms).await;
        }

        output
    }

    async fn spend_correction(&self, corrections_left: &mut usize, problem: &str) -> Result<()> {
        if *corrections_left == 0 {
            let err = Error::ParseFailed(problem.to_string());
            self.emit_error(&err).await;
            return Err(err);
        }
        *corrections_left -= 1;
        warn!(problem, "Feeding a correction back to the model");
        Ok(())
    }

    fn correction_prompt(&self, problem: &str) -> String {
        let names: Vec<&str> = self.tools.ids().into_iter().map(ToolId::as_str).collect();
        format!(
            "Invalid response: {problem}. Either call one of [{}] with arguments \
             {{\"input\": \"<text>\"}}, or reply with the final answer as plain text.",
            names.join(", ")
        )
    }

    async fn emit_error(&self, err: &Error) {
        let message = err.to_string();
        warn!(error = %message, "Agent turn failed");
        for handler in &self.handlers {
            handler.on_error(&message).await;
        }
    }
}

/// Pull the text argument out of a tool call
///
/// Accepts `{"input": "..."}`, an object with a single string property, or
/// a bare JSON string. Arguments the provider could not parse as JSON are
/// rejected.
pub fn extract_input(tool: ToolId, input: &Value) -> std::result::Result<String, ToolError> {
    let invalid = |reason: &str| ToolError::InvalidInput {
        tool: tool.to_string(),
        reason: reason.to_string(),
    };

    if let Some(raw) = malformed_arguments_raw(input) {
        return Err(invalid(&format!("arguments are not valid JSON: {raw}")));
    }

    match input {
        Value::String(text) => Ok(text.clone()),
        Value::Object(map) => {
            if let Some(value) = map.get("input") {
                return value
                    .as_str()
                    .map(str::to_string)
                    .ok_or_else(|| invalid("\"input\" must be a string"));
            }
            match (map.len(), map.values().next()) {
                (1, Some(Value::String(text))) => Ok(text.clone()),
                _ => Err(invalid("expected an object with a string \"input\" field")),
            }
        }
        _ => Err(invalid("expected an object with a string \"input\" field")),
    }
}

/// Builder for AgentExecutor
pub struct AgentExecutorBuilder {
    provider: Option<Arc<dyn LLMProvider>>,
    tools: ToolRegistry,
    config: ExecutorConfig,
    handlers: Vec<Arc<dyn ExecutorEventHandler>>,
}

impl AgentExecutorBuilder {
    pub fn new() -> Self {
        Self {
            provider: None,
            tools: ToolRegistry::new(),
            config: ExecutorConfig::default(),
            handlers: Vec::new(),
        }
    }

    pub fn provider(mut self, provider: Arc<dyn LLMProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn tools(mut self, tools: ToolRegistry) -> Self {
        self.tools = tools;
        self
    }

    pub fn config(mut self, config: ExecutorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn max_iterations(mut self, max: usize) -> Self {
        self.config.max_iterations = max;
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = Some(prompt.into());
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.config.temperature = Some(temperature);
        self
    }

    pub fn handle_parsing_errors(mut self, enabled: bool) -> Self {
        self.config.handle_parsing_errors = enabled;
        self
    }

    pub fn stopped_message(mut self, message: impl Into<String>) -> Self {
        self.config.stopped_message = message.into();
        self
    }

    pub fn event_handler(mut self, handler: Arc<dyn ExecutorEventHandler>) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn build(self) -> Result<AgentExecutor> {
        let provider = self
            .provider
            .ok_or_else(|| Error::InitializationFailed("Provider not set".to_string()))?;

        if self.config.max_iterations == 0 {
            return Err(Error::InitializationFailed(
                "max_iterations must be at least 1".to_string(),
            ));
        }

        let executor = AgentExecutor::new(provider, self.tools, self.config);
        Ok(self
            .handlers
            .into_iter()
            .fold(executor, AgentExecutor::with_event_handler))
    }
}

impl Default for AgentExecutorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use agent_llm::{LLMError, TokenUsage, malformed_arguments};
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays canned responses and records every request
    pub(crate) struct ScriptedProvider {
        replies: Mutex<VecDeque<agent_llm::Result<CompletionResponse>>>,
        pub(crate) requests: Mutex<Vec<CompletionRequest>>,
    }

    impl ScriptedProvider {
        pub(crate) fn new(replies: Vec<agent_llm::Result<CompletionResponse>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LLMProvider for ScriptedProvider {
        async fn complete(&self, request: CompletionRequest) -> agent_llm::Result<CompletionResponse> {
            self.requests.lock().unwrap().push(request);
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(text_reply("script exhausted")))
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    pub(crate) fn text_reply(text: &str) -> CompletionResponse {
        CompletionResponse {
            message: Message::assistant_blocks(vec![ContentBlock::Text {
                text: text.to_string(),
            }]),
            stop_reason: StopReason::EndTurn,
            usage: Some(TokenUsage::total(10)),
        }
    }

    pub(crate) fn tool_reply(name: &str, input: Value) -> CompletionResponse {
        CompletionResponse {
            message: Message::assistant_blocks(vec![ContentBlock::ToolUse {
                id: format!("call_{name}"),
                name: name.to_string(),
                input,
            }]),
            stop_reason: StopReason::ToolUse,
            usage: None,
        }
    }

    struct Upper;

    #[async_trait]
    impl Tool for Upper {
        fn id(&self) -> ToolId {
            ToolId::AnalyzeSentiment
        }

        fn description(&self) -> &str {
            "Upper-cases text"
        }

        fn input_description(&self) -> &str {
            "Text"
        }

        async fn call(&self, input: &str) -> String {
            input.to_uppercase()
        }
    }

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ExecutorEventHandler for Recorder {
        async fn on_llm_end(&self, response: &CompletionResponse) {
            self.events
                .lock()
                .unwrap()
                .push(format!("llm:{:?}", response.usage_record()));
        }

        async fn on_tool_start(&self, _call_id: &str, tool: ToolId, input: &str) {
            self.events.lock().unwrap().push(format!("start:{tool}:{input}"));
        }

        async fn on_tool_done(&self, _call_id: &str, tool: ToolId, output: &str, _ms: u64) {
            self.events.lock().unwrap().push(format!("done:{tool}:{output}"));
        }

        async fn on_complete(&self, answer: &str) {
            self.events.lock().unwrap().push(format!("complete:{answer}"));
        }

        async fn on_error(&self, _error: &str) {
            self.events.lock().unwrap().push("error".to_string());
        }
    }

    fn executor(
        provider: Arc<ScriptedProvider>,
        recorder: Arc<Recorder>,
        handle_parsing_errors: bool,
    ) -> AgentExecutor {
        AgentExecutorBuilder::new()
            .provider(provider)
            .tools(ToolRegistry::new().with(Arc::new(Upper)))
            .system_prompt("system")
            .handle_parsing_errors(handle_parsing_errors)
            .event_handler(recorder)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_direct_answer() {
        let provider = Arc::new(ScriptedProvider::new(vec![Ok(text_reply("done"))]));
        let recorder = Arc::new(Recorder::default());
        let exec = executor(provider.clone(), recorder.clone(), true);

        let answer = exec.run("hello".to_string()).await.unwrap();

        assert_eq!(answer, "done");
        assert_eq!(
            *recorder.events.lock().unwrap(),
            vec!["llm:Reported(10)", "complete:done"]
        );
        let requests = provider.requests.lock().unwrap();
        assert_eq!(requests[0].system.as_deref(), Some("system"));
        assert_eq!(requests[0].temperature, Some(0.0));
        assert_eq!(requests[0].tools.as_ref().unwrap()[0].name, "analyze_sentiment");
    }

    #[tokio::test]
    async fn test_tool_call_then_answer() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            Ok(tool_reply("analyze_sentiment", json!({ "input": "bom" }))),
            Ok(text_reply("final")),
        ]));
        let recorder = Arc::new(Recorder::default());
        let exec = executor(provider.clone(), recorder.clone(), true);

        let answer = exec.run("go".to_string()).await.unwrap();
        assert_eq!(answer, "final");

        let events = recorder.events.lock().unwrap().clone();
        assert_eq!(
            events,
            vec![
                "llm:Unknown",
                "start:analyze_sentiment:bom",
                "done:analyze_sentiment:BOM",
                "llm:Reported(10)",
                "complete:final",
            ]
        );

        let requests = provider.requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        let last = requests[1].messages.last().unwrap();
        assert_eq!(
            last,
            &Message::tool_result("call_analyze_sentiment", "BOM")
        );
    }

    #[tokio::test]
    async fn test_unknown_tool_is_corrected_once() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            Ok(tool_reply("web_search", json!({ "input": "x" }))),
            Ok(text_reply("recovered")),
        ]));
        let exec = executor(provider.clone(), Arc::new(Recorder::default()), true);

        assert_eq!(exec.run("go".to_string()).await.unwrap(), "recovered");

        let requests = provider.requests.lock().unwrap();
        match &requests[1].messages.last().unwrap().content {
            Some(agent_llm::MessageContent::Blocks(blocks)) => match &blocks[0] {
                ContentBlock::ToolResult {
                    content, is_error, ..
                } => {
                    assert_eq!(*is_error, Some(true));
                    assert!(content.contains("Unknown tool: web_search"));
                    assert!(content.contains("analyze_sentiment"));
                }
                other => panic!("Expected tool result, got {other:?}"),
            },
            other => panic!("Expected blocks, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_truncated_arguments_are_corrected_once() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            Ok(tool_reply(
                "analyze_sentiment",
                malformed_arguments(r#"{"input": "Bitc"#),
            )),
            Ok(tool_reply("analyze_sentiment", json!({ "input": "bom" }))),
            Ok(text_reply("recovered")),
        ]));
        let recorder = Arc::new(Recorder::default());
        let exec = executor(provider.clone(), recorder.clone(), true);

        assert_eq!(exec.run("go".to_string()).await.unwrap(), "recovered");

        // The tool only ever ran with the well-formed call
        let events = recorder.events.lock().unwrap().clone();
        let starts: Vec<&str> = events
            .iter()
            .map(String::as_str)
            .filter(|e| e.starts_with("start:"))
            .collect();
        assert_eq!(starts, vec!["start:analyze_sentiment:bom"]);

        let requests = provider.requests.lock().unwrap();
        match &requests[1].messages.last().unwrap().content {
            Some(agent_llm::MessageContent::Blocks(blocks)) => match &blocks[0] {
                ContentBlock::ToolResult {
                    content, is_error, ..
                } => {
                    assert_eq!(*is_error, Some(true));
                    assert!(content.contains("not valid JSON"));
                    assert!(content.contains(r#"{"input": "Bitc"#));
                }
                other => panic!("Expected tool result, got {other:?}"),
            },
            other => panic!("Expected blocks, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_second_failure_is_error() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            Ok(tool_reply("analyze_sentiment", json!({ "text": 5 }))),
            Ok(text_reply("   ")),
        ]));
        let recorder = Arc::new(Recorder::default());
        let exec = executor(provider, recorder.clone(), true);

        let result = exec.run("go".to_string()).await;

        assert!(matches!(result, Err(Error::ParseFailed(_))));
        assert_eq!(recorder.events.lock().unwrap().last().unwrap(), "error");
    }

    #[tokio::test]
    async fn test_no_correction_when_disabled() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            Ok(tool_reply("nope", json!({}))),
            Ok(text_reply("never reached")),
        ]));
        let exec = executor(provider.clone(), Arc::new(Recorder::default()), false);

        assert!(exec.run("go".to_string()).await.is_err());
        assert_eq!(provider.requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_reply_then_answer() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            Ok(text_reply("")),
            Ok(text_reply("ok")),
        ]));
        let exec = executor(provider.clone(), Arc::new(Recorder::default()), true);

        assert_eq!(exec.run("go".to_string()).await.unwrap(), "ok");
        let requests = provider.requests.lock().unwrap();
        let correction = requests[1].messages.last().unwrap().text().unwrap();
        assert!(correction.starts_with("Invalid response"));
    }

    #[tokio::test]
    async fn test_max_iterations() {
        let replies = (0..5)
            .map(|_| Ok(tool_reply("analyze_sentiment", json!("loop"))))
            .collect();
        let provider = Arc::new(ScriptedProvider::new(replies));
        let exec = AgentExecutorBuilder::new()
            .provider(provider.clone())
            .tools(ToolRegistry::new().with(Arc::new(Upper)))
            .max_iterations(3)
            .stopped_message("parei")
            .build()
            .unwrap();

        assert_eq!(exec.run("go".to_string()).await.unwrap(), "parei");
        assert_eq!(provider.requests.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_provider_error() {
        let provider = Arc::new(ScriptedProvider::new(vec![Err(
            LLMError::AuthenticationFailed,
        )]));
        let recorder = Arc::new(Recorder::default());
        let exec = executor(provider, recorder.clone(), true);

        let result = exec.run("go".to_string()).await;
        assert!(matches!(result, Err(Error::ProcessingFailed(_))));
        assert_eq!(*recorder.events.lock().unwrap(), vec!["error"]);
    }

    #[test]
    fn test_extract_input() {
        let id = ToolId::SearchNews;
        assert_eq!(extract_input(id, &json!({ "input": "Bitcoin" })).unwrap(), "Bitcoin");
        assert_eq!(extract_input(id, &json!({ "topic": "Bitcoin" })).unwrap(), "Bitcoin");
        assert_eq!(extract_input(id, &json!("Bitcoin")).unwrap(), "Bitcoin");

        assert!(extract_input(id, &json!({ "input": 3 })).is_err());
        assert!(extract_input(id, &json!({})).is_err());
        assert!(extract_input(id, &json!({ "a": "x", "b": "y" })).is_err());
        assert!(extract_input(id, &json!([1, 2])).is_err());
        assert!(matches!(
            extract_input(id, &malformed_arguments(r#"{"input": "Bitc"#)),
            Err(ToolError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_builder_validation() {
        assert!(AgentExecutorBuilder::new().build().is_err());

        let provider = Arc::new(ScriptedProvider::new(vec![]));
        assert!(
            AgentExecutorBuilder::new()
                .provider(provider)
                .max_iterations(0)
                .build()
                .is_err()
        );
    }

    #[test]
    fn test_default_config() {
        let config = ExecutorConfig::default();
        assert_eq!(config.max_iterations, 8);
        assert_eq!(config.model, "gemini-2.0-flash");
        assert!(config.handle_parsing_errors);
    }
}

//! News agent: turns a topic into an instruction and runs the tool loop

use crate::error::Result;
use crate::locale::Locale;
use crate::monitor::{ConsoleTrace, UsageMonitor};
use crate::prompts::{TurnRequest, prompt_registry, system_prompt};
use agent_core::{Agent, Context};
use agent_llm::LLMProvider;
use agent_prompt::{Language, PromptRegistry};
use agent_runtime::{AgentExecutorBuilder, ExecutorEventHandler, ToolAgent};
use agent_tools::ToolRegistry;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Knobs for [`NewsAgent::new`]
#[derive(Debug, Clone)]
pub struct NewsAgentOptions {
    pub model: String,
    pub locale: Locale,
    /// Print every tool call and observation
    pub verbose: bool,
    pub max_iterations: usize,
}

impl Default for NewsAgentOptions {
    fn default() -> Self {
        Self {
            model: crate::config::DEFAULT_MODEL.to_string(),
            locale: Locale::default(),
            verbose: false,
            max_iterations: 8,
        }
    }
}

/// Console-facing agent
///
/// Each call to [`Agent::process`] receives the raw topic. The answer
/// language comes from the context when set, otherwise from the options.
pub struct NewsAgent {
    inner: ToolAgent,
    prompts: PromptRegistry,
    locale: Locale,
}

impl NewsAgent {
    pub fn new(
        provider: Arc<dyn LLMProvider>,
        tools: ToolRegistry,
        options: NewsAgentOptions,
    ) -> Result<Self> {
        let locale = options.locale;
        let prompts = prompt_registry(locale)?;

        let mut builder = AgentExecutorBuilder::new()
            .provider(provider)
            .tools(tools)
            .model(options.model)
            .max_iterations(options.max_iterations)
            .temperature(0.0)
            .handle_parsing_errors(true)
            .system_prompt(system_prompt(&prompts, locale)?)
            .stopped_message(locale.stopped())
            .event_handler(Arc::new(UsageMonitor::new(locale)));

        if options.verbose {
            let trace: Arc<dyn ExecutorEventHandler> = Arc::new(ConsoleTrace::new(locale));
            builder = builder.event_handler(trace);
        }

        Ok(Self {
            inner: ToolAgent::new(builder.build()?, "news"),
            prompts,
            locale,
        })
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Instruction sent to the executor for `topic`
    pub fn instruction(&self, topic: &str, locale: Locale) -> Result<String> {
        TurnRequest::new(topic, locale).render(&self.prompts)
    }
}

#[async_trait]
impl Agent for NewsAgent {
    async fn process(&self, input: String, context: &mut Context) -> agent_core::Result<String> {
        let topic = input.trim().to_string();
        let locale = context
            .language()
            .map_or(self.locale, |code| Locale::from(&Language::from_code(code)));

        info!(topic = %topic, turn = ?context.turn(), "Processing topic");
        let instruction = self.instruction(&topic, locale)?;
        context.set_topic(topic);

        self.inner.process(instruction, context).await
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

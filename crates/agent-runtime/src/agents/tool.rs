//! Tool agent implementation (wraps AgentExecutor)

use crate::executor::AgentExecutor;
use agent_core::{Agent, Context, Result};
use async_trait::async_trait;
use tracing::info;

/// An [`Agent`] that answers each turn by running the executor loop
pub struct ToolAgent {
    executor: AgentExecutor,
    name: String,
}

impl ToolAgent {
    pub fn new(executor: AgentExecutor, name: impl Into<String>) -> Self {
        Self {
            executor,
            name: name.into(),
        }
    }

    pub fn executor(&self) -> &AgentExecutor {
        &self.executor
    }
}

#[async_trait]
impl Agent for ToolAgent {
    async fn process(&self, input: String, context: &mut Context) -> Result<String> {
        info!(agent = %self.name, turn = ?context.turn(), "Running turn");
        self.executor.run(input).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}

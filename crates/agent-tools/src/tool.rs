//! Tool trait definition

use crate::ToolId;
use async_trait::async_trait;
use serde_json::{Value, json};

/// A text-in/text-out function the model may call
///
/// `call` cannot fail. A tool that hits a problem reports it in the returned
/// text so the model can read it and carry on.
#[async_trait]
pub trait Tool: Send + Sync {
    fn id(&self) -> ToolId;

    /// What the tool does, written for the model
    fn description(&self) -> &str;

    /// What the single `input` argument should contain
    fn input_description(&self) -> &str;

    /// Run the tool
    async fn call(&self, input: &str) -> String;

    /// JSON Schema of the arguments: one required string named `input`
    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "input": { "type": "string", "description": self.input_description() }
            },
            "required": ["input"],
        })
    }
}

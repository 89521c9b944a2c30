//! Core Agent trait definition

use crate::{Context, Result};
use async_trait::async_trait;

/// Anything that can answer one operator turn
///
/// The console loop only knows about this trait, which keeps it testable
/// with a fake agent and keeps the executor swappable.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Process one turn of input and return the final answer text
    async fn process(&self, input: String, context: &mut Context) -> Result<String>;

    /// Get the agent's name
    fn name(&self) -> &str;
}

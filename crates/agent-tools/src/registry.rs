//! Tool registry

use crate::{Result, Tool, ToolError, ToolId};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Registered tools, keyed and ordered by [`ToolId`]
///
/// Filled once while wiring the agent and read-only afterwards.
#[derive(Default, Clone)]
pub struct ToolRegistry {
    tools: BTreeMap<ToolId, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, replacing any previous one with the same id
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        debug!(tool = %tool.id(), "Registering tool");
        self.tools.insert(tool.id(), tool);
    }

    /// Builder-style [`ToolRegistry::register`]
    pub fn with(mut self, tool: Arc<dyn Tool>) -> Self {
        self.register(tool);
        self
    }

    pub fn get(&self, id: ToolId) -> Option<Arc<dyn Tool>> {
        self.tools.get(&id).cloned()
    }

    /// Resolve a tool name written by the model
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn Tool>> {
        let id: ToolId = name.parse()?;
        self.get(id)
            .ok_or_else(|| ToolError::NotRegistered(id.to_string()))
    }

    /// All tools in [`ToolId`] order
    pub fn list(&self) -> Vec<Arc<dyn Tool>> {
        self.tools.values().cloned().collect()
    }

    pub fn ids(&self) -> Vec<ToolId> {
        self.tools.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.ids())
            .finish()
    }
}

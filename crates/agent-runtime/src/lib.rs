//! Agent runtime for the news agent
//!
//! [`AgentExecutor`] runs the model/tool loop for one instruction;
//! [`ToolAgent`] exposes it through the [`agent_core::Agent`] trait.

pub mod agents;
pub mod executor;

pub use agents::ToolAgent;
pub use executor::{AgentExecutor, AgentExecutorBuilder, ExecutorConfig, ExecutorEventHandler};

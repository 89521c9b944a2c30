//! News sentiment agent
//!
//! A console assistant that, given a topic, searches recent news, scores
//! its sentiment and has the model write a short report. The pieces:
//!
//! - [`api`]: the [`NewsSearch`](api::NewsSearch) seam and its DuckDuckGo client
//! - [`sentiment`]: polarity analysis and three-way labels
//! - [`tools`]: `search_news` and `analyze_sentiment` for the executor
//! - [`monitor`]: token usage and verbose trace printed to the console
//! - [`agent`]: [`NewsAgent`], which turns a topic into an instruction
//! - [`repl`]: the interactive loop
//!
//! # Example
//!
//! ```rust,ignore
//! use agent_news::{AgentSettings, DuckDuckGoClient, InteractiveLoop, NewsAgent, NewsAgentOptions};
//! use agent_news::sentiment::LexiconAnalyzer;
//! use agent_news::tools::news_tools;
//! use std::sync::Arc;
//!
//! let settings = AgentSettings::load(&config, &overrides)?;
//! let news = settings.news_config()?;
//! let search = Arc::new(DuckDuckGoClient::new(news.rate_limit_per_minute)?);
//! let tools = news_tools(search, Arc::new(LexiconAnalyzer::new()), news, settings.locale());
//!
//! let agent = NewsAgent::new(Arc::new(settings.build_provider()?), tools, NewsAgentOptions::default())?;
//! InteractiveLoop::new(Arc::new(agent), settings.locale(), stdin.lock(), stdout).run().await?;
//! ```

pub mod agent;
pub mod api;
pub mod config;
pub mod error;
pub mod locale;
pub mod monitor;
pub mod news;
pub mod prompts;
pub mod repl;
pub mod sentiment;
pub mod tools;

pub use agent::{NewsAgent, NewsAgentOptions};
pub use api::{DuckDuckGoClient, NewsSearch};
pub use config::{AgentSettings, NewsConfig, SettingsOverrides};
pub use error::{NewsError, Result};
pub use locale::Locale;
pub use monitor::{ConsoleTrace, UsageMonitor};
pub use news::{NewsItem, format_news_block};
pub use prompts::{PlanStep, TurnRequest};
pub use repl::{InteractiveLoop, LoopSummary};
pub use sentiment::{LexiconAnalyzer, PolarityAnalyzer, SentimentLabel, SentimentResult};

// Re-export Language from agent-prompt
pub use agent_prompt::Language;

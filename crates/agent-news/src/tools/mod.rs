//! The agent's two tools

mod news;
mod sentiment;

pub use news::NewsSearchTool;
pub use sentiment::SentimentTool;

use crate::api::NewsSearch;
use crate::config::NewsConfig;
use crate::locale::Locale;
use crate::sentiment::PolarityAnalyzer;
use agent_tools::ToolRegistry;
use std::sync::Arc;

/// Registry holding `search_news` and `analyze_sentiment`
pub fn news_tools(
    search: Arc<dyn NewsSearch>,
    analyzer: Arc<dyn PolarityAnalyzer>,
    config: NewsConfig,
    locale: Locale,
) -> ToolRegistry {
    ToolRegistry::new()
        .with(Arc::new(NewsSearchTool::new(search, config, locale)))
        .with(Arc::new(SentimentTool::new(analyzer, locale)))
}

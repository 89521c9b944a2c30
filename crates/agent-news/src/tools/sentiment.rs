//! `analyze_sentiment`: label and score for a piece of text

use crate::locale::Locale;
use crate::sentiment::{PolarityAnalyzer, SentimentResult};
use agent_tools::{Tool, ToolId};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

pub struct SentimentTool {
    analyzer: Arc<dyn PolarityAnalyzer>,
    locale: Locale,
}

impl SentimentTool {
    pub fn new(analyzer: Arc<dyn PolarityAnalyzer>, locale: Locale) -> Self {
        Self { analyzer, locale }
    }

    pub fn score(&self, text: &str) -> SentimentResult {
        SentimentResult::score(self.analyzer.as_ref(), text)
    }
}

#[async_trait]
impl Tool for SentimentTool {
    fn id(&self) -> ToolId {
        ToolId::AnalyzeSentiment
    }

    fn description(&self) -> &str {
        self.locale.sentiment_tool_description()
    }

    fn input_description(&self) -> &str {
        self.locale.sentiment_input_description()
    }

    async fn call(&self, input: &str) -> String {
        println!("\n{}", self.locale.scoring());

        let result = self.score(input);
        debug!(polarity = result.polarity, label = ?result.label, "Scored text");
        result.render(self.locale)
    }
}

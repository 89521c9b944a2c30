//! Closed set of tool identifiers

use crate::ToolError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every tool the agent can call
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolId {
    /// Recent news about a topic
    SearchNews,
    /// Sentiment label and score for a text
    AnalyzeSentiment,
}

impl ToolId {
    pub const ALL: [ToolId; 2] = [ToolId::SearchNews, ToolId::AnalyzeSentiment];

    /// Name the model sees and calls
    pub fn as_str(self) -> &'static str {
        match self {
            ToolId::SearchNews => "search_news",
            ToolId::AnalyzeSentiment => "analyze_sentiment",
        }
    }
}

impl fmt::Display for ToolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolId {
    type Err = ToolError;

    /// Case-insensitive; surrounding whitespace and backticks are ignored
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().trim_matches('`').to_ascii_lowercase();
        ToolId::ALL
            .into_iter()
            .find(|id| id.as_str() == normalized)
            .ok_or_else(|| ToolError::UnknownTool(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for id in ToolId::ALL {
            assert_eq!(id.as_str().parse::<ToolId>().unwrap(), id);
        }
    }

    #[test]
    fn test_lenient_parse() {
        assert_eq!(" Search_News ".parse::<ToolId>().unwrap(), ToolId::SearchNews);
        assert_eq!("`analyze_sentiment`".parse::<ToolId>().unwrap(), ToolId::AnalyzeSentiment);
    }

    #[test]
    fn test_unknown() {
        assert_eq!(
            "web_search".parse::<ToolId>(),
            Err(ToolError::UnknownTool("web_search".to_string()))
        );
    }

    #[test]
    fn test_display_and_serde() {
        assert_eq!(ToolId::SearchNews.to_string(), "search_news");
        assert_eq!(
            serde_json::to_string(&ToolId::AnalyzeSentiment).unwrap(),
            "\"analyze_sentiment\""
        );
    }
}

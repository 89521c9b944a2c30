//! `search_news`: recent news for a topic, as one text block

use crate::api::NewsSearch;
use crate::config::NewsConfig;
use crate::error::{NewsError, Result};
use crate::locale::Locale;
use crate::news::{NewsItem, format_news_block};
use agent_tools::{Tool, ToolId};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

/// News lookup with a generic web-search fallback
///
/// Never fails: provider errors, timeouts and a blank topic all come back
/// as a message the model can read.
pub struct NewsSearchTool {
    search: Arc<dyn NewsSearch>,
    config: NewsConfig,
    locale: Locale,
}

impl NewsSearchTool {
    pub fn new(search: Arc<dyn NewsSearch>, config: NewsConfig, locale: Locale) -> Self {
        Self {
            search,
            config,
            locale,
        }
    }

    /// News first; one generic query if that is empty
    async fn lookup(&self, topic: &str) -> Result<Vec<NewsItem>> {
        let NewsConfig {
            region,
            fallback_qualifier,
            max_results,
            ..
        } = &self.config;

        let items = self.search.news(topic, region, *max_results).await?;
        if !items.is_empty() {
            return Ok(items);
        }

        let fallback = format!("{topic} {fallback_qualifier}");
        info!(query = %fallback, "No news results, trying generic search");
        self.search.text(&fallback, region, *max_results).await
    }
}

fn clean_topic(input: &str) -> &str {
    input
        .trim()
        .trim_matches(|c| c == '"' || c == '\'' || c == '`')
        .trim()
}

#[async_trait]
impl Tool for NewsSearchTool {
    fn id(&self) -> ToolId {
        ToolId::SearchNews
    }

    fn description(&self) -> &str {
        self.locale.search_tool_description()
    }

    fn input_description(&self) -> &str {
        self.locale.search_input_description()
    }

    async fn call(&self, input: &str) -> String {
        let topic = clean_topic(input);
        if topic.is_empty() {
            return self.locale.search_error(self.locale.blank_topic());
        }

        println!("\n{}", self.locale.searching(topic));

        let timeout = self.config.search_timeout;
        let outcome = match tokio::time::timeout(timeout, self.lookup(topic)).await {
            Ok(result) => result,
            Err(_) => Err(NewsError::Timeout {
                secs: timeout.as_secs(),
            }),
        };

        match outcome {
            Ok(items) if items.is_empty() => self.locale.no_results().to_string(),
            Ok(items) => format_news_block(&items, self.locale),
            Err(e) => {
                warn!(topic, error = %e, "News search failed");
                self.locale.search_error(&e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockNewsSearch;
    use std::time::Duration;

    fn bitcoin_items() -> Vec<NewsItem> {
        vec![
            NewsItem::new("Bitcoin sobe", "Alta de 5%")
                .with_source("InfoMoney")
                .with_date("2025-10-15T12:00:00+00:00"),
            NewsItem::new("Bitcoin recua", "Queda leve").with_source("Valor"),
            NewsItem::new("ETF de Bitcoin", "Aprovação").with_source("Exame"),
        ]
    }

    fn tool(mock: MockNewsSearch) -> NewsSearchTool {
        NewsSearchTool::new(Arc::new(mock), NewsConfig::default(), Locale::Portuguese)
    }

    #[tokio::test]
    async fn test_primary_results_skip_fallback() {
        let mut mock = MockNewsSearch::new();
        mock.expect_news()
            .withf(|keywords, region, max| {
                keywords.eq_ignore_ascii_case("Bitcoin") && region.eq_ignore_ascii_case("br-pt") && *max == 5
            })
            .times(1)
            .returning(|_, _, _| Ok(bitcoin_items()));
        mock.expect_text().never();

        let out = tool(mock).call("Bitcoin").await;
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "- [2025-10-15T12:00:00+00:00] Bitcoin sobe (InfoMoney): Alta de 5%"
        );
        assert!(lines[1].contains("Bitcoin recua (Valor)"));
        assert!(lines[2].contains("ETF de Bitcoin (Exame)"));
    }

    #[tokio::test]
    async fn test_fallback_query() {
        let mut mock = MockNewsSearch::new();
        mock.expect_news().times(1).returning(|_, _, _| Ok(vec![]));
        mock.expect_text()
            .withf(|keywords, _, _| keywords.eq_ignore_ascii_case("Petrobras noticias"))
            .times(1)
            .returning(|_, _, _| {
                Ok(vec![NewsItem {
                    title: Some("Petrobras anuncia dividendos".to_string()),
                    body: "Resumo".to_string(),
                    ..Default::default()
                }])
            });

        let out = tool(mock).call("Petrobras").await;
        assert_eq!(out, "- [] Petrobras anuncia dividendos (Fonte desconhecida): Resumo\n");
    }

    #[tokio::test]
    async fn test_both_empty_gives_no_results_message() {
        let mut mock = MockNewsSearch::new();
        mock.expect_news().times(1).returning(|_, _, _| Ok(vec![]));
        mock.expect_text().times(1).returning(|_, _, _| Ok(vec![]));

        let out = tool(mock).call("xyzzy").await;
        assert_eq!(out, Locale::Portuguese.no_results());
    }

    #[tokio::test]
    async fn test_provider_failure_becomes_text() {
        let mut mock = MockNewsSearch::new();
        mock.expect_news().times(1).returning(|_, _, _| {
            Err(NewsError::RateLimited {
                provider: "duckduckgo".to_string(),
            })
        });
        mock.expect_text().never();

        let out = tool(mock).call("Bitcoin").await;
        assert!(out.starts_with("Erro crítico na ferramenta de busca"));
        assert!(out.contains("Rate limited"));
    }

    #[tokio::test]
    async fn test_fallback_failure_becomes_text() {
        let mut mock = MockNewsSearch::new();
        mock.expect_news().times(1).returning(|_, _, _| Ok(vec![]));
        mock.expect_text()
            .times(1)
            .returning(|_, _, _| Err(NewsError::Search("HTTP 500".to_string())));

        let out = tool(mock).call("Bitcoin").await;
        assert!(out.contains("HTTP 500"));
    }

    #[tokio::test]
    async fn test_blank_topic_skips_search() {
        let mut mock = MockNewsSearch::new();
        mock.expect_news().never();
        mock.expect_text().never();

        let out = tool(mock).call("  ''  ").await;
        assert!(out.starts_with("Erro"));
    }

    #[tokio::test]
    async fn test_topic_is_unquoted() {
        let mut mock = MockNewsSearch::new();
        mock.expect_news()
            .withf(|keywords, _, _| keywords.eq_ignore_ascii_case("Vale"))
            .times(1)
            .returning(|_, _, _| Ok(vec![NewsItem::new("Vale", "Minério")]));

        let out = tool(mock).call(" 'Vale' ").await;
        assert!(out.contains("Vale"));
    }

    struct Slow;

    #[async_trait]
    impl NewsSearch for Slow {
        async fn news(&self, _: &str, _: &str, _: usize) -> Result<Vec<NewsItem>> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(vec![])
        }

        async fn text(&self, _: &str, _: &str, _: usize) -> Result<Vec<NewsItem>> {
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn test_timeout_becomes_text() {
        let config = NewsConfig::builder()
            .search_timeout(Duration::from_millis(20))
            .build()
            .unwrap();
        let tool = NewsSearchTool::new(Arc::new(Slow), config, Locale::English);

        let out = tool.call("Bitcoin").await;
        assert!(out.starts_with("Critical error in the search tool"));
        assert!(out.contains("timed out"));
    }

    #[test]
    fn test_metadata() {
        let tool = tool(MockNewsSearch::new());
        assert_eq!(tool.id(), ToolId::SearchNews);
        assert!(tool.description().contains("Bitcoin"));
        assert_eq!(tool.input_schema()["required"][0], "input");
    }
}

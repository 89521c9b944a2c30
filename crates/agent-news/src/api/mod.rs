//! Search provider clients

pub mod duckduckgo;

pub use duckduckgo::DuckDuckGoClient;

use crate::error::Result;
use crate::news::NewsItem;
use async_trait::async_trait;

/// A web search provider with a news vertical
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsSearch: Send + Sync {
    /// Recent news matching `keywords`
    async fn news(&self, keywords: &str, region: &str, max_results: usize) -> Result<Vec<NewsItem>>;

    /// Generic web results, used when the news vertical comes back empty
    async fn text(&self, keywords: &str, region: &str, max_results: usize) -> Result<Vec<NewsItem>>;
}

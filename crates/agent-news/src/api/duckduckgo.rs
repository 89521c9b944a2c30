//! DuckDuckGo news and web search client
//!
//! News comes from the `news.js` JSON endpoint, which needs a per-query
//! `vqd` token scraped from the regular search page first. The generic
//! text search uses the JavaScript-free HTML endpoint and parses the page.

use super::NewsSearch;
use crate::error::{NewsError, Result};
use crate::news::NewsItem;
use async_trait::async_trait;
use chrono::DateTime;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use regex::Regex;
use reqwest::{Client, StatusCode};
use scraper::{ElementRef, Html, Selector};
use serde::Deserialize;
use std::collections::HashSet;
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

const PROVIDER: &str = "duckduckgo";
const SEARCH_PAGE_URL: &str = "https://duckduckgo.com/";
const NEWS_URL: &str = "https://duckduckgo.com/news.js";
const HTML_URL: &str = "https://html.duckduckgo.com/html";
const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Moderate safe search
const SAFE_SEARCH: &str = "-1";

/// DuckDuckGo client with client-side rate limiting
pub struct DuckDuckGoClient {
    client: Client,
    rate_limiter: SharedRateLimiter,
    vqd_pattern: Regex,
}

impl DuckDuckGoClient {
    /// # Arguments
    /// * `rate_limit` - Requests per minute, shared by both endpoints
    pub fn new(rate_limit: u32) -> Result<Self> {
        let per_minute = NonZeroU32::new(rate_limit).ok_or_else(|| {
            NewsError::Config("rate limit must be greater than 0".to_string())
        })?;
        let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_minute(per_minute)));

        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client,
            rate_limiter,
            vqd_pattern: vqd_regex()?,
        })
    }

    async fn vqd(&self, keywords: &str) -> Result<String> {
        self.rate_limiter.until_ready().await;

        let response = self
            .client
            .get(SEARCH_PAGE_URL)
            .query(&[("q", keywords)])
            .send()
            .await?;
        check_status(response.status())?;

        let page = response.text().await?;
        extract_vqd(&self.vqd_pattern, &page)
            .ok_or_else(|| NewsError::Search(format!("no vqd token for '{keywords}'")))
    }
}

#[async_trait]
impl NewsSearch for DuckDuckGoClient {
    #[instrument(skip(self))]
    async fn news(&self, keywords: &str, region: &str, max_results: usize) -> Result<Vec<NewsItem>> {
        let vqd = self.vqd(keywords).await?;

        self.rate_limiter.until_ready().await;
        let response = self
            .client
            .get(NEWS_URL)
            .query(&[
                ("l", region),
                ("o", "json"),
                ("noamp", "1"),
                ("q", keywords),
                ("vqd", vqd.as_str()),
                ("p", SAFE_SEARCH),
            ])
            .send()
            .await?;
        check_status(response.status())?;

        let body = response.text().await?;
        let items = parse_news_json(&body, max_results)?;
        debug!(count = items.len(), "News results");
        Ok(items)
    }

    #[instrument(skip(self))]
    async fn text(&self, keywords: &str, region: &str, max_results: usize) -> Result<Vec<NewsItem>> {
        self.rate_limiter.until_ready().await;

        let response = self
            .client
            .post(HTML_URL)
            .form(&[("q", keywords), ("kl", region), ("b", "")])
            .send()
            .await?;
        check_status(response.status())?;

        let page = response.text().await?;
        let items = parse_html_results(&page, max_results)?;
        debug!(count = items.len(), "Text results");
        Ok(items)
    }
}

/// DuckDuckGo answers 202 or 403 instead of 429 when it throttles
fn check_status(status: StatusCode) -> Result<()> {
    match status {
        StatusCode::ACCEPTED | StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
            warn!(%status, "DuckDuckGo is throttling requests");
            Err(NewsError::RateLimited {
                provider: PROVIDER.to_string(),
            })
        }
        s if s.is_success() => Ok(()),
        s => Err(NewsError::Search(format!("DuckDuckGo returned HTTP {s}"))),
    }
}

fn vqd_regex() -> Result<Regex> {
    Regex::new(r#"vqd=["']?([0-9-]+)"#).map_err(|e| NewsError::Other(e.to_string()))
}

/// Pull the `vqd` token out of a search page
pub fn extract_vqd(pattern: &Regex, page: &str) -> Option<String> {
    pattern
        .captures(page)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

#[derive(Debug, Deserialize)]
struct NewsResponse {
    #[serde(default)]
    results: Vec<NewsRow>,
}

#[derive(Debug, Deserialize)]
struct NewsRow {
    date: Option<i64>,
    title: Option<String>,
    excerpt: Option<String>,
    url: Option<String>,
    source: Option<String>,
}

/// Parse a `news.js` payload, dropping repeated URLs
pub fn parse_news_json(body: &str, max_results: usize) -> Result<Vec<NewsItem>> {
    let response: NewsResponse = serde_json::from_str(body)?;
    let mut seen = HashSet::new();

    let items = response
        .results
        .into_iter()
        .filter(|row| row.url.as_ref().is_none_or(|url| seen.insert(url.clone())))
        .take(max_results)
        .map(|row| NewsItem {
            title: row.title.map(|t| clean_html(&t)),
            body: row.excerpt.map(|e| clean_html(&e)).unwrap_or_default(),
            source: row.source,
            date: row
                .date
                .and_then(|secs| DateTime::from_timestamp(secs, 0))
                .map(|d| d.to_rfc3339())
                .unwrap_or_default(),
            url: row.url,
        })
        .collect();

    Ok(items)
}

/// Parse the HTML endpoint's result page, skipping ads
pub fn parse_html_results(page: &str, max_results: usize) -> Result<Vec<NewsItem>> {
    let result_sel = selector("div.result")?;
    let link_sel = selector("a.result__a")?;
    let snippet_sel = selector(".result__snippet")?;

    let document = Html::parse_document(page);
    let mut seen = HashSet::new();
    let mut items = Vec::new();

    for result in document.select(&result_sel) {
        if items.len() >= max_results {
            break;
        }
        if result.value().classes().any(|c| c == "result--ad") {
            continue;
        }

        let Some(link) = result.select(&link_sel).next() else {
            continue;
        };
        let href = link.value().attr("href").unwrap_or_default().to_string();
        if is_ad_link(&href) || !seen.insert(href.clone()) {
            continue;
        }

        let body = result
            .select(&snippet_sel)
            .next()
            .map(|snippet| element_text(&snippet))
            .unwrap_or_default();

        items.push(NewsItem {
            title: Some(element_text(&link)),
            body,
            source: None,
            date: String::new(),
            url: (!href.is_empty()).then_some(href),
        });
    }

    Ok(items)
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| NewsError::Other(format!("bad selector {css}: {e}")))
}

fn is_ad_link(href: &str) -> bool {
    href.starts_with("http://www.google.com/search?q=") || href.contains("duckduckgo.com/y.js?ad_domain")
}

fn element_text(element: &ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

/// Strip markup and decode entities from a provider snippet
fn clean_html(fragment: &str) -> String {
    let parsed = Html::parse_fragment(fragment);
    collapse_whitespace(&parsed.root_element().text().collect::<String>())
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

//! News items and the text block handed to the model

use crate::locale::Locale;
use serde::{Deserialize, Serialize};

/// One search hit, news or generic web result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: Option<String>,

    /// Summary or snippet; empty when the provider has none
    #[serde(default)]
    pub body: String,

    pub source: Option<String>,

    /// RFC 3339 timestamp, or empty for generic results
    #[serde(default)]
    pub date: String,

    pub url: Option<String>,
}

impl NewsItem {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            body: body.into(),
            ..Default::default()
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    /// `- [date] title (source): body`, newline-terminated
    ///
    /// Line breaks and runs of whitespace inside any field collapse to one
    /// space, so every item is exactly one line.
    pub fn render_line(&self, locale: Locale) -> String {
        let title = non_blank(self.title.as_deref()).unwrap_or_else(|| locale.untitled().to_string());
        let source = non_blank(self.source.as_deref())
            .unwrap_or_else(|| locale.unknown_source().to_string());
        format!(
            "- [{}] {title} ({source}): {}\n",
            single_line(&self.date),
            single_line(&self.body)
        )
    }
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value.map(single_line).filter(|v| !v.is_empty())
}

/// One line per item, provider order kept
pub fn format_news_block(items: &[NewsItem], locale: Locale) -> String {
    items.iter().map(|item| item.render_line(locale)).collect()
}

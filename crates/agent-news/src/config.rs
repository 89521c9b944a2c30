//! Configuration for news retrieval and the console agent

use crate::error::{NewsError, Result};
use crate::locale::Locale;
use agent_llm::providers::gemini::{API_BASE_VAR, API_KEY_VAR, DEFAULT_GEMINI_API_BASE};
use agent_llm::{GeminiConfig, GeminiProvider};
use agent_prompt::Language;
use agent_utils::Config;
use std::time::Duration;

pub const MODEL_VAR: &str = "GEMINI_MODEL";
pub const LANGUAGE_VAR: &str = "NEWS_AGENT_LANGUAGE";
pub const REGION_VAR: &str = "NEWS_AGENT_REGION";

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_LANGUAGE: &str = "pt";

/// Search settings for the news tool
#[derive(Debug, Clone, PartialEq)]
pub struct NewsConfig {
    /// DuckDuckGo region code, e.g. `br-pt`
    pub region: String,

    /// Word appended to the topic for the generic text fallback
    pub fallback_qualifier: String,

    /// Result cap for each query
    pub max_results: usize,

    /// Upper bound on one search, fallback included
    pub search_timeout: Duration,

    /// Requests per minute sent to the provider
    pub rate_limit_per_minute: u32,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self::for_locale(Locale::Portuguese)
    }
}

impl NewsConfig {
    pub fn builder() -> NewsConfigBuilder {
        NewsConfigBuilder::default()
    }

    /// Region and fallback qualifier matching the answer language
    pub fn for_locale(locale: Locale) -> Self {
        let (region, qualifier) = match locale {
            Locale::Portuguese => ("br-pt", "noticias"),
            Locale::English => ("us-en", "news"),
        };

        Self {
            region: region.to_string(),
            fallback_qualifier: qualifier.to_string(),
            max_results: 5,
            search_timeout: Duration::from_secs(20),
            rate_limit_per_minute: 20,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.region.trim().is_empty() {
            return Err(NewsError::Config("region must not be empty".to_string()));
        }

        if self.max_results == 0 {
            return Err(NewsError::Config(
                "max_results must be greater than 0".to_string(),
            ));
        }

        if self.search_timeout.is_zero() {
            return Err(NewsError::Config(
                "search_timeout must be greater than 0".to_string(),
            ));
        }

        if self.rate_limit_per_minute == 0 {
            return Err(NewsError::Config(
                "rate_limit_per_minute must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for [`NewsConfig`]
#[derive(Debug, Default)]
pub struct NewsConfigBuilder {
    locale: Option<Locale>,
    region: Option<String>,
    fallback_qualifier: Option<String>,
    max_results: Option<usize>,
    search_timeout: Option<Duration>,
    rate_limit_per_minute: Option<u32>,
}

impl NewsConfigBuilder {
    /// Start from the defaults of this locale instead of Portuguese
    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = Some(locale);
        self
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn fallback_qualifier(mut self, qualifier: impl Into<String>) -> Self {
        self.fallback_qualifier = Some(qualifier.into());
        self
    }

    pub fn max_results(mut self, max: usize) -> Self {
        self.max_results = Some(max);
        self
    }

    pub fn search_timeout(mut self, timeout: Duration) -> Self {
        self.search_timeout = Some(timeout);
        self
    }

    pub fn rate_limit_per_minute(mut self, limit: u32) -> Self {
        self.rate_limit_per_minute = Some(limit);
        self
    }

    pub fn build(self) -> Result<NewsConfig> {
        let defaults = NewsConfig::for_locale(self.locale.unwrap_or_default());

        let config = NewsConfig {
            region: self.region.unwrap_or(defaults.region),
            fallback_qualifier: self
                .fallback_qualifier
                .unwrap_or(defaults.fallback_qualifier),
            max_results: self.max_results.unwrap_or(defaults.max_results),
            search_timeout: self.search_timeout.unwrap_or(defaults.search_timeout),
            rate_limit_per_minute: self
                .rate_limit_per_minute
                .unwrap_or(defaults.rate_limit_per_minute),
        };

        config.validate()?;
        Ok(config)
    }
}

/// Command-line values that win over the environment
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub model: Option<String>,
    pub api_base: Option<String>,
    pub language: Option<String>,
    pub region: Option<String>,
    pub verbose: bool,
}

/// Everything the binary needs to assemble the agent
#[derive(Clone)]
pub struct AgentSettings {
    pub api_key: String,
    pub model: String,
    pub api_base: String,
    pub language: Language,
    pub region: Option<String>,
    pub verbose: bool,
}

impl std::fmt::Debug for AgentSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentSettings")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("language", &self.language)
            .field("region", &self.region)
            .field("verbose", &self.verbose)
            .finish()
    }
}

impl AgentSettings {
    /// Answer language, known before the credential is checked so that the
    /// missing-credential diagnostic can be localized
    pub fn resolve_language(config: &Config, overrides: &SettingsOverrides) -> Language {
        let code = overrides
            .language
            .clone()
            .unwrap_or_else(|| config.get_or(LANGUAGE_VAR, DEFAULT_LANGUAGE));
        Language::from_code(&code)
    }

    /// Read settings from `config`, then apply `overrides`
    pub fn load(config: &Config, overrides: &SettingsOverrides) -> Result<Self> {
        let language = Self::resolve_language(config, overrides);
        let api_key = config.require(API_KEY_VAR)?;

        Ok(Self {
            api_key,
            model: overrides
                .model
                .clone()
                .unwrap_or_else(|| config.get_or(MODEL_VAR, DEFAULT_MODEL)),
            api_base: overrides
                .api_base
                .clone()
                .unwrap_or_else(|| config.get_or(API_BASE_VAR, DEFAULT_GEMINI_API_BASE)),
            language,
            region: overrides.region.clone().or_else(|| config.get(REGION_VAR)),
            verbose: overrides.verbose,
        })
    }

    pub fn locale(&self) -> Locale {
        Locale::from(&self.language)
    }

    /// Search settings for this language, with the region override applied
    pub fn news_config(&self) -> Result<NewsConfig> {
        let mut builder = NewsConfig::builder().locale(self.locale());
        if let Some(region) = &self.region {
            builder = builder.region(region.clone());
        }
        builder.build()
    }

    pub fn gemini_config(&self) -> GeminiConfig {
        GeminiConfig::new(self.api_key.clone()).with_api_base(self.api_base.clone())
    }

    pub fn build_provider(&self) -> Result<GeminiProvider> {
        Ok(GeminiProvider::with_config(self.gemini_config())?)
    }
}

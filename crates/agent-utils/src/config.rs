//! Configuration management utilities
//!
//! [`Config`] answers "what is the value of this setting" from a pluggable
//! lookup. The default lookup reads the process environment, optionally
//! layered over a `.env` file; tests plug in a fixed map instead so they
//! never have to mutate the real environment.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Configuration lookup errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required key is absent or blank
    #[error("Missing required setting: {key}")]
    Missing { key: String },

    /// A key is present but its value cannot be used
    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: String, reason: String },

    /// The dotenv file exists but could not be read or parsed
    #[error("Failed to read {path}: {reason}")]
    File { path: String, reason: String },
}

type Lookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Key/value settings source
#[derive(Clone)]
pub struct Config {
    app_name: String,
    lookup: Lookup,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("app_name", &self.app_name)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Read settings from the process environment
    pub fn from_env(app_name: impl Into<String>) -> Self {
        Self::with_lookup(app_name, |key| std::env::var(key).ok())
    }

    /// Read settings from the process environment, falling back to a dotenv file
    ///
    /// Process variables win over file entries. A missing file is not an error.
    pub fn from_env_and_file(
        app_name: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file_error = |e: dotenvy::Error| ConfigError::File {
            path: path.display().to_string(),
            reason: e.to_string(),
        };

        let file_values: HashMap<String, String> = match dotenvy::from_path_iter(path) {
            Ok(entries) => entries.collect::<Result<_, _>>().map_err(file_error)?,
            Err(e) if e.not_found() => HashMap::new(),
            Err(e) => return Err(file_error(e)),
        };

        Ok(Self::with_lookup(app_name, move |key| {
            std::env::var(key)
                .ok()
                .or_else(|| file_values.get(key).cloned())
        }))
    }

    /// Build a config over an arbitrary lookup function
    pub fn with_lookup<F>(app_name: impl Into<String>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            app_name: app_name.into(),
            lookup: Arc::new(lookup),
        }
    }

    /// Build a config over a fixed set of pairs
    pub fn from_pairs<K, V>(app_name: impl Into<String>, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let map: HashMap<String, String> = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::with_lookup(app_name, move |key| map.get(key).cloned())
    }

    /// Application name, used in diagnostics
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Look up a key. Blank values count as absent.
    pub fn get(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Look up a key that must be present
    pub fn require(&self, key: &str) -> Result<String, ConfigError> {
        self.get(key).ok_or_else(|| ConfigError::Missing {
            key: key.to_string(),
        })
    }

    /// Look up a key, or use `default`
    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_require_present_and_missing() {
        let config = Config::from_pairs("test", [("GOOGLE_API_KEY", "abc")]);

        assert_eq!(config.require("GOOGLE_API_KEY").unwrap(), "abc");
        assert_eq!(
            config.require("GEMINI_MODEL"),
            Err(ConfigError::Missing {
                key: "GEMINI_MODEL".to_string()
            })
        );
    }

    #[test]
    fn test_blank_value_is_absent() {
        let config = Config::from_pairs("test", [("GOOGLE_API_KEY", "   ")]);
        assert!(config.get("GOOGLE_API_KEY").is_none());
        assert!(config.require("GOOGLE_API_KEY").is_err());
    }

    #[test]
    fn test_get_or() {
        let config = Config::from_pairs("test", [("GEMINI_MODEL", "gemini-2.5-pro")]);

        assert_eq!(config.get_or("GEMINI_MODEL", "gemini-2.0-flash"), "gemini-2.5-pro");
        assert_eq!(config.get_or("NEWS_AGENT_REGION", "br-pt"), "br-pt");
    }

    #[test]
    fn test_dotenv_file_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".env");
        fs::write(
            &path,
            "# comment\n\n\
             AGENT_UTILS_TEST_KEY=abc123 # personal key\n\
             AGENT_UTILS_TEST_MODEL=\"gemini-2.0-flash\" # pinned\n\
             export AGENT_UTILS_TEST_LANGUAGE='en'\n",
        )
        .unwrap();

        let config = Config::from_env_and_file("test", &path).unwrap();

        assert_eq!(config.get("AGENT_UTILS_TEST_KEY").as_deref(), Some("abc123"));
        assert_eq!(
            config.get("AGENT_UTILS_TEST_MODEL").as_deref(),
            Some("gemini-2.0-flash")
        );
        assert_eq!(config.get("AGENT_UTILS_TEST_LANGUAGE").as_deref(), Some("en"));
        assert!(config.get("AGENT_UTILS_TEST_ABSENT").is_none());
    }

    #[test]
    fn test_process_env_wins_over_dotenv_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, "PATH=/from/dotenv\n").unwrap();

        let config = Config::from_env_and_file("test", &path).unwrap();
        if std::env::var_os("PATH").is_some() {
            assert_ne!(config.get("PATH").as_deref(), Some("/from/dotenv"));
        }
    }

    #[test]
    fn test_malformed_dotenv_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, "AGENT UTILS TEST KEY=1\n").unwrap();

        assert!(matches!(
            Config::from_env_and_file("test", &path),
            Err(ConfigError::File { .. })
        ));
    }

    #[test]
    fn test_missing_dotenv_file_is_fine() {
        let config = Config::from_env_and_file("test", "/nonexistent/dir/.env").unwrap();
        assert_eq!(config.app_name(), "test");
    }
}

//! Answer languages
//!
//! The agent speaks English or Portuguese. Any other code is carried as
//! [`Language::Other`] and rendered with the English fallback.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported languages for prompts
///
/// ```
/// use agent_prompt::Language;
///
/// assert_eq!(Language::from_code("pt-BR"), Language::Portuguese);
/// assert_eq!(Language::Portuguese.code(), "pt");
/// assert_eq!(Language::from_code("es"), Language::Other("es".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Language {
    /// English
    #[default]
    English,
    /// Portuguese (Brazilian)
    Portuguese,
    /// Other languages (ISO 639-1 code)
    Other(String),
}

impl Language {
    /// ISO 639-1 code
    pub fn code(&self) -> &str {
        match self {
            Language::English => "en",
            Language::Portuguese => "pt",
            Language::Other(code) => code,
        }
    }

    /// Display name
    pub fn name(&self) -> &str {
        match self {
            Language::English => "English",
            Language::Portuguese => "Portuguese",
            Language::Other(code) => code,
        }
    }

    /// Parse from an ISO code, a regional tag or a common name
    pub fn from_code(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "en" | "en-us" | "en-gb" | "english" => Language::English,
            "pt" | "pt-br" | "pt_br" | "pt-pt" | "portuguese" | "português" | "portugues" => {
                Language::Portuguese
            }
            other => Language::Other(other.to_string()),
        }
    }

    /// Whether this is one of the built-in languages
    pub fn is_known(&self) -> bool {
        !matches!(self, Language::Other(_))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<&str> for Language {
    fn from(s: &str) -> Self {
        Language::from_code(s)
    }
}

impl From<String> for Language {
    fn from(s: String) -> Self {
        Language::from_code(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(Language::from_code("en"), Language::English);
        assert_eq!(Language::from_code("EN"), Language::English);
        assert_eq!(Language::from_code("english"), Language::English);

        assert_eq!(Language::from_code("pt"), Language::Portuguese);
        assert_eq!(Language::from_code(" pt-BR "), Language::Portuguese);
        assert_eq!(Language::from_code("Português"), Language::Portuguese);

        assert_eq!(
            Language::from_code("es"),
            Language::Other("es".to_string())
        );
    }

    #[test]
    fn test_code_and_name() {
        assert_eq!(Language::English.code(), "en");
        assert_eq!(Language::Portuguese.code(), "pt");
        assert_eq!(Language::Portuguese.name(), "Portuguese");
        assert_eq!(Language::Other("es".to_string()).name(), "es");
        assert_eq!(format!("{}", Language::English), "English");
    }

    #[test]
    fn test_is_known() {
        assert!(Language::English.is_known());
        assert!(Language::Portuguese.is_known());
        assert!(!Language::Other("es".to_string()).is_known());
    }

    #[test]
    fn test_into() {
        let lang: Language = "pt".into();
        assert_eq!(lang, Language::Portuguese);

        let lang: Language = String::from("english").into();
        assert_eq!(lang, Language::English);
    }

    #[test]
    fn test_serde() {
        let json = serde_json::to_string(&Language::Portuguese).unwrap();
        let parsed: Language = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Language::Portuguese);
    }
}

//! Core prompt template trait

use crate::{Language, PromptError, Result};

/// A named template with one variant per language
pub trait PromptTemplate: Send + Sync {
    /// Template name, used as the registry key
    fn name(&self) -> &str;

    /// Languages with a variant
    fn languages(&self) -> Vec<Language>;

    fn supports_language(&self, lang: &Language) -> bool {
        self.languages().contains(lang)
    }

    /// Render the variant for `lang`
    fn render(&self, lang: &Language, vars: &serde_json::Value) -> Result<String>;

    /// Render `lang`, else English, else whichever variant exists
    fn render_with_fallback(&self, lang: &Language, vars: &serde_json::Value) -> Result<String> {
        if self.supports_language(lang) {
            return self.render(lang, vars);
        }

        if self.supports_language(&Language::English) {
            return self.render(&Language::English, vars);
        }

        let fallback = self
            .languages()
            .into_iter()
            .next()
            .ok_or_else(|| PromptError::NoLanguageAvailable(self.name().to_string()))?;

        self.render(&fallback, vars)
    }
}

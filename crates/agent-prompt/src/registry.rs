//! Prompt template registry

use crate::{Language, PromptError, PromptTemplate, Result};
use std::collections::HashMap;
use std::sync::Arc;

/// Named templates plus the language they render in by default
///
/// The registry is filled once at startup and then only read, so it is a
/// plain map rather than a locked one.
pub struct PromptRegistry {
    templates: HashMap<String, Arc<dyn PromptTemplate>>,
    default_language: Language,
}

impl PromptRegistry {
    pub fn new() -> Self {
        Self::with_language(Language::English)
    }

    pub fn with_language(lang: Language) -> Self {
        Self {
            templates: HashMap::new(),
            default_language: lang,
        }
    }

    pub fn default_language(&self) -> &Language {
        &self.default_language
    }

    /// Register a template, replacing any with the same name
    pub fn register<T: PromptTemplate + 'static>(&mut self, template: T) {
        self.templates
            .insert(template.name().to_string(), Arc::new(template));
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn PromptTemplate>> {
        self.templates.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Render in the default language
    pub fn render(&self, name: &str, vars: &serde_json::Value) -> Result<String> {
        self.render_with_lang(name, &self.default_language, vars)
    }

    /// Render in `lang`, falling back as [`PromptTemplate::render_with_fallback`] does
    pub fn render_with_lang(
        &self,
        name: &str,
        lang: &Language,
        vars: &serde_json::Value,
    ) -> Result<String> {
        let template = self
            .templates
            .get(name)
            .ok_or_else(|| PromptError::TemplateNotRegistered(name.to_string()))?;

        template.render_with_fallback(lang, vars)
    }

    /// Registered names, sorted
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self.templates.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl Default for PromptRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PromptRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptRegistry")
            .field("default_language", &self.default_language)
            .field("templates", &self.list())
            .finish()
    }
}

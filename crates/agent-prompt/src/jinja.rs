//! MiniJinja-backed templates

use crate::{Language, PromptError, PromptTemplate, Result};
use minijinja::{Environment, UndefinedBehavior};
use std::collections::HashMap;

/// A prompt template rendered with MiniJinja
///
/// Variables that the caller does not supply are an error rather than an
/// empty string, so a missing topic never reaches the model silently.
///
/// ```
/// use agent_prompt::{JinjaTemplate, Language, PromptTemplate};
/// use serde_json::json;
///
/// let template = JinjaTemplate::builder("plan")
///     .english("{% for step in steps %}{{ loop.index }}. {{ step }}\n{% endfor %}")
///     .build()
///     .unwrap();
///
/// let out = template
///     .render(&Language::English, &json!({ "steps": ["search", "score"] }))
///     .unwrap();
/// assert_eq!(out, "1. search\n2. score\n");
/// ```
pub struct JinjaTemplate {
    name: String,
    templates: HashMap<Language, String>,
}

impl JinjaTemplate {
    pub fn builder(name: impl Into<String>) -> JinjaTemplateBuilder {
        JinjaTemplateBuilder::new(name)
    }

    /// Single English variant
    pub fn new(name: impl Into<String>, template: impl Into<String>) -> Result<Self> {
        Self::builder(name).english(template).build()
    }

    /// English and Portuguese variants
    pub fn bilingual(
        name: impl Into<String>,
        english: impl Into<String>,
        portuguese: impl Into<String>,
    ) -> Result<Self> {
        Self::builder(name)
            .english(english)
            .portuguese(portuguese)
            .build()
    }

    /// Source text of one variant
    pub fn raw_template(&self, lang: &Language) -> Option<&str> {
        self.templates.get(lang).map(String::as_str)
    }
}

fn environment<'source>() -> Environment<'source> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.set_keep_trailing_newline(true);
    env
}

impl PromptTemplate for JinjaTemplate {
    fn name(&self) -> &str {
        &self.name
    }

    fn languages(&self) -> Vec<Language> {
        self.templates.keys().cloned().collect()
    }

    fn render(&self, lang: &Language, vars: &serde_json::Value) -> Result<String> {
        let source = self
            .templates
            .get(lang)
            .ok_or_else(|| PromptError::TemplateNotFound {
                name: self.name.clone(),
                language: lang.code().to_string(),
            })?;

        environment()
            .render_str(source, minijinja::Value::from_serialize(vars))
            .map_err(|e| PromptError::RenderError {
                name: self.name.clone(),
                detail: e.to_string(),
            })
    }
}

impl std::fmt::Debug for JinjaTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JinjaTemplate")
            .field("name", &self.name)
            .field("languages", &self.templates.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for [`JinjaTemplate`]
pub struct JinjaTemplateBuilder {
    name: String,
    templates: HashMap<Language, String>,
}

impl JinjaTemplateBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            templates: HashMap::new(),
        }
    }

    pub fn template(mut self, lang: Language, content: impl Into<String>) -> Self {
        self.templates.insert(lang, content.into());
        self
    }

    pub fn english(self, content: impl Into<String>) -> Self {
        self.template(Language::English, content)
    }

    pub fn portuguese(self, content: impl Into<String>) -> Self {
        self.template(Language::Portuguese, content)
    }

    /// Parse every variant up front so syntax errors surface at startup
    pub fn build(self) -> Result<JinjaTemplate> {
        if self.templates.is_empty() {
            return Err(PromptError::NoTemplatesProvided(self.name));
        }

        let env = environment();
        for (lang, content) in &self.templates {
            env.template_from_str(content)
                .map_err(|e| PromptError::TemplateParseFailed {
                    name: self.name.clone(),
                    language: lang.code().to_string(),
                    detail: e.to_string(),
                })?;
        }

        Ok(JinjaTemplate {
            name: self.name,
            templates: self.templates,
        })
    }
}

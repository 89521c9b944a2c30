//! Prompt templates for the news agent
//!
//! Templates are written in Jinja2 syntax (rendered with MiniJinja) and may
//! carry one variant per [`Language`]. A [`PromptRegistry`] holds the
//! templates an agent needs and renders them by name.
//!
//! ```
//! use agent_prompt::{JinjaTemplate, Language, PromptRegistry};
//! use serde_json::json;
//!
//! let mut registry = PromptRegistry::with_language(Language::Portuguese);
//! registry.register(
//!     JinjaTemplate::bilingual(
//!         "topic",
//!         "News about {{ topic }}",
//!         "Notícias sobre {{ topic }}",
//!     )
//!     .unwrap(),
//! );
//!
//! let prompt = registry.render("topic", &json!({ "topic": "Bitcoin" })).unwrap();
//! assert_eq!(prompt, "Notícias sobre Bitcoin");
//! ```

mod error;
mod jinja;
mod language;
mod registry;
mod template;

pub use error::{PromptError, Result};
pub use jinja::{JinjaTemplate, JinjaTemplateBuilder};
pub use language::Language;
pub use registry::PromptRegistry;
pub use template::PromptTemplate;

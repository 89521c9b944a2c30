//! Prompt templates for the news agent
//!
//! Two templates: the system prompt sent with every model call, and the
//! per-turn instruction built from a [`TurnRequest`].

use crate::error::Result;
use crate::locale::Locale;
use agent_prompt::{JinjaTemplate, PromptRegistry};
use serde::Serialize;
use serde_json::json;

pub const SYSTEM_PROMPT: &str = "news.system";
pub const TURN_PROMPT: &str = "news.turn";

const SYSTEM_EN: &str = "\
You are a news assistant. You have two tools:
- search_news: fetches the latest news about a topic.
- analyze_sentiment: scores the sentiment of a text.

Always call search_news before answering, then pass the news text you found to \
analyze_sentiment. Base your answer only on what the tools returned. If the search \
reports an error or finds nothing, say so plainly instead of inventing news.
Write the final answer in {{ answer_language }} and include the sentiment label.";

const SYSTEM_PT: &str = "\
Você é um assistente de notícias. Você tem duas ferramentas:
- search_news: busca as últimas notícias sobre um tema.
- analyze_sentiment: calcula o sentimento de um texto.

Sempre chame search_news antes de responder e depois passe o texto das notícias \
encontradas para analyze_sentiment. Baseie a resposta apenas no que as ferramentas \
devolveram. Se a busca informar um erro ou não encontrar nada, diga isso claramente \
em vez de inventar notícias.
Escreva a resposta final em {{ answer_language }} e inclua o rótulo de sentimento.";

const TURN_EN: &str = "\
Topic: {{ topic }}
{% for step in plan %}{{ loop.index }}. \
{% if step == \"search_news\" %}Search the latest news about \"{{ topic }}\" with search_news.\
{% elif step == \"analyze_sentiment\" %}Score the sentiment of the news text with analyze_sentiment.\
{% else %}Summarize the news and state the overall sentiment.{% endif %}
{% endfor %}Answer in {{ answer_language }}.";

const TURN_PT: &str = "\
Tema: {{ topic }}
{% for step in plan %}{{ loop.index }}. \
{% if step == \"search_news\" %}Busque as notícias mais recentes sobre \"{{ topic }}\" com search_news.\
{% elif step == \"analyze_sentiment\" %}Calcule o sentimento do texto das notícias com analyze_sentiment.\
{% else %}Resuma as notícias e informe o sentimento geral.{% endif %}
{% endfor %}Responda em {{ answer_language }}.";

/// One step the model is asked to take, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStep {
    SearchNews,
    AnalyzeSentiment,
    Summarize,
}

/// Everything one console turn asks of the agent
///
/// The plan and the answer language are independent: the same plan can be
/// asked for in either language.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnRequest {
    pub topic: String,
    pub plan: Vec<PlanStep>,
    pub answer_locale: Locale,
}

impl TurnRequest {
    /// Search, then score, then answer
    pub fn new(topic: impl Into<String>, answer_locale: Locale) -> Self {
        Self {
            topic: topic.into(),
            plan: vec![
                PlanStep::SearchNews,
                PlanStep::AnalyzeSentiment,
                PlanStep::Summarize,
            ],
            answer_locale,
        }
    }

    pub fn with_plan(mut self, plan: Vec<PlanStep>) -> Self {
        self.plan = plan;
        self
    }

    pub fn render(&self, registry: &PromptRegistry) -> Result<String> {
        let vars = json!({
            "topic": self.topic,
            "plan": self.plan,
            "answer_language": self.answer_locale.answer_language(),
        });

        Ok(registry.render_with_lang(TURN_PROMPT, &self.answer_locale.language(), &vars)?)
    }
}

/// Register the news agent's templates
pub fn register_prompts(registry: &mut PromptRegistry) -> Result<()> {
    registry.register(JinjaTemplate::bilingual(SYSTEM_PROMPT, SYSTEM_EN, SYSTEM_PT)?);
    registry.register(JinjaTemplate::bilingual(TURN_PROMPT, TURN_EN, TURN_PT)?);
    Ok(())
}

/// Registry with the news templates, defaulting to `locale`
pub fn prompt_registry(locale: Locale) -> Result<PromptRegistry> {
    let mut registry = PromptRegistry::with_language(locale.language());
    register_prompts(&mut registry)?;
    Ok(registry)
}

pub fn system_prompt(registry: &PromptRegistry, locale: Locale) -> Result<String> {
    let vars = json!({ "answer_language": locale.answer_language() });
    Ok(registry.render_with_lang(SYSTEM_PROMPT, &locale.language(), &vars)?)
}

//! Operator-facing text in the two supported languages
//!
//! Everything the agent prints to the console, and the text the tools hand
//! back to the model, comes from here. Unknown languages use English.

use agent_prompt::Language;

/// Console and tool text for one language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    Portuguese,
    English,
}

impl From<&Language> for Locale {
    fn from(lang: &Language) -> Self {
        match lang {
            Language::Portuguese => Locale::Portuguese,
            _ => Locale::English,
        }
    }
}

impl Locale {
    pub fn language(self) -> Language {
        match self {
            Locale::Portuguese => Language::Portuguese,
            Locale::English => Language::English,
        }
    }

    /// Human name of the language the final answer must be written in
    pub fn answer_language(self) -> &'static str {
        match self {
            Locale::Portuguese => "português do Brasil",
            Locale::English => "English",
        }
    }

    pub fn untitled(self) -> &'static str {
        match self {
            Locale::Portuguese => "Sem título",
            Locale::English => "Untitled",
        }
    }

    pub fn unknown_source(self) -> &'static str {
        match self {
            Locale::Portuguese => "Fonte desconhecida",
            Locale::English => "Unknown source",
        }
    }

    /// Returned by the search tool when both queries come back empty
    pub fn no_results(self) -> &'static str {
        match self {
            Locale::Portuguese => {
                "Nenhuma notícia encontrada. O servidor pode estar bloqueando a conexão."
            }
            Locale::English => "No news found. The server may be blocking the connection.",
        }
    }

    /// Returned by the search tool when the provider fails
    pub fn search_error(self, detail: &str) -> String {
        match self {
            Locale::Portuguese => format!("Erro crítico na ferramenta de busca: {detail}"),
            Locale::English => format!("Critical error in the search tool: {detail}"),
        }
    }

    pub fn blank_topic(self) -> &'static str {
        match self {
            Locale::Portuguese => "o termo de busca está vazio",
            Locale::English => "the search term is empty",
        }
    }

    pub fn searching(self, topic: &str) -> String {
        match self {
            Locale::Portuguese => format!("🔍 Pesquisando notícias sobre: '{topic}' no DuckDuckGo..."),
            Locale::English => format!("🔍 Searching news about: '{topic}' on DuckDuckGo..."),
        }
    }

    pub fn scoring(self) -> &'static str {
        match self {
            Locale::Portuguese => "🧠 Calculando o sentimento do texto...",
            Locale::English => "🧠 Computing the sentiment of the text...",
        }
    }

    pub fn positive(self) -> &'static str {
        match self {
            Locale::Portuguese => "POSITIVO",
            Locale::English => "POSITIVE",
        }
    }

    pub fn negative(self) -> &'static str {
        match self {
            Locale::Portuguese => "NEGATIVO",
            Locale::English => "NEGATIVE",
        }
    }

    pub fn neutral(self) -> &'static str {
        match self {
            Locale::Portuguese => "NEUTRO",
            Locale::English => "NEUTRAL",
        }
    }

    pub fn token_monitor_label(self) -> &'static str {
        match self {
            Locale::Portuguese => "Total usado na etapa",
            Locale::English => "Total used in this step",
        }
    }

    pub fn banner(self) -> &'static str {
        match self {
            Locale::Portuguese => "📰 ASSISTENTE DE NOTÍCIAS",
            Locale::English => "📰 NEWS ASSISTANT",
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            Locale::Portuguese => "Dica: Se der erro de busca, tente termos mais gerais.",
            Locale::English => "Tip: if the search fails, try broader terms.",
        }
    }

    pub fn prompt(self) -> &'static str {
        match self {
            Locale::Portuguese => "Tema (ou 'sair'): ",
            Locale::English => "Topic (or 'exit'): ",
        }
    }

    pub fn exit_words(self) -> [&'static str; 2] {
        match self {
            Locale::Portuguese => ["sair", "x"],
            Locale::English => ["exit", "x"],
        }
    }

    /// Case-insensitive, surrounding whitespace ignored
    pub fn is_exit(self, input: &str) -> bool {
        let input = input.trim();
        self.exit_words()
            .iter()
            .any(|word| input.eq_ignore_ascii_case(word))
    }

    pub fn answer_header(self) -> &'static str {
        match self {
            Locale::Portuguese => "✅ Resposta:",
            Locale::English => "✅ Answer:",
        }
    }

    pub fn turn_error(self, detail: &str) -> String {
        match self {
            Locale::Portuguese => format!("❌ Erro ao processar o tema: {detail}"),
            Locale::English => format!("❌ Error while processing the topic: {detail}"),
        }
    }

    pub fn goodbye(self) -> &'static str {
        match self {
            Locale::Portuguese => "Até logo!",
            Locale::English => "Goodbye!",
        }
    }

    pub fn missing_key(self, key: &str) -> String {
        match self {
            Locale::Portuguese => format!("❌ Erro: {key} não encontrada no ambiente nem no arquivo .env"),
            Locale::English => format!("❌ Error: {key} not found in the environment or the .env file"),
        }
    }

    pub fn stopped(self) -> &'static str {
        match self {
            Locale::Portuguese => "O agente parou por atingir o limite de iterações.",
            Locale::English => "Agent stopped due to iteration limit.",
        }
    }

    pub fn tool_trace(self, tool: &str, input: &str) -> String {
        match self {
            Locale::Portuguese => format!("🛠️  Ferramenta: {tool} | Entrada: {input}"),
            Locale::English => format!("🛠️  Tool: {tool} | Input: {input}"),
        }
    }

    pub fn observation_trace(self, preview: &str) -> String {
        match self {
            Locale::Portuguese => format!("👀 Observação: {preview}"),
            Locale::English => format!("👀 Observation: {preview}"),
        }
    }

    pub fn search_tool_description(self) -> &'static str {
        match self {
            Locale::Portuguese => {
                "Use para buscar as últimas notícias. Entrada: termo de busca (ex: 'Bitcoin', 'Petrobras')."
            }
            Locale::English => {
                "Use to fetch the latest news. Input: a search term (e.g. 'Bitcoin', 'Petrobras')."
            }
        }
    }

    pub fn search_input_description(self) -> &'static str {
        match self {
            Locale::Portuguese => "Termo de busca",
            Locale::English => "Search term",
        }
    }

    pub fn sentiment_tool_description(self) -> &'static str {
        match self {
            Locale::Portuguese => {
                "Analisa o sentimento de um texto. Entrada: O texto/resumo da notícia encontrado."
            }
            Locale::English => {
                "Scores the sentiment of a text. Input: the news text or summary that was found."
            }
        }
    }

    pub fn sentiment_input_description(self) -> &'static str {
        match self {
            Locale::Portuguese => "Texto a ser analisado",
            Locale::English => "Text to score",
        }
    }
}

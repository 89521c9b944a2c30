//! News Agent CLI
//!
//! Asks for a topic, searches recent news about it, scores the sentiment
//! and prints the model's report.
//!
//! # Usage
//!
//! ```bash
//! # GOOGLE_API_KEY may also live in a .env file
//! export GOOGLE_API_KEY="..."
//!
//! cargo run --bin news-agent -p agent-news
//! cargo run --bin news-agent -p agent-news -- --language en --verbose
//! ```

use agent_news::sentiment::LexiconAnalyzer;
use agent_news::tools::news_tools;
use agent_news::{
    AgentSettings, DuckDuckGoClient, InteractiveLoop, Locale, NewsAgent, NewsAgentOptions,
    NewsError, SettingsOverrides,
};
use agent_utils::{Config, init_tracing_with_default};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "news-agent", version, about = "Console news assistant with sentiment scoring")]
struct Args {
    /// Gemini model name [env: GEMINI_MODEL]
    #[arg(long)]
    model: Option<String>,

    /// OpenAI-compatible base URL [env: GEMINI_API_BASE]
    #[arg(long)]
    api_base: Option<String>,

    /// Answer language, e.g. pt or en [env: NEWS_AGENT_LANGUAGE]
    #[arg(short, long)]
    language: Option<String>,

    /// DuckDuckGo region, e.g. br-pt [env: NEWS_AGENT_REGION]
    #[arg(long)]
    region: Option<String>,

    /// Print every tool call and observation
    #[arg(short, long)]
    verbose: bool,

    /// Dotenv file read before the process environment is consulted
    #[arg(long, default_value = ".env")]
    env_file: PathBuf,
}

impl Args {
    fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            model: self.model.clone(),
            api_base: self.api_base.clone(),
            language: self.language.clone(),
            region: self.region.clone(),
            verbose: self.verbose,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing_with_default("warn,agent_news=info");

    let config = Config::from_env_and_file("news-agent", &args.env_file)?;
    let overrides = args.overrides();

    let settings = match AgentSettings::load(&config, &overrides) {
        Ok(settings) => settings,
        Err(NewsError::MissingCredential(key)) => {
            let locale = Locale::from(&AgentSettings::resolve_language(&config, &overrides));
            eprintln!("{}", locale.missing_key(&key));
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };
    info!(?settings, "Loaded settings");

    let locale = settings.locale();
    let news = settings.news_config()?;
    let search = Arc::new(DuckDuckGoClient::new(news.rate_limit_per_minute)?);
    let tools = news_tools(search, Arc::new(LexiconAnalyzer::new()), news, locale);

    let agent = NewsAgent::new(
        Arc::new(settings.build_provider()?),
        tools,
        NewsAgentOptions {
            model: settings.model.clone(),
            locale,
            verbose: settings.verbose,
            ..Default::default()
        },
    )?;

    let input = tokio::io::BufReader::new(tokio::io::stdin());
    let mut repl = InteractiveLoop::new(Arc::new(agent), locale, input, io::stdout());
    repl.print_banner()?;
    let summary = repl.run().await?;
    info!(turns = summary.turns, "Bye");

    Ok(())
}

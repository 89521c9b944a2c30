//! Read-eval-print loop over any line source
//!
//! ```text
//! AwaitingInput --topic--> Dispatching --answer or error--> AwaitingInput
//! AwaitingInput --exit word or EOF--> Terminated
//! ```

use crate::error::Result;
use crate::locale::Locale;
use agent_core::{Agent, Context};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{error, info};

const RULE_WIDTH: usize = 50;

/// What one input line asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Exit,
    /// Blank line; prompt again
    Skip,
    Topic(String),
}

impl Command {
    pub fn parse(line: &str, locale: Locale) -> Self {
        let line = line.trim();
        if line.is_empty() {
            Command::Skip
        } else if locale.is_exit(line) {
            Command::Exit
        } else {
            Command::Topic(line.to_string())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The operator typed an exit word
    ExitWord,
    EndOfInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopSummary {
    /// Topics dispatched to the agent, failed ones included
    pub turns: u64,
    pub failed_turns: u64,
    pub exit: ExitReason,
}

/// Console session driving one agent
///
/// Input is read asynchronously, so waiting for the operator never parks a
/// runtime worker.
pub struct InteractiveLoop<R, W> {
    agent: Arc<dyn Agent>,
    locale: Locale,
    input: R,
    output: W,
}

impl<R: AsyncBufRead + Unpin, W: Write> InteractiveLoop<R, W> {
    pub fn new(agent: Arc<dyn Agent>, locale: Locale, input: R, output: W) -> Self {
        Self {
            agent,
            locale,
            input,
            output,
        }
    }

    pub fn print_banner(&mut self) -> Result<()> {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(self.output, "{rule}")?;
        writeln!(self.output, "{}", self.locale.banner())?;
        writeln!(self.output, "{}", self.locale.hint())?;
        writeln!(self.output, "{rule}")?;
        Ok(())
    }

    /// Run until an exit word or end of input
    ///
    /// Agent failures are reported and the loop carries on; only console
    /// I/O errors end it early.
    pub async fn run(&mut self) -> Result<LoopSummary> {
        let mut turns = 0;
        let mut failed_turns = 0;

        let exit = loop {
            write!(self.output, "\n{}", self.locale.prompt())?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line).await? == 0 {
                writeln!(self.output, "\n{}", self.locale.goodbye())?;
                break ExitReason::EndOfInput;
            }

            let topic = match Command::parse(&line, self.locale) {
                Command::Exit => {
                    writeln!(self.output, "{}", self.locale.goodbye())?;
                    break ExitReason::ExitWord;
                }
                Command::Skip => continue,
                Command::Topic(topic) => topic,
            };

            turns += 1;
            let mut context = Context::new()
                .with_language(self.locale.language().code())
                .with_turn(turns);

            match self.agent.process(topic, &mut context).await {
                Ok(answer) => {
                    writeln!(self.output, "\n{}\n{answer}", self.locale.answer_header())?;
                }
                Err(e) => {
                    failed_turns += 1;
                    error!(turn = turns, error = %e, "Turn failed");
                    writeln!(self.output, "\n{}", self.locale.turn_error(&e.to_string()))?;
                }
            }
        };

        info!(turns, failed_turns, ?exit, "Session ended");
        Ok(LoopSummary {
            turns,
            failed_turns,
            exit,
        })
    }
}

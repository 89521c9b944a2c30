//! Console observers attached to the executor

use crate::locale::Locale;
use agent_llm::{CompletionResponse, UsageRecord};
use agent_runtime::ExecutorEventHandler;
use agent_tools::ToolId;
use async_trait::async_trait;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use tracing::debug;

const PREVIEW_CHARS: usize = 200;

/// Prints the token count of every model call
///
/// Responses without usage metadata print nothing.
#[derive(Debug, Clone, Copy)]
pub struct UsageMonitor {
    locale: Locale,
}

impl UsageMonitor {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn line(&self, response: &CompletionResponse) -> Option<String> {
        match response.usage_record() {
            UsageRecord::Reported(total) => Some(format!(
                "📊 [TOKEN MONITOR] {}: {total}",
                self.locale.token_monitor_label()
            )),
            UsageRecord::Unknown => None,
        }
    }
}

#[async_trait]
impl ExecutorEventHandler for UsageMonitor {
    async fn on_llm_end(&self, response: &CompletionResponse) {
        match self.line(response) {
            Some(line) => println!("\n{line}"),
            None => debug!("Response carried no token usage"),
        }
    }
}

/// Verbose trace of tool calls and their observations
///
/// Turn failures are left to the interactive loop, which reports them once.
#[derive(Clone)]
pub struct ConsoleTrace {
    locale: Locale,
    out: Arc<Mutex<dyn Write + Send>>,
}

impl ConsoleTrace {
    pub fn new(locale: Locale) -> Self {
        Self::with_writer(locale, io::stdout())
    }

    pub fn with_writer(locale: Locale, out: impl Write + Send + 'static) -> Self {
        Self {
            locale,
            out: Arc::new(Mutex::new(out)),
        }
    }

    fn emit(&self, line: &str) {
        if let Ok(mut out) = self.out.lock() {
            if let Err(e) = writeln!(out, "{line}") {
                debug!(error = %e, "Trace line dropped");
            }
        }
    }
}

#[async_trait]
impl ExecutorEventHandler for ConsoleTrace {
    async fn on_tool_start(&self, _call_id: &str, tool: ToolId, input: &str) {
        self.emit(&self.locale.tool_trace(tool.as_str(), &preview(input)));
    }

    async fn on_tool_done(&self, _call_id: &str, _tool: ToolId, output: &str, duration_ms: u64) {
        self.emit(&self.locale.observation_trace(&preview(output)));
        debug!(duration_ms, "Tool finished");
    }
}

/// Whitespace-collapsed prefix of `text`, cut on a character boundary
fn preview(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= PREVIEW_CHARS {
        return flat;
    }
    let cut: String = flat.chars().take(PREVIEW_CHARS).collect();
    format!("{cut}...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_llm::{Message, StopReason, TokenUsage};

    fn response(usage: Option<TokenUsage>) -> CompletionResponse {
        CompletionResponse {
            message: Message::assistant("ok"),
            stop_reason: StopReason::EndTurn,
            usage,
        }
    }

    #[test]
    fn test_reported_total() {
        let monitor = UsageMonitor::new(Locale::Portuguese);
        assert_eq!(
            monitor.line(&response(Some(TokenUsage::total(1234)))).as_deref(),
            Some("📊 [TOKEN MONITOR] Total usado na etapa: 1234")
        );
    }

    #[test]
    fn test_split_usage_is_summed() {
        let monitor = UsageMonitor::new(Locale::English);
        assert_eq!(
            monitor.line(&response(Some(TokenUsage::split(100, 20)))).as_deref(),
            Some("📊 [TOKEN MONITOR] Total used in this step: 120")
        );
    }

    #[test]
    fn test_missing_usage_prints_nothing() {
        let monitor = UsageMonitor::new(Locale::Portuguese);
        assert_eq!(monitor.line(&response(None)), None);
        assert_eq!(
            monitor.line(&response(Some(TokenUsage::default()))),
            None
        );
    }

    #[tokio::test]
    async fn test_handlers_never_fail() {
        let monitor = UsageMonitor::new(Locale::Portuguese);
        monitor.on_llm_end(&response(None)).await;
        monitor.on_llm_end(&response(Some(TokenUsage::total(5)))).await;

        let trace = ConsoleTrace::new(Locale::English);
        trace.on_tool_start("call_0", ToolId::SearchNews, "Bitcoin").await;
        trace.on_tool_done("call_0", ToolId::SearchNews, "- [] a (b): c\n", 3).await;
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[tokio::test]
    async fn test_trace_shows_tools_but_not_turn_errors() {
        let captured = Captured::default();
        let trace = ConsoleTrace::with_writer(Locale::English, captured.clone());

        trace.on_tool_start("call_0", ToolId::SearchNews, "Bitcoin").await;
        trace.on_tool_done("call_0", ToolId::SearchNews, "- [] a (b):\n c\n", 3).await;
        trace.on_error("Could not parse model output: empty reply").await;

        let text = captured.text();
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("search_news"));
        assert!(text.contains("Bitcoin"));
        assert!(text.contains("- [] a (b): c"));
        assert!(!text.contains("empty reply"));
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("a\nb   c"), "a b c");

        let long = "é".repeat(PREVIEW_CHARS + 10);
        let cut = preview(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), PREVIEW_CHARS + 3);
    }
}

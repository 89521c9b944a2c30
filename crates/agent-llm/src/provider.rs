//! LLM provider trait definition

use crate::{CompletionRequest, CompletionResponse, Result};
use async_trait::async_trait;

/// A reasoning engine reachable over some API
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Generate one completion for the whole conversation in `request`
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Provider name (e.g., "gemini")
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LLMError, Message, StopReason};

    #[tokio::test]
    async fn test_mock_provider() {
        let mut mock = MockLLMProvider::new();
        mock.expect_name().return_const("mock".to_string());
        mock.expect_complete().times(1).returning(|req| {
            let last = req
                .messages
                .last()
                .and_then(Message::text)
                .unwrap_or_default();
            Ok(CompletionResponse {
                message: Message::assistant(format!("echo: {last}")),
                stop_reason: StopReason::EndTurn,
                usage: None,
            })
        });

        let request = CompletionRequest::builder("m")
            .add_message(Message::user("hi"))
            .build();
        let response = mock.complete(request).await.unwrap();

        assert_eq!(mock.name(), "mock");
        assert_eq!(response.message.text().as_deref(), Some("echo: hi"));
    }

    #[tokio::test]
    async fn test_mock_provider_error() {
        let mut mock = MockLLMProvider::new();
        mock.expect_complete()
            .returning(|_| Err(LLMError::RateLimitExceeded("slow down".to_string())));

        let result = mock.complete(CompletionRequest::builder("m").build()).await;
        assert!(matches!(result, Err(LLMError::RateLimitExceeded(_))));
    }
}

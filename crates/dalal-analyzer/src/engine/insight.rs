//! Analysis text generation via the hosted language model
//!
//! Both entry points are single-shot completions and both fail soft: a
//! provider error becomes an explanatory in-band string, never a fault
//! that aborts the rest of the report.

use crate::prompts::{ANALYST_SYSTEM_PROMPT, RECOMMENDER_SYSTEM_PROMPT, build_top_picks_prompt};
use dalal_llm::{CompletionRequest, LLMProvider, Message};
use std::sync::Arc;
use tracing::warn;

/// Output budget for single-stock analysis
const ANALYSIS_MAX_TOKENS: usize = 2000;

/// Output budget for the top-picks recommendation
const TOP_PICKS_MAX_TOKENS: usize = 1000;

const TEMPERATURE: f32 = 0.7;

/// Generates analysis text from prepared prompts
pub struct InsightGenerator {
    provider: Arc<dyn LLMProvider>,
    model: String,
}

impl InsightGenerator {
    /// Create a generator over the given provider and model
    pub fn new(provider: Arc<dyn LLMProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// Generate the deep analysis for one stock
    pub async fn generate(&self, prompt: &str) -> String {
        let request = CompletionRequest::builder(&self.model)
            .system(ANALYST_SYSTEM_PROMPT)
            .add_message(Message::user(prompt))
            .temperature(TEMPERATURE)
            .max_tokens(ANALYSIS_MAX_TOKENS)
            .build();

        match self.provider.complete(request).await {
            Ok(response) => response.text().to_string(),
            Err(e) => {
                warn!("Analysis generation failed: {e}");
                format!("Error generating AI analysis: {e}")
            }
        }
    }

    /// Recommend today's best picks over the candidate list
    pub async fn generate_top_picks(&self, candidates: &[&str]) -> String {
        let prompt = match build_top_picks_prompt(candidates) {
            Ok(prompt) => prompt,
            Err(e) => return format!("Error generating recommendations: {e}"),
        };

        let request = CompletionRequest::builder(&self.model)
            .system(RECOMMENDER_SYSTEM_PROMPT)
            .add_message(Message::user(prompt))
            .temperature(TEMPERATURE)
            .max_tokens(TOP_PICKS_MAX_TOKENS)
            .build();

        match self.provider.complete(request).await {
            Ok(response) => response.text().to_string(),
            Err(e) => {
                warn!("Recommendation generation failed: {e}");
                format!("Error generating recommendations: {e}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use dalal_llm::{CompletionResponse, LLMError, StopReason, TokenUsage};

    /// Returns a fixed completion
    struct CannedProvider(&'static str);

    #[async_trait]
    impl LLMProvider for CannedProvider {
        async fn complete(
            &self,
            _request: CompletionRequest,
        ) -> dalal_llm::Result<CompletionResponse> {
            Ok(CompletionResponse {
                message: Message::assistant(self.0),
                stop_reason: StopReason::EndTurn,
                usage: TokenUsage {
                    input_tokens: 10,
                    output_tokens: 5,
                },
            })
        }

        fn name(&self) -> &str {
            "canned"
        }
    }

    /// Echoes the user prompt back as the completion
    struct EchoProvider;

    #[async_trait]
    impl LLMProvider for EchoProvider {
        async fn complete(
            &self,
            request: CompletionRequest,
        ) -> dalal_llm::Result<CompletionResponse> {
            let echo = request
                .messages
                .first()
                .map(|m| m.content.clone())
                .unwrap_or_default();
            Ok(CompletionResponse {
                message: Message::assistant(echo),
                stop_reason: StopReason::EndTurn,
                usage: TokenUsage {
                    input_tokens: 0,
                    output_tokens: 0,
                },
            })
        }

        fn name(&self) -> &str {
            "echo"
        }
    }

    /// Fails every call
    struct FailingProvider;

    #[async_trait]
    impl LLMProvider for FailingProvider {
        async fn complete(
            &self,
            _request: CompletionRequest,
        ) -> dalal_llm::Result<CompletionResponse> {
            Err(LLMError::RequestFailed("connection reset".to_string()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn generator(provider: impl LLMProvider + 'static) -> InsightGenerator {
        InsightGenerator::new(Arc::new(provider), "test-model")
    }

    #[test]
    fn test_generate_returns_model_text() {
        let generator = generator(CannedProvider("a thorough analysis"));
        let text = tokio_test::block_on(generator.generate("prompt"));
        assert_eq!(text, "a thorough analysis");
    }

    #[test]
    fn test_generate_degrades_to_error_string() {
        let generator = generator(FailingProvider);
        let text = tokio_test::block_on(generator.generate("prompt"));
        assert_eq!(
            text,
            "Error generating AI analysis: API request failed: connection reset"
        );
    }

    #[test]
    fn test_top_picks_degrades_to_error_string() {
        let generator = generator(FailingProvider);
        let text = tokio_test::block_on(generator.generate_top_picks(&["RELIANCE.NS"]));
        assert_eq!(
            text,
            "Error generating recommendations: API request failed: connection reset"
        );
    }

    #[test]
    fn test_top_picks_prompt_embeds_candidates() {
        let generator = generator(EchoProvider);
        let text =
            tokio_test::block_on(generator.generate_top_picks(&["RELIANCE.NS", "TCS.NS"]));
        assert!(text.contains("RELIANCE.NS, TCS.NS"));
        assert!(text.contains("top 5 best Indian stock picks"));
    }
}

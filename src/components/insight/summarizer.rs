use super::prompt::CenterSnapshot;
use crate::error::{insight_error, AppResult};
use async_trait::async_trait;
use tracing::{error, info};

/// Produces a free-text analysis of the roster
#[async_trait]
pub trait Summarizer: Send + Sync + 'static {
    /// Name used in logs
    fn name(&self) -> &'static str;

    /// Summarize the roster snapshot as markdown text
    async fn summarize(&self, snapshots: &[CenterSnapshot]) -> AppResult<String>;
}

/// Localized message shown when the summary could not be produced
pub fn fallback_message() -> String {
    t!("insight_fallback").to_string()
}

/// Run the summarizer once, replacing any failure with the fallback message
pub async fn summarize_or_fallback(
    summarizer: &dyn Summarizer,
    snapshots: &[CenterSnapshot],
) -> String {
    info!(
        "Requesting insight from {} for {} centers",
        summarizer.name(),
        snapshots.len()
    );

    match summarizer.summarize(snapshots).await {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => {
            error!("{} returned an empty insight", summarizer.name());
            fallback_message()
        }
        Err(e) => {
            error!("{} insight request failed: {}", summarizer.name(), e);
            fallback_message()
        }
    }
}

/// Summarizer used when no model is configured
#[derive(Debug, Clone)]
pub struct UnavailableSummarizer {
    reason: String,
}

impl UnavailableSummarizer {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl Summarizer for UnavailableSummarizer {
    fn name(&self) -> &'static str {
        "unavailable"
    }

    async fn summarize(&self, _snapshots: &[CenterSnapshot]) -> AppResult<String> {
        Err(insight_error(&self.reason))
    }
}

#[cfg(feature = "ai-insight")]
pub use gemini::GeminiSummarizer;

#[cfg(feature = "ai-insight")]
mod gemini {
    use super::super::prompt::{build_prompt, CenterSnapshot, SYSTEM_PROMPT};
    use super::Summarizer;
    use crate::error::{insight_error, AppResult};
    use async_trait::async_trait;
    use rig::completion::{Chat, Message};
    use rig::providers::gemini::Client as GeminiClient;
    use tracing::info;

    /// Summarizer backed by Google Gemini through Rig
    pub struct GeminiSummarizer {
        client: GeminiClient,
        model: String,
        locale: String,
    }

    impl GeminiSummarizer {
        pub fn new(api_key: &str, model: impl Into<String>, locale: impl Into<String>) -> Self {
            Self {
                client: GeminiClient::new(api_key),
                model: model.into(),
                locale: locale.into(),
            }
        }
    }

    #[async_trait]
    impl Summarizer for GeminiSummarizer {
        fn name(&self) -> &'static str {
            "gemini"
        }

        async fn summarize(&self, snapshots: &[CenterSnapshot]) -> AppResult<String> {
            info!("Using Gemini model: {}", self.model);

            let user_prompt = build_prompt(snapshots, &self.locale);

            let agent = self
                .client
                .agent(&self.model)
                .preamble(SYSTEM_PROMPT)
                .temperature(0.7)
                .build();

            let response = agent
                .chat(user_prompt, Vec::<Message>::new())
                .await
                .map_err(|e| insight_error(&format!("Rig API request failed: {}", e)))?;

            info!("Received insight from Gemini");
            Ok(response)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSummarizer(&'static str);

    #[async_trait]
    impl Summarizer for FixedSummarizer {
        fn name(&self) -> &'static str {
            "fixed"
        }

        async fn summarize(&self, _snapshots: &[CenterSnapshot]) -> AppResult<String> {
            Ok(self.0.to_string())
        }
    }

    #[tokio::test]
    async fn test_success_passes_text_through() {
        let text = summarize_or_fallback(&FixedSummarizer("## Fine"), &[]).await;
        assert_eq!(text, "## Fine");
    }

    #[tokio::test]
    async fn test_failure_becomes_fallback() {
        let summarizer = UnavailableSummarizer::new("no key");
        let text = summarize_or_fallback(&summarizer, &[]).await;
        assert_eq!(text, fallback_message());
    }

    #[tokio::test]
    async fn test_blank_response_becomes_fallback() {
        let text = summarize_or_fallback(&FixedSummarizer("  \n"), &[]).await;
        assert_eq!(text, fallback_message());
    }
}

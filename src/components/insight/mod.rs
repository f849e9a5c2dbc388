pub mod prompt;
pub mod summarizer;

pub use prompt::{snapshots, CenterSnapshot};
pub use summarizer::{summarize_or_fallback, Summarizer, UnavailableSummarizer};

use crate::config::Config;
use crate::error::AppResult;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Insight component wrapping the external summarizer
#[derive(Default)]
pub struct Insight {
    summarizer: RwLock<Option<Arc<dyn Summarizer>>>,
}

impl Insight {
    /// Create a new insight component
    pub fn new() -> Self {
        Self {
            summarizer: RwLock::new(None),
        }
    }

    /// Create the component around an existing summarizer
    pub fn with_summarizer(summarizer: Arc<dyn Summarizer>) -> Self {
        Self {
            summarizer: RwLock::new(Some(summarizer)),
        }
    }

    /// Get the summarizer if it exists
    pub async fn get_summarizer(&self) -> Option<Arc<dyn Summarizer>> {
        let summarizer_lock = self.summarizer.read().await;
        summarizer_lock.clone()
    }
}

fn build_summarizer(config: &Config) -> Arc<dyn Summarizer> {
    let Some(api_key) = config.gemini_api_key.as_deref() else {
        warn!("GEMINI_API_KEY not set, insight requests will return the fallback message");
        return Arc::new(UnavailableSummarizer::new("GEMINI_API_KEY not set"));
    };

    #[cfg(feature = "ai-insight")]
    {
        info!("Insight summaries use Gemini model {}", config.gemini_model);
        Arc::new(summarizer::GeminiSummarizer::new(
            api_key,
            config.gemini_model.clone(),
            config.locale.clone(),
        ))
    }

    #[cfg(not(feature = "ai-insight"))]
    {
        let _ = api_key;
        info!("Built without the ai-insight feature");
        Arc::new(UnavailableSummarizer::new("ai-insight feature not enabled"))
    }
}

#[async_trait]
impl super::Component for Insight {
    fn name(&self) -> &'static str {
        "insight"
    }

    async fn init(&self, config: Arc<RwLock<Config>>) -> AppResult<()> {
        let mut summarizer_lock = self.summarizer.write().await;
        if summarizer_lock.is_none() {
            let config_read = config.read().await;
            *summarizer_lock = Some(build_summarizer(&config_read));
        }

        Ok(())
    }

    async fn shutdown(&self) -> AppResult<()> {
        // Nothing is outstanding between requests
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

use crate::components::insight::{Summarizer, UnavailableSummarizer};
use crate::components::{ComponentManager, Insight, Roster, RosterHandle};
use crate::config::Config;
use crate::error::{component_error, AppResult, Error};
use crate::shutdown;
use std::sync::Arc;
use tokio::sync::{oneshot, RwLock};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load and initialize the application config
pub async fn load_config() -> miette::Result<Arc<RwLock<Config>>> {
    match Config::load() {
        Ok(config) => Ok(Arc::new(RwLock::new(config))),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Register the enabled components and initialize them in order
pub async fn build_components(config: Arc<RwLock<Config>>) -> AppResult<Arc<ComponentManager>> {
    let mut component_manager = ComponentManager::new(Arc::clone(&config));

    {
        let config_read = config.read().await;

        if !config_read.is_component_enabled("roster") {
            return Err(component_error("The roster component cannot be disabled"));
        }
        component_manager.register(Roster::new());

        if config_read.is_component_enabled("insight") {
            component_manager.register(Insight::new());
        } else {
            info!("Insight component disabled");
        }
    }

    component_manager.init_all().await?;

    Ok(Arc::new(component_manager))
}

/// Roster handle of an initialized component manager
pub async fn roster_handle(component_manager: &ComponentManager) -> AppResult<RosterHandle> {
    let roster = component_manager
        .get::<Roster>("roster")
        .ok_or_else(|| component_error("Roster component not registered"))?;

    roster
        .get_handle()
        .await
        .ok_or_else(|| component_error("Roster component failed to initialize"))
}

/// Summarizer of the insight component, or one that always falls back
pub async fn summarizer(component_manager: &ComponentManager) -> Arc<dyn Summarizer> {
    let summarizer = match component_manager.get::<Insight>("insight") {
        Some(insight) => insight.get_summarizer().await,
        None => None,
    };

    summarizer.unwrap_or_else(|| {
        warn!("No insight summarizer available");
        Arc::new(UnavailableSummarizer::new("insight component disabled"))
    })
}

/// Initialize components and run the dashboard until shutdown
#[cfg(feature = "web-interface")]
pub async fn start_server(config: Arc<RwLock<Config>>) -> miette::Result<()> {
    use crate::web::{self, AppState};

    // Set locale from config
    let (port, fiscal_year) = {
        let config_read = config.read().await;
        let locale = crate::utils::i18n::set_locale(&config_read.locale);
        info!("Setting locale to {}", locale);
        (config_read.port, config_read.fiscal_year)
    };

    let component_manager = build_components(Arc::clone(&config)).await?;

    let state = AppState {
        roster: roster_handle(&component_manager).await?,
        summarizer: summarizer(&component_manager).await,
        fiscal_year,
    };

    // Create shutdown channel
    let (shutdown_send, shutdown_recv) = oneshot::channel();

    // Spawn signal handler task
    let shutdown_components = Arc::clone(&component_manager);
    tokio::spawn(async move {
        shutdown::handle_signals(shutdown_send, shutdown_components).await;
    });

    info!("Starting dashboard...");
    web::serve(state, port, shutdown_recv).await?;
    info!("Dashboard stopped");

    Ok(())
}

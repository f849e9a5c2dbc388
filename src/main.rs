use eduspace::startup;
use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    info!("Starting EduSpace dashboard");

    // Load configuration
    let config = startup::load_config().await?;

    run(config).await
}

#[cfg(feature = "web-interface")]
async fn run(
    config: std::sync::Arc<tokio::sync::RwLock<eduspace::config::Config>>,
) -> miette::Result<()> {
    startup::start_server(config).await
}

#[cfg(not(feature = "web-interface"))]
async fn run(
    config: std::sync::Arc<tokio::sync::RwLock<eduspace::config::Config>>,
) -> miette::Result<()> {
    let components = startup::build_components(config).await?;
    let roster = startup::roster_handle(&components).await?;
    let stats = roster.stats().await?;
    info!("Roster ready without web interface: {:?}", stats);
    components.shutdown_all().await?;
    Ok(())
}

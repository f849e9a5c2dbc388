mod handlers;
mod pages;

use crate::components::insight::Summarizer;
use crate::components::RosterHandle;
use crate::error::{AppResult, Error};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::oneshot;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    /// Store for every training center
    pub roster: RosterHandle,
    /// External summarizer for AI insights
    pub summarizer: Arc<dyn Summarizer>,
    /// Fiscal year shown on the timeline
    pub fiscal_year: i32,
}

/// Build the dashboard router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::dashboard_handler))
        .route("/timeline", get(pages::timeline_handler))
        .route("/health", get(handlers::health_handler))
        .route("/api/centers", get(handlers::list_centers_handler))
        .route(
            "/api/centers/{id}",
            get(handlers::get_center_handler).patch(handlers::edit_meta_handler),
        )
        .route("/api/centers/{id}/blocks", get(handlers::get_blocks_handler))
        .route(
            "/api/centers/{id}/blocks/{month}",
            delete(handlers::clear_block_handler),
        )
        .route(
            "/api/centers/{id}/schedule",
            post(handlers::assign_schedule_handler).delete(handlers::clear_schedule_handler),
        )
        .route(
            "/api/centers/{id}/maintenance",
            put(handlers::set_maintenance_handler),
        )
        .route("/api/dispatch", post(handlers::dispatch_handler))
        .route("/api/stats", get(handlers::stats_handler))
        .route("/api/trend", get(handlers::trend_handler))
        .route("/api/insight", post(handlers::insight_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve the dashboard until `shutdown_recv` fires
pub async fn serve(
    state: AppState,
    port: u16,
    shutdown_recv: oneshot::Receiver<()>,
) -> AppResult<()> {
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = shutdown_recv.await;
            info!("Received shutdown signal, stopping web server...");
        })
        .await?;

    Ok(())
}

/// Error wrapper that renders as a JSON response
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::CenterNotFound(_) => StatusCode::NOT_FOUND,
            Error::Roster(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {:?}", self.0);
        }

        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

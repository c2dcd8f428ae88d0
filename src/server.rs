use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};

use crate::dashboard;
use crate::error::DashboardError;
use crate::models::DashboardData;
use crate::modules::Module;
use crate::store::RecordStore;

pub fn router(store: Arc<RecordStore>) -> Router {
    // The analyst frontend is served from a different origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(health))
        .route("/customer-type/dashboard", get(dashboard_handler))
        .layer(cors)
        .with_state(store)
}

pub async fn serve(store: RecordStore, port: u16) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "dashboard server listening");
    axum::serve(listener, router(Arc::new(store)))
        .await
        .context("server terminated")?;
    Ok(())
}

async fn health() -> &'static str {
    "Sales Dashboard backend is running"
}

#[derive(Debug, Deserialize)]
struct DashboardQuery {
    module: Option<String>,
}

async fn dashboard_handler(
    State(store): State<Arc<RecordStore>>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardData>, ApiError> {
    let name = query.module.ok_or(DashboardError::MissingModule)?;
    let module = Module::parse(&name)?;
    tracing::debug!(module = module.name(), "building dashboard response");
    let data = dashboard::dashboard_data(&store, module)?;
    Ok(Json(data))
}

/// Engine errors all map to the same generic 500 body the frontend expects;
/// the detail string carries the specific cause.
struct ApiError(DashboardError);

impl From<DashboardError> for ApiError {
    fn from(err: DashboardError) -> ApiError {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "dashboard request failed");
        let body = serde_json::json!({
            "message": "Error fetching dashboard data",
            "error": self.0.to_string(),
        });
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

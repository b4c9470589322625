//! Health HTTP Route
//!
//! Reports whether the data document can be loaded right now.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use tracing::warn;

use super::records_routes::RecordsState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub data_file: String,
    /// Record count, present only when the document loads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<usize>,
    /// Error code, present only when it does not.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthResponse {
    fn loaded(data_file: String, records: usize) -> Self {
        Self {
            status: "ok",
            data_file,
            records: Some(records),
            error: None,
        }
    }

    fn unavailable(data_file: String, error: impl Into<String>) -> Self {
        Self {
            status: "unavailable",
            data_file,
            records: None,
            error: Some(error.into()),
        }
    }

    fn status_code(&self) -> StatusCode {
        if self.error.is_none() {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// Health check route
pub fn health_routes(state: Arc<RecordsState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(state)
}

async fn health_handler(State(state): State<Arc<RecordsState>>) -> (StatusCode, Json<HealthResponse>) {
    let store = Arc::clone(&state.store);
    let data_file = store.location();

    let response = match tokio::task::spawn_blocking(move || store.list()).await {
        Ok(Ok(records)) => HealthResponse::loaded(data_file, records.len()),
        Ok(Err(err)) => {
            warn!(data_file = %data_file, error = %err, "health check failed to load document");
            HealthResponse::unavailable(data_file, err.code())
        }
        Err(err) => {
            warn!(error = %err, "health check task failed");
            HealthResponse::unavailable(data_file, "INTERNAL_ERROR")
        }
    };

    (response.status_code(), Json(response))
}

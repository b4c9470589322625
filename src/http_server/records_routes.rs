//! Record HTTP Routes
//!
//! Endpoints for listing, creating, updating and deleting person records.
//! Each handler runs one record store operation on the blocking pool.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::errors::{ApiError, ApiResult};
use crate::storage::{Record, RecordFields, RecordStore, StoreResult};

// ==================
// Shared State
// ==================

/// Record state shared across handlers
pub struct RecordsState {
    pub store: Arc<RecordStore>,
}

impl RecordsState {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }
}

// ==================
// Request/Response Types
// ==================

/// Update body. Missing fields become empty strings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateRecordRequest {
    pub name: String,
    pub lastname: String,
    pub email: String,
    pub salary: String,
    pub phone: String,
}

impl From<UpdateRecordRequest> for RecordFields {
    fn from(request: UpdateRecordRequest) -> Self {
        RecordFields::new(
            request.name,
            request.lastname,
            request.email,
            request.salary,
            request.phone,
        )
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    /// JSON body carrying `message`
    fn json(message: &str) -> Json<Self> {
        Json(Self {
            message: message.to_string(),
        })
    }
}

// ==================
// Record Routes
// ==================

/// Create record routes
pub fn records_routes(state: Arc<RecordsState>) -> Router {
    Router::new()
        .route("/data", get(list_records_handler).post(create_record_handler))
        .route(
            "/data/:id",
            put(update_record_handler).delete(delete_record_handler),
        )
        .with_state(state)
}

// ==================
// Helper Functions
// ==================

/// Parse a path id from its leading decimal digits, so `"2abc"` and `"1.5"`
/// resolve to 2 and 1. Ids without leading digits (including negatives) or
/// too large for `usize` map to 0, which never matches a positional id.
/// A `0x` prefix is read as 0, not as hex.
pub fn parse_record_id(raw: &str) -> usize {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    unsigned[..end].parse::<usize>().unwrap_or(0)
}

async fn run_store<T, F>(state: &RecordsState, failure: &'static str, op: F) -> ApiResult<T>
where
    T: Send + 'static,
    F: FnOnce(&RecordStore) -> StoreResult<T> + Send + 'static,
{
    let store = Arc::clone(&state.store);
    tokio::task::spawn_blocking(move || op(&*store))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .map_err(|e| ApiError::from_store(e, failure))
}

// ==================
// Record Handlers
// ==================

async fn list_records_handler(
    State(state): State<Arc<RecordsState>>,
) -> ApiResult<Json<Vec<Record>>> {
    let records = run_store(&state, "Error loading data from XML", |store| store.list()).await?;
    Ok(Json(records))
}

async fn create_record_handler(
    State(state): State<Arc<RecordsState>>,
    Json(fields): Json<RecordFields>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    run_store(&state, "Error adding data", move |store| store.create(fields)).await?;
    Ok((
        StatusCode::CREATED,
        MessageResponse::json("Data added successfully"),
    ))
}

async fn update_record_handler(
    State(state): State<Arc<RecordsState>>,
    Path(id): Path<String>,
    Json(request): Json<UpdateRecordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_record_id(&id);
    let fields = RecordFields::from(request);
    run_store(&state, "Error updating data", move |store| {
        store.update(id, fields)
    })
    .await?;
    Ok(MessageResponse::json("Data updated successfully"))
}

async fn delete_record_handler(
    State(state): State<Arc<RecordsState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_record_id(&id);
    run_store(&state, "Error deleting data", move |store| store.delete(id)).await?;
    Ok(MessageResponse::json("Data deleted successfully"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record_id() {
        assert_eq!(parse_record_id("2"), 2);
        assert_eq!(parse_record_id(" 7 "), 7);
        assert_eq!(parse_record_id("+3"), 3);
        assert_eq!(parse_record_id("abc"), 0);
        assert_eq!(parse_record_id("-1"), 0);
        assert_eq!(parse_record_id(""), 0);
    }

    #[test]
    fn test_parse_record_id_uses_leading_digits() {
        assert_eq!(parse_record_id("2abc"), 2);
        assert_eq!(parse_record_id("1.5"), 1);
        assert_eq!(parse_record_id("  4 items"), 4);
        assert_eq!(parse_record_id("a2"), 0);
        assert_eq!(parse_record_id("99999999999999999999999999"), 0);
    }

    #[test]
    fn test_message_response_json_body() {
        let Json(body) = MessageResponse::json("Data deleted successfully");
        assert_eq!(body.message, "Data deleted successfully");
    }

    #[test]
    fn test_update_request_defaults_missing_fields() {
        let request: UpdateRecordRequest =
            serde_json::from_str(r#"{"name":"A","email":"a@b.com"}"#).unwrap();
        let fields = RecordFields::from(request);

        assert_eq!(fields.name, "A");
        assert_eq!(fields.email, "a@b.com");
        assert_eq!(fields.lastname, "");
        assert_eq!(fields.phone, "");
    }
}

//! # HTTP Server Module
//!
//! Exposes the record store over HTTP with an Axum server.
//!
//! # Endpoints
//!
//! - `GET /health` - Whether the data document loads, with its record count
//! - `GET /api/data` - List records
//! - `POST /api/data` - Create a record
//! - `PUT /api/data/:id` - Replace a record's fields
//! - `DELETE /api/data/:id` - Delete a record

pub mod config;
pub mod errors;
pub mod health_routes;
pub mod records_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use records_routes::{MessageResponse, RecordsState};
pub use server::HttpServer;

// handlers/mod.rs - HTTP handlers
//
// Page:   GET /                     (landing page, server rendered)
// API:    GET /api/greetings        (greeting list consumed by the page)
//         GET /api/greetings/random (single greeting)
// Ops:    GET /health
pub mod greetings;
pub mod health;
pub mod landing;

pub use greetings::{greetings_list, greetings_random};
pub use health::health;
pub use landing::{landing_page, resolve_page_state};

use axum::http::Uri;

use crate::error::ApiError;

pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(format!("Route not found: {}", uri.path()))
}

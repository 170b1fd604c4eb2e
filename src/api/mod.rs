pub mod auth;
pub mod donors;
pub mod gratitude;
pub mod models;
pub mod reviews;
pub mod supplies;
pub mod users;
pub mod volunteers;

// Re-exports
pub use models::*;

// Status handler (simple, keep here)
use axum::Json;
use chrono::Utc;

pub async fn status_handler() -> Json<StatusResponse> {
    Json(StatusResponse {
        message: "Server is running smoothly".to_string(),
        timestamp: Utc::now(),
    })
}

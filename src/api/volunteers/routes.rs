use crate::api::models::AppState;
use crate::api::volunteers::handlers::{create_volunteer_handler, list_volunteers_handler};
use axum::{
    routing::{get, post},
    Router,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/create-volunteer", post(create_volunteer_handler))
        .route("/api/v1/volunteers", get(list_volunteers_handler))
}

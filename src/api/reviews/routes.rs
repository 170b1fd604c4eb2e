use crate::api::models::AppState;
use crate::api::reviews::handlers::{create_review_handler, list_reviews_handler};
use axum::{
    routing::{get, post},
    Router,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/reviews", get(list_reviews_handler))
        .route("/api/v1/create-reviews", post(create_review_handler))
}

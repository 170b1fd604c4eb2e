use crate::api::gratitude::handlers::{create_gratitude_handler, list_gratitude_handler};
use crate::api::models::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/api/v1/gratitude",
        post(create_gratitude_handler).get(list_gratitude_handler),
    )
}

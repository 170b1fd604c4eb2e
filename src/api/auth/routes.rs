use crate::api::auth::handlers::{login_handler, register_handler};
use crate::api::models::AppState;
use axum::{routing::post, Router};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/register", post(register_handler))
        .route("/api/v1/login", post(login_handler))
}

use crate::api::models::AppState;
use crate::api::users::handlers::list_users_handler;
use axum::{routing::get, Router};

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/v1/users", get(list_users_handler))
}

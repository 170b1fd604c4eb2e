use crate::api::models::AppState;
use crate::api::supplies::handlers::{
    create_supply_handler, delete_supply_handler, list_supplies_handler, update_supply_handler,
};
use axum::{
    routing::{delete, get, post, put},
    Router,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/supplies", get(list_supplies_handler))
        .route("/api/v1/create-supply", post(create_supply_handler))
        .route("/api/v1/update-supply/{id}", put(update_supply_handler))
        .route("/api/v1/delete-supply/{id}", delete(delete_supply_handler))
}

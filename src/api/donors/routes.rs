use crate::api::donors::handlers::{create_donor_handler, list_donors_handler};
use crate::api::models::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/donor-collection", post(create_donor_handler))
        .route("/api/v1/allDonors", get(list_donors_handler))
}

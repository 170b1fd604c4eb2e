use crate::api::models::*;
use axum::{extract::State, Json};
use mongodb::bson::Document;

/// List every registered user. The store projects the password hash out,
/// so no password ever leaves the database. An empty collection is a
/// normal empty list here, unlike the resource listings.
pub async fn list_users_handler(
    State(state): State<AppState>,
) -> Result<Json<Envelope<Vec<Document>>>, ApiError> {
    let users = state.store.list_users().await?;
    Ok(Json(Envelope::ok("Users retrieved successfully", users)))
}

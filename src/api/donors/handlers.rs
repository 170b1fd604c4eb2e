use crate::api::models::*;
use crate::storage::InsertAck;
use axum::{extract::State, http::StatusCode, Json};
use mongodb::bson::Document;
use serde_json::Value;
use tracing::info;

pub async fn create_donor_handler(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Envelope<InsertAck>>), ApiError> {
    let donor = body_to_document(&body)?;
    let ack = state.store.insert_donor(donor).await?;

    info!(inserted_id = %ack.inserted_id, "Donation recorded");

    Ok((
        StatusCode::CREATED,
        Json(Envelope::ok("Donation recorded successfully", ack)),
    ))
}

/// Donors come back sorted by amount descending; the leaderboard on the
/// client renders them in that order directly.
pub async fn list_donors_handler(
    State(state): State<AppState>,
) -> Result<Json<Envelope<Vec<Document>>>, ApiError> {
    let donors = state.store.list_donors().await?;
    list_response(
        state.config.api.empty_list_policy,
        donors,
        "Donors retrieved successfully",
        "No donors found",
    )
}

use crate::api::models::*;
use crate::storage::InsertAck;
use axum::{extract::State, http::StatusCode, Json};
use mongodb::bson::Document;
use serde_json::Value;
use tracing::info;

pub async fn create_gratitude_handler(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Envelope<InsertAck>>), ApiError> {
    let gratitude = body_to_document(&body)?;
    let ack = state.store.insert_gratitude(gratitude).await?;

    info!(inserted_id = %ack.inserted_id, "Gratitude message posted");

    Ok((
        StatusCode::CREATED,
        Json(Envelope::ok("Gratitude posted successfully", ack)),
    ))
}

/// Newest messages first, per the creation timestamp the client supplies.
pub async fn list_gratitude_handler(
    State(state): State<AppState>,
) -> Result<Json<Envelope<Vec<Document>>>, ApiError> {
    let gratitudes = state.store.list_gratitudes().await?;
    list_response(
        state.config.api.empty_list_policy,
        gratitudes,
        "Gratitude messages retrieved successfully",
        "No gratitude messages found",
    )
}

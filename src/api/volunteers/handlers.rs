use crate::api::models::*;
use crate::storage::InsertAck;
use axum::{extract::State, http::StatusCode, Json};
use mongodb::bson::Document;
use serde_json::Value;
use tracing::info;

pub async fn create_volunteer_handler(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Envelope<InsertAck>>), ApiError> {
    let volunteer = body_to_document(&body)?;
    let ack = state.store.insert_volunteer(volunteer).await?;

    info!(inserted_id = %ack.inserted_id, "Volunteer signed up");

    Ok((
        StatusCode::CREATED,
        Json(Envelope::ok("Volunteer sign up successful", ack)),
    ))
}

pub async fn list_volunteers_handler(
    State(state): State<AppState>,
) -> Result<Json<Envelope<Vec<Document>>>, ApiError> {
    let volunteers = state.store.list_volunteers().await?;
    list_response(
        state.config.api.empty_list_policy,
        volunteers,
        "Volunteers retrieved successfully",
        "No volunteers found",
    )
}

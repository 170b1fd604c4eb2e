use crate::api::models::*;
use crate::storage::InsertAck;
use axum::{extract::State, http::StatusCode, Json};
use mongodb::bson::Document;
use serde_json::Value;
use tracing::info;

pub async fn list_reviews_handler(
    State(state): State<AppState>,
) -> Result<Json<Envelope<Vec<Document>>>, ApiError> {
    let reviews = state.store.list_reviews().await?;
    list_response(
        state.config.api.empty_list_policy,
        reviews,
        "Reviews retrieved successfully",
        "No reviews found",
    )
}

pub async fn create_review_handler(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Envelope<InsertAck>>), ApiError> {
    let review = body_to_document(&body)?;
    let ack = state.store.insert_review(review).await?;

    info!(inserted_id = %ack.inserted_id, "Review posted");

    Ok((
        StatusCode::CREATED,
        Json(Envelope::ok("Review posted successfully", ack)),
    ))
}

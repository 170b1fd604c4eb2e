use crate::api::models::*;
use crate::storage::{DeleteAck, InsertAck, UpdateAck};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, to_bson, Document};
use serde_json::Value;
use tracing::info;

pub async fn list_supplies_handler(
    State(state): State<AppState>,
) -> Result<Json<Envelope<Vec<Document>>>, ApiError> {
    let supplies = state.store.list_supplies().await?;
    list_response(
        state.config.api.empty_list_policy,
        supplies,
        "Supplies retrieved successfully",
        "No supplies found",
    )
}

pub async fn create_supply_handler(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Envelope<InsertAck>>), ApiError> {
    let supply = body_to_document(&body)?;
    let ack = state.store.insert_supply(supply).await?;

    info!(inserted_id = %ack.inserted_id, "Supply created");

    Ok((
        StatusCode::CREATED,
        Json(Envelope::ok("Supply created successfully", ack)),
    ))
}

pub async fn update_supply_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateSupplyRequest>,
) -> Result<Json<Envelope<UpdateAck>>, ApiError> {
    let oid = parse_supply_id(&id)?;
    let fields = set_fields(request)?;

    // A filter that matches nothing still acknowledges with matched: 0;
    // the caller sees success either way.
    let ack = state.store.update_supply(oid, fields).await?;

    info!(%id, matched = ack.matched_count, "Supply update applied");

    Ok(Json(Envelope::ok("Supply updated successfully", ack)))
}

pub async fn delete_supply_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<DeleteAck>>, ApiError> {
    let oid = parse_supply_id(&id)?;
    let ack = state.store.delete_supply(oid).await?;

    info!(%id, deleted = ack.deleted_count, "Supply delete applied");

    Ok(Json(Envelope::ok("Supply deleted successfully", ack)))
}

fn parse_supply_id(id: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(id).map_err(|_| ApiError::BadRequest(format!("invalid supply id '{}'", id)))
}

/// The update replaces exactly these five fields, nothing else.
fn set_fields(request: UpdateSupplyRequest) -> Result<Document, ApiError> {
    let amount = to_bson(&request.amount)
        .map_err(|e| ApiError::BadRequest(format!("invalid amount value: {}", e)))?;

    Ok(doc! {
        "title": request.title,
        "category": request.category,
        "amount": amount,
        "image": request.image,
        "description": request.description,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_request(amount: Value) -> UpdateSupplyRequest {
        serde_json::from_value(json!({
            "title": "Blankets",
            "category": "Winter",
            "amount": amount,
            "image": "https://example.com/blankets.png",
            "description": "Wool blankets for flood victims",
        }))
        .unwrap()
    }

    #[test]
    fn set_fields_covers_exactly_the_five_replaceable_fields() {
        let fields = set_fields(sample_request(json!(120))).unwrap();
        let mut keys: Vec<String> = fields.into_iter().map(|(key, _)| key).collect();
        keys.sort();
        assert_eq!(
            keys,
            ["amount", "category", "description", "image", "title"]
        );
    }

    #[test]
    fn amount_accepts_numbers_and_strings() {
        let numeric = set_fields(sample_request(json!(120))).unwrap();
        assert_eq!(numeric.get_i64("amount").unwrap(), 120);

        let display = set_fields(sample_request(json!("120 pcs"))).unwrap();
        assert_eq!(display.get_str("amount").unwrap(), "120 pcs");
    }

    #[test]
    fn malformed_id_is_a_bad_request() {
        assert!(matches!(
            parse_supply_id("not-an-object-id"),
            Err(ApiError::BadRequest(_))
        ));
        assert!(parse_supply_id("65f0a1b2c3d4e5f6a7b8c9d0").is_ok());
    }
}

use crate::config::{AppConfig, EmptyListPolicy};
use crate::storage::MongoStore;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use mongodb::bson::Document;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use thiserror::Error;
use tracing::error;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MongoStore>,
    pub config: Arc<AppConfig>,
}

/// Uniform response wrapper: `{success, message, data?}`
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> Envelope<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl Envelope<Value> {
    /// Success envelope with no data payload.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }
}

/// Registration request
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub image: String,
    pub email: String,
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response; the token itself is the credential for the client.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
}

/// Supply update payload: exactly the five replaceable fields. `amount`
/// stays untyped because clients send both numbers and display strings.
#[derive(Debug, Deserialize)]
pub struct UpdateSupplyRequest {
    pub title: String,
    pub category: String,
    pub amount: Value,
    pub image: String,
    pub description: String,
}

/// Root status probe response
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Application error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    NotFound(String),
    #[error("database operation failed: {0}")]
    Database(#[from] mongodb::error::Error),
    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Database(err) => {
                error!("Database error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database operation failed".to_string(),
                )
            }
            ApiError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        // Not-found keeps the empty data array the client expects.
        let data = (status == StatusCode::NOT_FOUND).then(|| json!([]));
        let body = Json(Envelope {
            success: false,
            message,
            data,
        });

        (status, body).into_response()
    }
}

/// Convert a raw JSON body into a BSON document for a schemaless insert.
/// Anything other than a JSON object is rejected.
pub fn body_to_document(body: &Value) -> Result<Document, ApiError> {
    if !body.is_object() {
        return Err(ApiError::BadRequest(
            "request body must be a JSON object".to_string(),
        ));
    }
    mongodb::bson::to_document(body)
        .map_err(|e| ApiError::BadRequest(format!("invalid request body: {}", e)))
}

/// Shared tail of every list handler: apply the configured empty-list
/// policy, then wrap the documents in a success envelope.
pub fn list_response(
    policy: EmptyListPolicy,
    docs: Vec<Document>,
    ok_message: &str,
    empty_message: &str,
) -> Result<Json<Envelope<Vec<Document>>>, ApiError> {
    if docs.is_empty() && policy == EmptyListPolicy::NotFound {
        return Err(ApiError::NotFound(empty_message.to_string()));
    }
    Ok(Json(Envelope::ok(ok_message, docs)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_skips_absent_data() {
        let value = serde_json::to_value(Envelope::message("User registered successfully")).unwrap();
        assert_eq!(value["success"], true);
        assert!(value.get("data").is_none());
    }

    #[test]
    fn envelope_carries_data_when_present() {
        let value = serde_json::to_value(Envelope::ok("ok", vec![1, 2, 3])).unwrap();
        assert_eq!(value["data"], json!([1, 2, 3]));
    }

    #[tokio::test]
    async fn not_found_response_has_empty_data_array() {
        let response = ApiError::NotFound("No supplies found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "No supplies found");
        assert_eq!(body["data"], json!([]));
    }

    #[tokio::test]
    async fn unauthorized_response_has_no_data_field() {
        let response =
            ApiError::Unauthorized("Invalid email or password".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert!(body.get("data").is_none());
    }

    #[test]
    fn body_to_document_rejects_non_objects() {
        assert!(body_to_document(&json!([1, 2])).is_err());
        assert!(body_to_document(&json!("plain string")).is_err());
        assert!(body_to_document(&json!({"amount": 50})).is_ok());
    }

    #[test]
    fn empty_list_policy_not_found_errors_on_empty() {
        let result = list_response(
            EmptyListPolicy::NotFound,
            vec![],
            "Supplies retrieved successfully",
            "No supplies found",
        );
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[test]
    fn empty_list_policy_empty_ok_returns_success() {
        let result = list_response(
            EmptyListPolicy::EmptyOk,
            vec![],
            "Supplies retrieved successfully",
            "No supplies found",
        );
        let Json(envelope) = result.unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.data.unwrap().len(), 0);
    }
}

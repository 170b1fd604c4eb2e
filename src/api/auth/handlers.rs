use crate::api::auth::token::issue_token;
use crate::api::models::*;
use crate::storage::is_duplicate_key;
use axum::{extract::State, http::StatusCode, Json};
use bcrypt::{hash, verify, DEFAULT_COST};
use mongodb::bson::doc;
use serde_json::Value;
use tracing::info;

/// One message for both unknown-email and wrong-password so responses
/// cannot be used to enumerate registered accounts.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub async fn register_handler(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Envelope<Value>>), ApiError> {
    info!(email = %request.email, "Registering user");

    // Hash on the blocking pool; bcrypt is CPU-bound.
    let password = request.password;
    let hashed = tokio::task::spawn_blocking(move || hash(password, DEFAULT_COST))
        .await
        .map_err(|e| ApiError::Internal(format!("hashing task failed: {}", e)))?
        .map_err(|e| ApiError::Internal(format!("password hashing failed: {}", e)))?;

    let user = doc! {
        "name": request.name,
        "email": request.email.clone(),
        "password": hashed,
        "image": request.image,
    };

    // The unique index on email decides the race; a duplicate-key write
    // error is the conflict signal, not a separate existence check.
    match state.store.insert_user(user).await {
        Ok(_) => {}
        Err(e) if is_duplicate_key(&e) => {
            return Err(ApiError::Conflict("User already exists".to_string()));
        }
        Err(e) => return Err(e.into()),
    }

    info!(email = %request.email, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(Envelope::message("User registered successfully")),
    ))
}

pub async fn login_handler(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    info!(email = %request.email, "Login attempt");

    let user = state
        .store
        .find_user_by_email(&request.email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

    let stored_hash = user
        .get_str("password")
        .map_err(|_| ApiError::Internal("stored user has no password hash".to_string()))?
        .to_string();

    // Verify on the blocking pool as well.
    let password = request.password;
    let valid = tokio::task::spawn_blocking(move || verify(password, &stored_hash))
        .await
        .map_err(|e| ApiError::Internal(format!("verification task failed: {}", e)))?
        .map_err(|e| ApiError::Internal(format!("password verification failed: {}", e)))?;

    if !valid {
        return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    let token = issue_token(
        &request.email,
        &state.config.auth.jwt_secret,
        state.config.auth.token_expiry_secs,
    )
    .map_err(|e| ApiError::Internal(format!("token issuance failed: {}", e)))?;

    info!(email = %request.email, "Login successful");

    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful".to_string(),
        token,
    }))
}

#[cfg(test)]
mod tests {
    use bcrypt::{hash, verify};

    // Low cost keeps the tests fast; the handlers use DEFAULT_COST.
    const TEST_COST: u32 = 4;

    #[test]
    fn hashed_password_verifies_and_rejects_wrong_password() {
        let hashed = hash("relief-worker-pass", TEST_COST).expect("hash failed");
        assert!(hashed.starts_with("$2"));

        assert!(verify("relief-worker-pass", &hashed).expect("verify failed"));
        assert!(!verify("wrong-password", &hashed).expect("verify failed"));
    }

    #[test]
    fn hashing_is_salted() {
        let first = hash("relief-worker-pass", TEST_COST).expect("hash failed");
        let second = hash("relief-worker-pass", TEST_COST).expect("hash failed");
        assert_ne!(first, second);
        assert!(verify("relief-worker-pass", &second).expect("verify failed"));
    }
}

use axum::{
    extract::State,
    routing::{get, patch},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::{
        dto::UserResponse,
        extractors::CurrentUser,
        password::{hash_password, verify_password},
        services::{is_valid_email, validate_full_name, validate_password_strength},
    },
    error::ApiError,
    state::AppState,
    users::dto::{PasswordChangeRequest, ProfileUpdateRequest},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users/me", get(me).patch(update_profile))
        .route("/users/me/password", patch(change_password))
}

pub async fn me(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(user.into())
}

#[instrument(skip(state, user, payload))]
pub async fn update_profile(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<ProfileUpdateRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let new_email = match payload.email {
        Some(email) => {
            let email = email.trim().to_lowercase();
            if email == user.email {
                None
            } else {
                if !is_valid_email(&email) {
                    return Err(ApiError::InvalidEmail);
                }
                if state.users.find_by_email(&email).await?.is_some() {
                    return Err(ApiError::DuplicateEmail);
                }
                Some(email)
            }
        }
        None => None,
    };

    let new_name = match payload.full_name {
        Some(full_name) => Some(validate_full_name(&full_name)?),
        None => None,
    };

    let updated = state
        .users
        .update_profile(user.id, new_name, new_email)
        .await?;
    info!(user_id = %updated.id, "profile updated");
    Ok(Json(updated.into()))
}

#[instrument(skip(state, user, payload))]
pub async fn change_password(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<PasswordChangeRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if !verify_password(&payload.current_password, &user.password_hash) {
        return Err(ApiError::WrongPassword);
    }
    validate_password_strength(&payload.new_password)?;
    if verify_password(&payload.new_password, &user.password_hash) {
        return Err(ApiError::SamePassword);
    }

    let password_hash = hash_password(&payload.new_password)?;
    state.users.update_password(user.id, password_hash).await?;

    info!(user_id = %user.id, "password changed");
    Ok(Json(serde_json::json!({
        "message": "Password updated successfully"
    })))
}

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::store::StoreError;

/// Application error taxonomy, mapped onto HTTP status codes.
///
/// Validation failures carry generic, non-leaking messages; `Internal`
/// details are logged server-side and never sent to the client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Full name must be between 2 and 100 characters")]
    InvalidFullName,

    #[error("Password does not meet security requirements")]
    WeakPassword,

    #[error("Current password is incorrect")]
    WrongPassword,

    #[error("New password must be different from current password")]
    SamePassword,

    #[error("Email address is already registered")]
    DuplicateEmail,

    // Same message for unknown email and wrong password.
    #[error("Incorrect email or password")]
    InvalidCredentials,

    #[error("Account is suspended")]
    AccountSuspended,

    #[error("Could not validate credentials")]
    InvalidToken,

    #[error("Could not validate credentials")]
    Unauthorized,

    #[error("Account is suspended")]
    Forbidden,

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidEmail
            | ApiError::InvalidFullName
            | ApiError::WeakPassword
            | ApiError::WrongPassword
            | ApiError::SamePassword => StatusCode::BAD_REQUEST,
            ApiError::DuplicateEmail => StatusCode::CONFLICT,
            ApiError::InvalidCredentials | ApiError::InvalidToken | ApiError::Unauthorized => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::AccountSuspended | ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateEmail => ApiError::DuplicateEmail,
            StoreError::Other(e) => ApiError::Internal(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(e) = &self {
            error!(error = %e, "internal error");
        }
        let status = self.status_code();
        let body = serde_json::json!({ "detail": self.to_string() });
        let mut response = (status, Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

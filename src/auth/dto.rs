use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::store::{AccountStatus, User, UserRole, VerificationStatus};

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response returned after login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

impl TokenResponse {
    pub fn bearer(access_token: String, expires_in: u64) -> Self {
        Self {
            access_token,
            token_type: "bearer".into(),
            expires_in,
        }
    }
}

/// Public part of a user returned to clients. The password hash stays out.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub role: UserRole,
    pub verification_status: VerificationStatus,
    pub status: AccountStatus,
    pub rating_avg: f64,
    pub rating_count: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            role: user.role,
            verification_status: user.verification_status,
            status: user.status,
            rating_avg: user.rating_avg,
            rating_count: user.rating_count,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_response_serialization() {
        let response = TokenResponse::bearer("abc.def.ghi".into(), 3600);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["token_type"], "bearer");
        assert_eq!(json["expires_in"], 3600);
        assert_eq!(json["access_token"], "abc.def.ghi");
    }

    #[test]
    fn enums_serialize_lowercase() {
        assert_eq!(serde_json::to_value(UserRole::User).unwrap(), "user");
        assert_eq!(
            serde_json::to_value(VerificationStatus::Pending).unwrap(),
            "pending"
        );
        assert_eq!(
            serde_json::to_value(AccountStatus::Suspended).unwrap(),
            "suspended"
        );
    }
}

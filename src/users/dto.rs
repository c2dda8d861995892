use serde::Deserialize;

/// Partial profile update; absent fields are left unchanged.
#[derive(Debug, Deserialize)]
pub struct ProfileUpdateRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
}

/// Request body for changing the password.
#[derive(Debug, Deserialize)]
pub struct PasswordChangeRequest {
    pub current_password: String,
    pub new_password: String,
}

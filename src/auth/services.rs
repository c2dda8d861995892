use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};

use crate::{
    auth::{
        dto::{LoginRequest, RegisterRequest},
        jwt::JwtKeys,
        password::{hash_password, verify_password},
    },
    error::ApiError,
    store::{AccountStatus, NewUser, User, UserStore},
};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub(crate) fn validate_full_name(full_name: &str) -> Result<String, ApiError> {
    let full_name = full_name.trim();
    let len = full_name.chars().count();
    if !(2..=100).contains(&len) {
        return Err(ApiError::InvalidFullName);
    }
    Ok(full_name.to_string())
}

const MIN_PASSWORD_LEN: usize = 8;

pub(crate) fn validate_password_strength(password: &str) -> Result<(), ApiError> {
    // Minimum bar; extend with complexity rules as needed.
    if password.len() < MIN_PASSWORD_LEN {
        return Err(ApiError::WeakPassword);
    }
    Ok(())
}

/// Registers a new user. Emails are normalized to lowercase before the
/// uniqueness check; the database UNIQUE constraint stays authoritative
/// for concurrent registrations.
pub async fn register(
    store: &dyn UserStore,
    payload: RegisterRequest,
) -> Result<User, ApiError> {
    let email = payload.email.trim().to_lowercase();
    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err(ApiError::InvalidEmail);
    }
    let full_name = validate_full_name(&payload.full_name)?;
    validate_password_strength(&payload.password)?;

    if store.find_by_email(&email).await?.is_some() {
        warn!(email = %email, "email already registered");
        return Err(ApiError::DuplicateEmail);
    }

    let password_hash = hash_password(&payload.password)?;
    let user = store
        .insert(NewUser {
            full_name,
            email,
            password_hash,
        })
        .await?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(user)
}

/// Authenticates a user and issues an access token. Unknown email and
/// wrong password produce the same error.
pub async fn login(
    store: &dyn UserStore,
    keys: &JwtKeys,
    payload: LoginRequest,
) -> Result<(String, User), ApiError> {
    let email = payload.email.trim().to_lowercase();

    let user = match store.find_by_email(&email).await? {
        Some(user) => user,
        None => {
            warn!(email = %email, "login unknown email");
            return Err(ApiError::InvalidCredentials);
        }
    };

    if !verify_password(&payload.password, &user.password_hash) {
        warn!(user_id = %user.id, "login invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    if user.status != AccountStatus::Active {
        warn!(user_id = %user.id, "login on suspended account");
        return Err(ApiError::AccountSuspended);
    }

    let token = keys.sign(user.id)?;
    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok((token, user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JwtConfig;
    use crate::store::{MemoryStore, UserRole, VerificationStatus};

    fn make_keys() -> JwtKeys {
        JwtKeys::from_config(&JwtConfig {
            secret: "test-secret".into(),
            ttl_minutes: 60,
        })
    }

    fn register_request(email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            full_name: "Jane Doe".into(),
            email: email.into(),
            password: password.into(),
        }
    }

    fn login_request(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn register_stores_lowercase_email_and_defaults() {
        let store = MemoryStore::default();
        let user = register(&store, register_request("Jane@Example.Com", "secretpw"))
            .await
            .expect("register");
        assert_eq!(user.email, "jane@example.com");
        assert_eq!(user.role, UserRole::User);
        assert_eq!(user.verification_status, VerificationStatus::Pending);
        assert_eq!(user.status, AccountStatus::Active);
        assert_ne!(user.password_hash, "secretpw");
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email() {
        let store = MemoryStore::default();
        register(&store, register_request("jane@example.com", "secretpw"))
            .await
            .expect("first register");
        let err = register(&store, register_request("JANE@example.com", "otherpw1"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::DuplicateEmail));
    }

    #[tokio::test]
    async fn register_rejects_weak_password() {
        let store = MemoryStore::default();
        let err = register(&store, register_request("jane@example.com", "short"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::WeakPassword));
    }

    #[tokio::test]
    async fn register_rejects_invalid_email() {
        let store = MemoryStore::default();
        let err = register(&store, register_request("not-an-email", "secretpw"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidEmail));
    }

    #[tokio::test]
    async fn register_rejects_short_full_name() {
        let store = MemoryStore::default();
        let err = register(
            &store,
            RegisterRequest {
                full_name: " J ".into(),
                email: "jane@example.com".into(),
                password: "secretpw".into(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::InvalidFullName));
    }

    #[tokio::test]
    async fn login_issues_token_for_registered_user() {
        let store = MemoryStore::default();
        let keys = make_keys();
        let user = register(&store, register_request("Jane@Example.Com", "secretpw"))
            .await
            .expect("register");
        // Mixed-case login resolves to the stored lowercase email.
        let (token, logged_in) = login(&store, &keys, login_request("Jane@Example.Com", "secretpw"))
            .await
            .expect("login");
        assert_eq!(logged_in.id, user.id);
        let claims = keys.verify(&token).expect("token verifies");
        assert_eq!(claims.sub, user.id);
    }

    #[tokio::test]
    async fn login_unknown_email_and_wrong_password_are_identical() {
        let store = MemoryStore::default();
        let keys = make_keys();
        register(&store, register_request("jane@example.com", "secretpw"))
            .await
            .expect("register");

        let unknown = login(&store, &keys, login_request("nobody@example.com", "secretpw"))
            .await
            .unwrap_err();
        let wrong = login(&store, &keys, login_request("jane@example.com", "wrong-pw"))
            .await
            .unwrap_err();

        assert!(matches!(unknown, ApiError::InvalidCredentials));
        assert!(matches!(wrong, ApiError::InvalidCredentials));
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[tokio::test]
    async fn login_suspended_account_gets_no_token() {
        let store = MemoryStore::default();
        let keys = make_keys();
        let user = register(&store, register_request("jane@example.com", "secretpw"))
            .await
            .expect("register");
        store.set_status(user.id, AccountStatus::Suspended);

        let err = login(&store, &keys, login_request("jane@example.com", "secretpw"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::AccountSuspended));
    }
}

//! User service for registration, login and profile lookup
//!
//! Login failures never reveal whether the email exists: an unknown email
//! and a wrong password produce the identical error.

use crate::auth::{JwtService, PasswordService};
use crate::error::ApiError;
use crate::repositories::UserRepository;
use climbtrack_shared::types::{UserProfile, UserPublic};
use sqlx::PgPool;
use uuid::Uuid;
use validator::ValidateEmail;

/// Minimum accepted password length
const MIN_PASSWORD_LEN: usize = 6;

/// Deliberately shared by the unknown-email and wrong-password paths
const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// User service for authentication operations
pub struct UserService;

impl UserService {
    /// Register a new user
    ///
    /// Validation order: both fields present, password length, email
    /// format. The email is normalized (trim + lowercase) before every
    /// check and the insert, which makes uniqueness case-insensitive.
    pub async fn register(
        pool: &PgPool,
        email: Option<String>,
        password: Option<String>,
    ) -> Result<UserPublic, ApiError> {
        let (email, password) = require_credentials(email, password)?;

        if password.len() < MIN_PASSWORD_LEN {
            return Err(ApiError::Validation(
                "Password must be at least 6 characters".to_string(),
            ));
        }

        let email = normalize_email(&email);

        if !email.validate_email() {
            return Err(ApiError::Validation("Invalid email format".to_string()));
        }

        if UserRepository::email_exists(pool, &email)
            .await
            .map_err(ApiError::Internal)?
        {
            return Err(ApiError::Conflict("Email already registered".to_string()));
        }

        // Hash password on blocking thread pool (CPU-intensive)
        let password_hash = PasswordService::hash_async(password)
            .await
            .map_err(ApiError::Internal)?;

        let user = UserRepository::create(pool, &email, &password_hash)
            .await
            .map_err(ApiError::Internal)?;

        Ok(UserPublic {
            id: user.id,
            email: user.email,
        })
    }

    /// Login with email and password, issuing a 7-day token
    pub async fn login(
        pool: &PgPool,
        jwt_service: &JwtService,
        email: Option<String>,
        password: Option<String>,
    ) -> Result<(String, UserPublic), ApiError> {
        let (email, password) = require_credentials(email, password)?;
        let email = normalize_email(&email);

        let user = UserRepository::find_by_email(pool, &email)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

        // Verify password on blocking thread pool (CPU-intensive)
        let valid = PasswordService::verify_async(password, user.password_hash.clone())
            .await
            .map_err(ApiError::Internal)?;

        if !valid {
            return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let token = jwt_service
            .issue(user.id, &user.email)
            .map_err(ApiError::Internal)?;

        Ok((
            token,
            UserPublic {
                id: user.id,
                email: user.email,
            },
        ))
    }

    /// Get a user's public profile
    pub async fn get_profile(pool: &PgPool, user_id: Uuid) -> Result<UserProfile, ApiError> {
        let user = UserRepository::find_by_id(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        Ok(UserProfile {
            id: user.id,
            email: user.email,
            created_at: user.created_at,
        })
    }
}

/// Both credential fields must be present and non-empty
fn require_credentials(
    email: Option<String>,
    password: Option<String>,
) -> Result<(String, String), ApiError> {
    match (email, password) {
        (Some(email), Some(password)) if !email.trim().is_empty() && !password.is_empty() => {
            Ok((email, password))
        }
        _ => Err(ApiError::Validation(
            "Email and password are required".to_string(),
        )),
    }
}

/// Trim and lowercase, applied before every lookup and insert
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

//! API request and response types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Registration request body
///
/// Fields are optional so that a missing field reaches the service layer
/// and produces a 400 with a specific message instead of a deserialization
/// rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login request body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Public user projection returned by register/login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPublic {
    pub id: Uuid,
    pub email: String,
}

/// User profile returned by the authenticated lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Registration response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: UserPublic,
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: UserPublic,
}

/// Authenticated profile response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user: UserProfile,
}

/// Create/update payload for a climbing session
///
/// The mobile client sends camelCase keys (`photoPath`). All fields are
/// optional at the wire level; required-field checks happen in the service
/// so the validation order and messages stay under our control.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionPayload {
    pub name: Option<String>,
    pub date: Option<String>,
    pub duration: Option<i64>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub photo_path: Option<String>,
}

/// A stored climbing session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub date: NaiveDate,
    pub duration: i32,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub photo_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// List response: all sessions owned by the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionListResponse {
    pub sessions: Vec<SessionDto>,
}

/// Single-session response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub session: SessionDto,
}

/// Create/update response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionMutationResponse {
    pub message: String,
    pub session: SessionDto,
}

/// Delete response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDeleteResponse {
    pub message: String,
    pub deleted_id: Uuid,
}

/// Upload response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub message: String,
    pub photo_path: String,
    pub filename: String,
    pub size: usize,
    pub mime_type: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_payload_accepts_missing_fields() {
        let payload: SessionPayload = serde_json::from_str("{}").unwrap();
        assert!(payload.name.is_none());
        assert!(payload.duration.is_none());
        assert!(payload.photo_path.is_none());
    }

    #[test]
    fn test_session_payload_camel_case_photo_path() {
        let payload: SessionPayload =
            serde_json::from_str(r#"{"photoPath": "/uploads/session_1.jpg"}"#).unwrap();
        assert_eq!(payload.photo_path.as_deref(), Some("/uploads/session_1.jpg"));
    }

    #[test]
    fn test_delete_response_uses_camel_case() {
        let response = SessionDeleteResponse {
            message: "deleted".to_string(),
            deleted_id: Uuid::new_v4(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("deletedId"));
    }

    #[test]
    fn test_upload_response_uses_camel_case() {
        let response = UploadResponse {
            message: "ok".to_string(),
            photo_path: "/uploads/x.png".to_string(),
            filename: "x.png".to_string(),
            size: 42,
            mime_type: "image/png".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("photoPath"));
        assert!(json.contains("mimeType"));
    }
}

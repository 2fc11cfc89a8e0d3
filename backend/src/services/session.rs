//! Climbing session lifecycle
//!
//! All operations take the authenticated user's ID and only ever touch
//! sessions owned by that user. A session that is absent and one owned by
//! someone else fail with the same NotFound error, so callers cannot
//! probe for existence.

use crate::error::ApiError;
use crate::repositories::{CreateSession, SessionRecord, SessionRepository, UpdateSession};
use crate::services::photo::{PhotoCleanup, PhotoStore};
use chrono::NaiveDate;
use climbtrack_shared::types::SessionPayload;
use sqlx::PgPool;
use tracing::{debug, warn};
use uuid::Uuid;

/// Shared by the missing and not-owned cases
const NOT_FOUND_OR_FORBIDDEN: &str = "Session not found or access denied";

/// Validated session fields, trimmed and parsed
#[derive(Debug, Clone)]
pub struct ValidatedSession {
    pub name: String,
    pub date: NaiveDate,
    pub duration_minutes: i32,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub photo_path: Option<String>,
}

/// Session service for business logic
pub struct SessionService;

impl SessionService {
    /// All sessions owned by the user, date descending, creation time
    /// descending within a date
    pub async fn list(pool: &PgPool, user_id: Uuid) -> Result<Vec<SessionRecord>, ApiError> {
        SessionRepository::list_by_user(pool, user_id)
            .await
            .map_err(ApiError::Internal)
    }

    /// A single session, only if owned by the user
    pub async fn get(
        pool: &PgPool,
        user_id: Uuid,
        session_id: Uuid,
    ) -> Result<SessionRecord, ApiError> {
        SessionRepository::find_by_id(pool, session_id, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound(NOT_FOUND_OR_FORBIDDEN.to_string()))
    }

    /// Create a session from a client payload
    ///
    /// The `photo_path`, if any, is taken as an already-uploaded reference
    /// and is not checked against the filesystem.
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        payload: SessionPayload,
    ) -> Result<SessionRecord, ApiError> {
        let fields = validate_payload(payload)?;

        SessionRepository::create(
            pool,
            CreateSession {
                user_id,
                name: fields.name,
                date: fields.date,
                duration_minutes: fields.duration_minutes,
                location: fields.location,
                notes: fields.notes,
                photo_path: fields.photo_path,
            },
        )
        .await
        .map_err(ApiError::Internal)
    }

    /// Update a session the user owns
    ///
    /// Field validation runs first, then the ownership check, then the
    /// mutation. Omitting `photoPath` preserves the stored photo
    /// reference; supplying a different one replaces it and triggers a
    /// best-effort removal of the old file.
    pub async fn update(
        pool: &PgPool,
        photos: &PhotoStore,
        user_id: Uuid,
        session_id: Uuid,
        payload: SessionPayload,
    ) -> Result<SessionRecord, ApiError> {
        let fields = validate_payload(payload)?;

        // Ownership check before mutation. The update statement re-checks
        // id AND user_id, but the two steps are not atomic (a user can
        // only race with themselves here).
        let existing = SessionRepository::find_by_id(pool, session_id, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound(NOT_FOUND_OR_FORBIDDEN.to_string()))?;

        let replaced_photo = match (&existing.photo_path, &fields.photo_path) {
            (Some(old), Some(new)) if old != new => Some(old.clone()),
            _ => None,
        };

        let updated = SessionRepository::update(
            pool,
            session_id,
            user_id,
            UpdateSession {
                name: fields.name,
                date: fields.date,
                duration_minutes: fields.duration_minutes,
                location: fields.location,
                notes: fields.notes,
                photo_path: fields.photo_path,
            },
        )
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND_OR_FORBIDDEN.to_string()))?;

        if let Some(old_path) = replaced_photo {
            cleanup_photo(photos, &old_path).await;
        }

        Ok(updated)
    }

    /// Delete a session the user owns, removing its photo file best-effort
    ///
    /// A photo file that cannot be removed is logged and ignored; the row
    /// is deleted regardless.
    pub async fn delete(
        pool: &PgPool,
        photos: &PhotoStore,
        user_id: Uuid,
        session_id: Uuid,
    ) -> Result<Uuid, ApiError> {
        let session = SessionRepository::find_by_id(pool, session_id, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound(NOT_FOUND_OR_FORBIDDEN.to_string()))?;

        if let Some(photo_path) = &session.photo_path {
            cleanup_photo(photos, photo_path).await;
        }

        SessionRepository::delete(pool, session_id, user_id)
            .await
            .map_err(ApiError::Internal)?;

        Ok(session_id)
    }
}

/// Remove a photo file, logging but never propagating failure
async fn cleanup_photo(photos: &PhotoStore, photo_path: &str) {
    match photos.cleanup(photo_path).await {
        PhotoCleanup::Removed => debug!(photo_path, "Removed session photo"),
        PhotoCleanup::Missing => debug!(photo_path, "Session photo already gone"),
        PhotoCleanup::Failed => warn!(photo_path, "Failed to remove session photo"),
    }
}

/// Validate a create/update payload
///
/// Check order is part of the contract: required fields, then duration
/// positivity, then the date pattern.
pub fn validate_payload(payload: SessionPayload) -> Result<ValidatedSession, ApiError> {
    let name = payload.name.as_deref().map(str::trim).unwrap_or_default();
    let date = payload.date.as_deref().unwrap_or_default();

    if name.is_empty() || date.is_empty() || payload.duration.is_none() {
        return Err(ApiError::Validation(
            "Name, date and duration are required".to_string(),
        ));
    }

    let duration = payload.duration.unwrap_or_default();
    let duration_minutes = i32::try_from(duration)
        .ok()
        .filter(|d| *d > 0)
        .ok_or_else(|| ApiError::Validation("Duration must be a positive number".to_string()))?;

    let date = parse_session_date(date).ok_or_else(|| {
        ApiError::Validation("Invalid date format (expected YYYY-MM-DD)".to_string())
    })?;

    Ok(ValidatedSession {
        name: name.to_string(),
        date,
        duration_minutes,
        location: trim_optional(payload.location),
        notes: trim_optional(payload.notes),
        photo_path: payload.photo_path,
    })
}

/// Strict `YYYY-MM-DD` with zero padding, then a real calendar date
fn parse_session_date(s: &str) -> Option<NaiveDate> {
    let bytes = s.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| matches!(i, 4 | 7) || b.is_ascii_digit());

    if !shaped {
        return None;
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Trim an optional field, storing NULL for absent or blank values
fn trim_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

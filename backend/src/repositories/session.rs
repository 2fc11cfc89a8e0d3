//! Climbing session repository for database operations
//!
//! Every query is scoped by owner: reads and writes match on
//! `id AND user_id`, so a session that exists but belongs to someone else
//! is indistinguishable from one that does not exist.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Session record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SessionRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub date: NaiveDate,
    pub duration_minutes: i32,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub photo_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a session
#[derive(Debug, Clone)]
pub struct CreateSession {
    pub user_id: Uuid,
    pub name: String,
    pub date: NaiveDate,
    pub duration_minutes: i32,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub photo_path: Option<String>,
}

/// Input for updating a session
///
/// `photo_path = None` preserves the stored value (COALESCE in the update
/// statement); the other optional fields overwrite, clearing to NULL when
/// absent.
#[derive(Debug, Clone)]
pub struct UpdateSession {
    pub name: String,
    pub date: NaiveDate,
    pub duration_minutes: i32,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub photo_path: Option<String>,
}

/// Session repository for database operations
pub struct SessionRepository;

impl SessionRepository {
    /// All sessions for a user, most recent date first, ties broken by
    /// creation time descending
    pub async fn list_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<SessionRecord>> {
        let records = sqlx::query_as::<_, SessionRecord>(
            r#"
            SELECT id, user_id, name, date, duration_minutes, location, notes, photo_path, created_at
            FROM sessions
            WHERE user_id = $1
            ORDER BY date DESC, created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Get a session by ID, scoped to its owner
    pub async fn find_by_id(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<SessionRecord>> {
        let record = sqlx::query_as::<_, SessionRecord>(
            r#"
            SELECT id, user_id, name, date, duration_minutes, location, notes, photo_path, created_at
            FROM sessions
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Create a new session
    pub async fn create(pool: &PgPool, input: CreateSession) -> Result<SessionRecord> {
        let record = sqlx::query_as::<_, SessionRecord>(
            r#"
            INSERT INTO sessions (user_id, name, date, duration_minutes, location, notes, photo_path)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, name, date, duration_minutes, location, notes, photo_path, created_at
            "#,
        )
        .bind(input.user_id)
        .bind(&input.name)
        .bind(input.date)
        .bind(input.duration_minutes)
        .bind(&input.location)
        .bind(&input.notes)
        .bind(&input.photo_path)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Update a session, scoped to its owner
    ///
    /// Returns None when the row no longer matches (deleted or not owned).
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
        input: UpdateSession,
    ) -> Result<Option<SessionRecord>> {
        let record = sqlx::query_as::<_, SessionRecord>(
            r#"
            UPDATE sessions SET
                name = $3,
                date = $4,
                duration_minutes = $5,
                location = $6,
                notes = $7,
                photo_path = COALESCE($8, photo_path)
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, name, date, duration_minutes, location, notes, photo_path, created_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(&input.name)
        .bind(input.date)
        .bind(input.duration_minutes)
        .bind(&input.location)
        .bind(&input.notes)
        .bind(&input.photo_path)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Delete a session, scoped to its owner
    pub async fn delete(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM sessions
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

//! Climbing session CRUD routes
//!
//! Every route requires a valid bearer token; the extracted user scopes
//! all reads and writes.

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::repositories::SessionRecord;
use crate::services::SessionService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use climbtrack_shared::types::{
    SessionDeleteResponse, SessionDto, SessionListResponse, SessionMutationResponse,
    SessionPayload, SessionResponse,
};
use uuid::Uuid;

/// Create session routes
pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_sessions).post(create_session))
        .route(
            "/:id",
            get(get_session).put(update_session).delete(delete_session),
        )
}

fn session_dto(record: SessionRecord) -> SessionDto {
    SessionDto {
        id: record.id,
        user_id: record.user_id,
        name: record.name,
        date: record.date,
        duration: record.duration_minutes,
        location: record.location,
        notes: record.notes,
        photo_path: record.photo_path,
        created_at: record.created_at,
    }
}

/// GET /api/sessions - all sessions owned by the caller
async fn list_sessions(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<SessionListResponse>> {
    let sessions = SessionService::list(state.db(), auth.user_id).await?;

    Ok(Json(SessionListResponse {
        sessions: sessions.into_iter().map(session_dto).collect(),
    }))
}

/// GET /api/sessions/:id - a single owned session
async fn get_session(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SessionResponse>> {
    let session = SessionService::get(state.db(), auth.user_id, id).await?;

    Ok(Json(SessionResponse {
        session: session_dto(session),
    }))
}

/// POST /api/sessions - create a session
async fn create_session(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<SessionPayload>,
) -> ApiResult<(StatusCode, Json<SessionMutationResponse>)> {
    let session = SessionService::create(state.db(), auth.user_id, payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(SessionMutationResponse {
            message: "Session created successfully".to_string(),
            session: session_dto(session),
        }),
    ))
}

/// PUT /api/sessions/:id - update an owned session
async fn update_session(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<SessionPayload>,
) -> ApiResult<Json<SessionMutationResponse>> {
    let session =
        SessionService::update(state.db(), state.photos(), auth.user_id, id, payload).await?;

    Ok(Json(SessionMutationResponse {
        message: "Session updated successfully".to_string(),
        session: session_dto(session),
    }))
}

/// DELETE /api/sessions/:id - delete an owned session and its photo
async fn delete_session(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SessionDeleteResponse>> {
    let deleted_id =
        SessionService::delete(state.db(), state.photos(), auth.user_id, id).await?;

    Ok(Json(SessionDeleteResponse {
        message: "Session deleted successfully".to_string(),
        deleted_id,
    }))
}

//! User API endpoints

use api_types::{
    Success,
    user::{CurrentUserUpdate, User, UserNew},
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use engine::CURRENT_USER_ID;

use crate::{
    ServerError,
    mapping::{new_user, user_view},
    server::ServerState,
};

pub async fn list(State(state): State<ServerState>) -> Json<Vec<User>> {
    let engine = state.engine.read().await;
    Json(engine.users().into_iter().map(user_view).collect())
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<User>, ServerError> {
    let engine = state.engine.read().await;
    Ok(Json(user_view(engine.user(&id)?)))
}

/// Handle requests for creating a friend or a group
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<UserNew>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), ServerError> {
    let Json(payload) = payload?;
    let new_user = new_user(payload)?;

    let mut engine = state.engine.write().await;
    let user = engine.create_user(new_user)?;
    tracing::info!(user_id = %user.id, group = user.is_group(), "created user {}", user.name);

    Ok((StatusCode::CREATED, Json(user_view(&user))))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Success>, ServerError> {
    let mut engine = state.engine.write().await;
    if let Some(user) = engine.delete_user(&id)? {
        tracing::info!(user_id = %user.id, "deleted user {}", user.name);
    }
    Ok(Json(Success { success: true }))
}

pub async fn get_current(State(state): State<ServerState>) -> Result<Json<User>, ServerError> {
    let engine = state.engine.read().await;
    Ok(Json(user_view(engine.current_user()?)))
}

/// `/users/current` shadows `/users/{id}`; the ledger rejects the delete.
pub async fn delete_current(State(state): State<ServerState>) -> Result<Json<Success>, ServerError> {
    let mut engine = state.engine.write().await;
    engine.delete_user(CURRENT_USER_ID)?;
    Ok(Json(Success { success: true }))
}

/// Rename or re-avatar the current user
pub async fn update_current(
    State(state): State<ServerState>,
    payload: Result<Json<CurrentUserUpdate>, JsonRejection>,
) -> Result<Json<User>, ServerError> {
    let Json(payload) = payload?;
    let mut engine = state.engine.write().await;
    let user = engine.update_current_user(&payload.name, &payload.avatar)?;
    Ok(Json(user_view(&user)))
}

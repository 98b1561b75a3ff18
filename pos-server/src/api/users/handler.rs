//! User API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{User, UserCreate, UserUpdate};
use shared::{LoginRequest, LoginResponse};

use crate::core::ServerState;
use crate::utils::AppResult;

/// List all users
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<User>>> {
    let users = state.users.list().await?;
    Ok(Json(users))
}

/// Get user by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Option<User>>> {
    let user = state.users.get(id).await?;
    Ok(Json(user))
}

/// Create a new user
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<UserCreate>,
) -> AppResult<Json<User>> {
    let user = state.users.create(payload).await?;
    Ok(Json(user))
}

/// Update a user (password is re-hashed when present)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<UserUpdate>,
) -> AppResult<Json<Option<User>>> {
    let user = state.users.update(id, payload).await?;
    Ok(Json(user))
}

/// Delete a user
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let deleted = state.users.delete(id).await?;
    Ok(Json(deleted))
}

/// Login with username and password
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let response = state.users.login(&req.username, &req.password).await?;
    Ok(Json(response))
}

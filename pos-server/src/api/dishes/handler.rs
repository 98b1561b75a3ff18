//! Dish API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{Dish, DishCreate, DishUpdate};

use crate::core::ServerState;
use crate::utils::AppResult;

/// List all dishes
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Dish>>> {
    let dishes = state.dishes.list().await?;
    Ok(Json(dishes))
}

/// Get dish by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Option<Dish>>> {
    let dish = state.dishes.get(id).await?;
    Ok(Json(dish))
}

/// Create a new dish
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<DishCreate>,
) -> AppResult<Json<Dish>> {
    let dish = state.dishes.create(payload).await?;
    Ok(Json(dish))
}

/// Update a dish
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<DishUpdate>,
) -> AppResult<Json<Option<Dish>>> {
    let dish = state.dishes.update(id, payload).await?;
    Ok(Json(dish))
}

/// Delete a dish
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let deleted = state.dishes.delete(id).await?;
    Ok(Json(deleted))
}

//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{Order, OrderCreate, OrderStats, OrderStatusUpdate};

use crate::core::ServerState;
use crate::utils::AppResult;

/// List all orders, newest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Order>>> {
    let orders = state.orders.list().await?;
    Ok(Json(orders))
}

/// Get order by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Option<Order>>> {
    let order = state.orders.get(id).await?;
    Ok(Json(order))
}

/// Place an order
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<Order>> {
    let order = state.orders.create(payload).await?;
    Ok(Json(order))
}

/// Change order status
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderStatusUpdate>,
) -> AppResult<Json<Option<Order>>> {
    let order = state.orders.update_status(id, payload.status).await?;
    Ok(Json(order))
}

/// Today's order count, sales and average ticket (since local midnight)
pub async fn today_stats(State(state): State<ServerState>) -> AppResult<Json<OrderStats>> {
    let stats = state.orders.today_stats().await?;
    Ok(Json(stats))
}

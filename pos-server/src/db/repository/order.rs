//! Order Repository

use super::{RepoError, RepoResult};
use shared::models::{Order, OrderCreate, OrderStatus};
use sqlx::SqlitePool;

const ORDER_SELECT: &str = "SELECT id, order_no, items, total, payment_method, status, member_id, created_at FROM orders";

/// All orders, newest first
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Order>> {
    let sql = format!("{ORDER_SELECT} ORDER BY created_at DESC, id DESC");
    let orders = sqlx::query_as::<_, Order>(&sql).fetch_all(pool).await?;
    Ok(orders)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let sql = format!("{ORDER_SELECT} WHERE id = ?");
    let order = sqlx::query_as::<_, Order>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(order)
}

/// Insert an order with a caller-assigned number and creation time
pub async fn create(
    pool: &SqlitePool,
    order_no: &str,
    data: OrderCreate,
    created_at: i64,
) -> RepoResult<Order> {
    let items = serde_json::to_string(&data.items)?;
    let status = data.status.unwrap_or_default();
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO orders (order_no, items, total, payment_method, status, member_id, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7) RETURNING id",
    )
    .bind(order_no)
    .bind(items)
    .bind(data.total)
    .bind(data.payment_method)
    .bind(status.as_str())
    .bind(data.member_id)
    .bind(created_at)
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create order".into()))
}

/// Overwrite the status; `None` when the order does not exist
pub async fn update_status(
    pool: &SqlitePool,
    id: i64,
    status: &OrderStatus,
) -> RepoResult<Option<Order>> {
    let rows = sqlx::query("UPDATE orders SET status = ? WHERE id = ?")
        .bind(status.as_str())
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Ok(None);
    }
    find_by_id(pool, id).await
}

/// Count and revenue of orders created at or after `since` (Unix millis)
pub async fn totals_since(pool: &SqlitePool, since: i64) -> RepoResult<(i64, f64)> {
    let totals = sqlx::query_as::<_, (i64, f64)>(
        "SELECT COUNT(*), CAST(COALESCE(SUM(total), 0) AS REAL) FROM orders WHERE created_at >= ?",
    )
    .bind(since)
    .fetch_one(pool)
    .await?;
    Ok(totals)
}

//! Dish Repository

use super::{RepoError, RepoResult};
use shared::models::{Dish, DishCreate, DishUpdate};
use sqlx::SqlitePool;

const DISH_SELECT: &str =
    "SELECT id, name, icon, price, available, created_at, updated_at FROM dish";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Dish>> {
    let sql = format!("{DISH_SELECT} ORDER BY id");
    let dishes = sqlx::query_as::<_, Dish>(&sql).fetch_all(pool).await?;
    Ok(dishes)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Dish>> {
    let sql = format!("{DISH_SELECT} WHERE id = ?");
    let dish = sqlx::query_as::<_, Dish>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(dish)
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM dish")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn create(pool: &SqlitePool, data: DishCreate) -> RepoResult<Dish> {
    let now = shared::util::now_millis();
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO dish (name, icon, price, available, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?5) RETURNING id",
    )
    .bind(&data.name)
    .bind(&data.icon)
    .bind(data.price)
    .bind(data.available.unwrap_or(true))
    .bind(now)
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create dish".into()))
}

/// Apply a partial patch; `None` when the dish does not exist
pub async fn update(pool: &SqlitePool, id: i64, data: DishUpdate) -> RepoResult<Option<Dish>> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE dish SET name = COALESCE(?1, name), icon = COALESCE(?2, icon), price = COALESCE(?3, price), available = COALESCE(?4, available), updated_at = ?5 WHERE id = ?6",
    )
    .bind(data.name)
    .bind(data.icon)
    .bind(data.price)
    .bind(data.available)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Ok(None);
    }
    find_by_id(pool, id).await
}

/// Hard delete; `false` when nothing was deleted
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM dish WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    async fn test_pool() -> SqlitePool {
        DbService::in_memory().await.unwrap().pool
    }

    fn broccoli() -> DishCreate {
        DishCreate {
            name: "西兰花".into(),
            icon: "🥦".into(),
            price: 15.0,
            available: None,
        }
    }

    #[tokio::test]
    async fn create_round_trips_through_find() {
        let pool = test_pool().await;
        let created = create(&pool, broccoli()).await.unwrap();
        assert!(created.available);

        let found = find_by_id(&pool, created.id).await.unwrap().unwrap();
        assert_eq!(found.name, "西兰花");
        assert_eq!(found.icon, "🥦");
        assert_eq!(found.price, 15.0);
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn partial_update_keeps_other_fields() {
        let pool = test_pool().await;
        let created = create(&pool, broccoli()).await.unwrap();

        let patch = DishUpdate {
            available: Some(false),
            ..Default::default()
        };
        let updated = update(&pool, created.id, patch).await.unwrap().unwrap();
        assert!(!updated.available);
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.price, created.price);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn unknown_id_yields_empty_results() {
        let pool = test_pool().await;
        assert!(find_by_id(&pool, 42).await.unwrap().is_none());
        assert!(update(&pool, 42, DishUpdate::default()).await.unwrap().is_none());
        assert!(!delete(&pool, 42).await.unwrap());
    }

    #[tokio::test]
    async fn delete_removes_row() {
        let pool = test_pool().await;
        let created = create(&pool, broccoli()).await.unwrap();
        assert_eq!(count(&pool).await.unwrap(), 1);
        assert!(delete(&pool, created.id).await.unwrap());
        assert_eq!(count(&pool).await.unwrap(), 0);
        assert!(find_all(&pool).await.unwrap().is_empty());
    }
}

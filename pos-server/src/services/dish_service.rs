//! Dish Service - menu management

use shared::models::{Dish, DishCreate, DishUpdate};
use sqlx::SqlitePool;

use crate::db::repository::dish;
use crate::utils::validation::{
    MAX_ICON_LEN, MAX_NAME_LEN, validate_optional_text, validate_price, validate_required_text,
};
use crate::utils::AppResult;

#[derive(Clone, Debug)]
pub struct DishService {
    pool: SqlitePool,
}

impl DishService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<Dish>> {
        Ok(dish::find_all(&self.pool).await?)
    }

    pub async fn get(&self, id: i64) -> AppResult<Option<Dish>> {
        Ok(dish::find_by_id(&self.pool, id).await?)
    }

    pub async fn create(&self, data: DishCreate) -> AppResult<Dish> {
        validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
        validate_required_text(&data.icon, "icon", MAX_ICON_LEN)?;
        validate_price(data.price, "price")?;

        let created = dish::create(&self.pool, data).await?;
        tracing::info!(dish_id = created.id, name = %created.name, "Dish created");
        Ok(created)
    }

    pub async fn update(&self, id: i64, data: DishUpdate) -> AppResult<Option<Dish>> {
        if let Some(ref name) = data.name {
            validate_required_text(name, "name", MAX_NAME_LEN)?;
        }
        validate_optional_text(&data.icon, "icon", MAX_ICON_LEN)?;
        if let Some(price) = data.price {
            validate_price(price, "price")?;
        }

        let updated = dish::update(&self.pool, id, data).await?;
        if updated.is_some() {
            tracing::info!(dish_id = id, "Dish updated");
        }
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let deleted = dish::delete(&self.pool, id).await?;
        if deleted {
            tracing::info!(dish_id = id, "Dish deleted");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::utils::AppError;

    async fn service() -> DishService {
        DishService::new(DbService::in_memory().await.unwrap().pool)
    }

    #[tokio::test]
    async fn negative_price_is_rejected() {
        let svc = service().await;
        let err = svc
            .create(DishCreate {
                name: "蘑菇".into(),
                icon: "🍄".into(),
                price: -1.0,
                available: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(svc.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn patch_with_negative_price_is_rejected() {
        let svc = service().await;
        let created = svc
            .create(DishCreate {
                name: "蘑菇".into(),
                icon: "🍄".into(),
                price: 18.0,
                available: None,
            })
            .await
            .unwrap();
        let patch = DishUpdate {
            price: Some(-3.0),
            ..Default::default()
        };
        assert!(svc.update(created.id, patch).await.is_err());
        assert_eq!(svc.get(created.id).await.unwrap().unwrap().price, 18.0);
    }
}

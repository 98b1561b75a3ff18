//! Dish Model

use serde::{Deserialize, Serialize};

/// Dish entity (菜品，按斤计价)
///
/// `price` is the price of one 500 g unit; a line weighed in grams costs
/// `price * weight / 100`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    pub id: i64,
    pub name: String,
    pub icon: String,
    pub price: f64,
    pub available: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create dish payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DishCreate {
    pub name: String,
    pub icon: String,
    pub price: f64,
    pub available: Option<bool>,
}

/// Update dish payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DishUpdate {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub price: Option<f64>,
    pub available: Option<bool>,
}

/// Dish data copied into an order line.
///
/// Orders keep this copy instead of a foreign key so that historical orders
/// survive later dish edits and deletes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DishSnapshot {
    pub id: i64,
    pub name: String,
    pub icon: String,
    pub price: f64,
}

impl From<&Dish> for DishSnapshot {
    fn from(dish: &Dish) -> Self {
        Self {
            id: dish.id,
            name: dish.name.clone(),
            icon: dish.icon.clone(),
            price: dish.price,
        }
    }
}

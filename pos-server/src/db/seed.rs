//! First-boot seed data
//!
//! Each table is seeded only while it is empty, so running this on every
//! start is idempotent.

use shared::models::{DishCreate, Role, UserCreate};
use sqlx::SqlitePool;

use super::repository::{self, RepoResult};

/// (name, icon, price per 500 g)
const DEFAULT_DISHES: [(&str, &str, f64); 16] = [
    ("青菜", "🥬", 12.8),
    ("西兰花", "🥦", 15.0),
    ("蘑菇", "🍄", 18.0),
    ("萝卜", "🥕", 8.0),
    ("肥牛", "🥩", 38.0),
    ("排骨", "🍖", 42.0),
    ("虾仁", "🦐", 45.0),
    ("鹌鹑蛋", "🥚", 20.0),
    ("宽粉", "🍜", 10.0),
    ("油炸", "🍤", 22.0),
    ("火腿", "🌭", 18.0),
    ("豆腐", "🧈", 6.0),
    ("鸡蛋", "🥚", 12.0),
    ("生菜", "🥬", 10.0),
    ("娃娃菜", "🥬", 12.0),
    ("鱼丸", "🍡", 18.0),
];

/// (username, password, display name, role)
const DEFAULT_USERS: [(&str, &str, &str, Role); 3] = [
    ("admin", "admin123", "管理员", Role::Admin),
    ("zhangliang", "123456", "张亮", Role::Manager),
    ("staff", "123456", "店员", Role::Staff),
];

/// What the seed step inserted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub dishes: usize,
    pub users: usize,
}

/// Insert default dishes and users into empty tables
pub async fn seed_defaults(pool: &SqlitePool) -> RepoResult<SeedReport> {
    let mut report = SeedReport::default();

    if repository::dish::count(pool).await? == 0 {
        for (name, icon, price) in DEFAULT_DISHES {
            repository::dish::create(
                pool,
                DishCreate {
                    name: name.to_string(),
                    icon: icon.to_string(),
                    price,
                    available: Some(true),
                },
            )
            .await?;
        }
        report.dishes = DEFAULT_DISHES.len();
        tracing::info!(count = report.dishes, "Default dishes created");
    }

    if repository::user::count(pool).await? == 0 {
        for (username, password, name, role) in DEFAULT_USERS {
            repository::user::create(
                pool,
                UserCreate {
                    username: username.to_string(),
                    password: password.to_string(),
                    name: name.to_string(),
                    role,
                    active: true,
                },
            )
            .await?;
        }
        report.users = DEFAULT_USERS.len();
        tracing::info!(count = report.users, "Default users created");
    }

    Ok(report)
}

//! User Repository

use super::{RepoError, RepoResult};
use crate::auth::hash_password;
use shared::models::{User, UserCreate, UserUpdate};
use sqlx::SqlitePool;

const USER_SELECT: &str =
    "SELECT id, username, name, role, active, created_at, updated_at FROM users";

/// User row together with its stored password hash (login only)
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserCredentials {
    #[sqlx(flatten)]
    pub user: User,
    pub password_hash: String,
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<User>> {
    let sql = format!("{USER_SELECT} ORDER BY id");
    let users = sqlx::query_as::<_, User>(&sql).fetch_all(pool).await?;
    Ok(users)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<User>> {
    let sql = format!("{USER_SELECT} WHERE id = ?");
    let user = sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> RepoResult<Option<User>> {
    let sql = format!("{USER_SELECT} WHERE username = ? LIMIT 1");
    let user = sqlx::query_as::<_, User>(&sql)
        .bind(username)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

/// Fetch the user and its password hash for credential checks
pub async fn find_credentials(
    pool: &SqlitePool,
    username: &str,
) -> RepoResult<Option<UserCredentials>> {
    let credentials = sqlx::query_as::<_, UserCredentials>(
        "SELECT id, username, name, role, active, created_at, updated_at, password_hash FROM users WHERE username = ? LIMIT 1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(credentials)
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn create(pool: &SqlitePool, data: UserCreate) -> RepoResult<User> {
    // Check duplicate username
    if find_by_username(pool, &data.username).await?.is_some() {
        return Err(RepoError::Duplicate(format!(
            "Username '{}' already exists",
            data.username
        )));
    }

    let password_hash = hash_password(&data.password)
        .map_err(|e| RepoError::Database(format!("Failed to hash password: {e}")))?;

    let now = shared::util::now_millis();
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO users (username, password_hash, name, role, active, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6) RETURNING id",
    )
    .bind(&data.username)
    .bind(password_hash)
    .bind(&data.name)
    .bind(data.role)
    .bind(data.active)
    .bind(now)
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create user".into()))
}

/// Apply a partial patch; `None` when the user does not exist
pub async fn update(pool: &SqlitePool, id: i64, data: UserUpdate) -> RepoResult<Option<User>> {
    let Some(existing) = find_by_id(pool, id).await? else {
        return Ok(None);
    };

    // Check duplicate username if changing
    if let Some(ref new_username) = data.username
        && new_username != &existing.username
        && find_by_username(pool, new_username).await?.is_some()
    {
        return Err(RepoError::Duplicate(format!(
            "Username '{}' already exists",
            new_username
        )));
    }

    let password_hash = match data.password {
        Some(ref password) => Some(
            hash_password(password)
                .map_err(|e| RepoError::Database(format!("Failed to hash password: {e}")))?,
        ),
        None => None,
    };

    let now = shared::util::now_millis();
    sqlx::query(
        "UPDATE users SET username = COALESCE(?1, username), password_hash = COALESCE(?2, password_hash), name = COALESCE(?3, name), role = COALESCE(?4, role), active = COALESCE(?5, active), updated_at = ?6 WHERE id = ?7",
    )
    .bind(data.username)
    .bind(password_hash)
    .bind(data.name)
    .bind(data.role)
    .bind(data.active)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    find_by_id(pool, id).await
}

/// Hard delete; `false` when nothing was deleted
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::verify_password;
    use crate::db::DbService;
    use shared::models::Role;

    async fn test_pool() -> SqlitePool {
        DbService::in_memory().await.unwrap().pool
    }

    fn staff(username: &str) -> UserCreate {
        UserCreate {
            username: username.into(),
            password: "123456".into(),
            name: "店员".into(),
            role: Role::Staff,
            active: true,
        }
    }

    #[tokio::test]
    async fn password_is_stored_hashed() {
        let pool = test_pool().await;
        create(&pool, staff("staff")).await.unwrap();

        let creds = find_credentials(&pool, "staff").await.unwrap().unwrap();
        assert_ne!(creds.password_hash, "123456");
        assert!(verify_password("123456", &creds.password_hash).unwrap());
        assert_eq!(creds.user.role, Role::Staff);
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let pool = test_pool().await;
        create(&pool, staff("staff")).await.unwrap();
        let err = create(&pool, staff("staff")).await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));

        let other = create(&pool, staff("other")).await.unwrap();
        let rename = UserUpdate {
            username: Some("staff".into()),
            ..Default::default()
        };
        let err = update(&pool, other.id, rename).await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn unique_index_rejects_raw_duplicate_insert() {
        let pool = test_pool().await;
        create(&pool, staff("staff")).await.unwrap();

        // 绕过先查后插，直接撞唯一索引
        let err: RepoError = sqlx::query(
            "INSERT INTO users (username, password_hash, name, role, active, created_at, updated_at) VALUES ('staff', 'x', '店员', 'staff', 1, 0, 0)",
        )
        .execute(&pool)
        .await
        .unwrap_err()
        .into();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn toggling_active_twice_restores_user() {
        let pool = test_pool().await;
        let original = create(&pool, staff("staff")).await.unwrap();

        let toggle = |active: bool| UserUpdate {
            active: Some(active),
            ..Default::default()
        };
        let off = update(&pool, original.id, toggle(!original.active))
            .await
            .unwrap()
            .unwrap();
        assert!(!off.active);
        let on = update(&pool, original.id, toggle(!off.active))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(on.active, original.active);
        assert_eq!(on.username, original.username);
        assert_eq!(on.name, original.name);
        assert_eq!(on.role, original.role);
    }

    #[tokio::test]
    async fn password_change_rehashes() {
        let pool = test_pool().await;
        let user = create(&pool, staff("staff")).await.unwrap();
        let patch = UserUpdate {
            password: Some("new-secret".into()),
            ..Default::default()
        };
        update(&pool, user.id, patch).await.unwrap().unwrap();

        let creds = find_credentials(&pool, "staff").await.unwrap().unwrap();
        assert!(verify_password("new-secret", &creds.password_hash).unwrap());
        assert!(!verify_password("123456", &creds.password_hash).unwrap());
    }

    #[tokio::test]
    async fn unknown_id_yields_empty_results() {
        let pool = test_pool().await;
        assert!(find_by_id(&pool, 7).await.unwrap().is_none());
        assert!(update(&pool, 7, UserUpdate::default()).await.unwrap().is_none());
        assert!(!delete(&pool, 7).await.unwrap());
    }
}

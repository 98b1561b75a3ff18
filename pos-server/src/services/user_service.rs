//! User Service - staff accounts and login

use shared::LoginResponse;
use shared::models::{User, UserCreate, UserUpdate};
use sqlx::SqlitePool;

use crate::auth::verify_password;
use crate::db::repository::user;
use crate::security_log;
use crate::utils::validation::{MAX_NAME_LEN, MAX_PASSWORD_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};

#[derive(Clone, Debug)]
pub struct UserService {
    pool: SqlitePool,
}

impl UserService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<User>> {
        Ok(user::find_all(&self.pool).await?)
    }

    pub async fn get(&self, id: i64) -> AppResult<Option<User>> {
        Ok(user::find_by_id(&self.pool, id).await?)
    }

    pub async fn create(&self, data: UserCreate) -> AppResult<User> {
        validate_required_text(&data.username, "username", MAX_NAME_LEN)?;
        validate_required_text(&data.password, "password", MAX_PASSWORD_LEN)?;
        validate_required_text(&data.name, "name", MAX_NAME_LEN)?;

        let created = user::create(&self.pool, data).await?;
        tracing::info!(user_id = created.id, username = %created.username, role = %created.role, "User created");
        Ok(created)
    }

    pub async fn update(&self, id: i64, data: UserUpdate) -> AppResult<Option<User>> {
        if let Some(ref username) = data.username {
            validate_required_text(username, "username", MAX_NAME_LEN)?;
        }
        if let Some(ref password) = data.password {
            validate_required_text(password, "password", MAX_PASSWORD_LEN)?;
        }
        if let Some(ref name) = data.name {
            validate_required_text(name, "name", MAX_NAME_LEN)?;
        }

        let updated = user::update(&self.pool, id, data).await?;
        if let Some(ref u) = updated {
            tracing::info!(user_id = id, active = u.active, "User updated");
        }
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let deleted = user::delete(&self.pool, id).await?;
        if deleted {
            tracing::info!(user_id = id, "User deleted");
        }
        Ok(deleted)
    }

    /// Check credentials; the same error for unknown user and wrong password
    pub async fn login(&self, username: &str, password: &str) -> AppResult<LoginResponse> {
        let Some(credentials) = user::find_credentials(&self.pool, username).await? else {
            security_log!("WARN", "login_failed", username = username, reason = "user_not_found");
            return Err(AppError::invalid_credentials());
        };

        let password_valid = verify_password(password, &credentials.password_hash)
            .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;
        if !password_valid {
            security_log!("WARN", "login_failed", username = username, reason = "invalid_credentials");
            return Err(AppError::invalid_credentials());
        }

        let account = credentials.user;
        if !account.active {
            security_log!("WARN", "login_failed", username = username, reason = "account_disabled");
            return Err(AppError::forbidden("Account has been disabled"));
        }

        tracing::info!(
            user_id = account.id,
            username = %account.username,
            role = %account.role,
            "User logged in successfully"
        );

        Ok(LoginResponse {
            id: account.id,
            name: account.name,
            role: account.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{DbService, seed};
    use shared::models::Role;

    async fn seeded() -> UserService {
        let pool = DbService::in_memory().await.unwrap().pool;
        seed::seed_defaults(&pool).await.unwrap();
        UserService::new(pool)
    }

    #[tokio::test]
    async fn login_returns_identity() {
        let svc = seeded().await;
        let who = svc.login("zhangliang", "123456").await.unwrap();
        assert_eq!(who.name, "张亮");
        assert_eq!(who.role, Role::Manager);
        assert!(who.id > 0);
    }

    #[tokio::test]
    async fn any_mismatch_is_invalid_credentials() {
        let svc = seeded().await;
        for (username, password) in [("zhangliang", "wrong"), ("nobody", "123456"), ("", "")] {
            let err = svc.login(username, password).await.unwrap_err();
            assert!(matches!(err, AppError::InvalidCredentials), "{username}");
        }
    }

    #[tokio::test]
    async fn disabled_account_cannot_login() {
        let svc = seeded().await;
        let staff = user::find_by_username(&svc.pool, "staff").await.unwrap().unwrap();
        svc.update(
            staff.id,
            UserUpdate {
                active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let err = svc.login("staff", "123456").await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn empty_password_is_rejected_on_create() {
        let svc = seeded().await;
        let err = svc
            .create(UserCreate {
                username: "temp".into(),
                password: "".into(),
                name: "临时工".into(),
                role: Role::Staff,
                active: true,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}

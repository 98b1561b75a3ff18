use sqlx::SqlitePool;

use crate::core::{Config, Result};
use crate::db::{DbService, seed};
use crate::services::{DishService, HttpService, OrderService, UserService};

/// 服务器状态 - 持有所有服务的共享引用
///
/// 各服务内部只持有连接池 (以及订单号生成器的 Arc)，克隆成本极低。
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 配置项 (不可变) |
/// | pool | SQLite 连接池 |
/// | dishes | 菜品服务 |
/// | orders | 订单服务 |
/// | users | 员工服务 |
/// | http | HTTP 服务 |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
    pub dishes: DishService,
    pub orders: OrderService,
    pub users: UserService,
    pub http: HttpService,
}

impl ServerState {
    /// 用已打开的连接池组装状态
    pub fn new(config: Config, pool: SqlitePool) -> Self {
        Self {
            dishes: DishService::new(pool.clone()),
            orders: OrderService::new(pool.clone()),
            users: UserService::new(pool.clone()),
            http: HttpService::new(config.clone()),
            config,
            pool,
        }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构
    /// 2. 数据库 (迁移)
    /// 3. 首次启动默认数据 (仅空表)
    /// 4. 各服务
    pub async fn initialize(config: &Config) -> Result<Self> {
        config.ensure_work_dir_structure()?;

        let db = DbService::new(&config.database_url()).await?;
        let report = seed::seed_defaults(&db.pool)
            .await
            .map_err(|e| crate::core::ServerError::Database(e.to_string()))?;
        if report.dishes > 0 || report.users > 0 {
            tracing::info!(dishes = report.dishes, users = report.users, "Seed data inserted");
        }

        Ok(Self::new(config.clone(), db.pool))
    }

    /// 内存数据库状态 (测试用)，同样执行迁移与默认数据
    pub async fn in_memory(config: Config) -> Result<Self> {
        let db = DbService::in_memory().await?;
        seed::seed_defaults(&db.pool)
            .await
            .map_err(|e| crate::core::ServerError::Database(e.to_string()))?;
        Ok(Self::new(config, db.pool))
    }
}

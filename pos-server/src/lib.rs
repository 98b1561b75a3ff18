//! Malatang POS Server - 称重麻辣烫收银后端
//!
//! # 架构概述
//!
//! - **数据库** (`db`): 嵌入式 SQLite (sqlx)，启动时迁移并写入默认数据
//! - **认证** (`auth`): Argon2 密码哈希
//! - **服务** (`services`): 菜品 / 订单 / 员工业务逻辑与 HTTP 服务
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! pos-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── auth/          # 密码哈希
//! ├── services/      # 业务服务
//! ├── api/           # HTTP 路由和处理器
//! ├── utils/         # 错误、日志、校验
//! └── db/            # 连接池、仓储、默认数据
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerError, ServerState};
pub use services::http_server::build_router;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 加载 .env 并初始化日志
///
/// `.env` 不存在不算错误。
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty());
    if let Some(dir) = &log_dir {
        std::fs::create_dir_all(dir)?;
    }
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    __  ___      __      __
   /  |/  /___ _/ /___ _/ /_____ _____  ____ _
  / /|_/ / __ `/ / __ `/ __/ __ `/ __ \/ __ `/
 / /  / / /_/ / / /_/ / /_/ /_/ / / / / /_/ /
/_/  /_/\__,_/_/\__,_/\__/\__,_/_/ /_/\__, /
                                     /____/   POS
    "#
    );
}

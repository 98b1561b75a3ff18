use thiserror::Error;

use crate::utils::AppError;

/// 启动/运行期错误 (非请求级)
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("工作目录初始化失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("数据库初始化失败: {0}")]
    Database(String),

    #[error("内部服务器错误: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<AppError> for ServerError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Database(msg) => ServerError::Database(msg),
            other => ServerError::Internal(anyhow::anyhow!(other.to_string())),
        }
    }
}

/// 服务器启动流程的 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;

//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`dishes`] - 菜品管理接口
//! - [`orders`] - 订单与今日数据接口
//! - [`users`] - 员工管理与登录接口
//!
//! 不存在的 id 不返回 404：查询/更新返回 `null`，删除返回 `false`。

pub mod dishes;
pub mod health;
pub mod orders;
pub mod users;

// Re-export common types for handlers
pub use crate::utils::AppResult;

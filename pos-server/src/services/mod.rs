//! 服务层 - 每个实体一个服务，外加 HTTP 服务
//!
//! # 服务列表
//!
//! - [`DishService`] - 菜品管理
//! - [`OrderService`] - 订单、订单号生成、今日数据
//! - [`UserService`] - 员工账号与登录
//! - [`HttpService`] - HTTP 服务器

pub mod dish_service;
pub mod http_server;
pub mod order_service;
pub mod user_service;

pub use dish_service::DishService;
pub use http_server::HttpService;
pub use order_service::{OrderNumberGenerator, OrderService};
pub use user_service::UserService;

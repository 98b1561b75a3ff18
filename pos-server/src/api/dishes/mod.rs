//! Dish API Module
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/dishes | GET | 全部菜品 (按 id) |
//! | /api/dishes | POST | 新建菜品 |
//! | /api/dishes/{id} | GET | 单个菜品，不存在为 null |
//! | /api/dishes/{id} | PUT | 部分更新，不存在为 null |
//! | /api/dishes/{id} | DELETE | 删除，返回是否删除 |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Dish router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/dishes", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
}

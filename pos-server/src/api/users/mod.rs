//! User API Module
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/users | GET | 全部员工 (不含密码) |
//! | /api/users | POST | 新建员工 |
//! | /api/users/login | POST | 登录 |
//! | /api/users/{id} | GET | 单个员工，不存在为 null |
//! | /api/users/{id} | PUT | 部分更新，不存在为 null |
//! | /api/users/{id} | DELETE | 删除，返回是否删除 |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

/// User router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/users", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/login", post(handler::login))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
}

//! Order API Module
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/orders | GET | 全部订单 (最新在前) |
//! | /api/orders | POST | 下单，服务端生成订单号 |
//! | /api/orders/stats | GET | 今日订单数 / 销售额 / 客单价 |
//! | /api/orders/{id} | GET | 单个订单，不存在为 null |
//! | /api/orders/{id}/status | PUT | 修改状态，不存在为 null |

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        // 静态路径优先于 /{id}
        .route("/stats", get(handler::today_stats))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/status", put(handler::update_status))
}

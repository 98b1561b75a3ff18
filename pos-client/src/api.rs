//! The server operations the till depends on
//!
//! [`Session`](crate::Session) talks to the server only through this trait,
//! so the cashier workflow can run against a stub in tests.

use async_trait::async_trait;
use shared::models::{Dish, Order, OrderCreate, OrderStats, User, UserUpdate};
use shared::LoginResponse;

use crate::{ClientResult, HttpClient};

#[async_trait]
pub trait PosApi: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> ClientResult<LoginResponse>;

    async fn list_dishes(&self) -> ClientResult<Vec<Dish>>;

    async fn today_stats(&self) -> ClientResult<OrderStats>;

    async fn list_orders(&self) -> ClientResult<Vec<Order>>;

    async fn create_order(&self, order: &OrderCreate) -> ClientResult<Order>;

    async fn list_users(&self) -> ClientResult<Vec<User>>;

    /// Enable or disable an account; `None` when the id no longer exists
    async fn set_user_active(&self, id: i64, active: bool) -> ClientResult<Option<User>>;
}

#[async_trait]
impl PosApi for HttpClient {
    async fn login(&self, username: &str, password: &str) -> ClientResult<LoginResponse> {
        HttpClient::login(self, username, password).await
    }

    async fn list_dishes(&self) -> ClientResult<Vec<Dish>> {
        HttpClient::list_dishes(self).await
    }

    async fn today_stats(&self) -> ClientResult<OrderStats> {
        HttpClient::today_stats(self).await
    }

    async fn list_orders(&self) -> ClientResult<Vec<Order>> {
        HttpClient::list_orders(self).await
    }

    async fn create_order(&self, order: &OrderCreate) -> ClientResult<Order> {
        HttpClient::create_order(self, order).await
    }

    async fn list_users(&self) -> ClientResult<Vec<User>> {
        HttpClient::list_users(self).await
    }

    async fn set_user_active(&self, id: i64, active: bool) -> ClientResult<Option<User>> {
        let update = UserUpdate {
            active: Some(active),
            ..Default::default()
        };
        self.update_user(id, &update).await
    }
}

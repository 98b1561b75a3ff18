//! HTTP client for the POS server REST API

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::models::{Dish, Order, OrderCreate, OrderStats, User, UserUpdate};
use shared::{ErrorBody, LoginRequest, LoginResponse};

use crate::{ClientConfig, ClientError, ClientResult};

/// HTTP client for making requests to the POS server
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.client.get(self.url(path)).send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.client.put(self.url(path)).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            // 服务端错误体 {code, message}；解析失败时用原文
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|body| body.message)
                .unwrap_or(text);
            return Err(error_for_status(status, message));
        }

        response.json().await.map_err(Into::into)
    }

    // ========== Dishes ==========

    pub async fn list_dishes(&self) -> ClientResult<Vec<Dish>> {
        self.get("/api/dishes").await
    }

    // ========== Orders ==========

    pub async fn list_orders(&self) -> ClientResult<Vec<Order>> {
        self.get("/api/orders").await
    }

    pub async fn today_stats(&self) -> ClientResult<OrderStats> {
        self.get("/api/orders/stats").await
    }

    pub async fn create_order(&self, order: &OrderCreate) -> ClientResult<Order> {
        self.post("/api/orders", order).await
    }

    // ========== Users ==========

    /// Login with username and password
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<LoginResponse> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.post("/api/users/login", &request).await
    }

    pub async fn list_users(&self) -> ClientResult<Vec<User>> {
        self.get("/api/users").await
    }

    pub async fn update_user(&self, id: i64, update: &UserUpdate) -> ClientResult<Option<User>> {
        self.put(&format!("/api/users/{id}"), update).await
    }
}

fn error_for_status(status: StatusCode, message: String) -> ClientError {
    match status {
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
        StatusCode::FORBIDDEN => ClientError::Forbidden(message),
        StatusCode::NOT_FOUND => ClientError::NotFound(message),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            ClientError::Validation(message)
        }
        StatusCode::CONFLICT => ClientError::Conflict(message),
        _ => ClientError::Internal(message),
    }
}

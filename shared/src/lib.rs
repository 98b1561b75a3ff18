//! Shared types for the Malatang POS
//!
//! Data models, API DTOs and small utilities used by both the server and
//! the till client.

pub mod client;
pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use client::{ErrorBody, HealthResponse, LoginRequest, LoginResponse};
pub use models::{
    Dish, DishCreate, DishSnapshot, DishUpdate, Order, OrderCreate, OrderItem, OrderStats,
    OrderStatus, OrderStatusUpdate, PaymentMethod, Role, User, UserCreate, UserUpdate,
};

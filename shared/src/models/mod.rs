//! Data models
//!
//! Shared between pos-server and pos-client (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY), timestamps are Unix millis.

pub mod dish;
pub mod order;
pub mod serde_helpers;
pub mod user;

// Re-exports
pub use dish::*;
pub use order::*;
pub use user::*;

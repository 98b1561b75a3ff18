//! 认证模块
//!
//! 只做用户名/密码校验，不签发令牌：
//! - [`hash_password`] / [`verify_password`] - argon2 密码哈希

pub mod password;

pub use password::{hash_password, verify_password};

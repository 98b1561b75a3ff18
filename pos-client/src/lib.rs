//! Malatang POS Client - till-side logic for the POS server
//!
//! - [`HttpClient`]: REST calls against `pos-server`
//! - [`PosApi`]: the operations the till needs, implemented by [`HttpClient`]
//! - [`Cart`]: weighed lines, scale reading and totals
//! - [`Session`]: screens, modals and the cashier workflow

pub mod api;
pub mod cart;
pub mod config;
pub mod error;
pub mod format;
pub mod http;
pub mod session;

pub use api::PosApi;
pub use cart::Cart;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use session::{Modal, Notice, Session, View};

// Re-export shared types for convenience
pub use shared::{LoginResponse, Order, OrderStats, PaymentMethod, User};

//! Order Model

use serde::{Deserialize, Serialize};
use std::fmt;

use super::dish::DishSnapshot;
use super::serde_helpers;

/// Payment method chosen at the till
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum PaymentMethod {
    Wechat,
    Alipay,
    Card,
    Face,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Wechat,
        PaymentMethod::Alipay,
        PaymentMethod::Card,
        PaymentMethod::Face,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Wechat => "wechat",
            PaymentMethod::Alipay => "alipay",
            PaymentMethod::Card => "card",
            PaymentMethod::Face => "face",
        }
    }
}

/// Order status
///
/// `pending` and `paid` are the statuses the till produces; any other string
/// is kept verbatim so status updates never reject input.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
    Other(String),
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Paid => "paid",
            OrderStatus::Other(s) => s.as_str(),
        }
    }
}

impl From<String> for OrderStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "pending" => OrderStatus::Pending,
            "paid" => OrderStatus::Paid,
            _ => OrderStatus::Other(value),
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(value: &str) -> Self {
        OrderStatus::from(value.to_string())
    }
}

impl From<OrderStatus> for String {
    fn from(value: OrderStatus) -> Self {
        match value {
            OrderStatus::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One weighed line of an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub dish: DishSnapshot,
    /// Weight in grams
    pub weight: i64,
    pub subtotal: f64,
}

/// Order entity (订单)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub order_no: String,
    /// JSON array column; dish data is denormalized into each line
    #[cfg_attr(feature = "db", sqlx(json))]
    pub items: Vec<OrderItem>,
    pub total: f64,
    pub payment_method: PaymentMethod,
    #[cfg_attr(feature = "db", sqlx(try_from = "String"))]
    pub status: OrderStatus,
    pub member_id: Option<String>,
    pub created_at: i64,
}

/// Create order payload
///
/// The total is taken as submitted; it is not recomputed from the items.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    pub items: Vec<OrderItem>,
    #[serde(deserialize_with = "serde_helpers::number_or_string")]
    pub total: f64,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub status: Option<OrderStatus>,
    #[serde(default)]
    pub member_id: Option<String>,
}

/// Update order status payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}

/// Same-day aggregate figures (今日数据)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStats {
    pub total_orders: i64,
    pub total_sales: f64,
    pub avg_price: f64,
}

impl OrderStats {
    /// Build stats from a count and a sum; average is zero when there are no orders
    pub fn from_totals(total_orders: i64, total_sales: f64) -> Self {
        let avg_price = if total_orders > 0 {
            total_sales / total_orders as f64
        } else {
            0.0
        };
        Self {
            total_orders,
            total_sales,
            avg_price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_keeps_unknown_values() {
        let status: OrderStatus = serde_json::from_str("\"refunded\"").unwrap();
        assert_eq!(status, OrderStatus::Other("refunded".to_string()));
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"refunded\"");

        let paid: OrderStatus = serde_json::from_str("\"paid\"").unwrap();
        assert_eq!(paid, OrderStatus::Paid);
    }

    #[test]
    fn create_accepts_total_as_string() {
        let json = r#"{
            "items": [],
            "total": "35.60",
            "paymentMethod": "wechat",
            "status": "paid"
        }"#;
        let order: OrderCreate = serde_json::from_str(json).unwrap();
        assert_eq!(order.total, 35.6);
        assert_eq!(order.payment_method, PaymentMethod::Wechat);
        assert_eq!(order.status, Some(OrderStatus::Paid));
        assert!(order.member_id.is_none());
    }

    #[test]
    fn unknown_payment_method_is_rejected() {
        let json = r#"{"items": [], "total": 1, "paymentMethod": "cash"}"#;
        assert!(serde_json::from_str::<OrderCreate>(json).is_err());
    }

    #[test]
    fn stats_average_guards_empty_day() {
        assert_eq!(OrderStats::from_totals(0, 0.0), OrderStats::default());

        let stats = OrderStats::from_totals(2, 30.0);
        assert_eq!(stats.avg_price, 15.0);
    }

    #[test]
    fn stats_use_camel_case_keys() {
        let value = serde_json::to_value(OrderStats::from_totals(1, 12.5)).unwrap();
        assert_eq!(value["totalOrders"], 1);
        assert_eq!(value["totalSales"], 12.5);
        assert_eq!(value["avgPrice"], 12.5);
    }
}

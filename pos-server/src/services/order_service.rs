//! Order Service - order creation, status updates and daily figures

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use shared::models::{Order, OrderCreate, OrderStats, OrderStatus};
use sqlx::SqlitePool;

use crate::db::repository::order;
use crate::utils::validation::{MAX_SHORT_TEXT_LEN, validate_optional_text, validate_price};
use crate::utils::{AppError, AppResult};

/// Order number prefix
const ORDER_NO_PREFIX: &str = "ORD";

/// Issues `ORD<millis>` order numbers.
///
/// Numbers are strictly increasing within the process: when the clock has
/// not moved past the last issued stamp, the stamp is bumped by one.
#[derive(Debug, Default)]
pub struct OrderNumberGenerator {
    last: AtomicI64,
}

impl OrderNumberGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next stamp given the current time in millis
    pub fn next_stamp(&self, now: i64) -> i64 {
        let prev = self
            .last
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |prev| {
                Some(now.max(prev + 1))
            })
            .unwrap_or_else(|prev| prev);
        now.max(prev + 1)
    }

    pub fn next(&self) -> String {
        format!(
            "{ORDER_NO_PREFIX}{}",
            self.next_stamp(shared::util::now_millis())
        )
    }
}

#[derive(Clone, Debug)]
pub struct OrderService {
    pool: SqlitePool,
    numbers: Arc<OrderNumberGenerator>,
}

impl OrderService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            numbers: Arc::new(OrderNumberGenerator::new()),
        }
    }

    /// All orders, newest first
    pub async fn list(&self) -> AppResult<Vec<Order>> {
        Ok(order::find_all(&self.pool).await?)
    }

    pub async fn get(&self, id: i64) -> AppResult<Option<Order>> {
        Ok(order::find_by_id(&self.pool, id).await?)
    }

    /// Persist a submitted order under a freshly issued order number
    pub async fn create(&self, data: OrderCreate) -> AppResult<Order> {
        validate_price(data.total, "total")?;
        validate_optional_text(&data.member_id, "memberId", MAX_SHORT_TEXT_LEN)?;

        let order_no = self.numbers.next();
        let created_at = shared::util::now_millis();
        let created = order::create(&self.pool, &order_no, data, created_at).await?;

        tracing::info!(
            order_id = created.id,
            order_no = %created.order_no,
            total = created.total,
            payment_method = created.payment_method.as_str(),
            items = created.items.len(),
            "Order created"
        );
        Ok(created)
    }

    /// Unconditional status overwrite
    pub async fn update_status(&self, id: i64, status: OrderStatus) -> AppResult<Option<Order>> {
        if status.as_str().trim().is_empty() {
            return Err(AppError::validation("status must not be empty"));
        }
        if status.as_str().len() > MAX_SHORT_TEXT_LEN {
            return Err(AppError::validation("status is too long"));
        }

        let updated = order::update_status(&self.pool, id, &status).await?;
        if updated.is_some() {
            tracing::info!(order_id = id, status = %status, "Order status updated");
        }
        Ok(updated)
    }

    /// Figures for orders created since local midnight
    pub async fn today_stats(&self) -> AppResult<OrderStats> {
        self.stats_since(shared::util::local_day_start_millis()).await
    }

    pub async fn stats_since(&self, since: i64) -> AppResult<OrderStats> {
        let (count, sum) = order::totals_since(&self.pool, since).await?;
        Ok(OrderStats::from_totals(count, sum))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use shared::models::PaymentMethod;

    async fn service() -> OrderService {
        OrderService::new(DbService::in_memory().await.unwrap().pool)
    }

    fn submitted(total: f64) -> OrderCreate {
        OrderCreate {
            items: vec![],
            total,
            payment_method: PaymentMethod::Card,
            status: Some(OrderStatus::Paid),
            member_id: None,
        }
    }

    #[test]
    fn stamps_increase_even_when_clock_stalls() {
        let generator = OrderNumberGenerator::new();
        assert_eq!(generator.next_stamp(1_000), 1_000);
        assert_eq!(generator.next_stamp(1_000), 1_001);
        assert_eq!(generator.next_stamp(999), 1_002);
        assert_eq!(generator.next_stamp(5_000), 5_000);
    }

    #[test]
    fn numbers_carry_prefix() {
        let generator = OrderNumberGenerator::new();
        let a = generator.next();
        let b = generator.next();
        assert!(a.starts_with("ORD"));
        assert!(a[3..].parse::<i64>().is_ok());
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn sequential_creates_get_distinct_numbers() {
        let svc = service().await;
        let first = svc.create(submitted(10.0)).await.unwrap();
        let second = svc.create(submitted(20.0)).await.unwrap();
        assert_ne!(first.order_no, second.order_no);
    }

    #[tokio::test]
    async fn empty_day_has_zero_stats() {
        let svc = service().await;
        let stats = svc.today_stats().await.unwrap();
        assert_eq!(stats.total_orders, 0);
        assert_eq!(stats.total_sales, 0.0);
        assert_eq!(stats.avg_price, 0.0);
    }

    #[tokio::test]
    async fn today_stats_sum_and_average() {
        let svc = service().await;
        svc.create(submitted(10.0)).await.unwrap();
        svc.create(submitted(20.0)).await.unwrap();

        let stats = svc.today_stats().await.unwrap();
        assert_eq!(stats.total_orders, 2);
        assert_eq!(stats.total_sales, 30.0);
        assert_eq!(stats.avg_price, 15.0);
    }

    #[tokio::test]
    async fn yesterday_is_excluded() {
        let svc = service().await;
        let yesterday = shared::util::local_day_start_millis() - 60_000;
        order::create(&svc.pool, "ORD-old", submitted(50.0), yesterday)
            .await
            .unwrap();
        svc.create(submitted(12.0)).await.unwrap();

        let stats = svc.today_stats().await.unwrap();
        assert_eq!(stats.total_orders, 1);
        assert_eq!(stats.total_sales, 12.0);
    }

    #[tokio::test]
    async fn status_defaults_to_pending() {
        let svc = service().await;
        let mut data = submitted(1.0);
        data.status = None;
        let created = svc.create(data).await.unwrap();
        assert_eq!(created.status, OrderStatus::Pending);

        let paid = svc
            .update_status(created.id, OrderStatus::Paid)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(paid.status, OrderStatus::Paid);
    }
}

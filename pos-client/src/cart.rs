//! Cart - weighed lines on the till
//!
//! A line costs price × grams ÷ 100. Money is summed with `rust_decimal` so that a
//! cart of many small lines does not drift before the 2-decimal total.

use rand::Rng;
use rust_decimal::prelude::*;
use shared::models::{Dish, DishSnapshot, OrderCreate, OrderItem, OrderStatus, PaymentMethod};

/// Scale display before anything is weighed (克)
pub const BASELINE_WEIGHT: i64 = 285;

/// Simulated scale range used when no weight is typed (克)
pub const SIMULATED_WEIGHT_MIN: i64 = 50;
pub const SIMULATED_WEIGHT_MAX: i64 = 149;

fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

fn round_money(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// price × weight ÷ 100
pub fn line_subtotal(price: f64, weight: i64) -> f64 {
    (to_decimal(price) * Decimal::from(weight) / Decimal::ONE_HUNDRED)
        .to_f64()
        .unwrap_or_default()
}

/// One reading from the simulated scale
pub fn simulated_weight<R: Rng>(rng: &mut R) -> i64 {
    rng.gen_range(SIMULATED_WEIGHT_MIN..=SIMULATED_WEIGHT_MAX)
}

/// Weight prompt input → grams
///
/// Blank input takes a scale reading. Anything that is not a positive whole
/// number of grams is ignored.
pub fn parse_weight<R: Rng>(input: &str, rng: &mut R) -> Option<i64> {
    let input = input.trim();
    if input.is_empty() {
        return Some(simulated_weight(rng));
    }
    match input.parse::<i64>() {
        Ok(weight) if weight > 0 => Some(weight),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    items: Vec<OrderItem>,
    scale_weight: i64,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

impl Cart {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            scale_weight: BASELINE_WEIGHT,
        }
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Current scale display (克)
    pub fn scale_weight(&self) -> i64 {
        self.scale_weight
    }

    /// Add a weighed line; non-positive weights are ignored
    pub fn add(&mut self, dish: &Dish, weight: i64) -> bool {
        if weight <= 0 {
            return false;
        }
        self.items.push(OrderItem {
            dish: DishSnapshot::from(dish),
            weight,
            subtotal: line_subtotal(dish.price, weight),
        });
        self.scale_weight += weight;
        true
    }

    pub fn remove(&mut self, index: usize) -> Option<OrderItem> {
        if index >= self.items.len() {
            return None;
        }
        let item = self.items.remove(index);
        self.scale_weight -= item.weight;
        Some(item)
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.scale_weight = BASELINE_WEIGHT;
    }

    /// Sum of line subtotals, rounded to 2 decimals
    pub fn total(&self) -> f64 {
        let sum: Decimal = self.items.iter().map(|i| to_decimal(i.subtotal)).sum();
        round_money(sum)
    }

    /// Order payload for a paid checkout
    pub fn to_order(&self, payment_method: PaymentMethod) -> OrderCreate {
        OrderCreate {
            items: self.items.clone(),
            total: self.total(),
            payment_method,
            status: Some(OrderStatus::Paid),
            member_id: None,
        }
    }
}

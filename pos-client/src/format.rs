//! Display text for the till (中文界面)

use shared::models::{OrderStatus, PaymentMethod, Role};

/// 支付方式显示名
pub fn payment_name(method: PaymentMethod) -> &'static str {
    match method {
        PaymentMethod::Wechat => "微信支付",
        PaymentMethod::Alipay => "支付宝",
        PaymentMethod::Card => "刷卡",
        PaymentMethod::Face => "人脸识别",
    }
}

/// 已支付 for paid, the raw status otherwise
pub fn status_label(status: &OrderStatus) -> String {
    match status {
        OrderStatus::Paid => "已支付".to_string(),
        other => other.as_str().to_string(),
    }
}

pub fn role_label(role: Role) -> &'static str {
    match role {
        Role::Admin => "管理员",
        Role::Manager => "店长",
        Role::Staff => "店员",
    }
}

pub fn active_label(active: bool) -> &'static str {
    if active { "启用" } else { "禁用" }
}

/// ¥12.80
pub fn money(amount: f64) -> String {
    format!("¥{amount:.2}")
}

/// 150g
pub fn grams(weight: i64) -> String {
    format!("{weight}g")
}

pub fn local_time(millis: i64) -> String {
    shared::util::format_local_millis(millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels() {
        assert_eq!(payment_name(PaymentMethod::Wechat), "微信支付");
        assert_eq!(payment_name(PaymentMethod::Face), "人脸识别");
        assert_eq!(status_label(&OrderStatus::Paid), "已支付");
        assert_eq!(status_label(&OrderStatus::Pending), "pending");
        assert_eq!(status_label(&OrderStatus::from("refunded")), "refunded");
        assert_eq!(role_label(Role::Manager), "店长");
        assert_eq!(active_label(false), "禁用");
    }

    #[test]
    fn money_has_two_decimals() {
        assert_eq!(money(12.8), "¥12.80");
        assert_eq!(money(0.0), "¥0.00");
        assert_eq!(grams(150), "150g");
    }
}

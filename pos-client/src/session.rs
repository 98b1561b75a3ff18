//! Session - the cashier workflow
//!
//! Holds everything the till shows: the logged-in user, the current screen,
//! the cart, and the lists fetched from the server. Rendering lives in the
//! `pos-terminal` binary; this module only changes state.
//!
//! A failed request never clears what is already on screen. It leaves a
//! generic [`Notice::Error`] and the previous data in place.

use rand::Rng;
use shared::models::{Dish, Order, OrderStats, PaymentMethod, User};
use shared::LoginResponse;

use crate::cart::{Cart, parse_weight, simulated_weight};
use crate::{ClientError, PosApi};

pub const MSG_LOGIN_REJECTED: &str = "用户名或密码错误";
pub const MSG_ACCOUNT_DISABLED: &str = "账号已停用";
pub const MSG_LOGIN_FAILED: &str = "登录失败";
pub const MSG_ORDER_FAILED: &str = "订单创建失败";
pub const MSG_ACTION_FAILED: &str = "操作失败";
pub const MSG_LOAD_FAILED: &str = "数据加载失败";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Cashier,
    Orders,
    Users,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    /// 称重: typed grams, or blank for a scale reading
    Weight { dish: Dish },
    /// 支付确认
    Payment { method: PaymentMethod },
    /// 订单详情
    OrderDetail(Order),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

pub struct Session<A> {
    api: A,
    view: View,
    user: Option<LoginResponse>,
    dishes: Vec<Dish>,
    cart: Cart,
    stats: OrderStats,
    orders: Vec<Order>,
    users: Vec<User>,
    modal: Option<Modal>,
    last_order_no: Option<String>,
    login_error: Option<String>,
    notice: Option<Notice>,
}

impl<A: PosApi> Session<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            view: View::Login,
            user: None,
            dishes: Vec::new(),
            cart: Cart::new(),
            stats: OrderStats::default(),
            orders: Vec::new(),
            users: Vec::new(),
            modal: None,
            last_order_no: None,
            login_error: None,
            notice: None,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn user(&self) -> Option<&LoginResponse> {
        self.user.as_ref()
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.role.is_admin())
    }

    pub fn dishes(&self) -> &[Dish] {
        &self.dishes
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn stats(&self) -> &OrderStats {
        &self.stats
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn modal(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }

    pub fn last_order_no(&self) -> Option<&str> {
        self.last_order_no.as_deref()
    }

    pub fn login_error(&self) -> Option<&str> {
        self.login_error.as_deref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    fn fail(&mut self, message: &str, err: &ClientError) {
        tracing::warn!(error = %err, "{}", message);
        self.notice = Some(Notice::Error(message.to_string()));
    }

    // ========== Login / Logout ==========

    pub async fn login(&mut self, username: &str, password: &str) {
        match self.api.login(username, password).await {
            Ok(user) => {
                tracing::info!(user_id = user.id, name = %user.name, role = %user.role, "Logged in");
                self.user = Some(user);
                self.login_error = None;
                self.notice = None;
                self.view = View::Cashier;
                self.refresh_cashier().await;
            }
            Err(err) => {
                let message = match err {
                    ClientError::Unauthorized => MSG_LOGIN_REJECTED,
                    ClientError::Forbidden(_) => MSG_ACCOUNT_DISABLED,
                    _ => MSG_LOGIN_FAILED,
                };
                tracing::warn!(username, error = %err, "Login failed");
                self.login_error = Some(message.to_string());
            }
        }
    }

    /// Back to the login screen with an empty cart
    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            tracing::info!(user_id = user.id, "Logged out");
        }
        self.view = View::Login;
        self.cart.clear();
        self.modal = None;
        self.notice = None;
    }

    // ========== Navigation ==========

    /// Switch screens; the Users screen is admin-only
    pub async fn navigate(&mut self, view: View) -> bool {
        if self.user.is_none() || view == View::Login {
            return false;
        }
        if view == View::Users && !self.is_admin() {
            return false;
        }

        self.view = view;
        self.modal = None;
        match view {
            View::Cashier => self.refresh_cashier().await,
            View::Orders => self.refresh_orders().await,
            View::Users => self.refresh_users().await,
            View::Login => {}
        }
        true
    }

    pub async fn refresh_cashier(&mut self) {
        match self.api.list_dishes().await {
            Ok(dishes) => self.dishes = dishes,
            Err(err) => self.fail(MSG_LOAD_FAILED, &err),
        }
        self.refresh_stats().await;
    }

    pub async fn refresh_stats(&mut self) {
        match self.api.today_stats().await {
            Ok(stats) => self.stats = stats,
            Err(err) => self.fail(MSG_LOAD_FAILED, &err),
        }
    }

    pub async fn refresh_orders(&mut self) {
        match self.api.list_orders().await {
            Ok(orders) => self.orders = orders,
            Err(err) => self.fail(MSG_LOAD_FAILED, &err),
        }
    }

    pub async fn refresh_users(&mut self) {
        match self.api.list_users().await {
            Ok(users) => self.users = users,
            Err(err) => self.fail(MSG_LOAD_FAILED, &err),
        }
    }

    // ========== Cashier ==========

    pub fn open_weight_prompt(&mut self, dish_index: usize) -> bool {
        if self.view != View::Cashier || self.modal.is_some() {
            return false;
        }
        let Some(dish) = self.dishes.get(dish_index).cloned() else {
            return false;
        };
        self.modal = Some(Modal::Weight { dish });
        true
    }

    /// Confirm the weight prompt; blank input reads the simulated scale
    pub fn confirm_weight(&mut self, input: &str) -> bool {
        self.confirm_weight_with(input, &mut rand::thread_rng())
    }

    pub fn confirm_weight_with<R: Rng>(&mut self, input: &str, rng: &mut R) -> bool {
        let Some(Modal::Weight { dish }) = &self.modal else {
            return false;
        };
        // 非正数重量不处理，弹窗保持打开
        let Some(weight) = parse_weight(input, rng) else {
            return false;
        };
        let dish = dish.clone();
        self.cart.add(&dish, weight);
        self.modal = None;
        true
    }

    /// Add straight from the scale without a prompt
    pub fn quick_add(&mut self, dish_index: usize) -> bool {
        if self.view != View::Cashier || self.modal.is_some() {
            return false;
        }
        let Some(dish) = self.dishes.get(dish_index) else {
            return false;
        };
        let weight = simulated_weight(&mut rand::thread_rng());
        self.cart.add(dish, weight)
    }

    pub fn remove_item(&mut self, index: usize) -> bool {
        self.cart.remove(index).is_some()
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    /// 挂单 (no behavior yet)
    pub fn suspend(&mut self) {
        tracing::debug!("Suspend pressed");
    }

    /// 取单 (no behavior yet)
    pub fn resume(&mut self) {
        tracing::debug!("Resume pressed");
    }

    pub fn choose_payment(&mut self, method: PaymentMethod) {
        if self.view == View::Cashier && self.modal.is_none() {
            self.modal = Some(Modal::Payment { method });
        }
    }

    /// Post the cart as a paid order; returns the issued order number
    ///
    /// Does nothing without an open payment modal or with an empty cart.
    pub async fn confirm_payment(&mut self) -> Option<String> {
        let Some(Modal::Payment { method }) = self.modal else {
            return None;
        };
        if self.cart.is_empty() {
            return None;
        }

        let order = self.cart.to_order(method);
        match self.api.create_order(&order).await {
            Ok(created) => {
                tracing::info!(order_no = %created.order_no, total = created.total, "Order paid");
                self.modal = None;
                self.cart.clear();
                self.notice = Some(Notice::Info(format!("订单 {} 支付成功！", created.order_no)));
                self.last_order_no = Some(created.order_no.clone());
                self.refresh_stats().await;
                Some(created.order_no)
            }
            Err(err) => {
                self.fail(MSG_ORDER_FAILED, &err);
                None
            }
        }
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    // ========== Orders / Users ==========

    pub fn view_order(&mut self, index: usize) -> bool {
        if self.view != View::Orders {
            return false;
        }
        let Some(order) = self.orders.get(index).cloned() else {
            return false;
        };
        self.modal = Some(Modal::OrderDetail(order));
        true
    }

    /// Flip a user's `active` flag, then reload the list
    pub async fn toggle_user(&mut self, index: usize) -> bool {
        if self.view != View::Users {
            return false;
        }
        let Some((id, active)) = self.users.get(index).map(|u| (u.id, u.active)) else {
            return false;
        };
        match self.api.set_user_active(id, !active).await {
            Ok(_) => {
                self.refresh_users().await;
                true
            }
            Err(err) => {
                self.fail(MSG_ACTION_FAILED, &err);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientResult;
    use crate::cart::BASELINE_WEIGHT;
    use async_trait::async_trait;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use shared::models::{OrderCreate, OrderStatus, Role};
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockState {
        orders: Vec<Order>,
        users: Vec<User>,
        failing: bool,
    }

    #[derive(Default)]
    struct MockApi {
        state: Mutex<MockState>,
    }

    impl MockApi {
        fn with_users() -> Self {
            let user = |id, username: &str, role| User {
                id,
                username: username.into(),
                name: username.into(),
                role,
                active: true,
                created_at: 0,
                updated_at: 0,
            };
            let api = Self::default();
            api.state.lock().unwrap().users = vec![
                user(1, "admin", Role::Admin),
                user(2, "staff", Role::Staff),
            ];
            api
        }

        fn set_failing(&self, failing: bool) {
            self.state.lock().unwrap().failing = failing;
        }

        fn order_count(&self) -> usize {
            self.state.lock().unwrap().orders.len()
        }

        fn check(&self) -> ClientResult<()> {
            if self.state.lock().unwrap().failing {
                return Err(ClientError::Internal("offline".into()));
            }
            Ok(())
        }
    }

    fn dish(id: i64, name: &str, price: f64) -> Dish {
        Dish {
            id,
            name: name.into(),
            icon: "🥬".into(),
            price,
            available: true,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[async_trait]
    impl PosApi for MockApi {
        async fn login(&self, username: &str, password: &str) -> ClientResult<LoginResponse> {
            self.check()?;
            match (username, password) {
                ("admin", "admin123") => Ok(LoginResponse {
                    id: 1,
                    name: "管理员".into(),
                    role: Role::Admin,
                }),
                ("staff", "123456") => Ok(LoginResponse {
                    id: 2,
                    name: "店员".into(),
                    role: Role::Staff,
                }),
                _ => Err(ClientError::Unauthorized),
            }
        }

        async fn list_dishes(&self) -> ClientResult<Vec<Dish>> {
            self.check()?;
            Ok(vec![dish(1, "青菜", 12.8), dish(2, "肥牛", 38.0)])
        }

        async fn today_stats(&self) -> ClientResult<OrderStats> {
            self.check()?;
            let state = self.state.lock().unwrap();
            let sum = state.orders.iter().map(|o| o.total).sum();
            Ok(OrderStats::from_totals(state.orders.len() as i64, sum))
        }

        async fn list_orders(&self) -> ClientResult<Vec<Order>> {
            self.check()?;
            Ok(self.state.lock().unwrap().orders.clone())
        }

        async fn create_order(&self, order: &OrderCreate) -> ClientResult<Order> {
            self.check()?;
            let mut state = self.state.lock().unwrap();
            let id = state.orders.len() as i64 + 1;
            let created = Order {
                id,
                order_no: format!("ORD{}", 1_700_000_000_000i64 + id),
                items: order.items.clone(),
                total: order.total,
                payment_method: order.payment_method,
                status: order.status.clone().unwrap_or_default(),
                member_id: order.member_id.clone(),
                created_at: 0,
            };
            state.orders.insert(0, created.clone());
            Ok(created)
        }

        async fn list_users(&self) -> ClientResult<Vec<User>> {
            self.check()?;
            Ok(self.state.lock().unwrap().users.clone())
        }

        async fn set_user_active(&self, id: i64, active: bool) -> ClientResult<Option<User>> {
            self.check()?;
            let mut state = self.state.lock().unwrap();
            Ok(state.users.iter_mut().find(|u| u.id == id).map(|u| {
                u.active = active;
                u.clone()
            }))
        }
    }

    async fn logged_in(username: &str, password: &str) -> Session<MockApi> {
        let mut session = Session::new(MockApi::with_users());
        session.login(username, password).await;
        session
    }

    #[tokio::test]
    async fn login_opens_cashier_with_catalog() {
        let session = logged_in("staff", "123456").await;
        assert_eq!(session.view(), View::Cashier);
        assert_eq!(session.user().unwrap().name, "店员");
        assert_eq!(session.dishes().len(), 2);
        assert_eq!(session.stats().total_orders, 0);
        assert!(session.login_error().is_none());
    }

    #[tokio::test]
    async fn rejected_login_stays_on_login_screen() {
        let session = logged_in("staff", "wrong").await;
        assert_eq!(session.view(), View::Login);
        assert!(session.user().is_none());
        assert_eq!(session.login_error(), Some(MSG_LOGIN_REJECTED));
    }

    #[tokio::test]
    async fn unreachable_server_reports_login_failure() {
        let api = MockApi::with_users();
        api.set_failing(true);
        let mut session = Session::new(api);
        session.login("admin", "admin123").await;
        assert_eq!(session.login_error(), Some(MSG_LOGIN_FAILED));
        assert_eq!(session.view(), View::Login);
    }

    #[tokio::test]
    async fn users_screen_is_admin_only() {
        let mut staff = logged_in("staff", "123456").await;
        assert!(!staff.navigate(View::Users).await);
        assert_eq!(staff.view(), View::Cashier);

        let mut admin = logged_in("admin", "admin123").await;
        assert!(admin.navigate(View::Users).await);
        assert_eq!(admin.view(), View::Users);
        assert_eq!(admin.users().len(), 2);
    }

    #[tokio::test]
    async fn weight_prompt_flow() {
        let mut session = logged_in("staff", "123456").await;
        let mut rng = StdRng::seed_from_u64(1);

        assert!(session.open_weight_prompt(0));
        // 0 g is ignored and the prompt stays open
        assert!(!session.confirm_weight_with("0", &mut rng));
        assert!(matches!(session.modal(), Some(Modal::Weight { .. })));

        assert!(session.confirm_weight_with("200", &mut rng));
        assert!(session.modal().is_none());
        assert_eq!(session.cart().scale_weight(), BASELINE_WEIGHT + 200);
        assert_eq!(session.cart().items()[0].subtotal, 25.6);

        assert!(session.open_weight_prompt(1));
        assert!(session.confirm_weight_with("", &mut rng));
        let weight = session.cart().items()[1].weight;
        assert!((50..=149).contains(&weight));
    }

    #[tokio::test]
    async fn payment_posts_paid_order_and_resets_cart() {
        let mut session = logged_in("staff", "123456").await;
        let mut rng = StdRng::seed_from_u64(2);

        // empty cart: confirm does nothing
        session.choose_payment(PaymentMethod::Wechat);
        assert!(session.confirm_payment().await.is_none());
        assert_eq!(session.api().order_count(), 0);
        session.close_modal();

        session.open_weight_prompt(0);
        session.confirm_weight_with("123", &mut rng);
        session.open_weight_prompt(1);
        session.confirm_weight_with("77", &mut rng);

        session.choose_payment(PaymentMethod::Alipay);
        let order_no = session.confirm_payment().await.unwrap();
        assert!(order_no.starts_with("ORD"));
        assert_eq!(session.last_order_no(), Some(order_no.as_str()));
        assert!(session.cart().is_empty());
        assert_eq!(session.cart().scale_weight(), BASELINE_WEIGHT);
        assert!(session.modal().is_none());
        assert!(matches!(session.notice(), Some(Notice::Info(m)) if m.contains(&order_no)));

        // 12.8×1.23 + 38×0.77 = 15.744 + 29.26 = 45.004
        assert_eq!(session.stats().total_orders, 1);
        assert_eq!(session.stats().total_sales, 45.0);

        session.navigate(View::Orders).await;
        let placed = &session.orders()[0];
        assert_eq!(placed.status, OrderStatus::Paid);
        assert_eq!(placed.payment_method, PaymentMethod::Alipay);
        assert_eq!(placed.items.len(), 2);
    }

    #[tokio::test]
    async fn failed_payment_keeps_cart_and_modal() {
        let mut session = logged_in("staff", "123456").await;
        session.open_weight_prompt(0);
        session.confirm_weight("100");
        session.choose_payment(PaymentMethod::Card);

        session.api().set_failing(true);
        assert!(session.confirm_payment().await.is_none());
        assert_eq!(session.cart().len(), 1);
        assert!(matches!(session.modal(), Some(Modal::Payment { .. })));
        assert_eq!(
            session.notice(),
            Some(&Notice::Error(MSG_ORDER_FAILED.to_string()))
        );
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_lists() {
        let mut session = logged_in("admin", "admin123").await;
        session.api().set_failing(true);
        session.refresh_cashier().await;
        assert_eq!(session.dishes().len(), 2);
        assert!(matches!(session.notice(), Some(Notice::Error(_))));
    }

    #[tokio::test]
    async fn toggling_a_user_twice_restores_it() {
        let mut session = logged_in("admin", "admin123").await;
        session.navigate(View::Users).await;
        let before = session.users()[1].clone();

        assert!(session.toggle_user(1).await);
        assert!(!session.users()[1].active);
        assert!(session.toggle_user(1).await);
        assert_eq!(session.users()[1], before);
    }

    #[tokio::test]
    async fn order_detail_and_logout() {
        let mut session = logged_in("admin", "admin123").await;
        session.open_weight_prompt(0);
        session.confirm_weight("100");
        session.choose_payment(PaymentMethod::Face);
        session.confirm_payment().await;

        session.navigate(View::Orders).await;
        assert!(session.view_order(0));
        assert!(matches!(session.modal(), Some(Modal::OrderDetail(o)) if o.total == 12.8));
        session.close_modal();

        session.navigate(View::Cashier).await;
        session.open_weight_prompt(1);
        session.confirm_weight("50");
        session.suspend();
        session.resume();
        assert_eq!(session.cart().len(), 1);

        session.logout();
        assert_eq!(session.view(), View::Login);
        assert!(session.user().is_none());
        assert!(session.cart().is_empty());
        assert!(!session.navigate(View::Orders).await);
    }
}

//! Keyboard handling for the terminal till

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use pos_client::{HttpClient, Modal, PaymentMethod, Session, View};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;
use tui_logger::{TuiWidgetEvent, TuiWidgetState};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    #[default]
    Username,
    Password,
}

/// 收银台左右两栏
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CashierFocus {
    #[default]
    Dishes,
    Cart,
}

pub struct App {
    pub session: Session<HttpClient>,
    pub username: Input,
    pub password: Input,
    pub login_field: LoginField,
    pub weight_input: Input,
    pub cashier_focus: CashierFocus,
    pub dish_cursor: usize,
    pub cart_cursor: usize,
    pub order_cursor: usize,
    pub user_cursor: usize,
    pub logger_state: TuiWidgetState,
    pub should_quit: bool,
}

fn step(cursor: usize, len: usize, down: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if down {
        (cursor + 1).min(len - 1)
    } else {
        cursor.saturating_sub(1)
    }
}

impl App {
    pub fn new(session: Session<HttpClient>) -> Self {
        Self {
            session,
            username: Input::default(),
            password: Input::default(),
            login_field: LoginField::default(),
            weight_input: Input::default(),
            cashier_focus: CashierFocus::default(),
            dish_cursor: 0,
            cart_cursor: 0,
            order_cursor: 0,
            user_cursor: 0,
            logger_state: TuiWidgetState::new(),
            should_quit: false,
        }
    }

    pub async fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::PageUp => return self.logger_state.transition(TuiWidgetEvent::PrevPageKey),
            KeyCode::PageDown => return self.logger_state.transition(TuiWidgetEvent::NextPageKey),
            _ => {}
        }

        if self.session.view() == View::Login {
            self.handle_login_key(key).await;
        } else if self.session.modal().is_some() {
            self.handle_modal_key(key).await;
        } else {
            self.handle_screen_key(key).await;
        }
        self.clamp_cursors();
    }

    async fn handle_login_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::Up | KeyCode::Down => {
                self.login_field = match self.login_field {
                    LoginField::Username => LoginField::Password,
                    LoginField::Password => LoginField::Username,
                };
            }
            KeyCode::Enter if self.login_field == LoginField::Username => {
                self.login_field = LoginField::Password;
            }
            KeyCode::Enter => {
                let username = self.username.value().trim().to_string();
                let password = self.password.value().to_string();
                self.session.login(&username, &password).await;
                if self.session.view() != View::Login {
                    self.password.reset();
                    self.login_field = LoginField::Username;
                    self.cashier_focus = CashierFocus::Dishes;
                }
            }
            _ => {
                let input = match self.login_field {
                    LoginField::Username => &mut self.username,
                    LoginField::Password => &mut self.password,
                };
                input.handle_event(&Event::Key(key));
            }
        }
    }

    async fn handle_modal_key(&mut self, key: KeyEvent) {
        let modal = self.session.modal().cloned();
        match modal {
            Some(Modal::Weight { .. }) => match key.code {
                KeyCode::Enter => {
                    let value = self.weight_input.value().to_string();
                    if self.session.confirm_weight(&value) {
                        self.weight_input.reset();
                    }
                }
                KeyCode::Esc => {
                    self.session.close_modal();
                    self.weight_input.reset();
                }
                _ => {
                    self.weight_input.handle_event(&Event::Key(key));
                }
            },
            Some(Modal::Payment { .. }) => match key.code {
                KeyCode::Enter | KeyCode::Char('y') => {
                    self.session.confirm_payment().await;
                }
                KeyCode::Esc | KeyCode::Char('n') => self.session.close_modal(),
                _ => {}
            },
            Some(Modal::OrderDetail(_)) => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                    self.session.close_modal();
                }
            }
            None => {}
        }
    }

    async fn handle_screen_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('1') | KeyCode::F(1) => {
                self.session.navigate(View::Cashier).await;
                return;
            }
            KeyCode::Char('2') | KeyCode::F(2) => {
                self.session.navigate(View::Orders).await;
                return;
            }
            KeyCode::Char('3') | KeyCode::F(3) => {
                self.session.navigate(View::Users).await;
                return;
            }
            KeyCode::Char('o') => {
                self.session.logout();
                return;
            }
            KeyCode::Esc => {
                self.session.dismiss_notice();
                return;
            }
            _ => {}
        }

        match self.session.view() {
            View::Cashier => self.handle_cashier_key(key).await,
            View::Orders => match key.code {
                KeyCode::Up | KeyCode::Down => {
                    let len = self.session.orders().len();
                    self.order_cursor = step(self.order_cursor, len, key.code == KeyCode::Down);
                }
                KeyCode::Enter => {
                    self.session.view_order(self.order_cursor);
                }
                KeyCode::Char('g') => self.session.refresh_orders().await,
                _ => {}
            },
            View::Users => match key.code {
                KeyCode::Up | KeyCode::Down => {
                    let len = self.session.users().len();
                    self.user_cursor = step(self.user_cursor, len, key.code == KeyCode::Down);
                }
                KeyCode::Enter | KeyCode::Char(' ') => {
                    self.session.toggle_user(self.user_cursor).await;
                }
                KeyCode::Char('g') => self.session.refresh_users().await,
                _ => {}
            },
            View::Login => {}
        }
    }

    async fn handle_cashier_key(&mut self, key: KeyEvent) {
        let payment = match key.code {
            KeyCode::Char('w') => Some(PaymentMethod::Wechat),
            KeyCode::Char('z') => Some(PaymentMethod::Alipay),
            KeyCode::Char('k') => Some(PaymentMethod::Card),
            KeyCode::Char('f') => Some(PaymentMethod::Face),
            _ => None,
        };
        if let Some(method) = payment {
            self.session.choose_payment(method);
            return;
        }

        match key.code {
            KeyCode::Tab | KeyCode::Left | KeyCode::Right => {
                self.cashier_focus = match self.cashier_focus {
                    CashierFocus::Dishes => CashierFocus::Cart,
                    CashierFocus::Cart => CashierFocus::Dishes,
                };
            }
            KeyCode::Up | KeyCode::Down => {
                let down = key.code == KeyCode::Down;
                match self.cashier_focus {
                    CashierFocus::Dishes => {
                        self.dish_cursor = step(self.dish_cursor, self.session.dishes().len(), down)
                    }
                    CashierFocus::Cart => {
                        self.cart_cursor = step(self.cart_cursor, self.session.cart().len(), down)
                    }
                }
            }
            KeyCode::Enter if self.cashier_focus == CashierFocus::Dishes => {
                self.weight_input.reset();
                self.session.open_weight_prompt(self.dish_cursor);
            }
            KeyCode::Enter | KeyCode::Delete | KeyCode::Char('d')
                if self.cashier_focus == CashierFocus::Cart =>
            {
                self.session.remove_item(self.cart_cursor);
            }
            KeyCode::Char('a') => {
                self.session.quick_add(self.dish_cursor);
            }
            KeyCode::Char('c') => self.session.clear_cart(),
            KeyCode::Char('s') => self.session.suspend(),
            KeyCode::Char('r') => self.session.resume(),
            KeyCode::Char('g') => self.session.refresh_cashier().await,
            _ => {}
        }
    }

    fn clamp_cursors(&mut self) {
        let clamp = |cursor: usize, len: usize| cursor.min(len.saturating_sub(1));
        self.dish_cursor = clamp(self.dish_cursor, self.session.dishes().len());
        self.cart_cursor = clamp(self.cart_cursor, self.session.cart().len());
        self.order_cursor = clamp(self.order_cursor, self.session.orders().len());
        self.user_cursor = clamp(self.user_cursor, self.session.users().len());
    }
}

#[cfg(test)]
mod tests {
    use super::step;

    #[test]
    fn cursor_steps_stay_in_bounds() {
        assert_eq!(step(0, 0, true), 0);
        assert_eq!(step(0, 3, false), 0);
        assert_eq!(step(1, 3, true), 2);
        assert_eq!(step(2, 3, true), 2);
    }
}

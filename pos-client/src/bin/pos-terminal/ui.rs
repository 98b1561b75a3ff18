//! Screen rendering

use pos_client::format::{
    active_label, grams, local_time, money, payment_name, role_label, status_label,
};
use pos_client::{Modal, Notice, View};
use ratatui::{prelude::*, widgets::*};
use tui_input::Input;
use tui_logger::{TuiLoggerLevelOutput, TuiLoggerWidget};

use crate::app::{App, CashierFocus, LoginField};

const BRAND: &str = " 🌶️ 张亮麻辣烫 ";

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(8),    // Screen
            Constraint::Length(3), // Notice / help
            Constraint::Length(7), // Logs
        ])
        .split(f.area());

    draw_header(f, app, chunks[0]);

    match app.session.view() {
        View::Login => draw_login(f, app, chunks[1]),
        View::Cashier => draw_cashier(f, app, chunks[1]),
        View::Orders => draw_orders(f, app, chunks[1]),
        View::Users => draw_users(f, app, chunks[1]),
    }

    draw_footer(f, app, chunks[2]);
    draw_logs(f, app, chunks[3]);

    match app.session.modal() {
        Some(Modal::Weight { dish }) => {
            let title = format!(" {} {} ¥{} ", dish.icon, dish.name, dish.price);
            draw_weight_modal(f, &title, &app.weight_input);
        }
        Some(Modal::Payment { method }) => {
            let text = vec![
                Line::from(Span::styled(
                    money(app.session.cart().total()),
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                )),
                Line::from(payment_name(*method)),
                Line::from(""),
                Line::from(Span::styled(
                    "Enter 确认支付  Esc 取消",
                    Style::default().fg(Color::DarkGray),
                )),
            ];
            draw_modal(f, " 确认支付 ", text, 36, 8);
        }
        Some(Modal::OrderDetail(order)) => {
            let mut text = vec![
                Line::from(format!("订单号：{}", order.order_no)),
                Line::from(format!("下单时间：{}", local_time(order.created_at))),
                Line::from(format!("支付方式：{}", payment_name(order.payment_method))),
                Line::from(format!("订单状态：{}", status_label(&order.status))),
                Line::from(""),
            ];
            for item in &order.items {
                text.push(Line::from(format!(
                    "{} {}  {}  {}",
                    item.dish.icon,
                    item.dish.name,
                    grams(item.weight),
                    money(item.subtotal)
                )));
            }
            text.push(Line::from(""));
            text.push(Line::from(Span::styled(
                format!("合计 {}", money(order.total)),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )));
            let height = text.len() as u16 + 2;
            draw_modal(f, " 订单详情 ", text, 48, height);
        }
        None => {}
    }
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let Some(user) = app.session.user() else {
        let title = Paragraph::new(Line::from(vec![
            Span::styled(BRAND, Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::raw(" 收银系统登录"),
        ]))
        .block(block);
        f.render_widget(title, area);
        return;
    };

    let inner = block.inner(area);
    f.render_widget(block, area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(18),
            Constraint::Min(10),
            Constraint::Length(24),
        ])
        .split(inner);

    f.render_widget(
        Paragraph::new(Span::styled(
            BRAND,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        cols[0],
    );

    let mut titles = vec!["1 收银台", "2 订单管理"];
    if app.session.is_admin() {
        titles.push("3 用户管理");
    }
    let selected = match app.session.view() {
        View::Orders => 1,
        View::Users => 2,
        _ => 0,
    };
    let tabs = Tabs::new(titles)
        .select(selected)
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    f.render_widget(tabs, cols[1]);

    f.render_widget(
        Paragraph::new(format!("{} ({})  o 退出", user.name, role_label(user.role)))
            .alignment(Alignment::Right),
        cols[2],
    );
}

fn input_line<'a>(label: &'a str, input: &'a Input, masked: bool, focused: bool) -> Line<'a> {
    let value = if masked {
        "*".repeat(input.value().chars().count())
    } else {
        input.value().to_string()
    };
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };
    Line::from(vec![Span::raw(label), Span::styled(value, style)])
}

fn draw_login(f: &mut Frame, app: &App, area: Rect) {
    let rect = centered_rect(44, 10, area);
    let block = Block::default()
        .title(BRAND)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let mut lines = vec![
        Line::from(""),
        input_line(
            "用户名: ",
            &app.username,
            false,
            app.login_field == LoginField::Username,
        ),
        input_line(
            "密  码: ",
            &app.password,
            true,
            app.login_field == LoginField::Password,
        ),
        Line::from(""),
    ];
    match app.session.login_error() {
        Some(err) => lines.push(Line::from(Span::styled(err, Style::default().fg(Color::Red)))),
        None => lines.push(Line::from("")),
    }
    lines.push(Line::from(Span::styled(
        "默认账号: zhangliang / 123456",
        Style::default().fg(Color::DarkGray),
    )));

    f.render_widget(Paragraph::new(lines).block(block), rect);

    // Cursor: label is 8 columns wide ("用户名: " is 3 CJK chars + 2)
    let (input, row) = match app.login_field {
        LoginField::Username => (&app.username, 2),
        LoginField::Password => (&app.password, 3),
    };
    f.set_cursor_position((
        rect.x + 1 + 8 + input.visual_cursor() as u16,
        rect.y + row,
    ));
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White).add_modifier(Modifier::DIM)
    }
}

fn draw_cashier(f: &mut Frame, app: &App, area: Rect) {
    let session = &app.session;
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    // 菜品
    let items: Vec<ListItem> = session
        .dishes()
        .iter()
        .map(|d| {
            let style = if d.available {
                Style::default()
            } else {
                Style::default().fg(Color::DarkGray)
            };
            ListItem::new(format!("{} {}  ¥{}", d.icon, d.name, d.price)).style(style)
        })
        .collect();
    let dishes = List::new(items)
        .block(
            Block::default()
                .title(" 菜品 (Enter 称重, a 直接称) ")
                .borders(Borders::ALL)
                .border_style(focus_style(app.cashier_focus == CashierFocus::Dishes)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");
    let mut dish_state = ListState::default().with_selected(Some(app.dish_cursor));
    f.render_stateful_widget(dishes, cols[0], &mut dish_state);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Scale + stats
            Constraint::Min(3),    // Cart
            Constraint::Length(3), // Total
        ])
        .split(cols[1]);

    let stats = session.stats();
    let summary = vec![
        Line::from(vec![
            Span::raw("当前重量 "),
            Span::styled(
                grams(session.cart().scale_weight()),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  电子秤已连接", Style::default().fg(Color::Green)),
        ]),
        Line::from(format!(
            "今日订单 {}  销售额 {}  客单价 {}",
            stats.total_orders,
            money(stats.total_sales),
            money(stats.avg_price)
        )),
    ];
    f.render_widget(
        Paragraph::new(summary).block(Block::default().title(" 🍲 当前称重 ").borders(Borders::ALL)),
        right[0],
    );

    let rows: Vec<Row> = session
        .cart()
        .items()
        .iter()
        .map(|item| {
            Row::new(vec![
                format!("{} {}", item.dish.icon, item.dish.name),
                format!("{} × ¥{}", grams(item.weight), item.dish.price),
                money(item.subtotal),
            ])
        })
        .collect();
    let cart = Table::new(
        rows,
        [
            Constraint::Percentage(40),
            Constraint::Percentage(35),
            Constraint::Percentage(25),
        ],
    )
    .header(Row::new(vec!["菜品", "重量", "小计"]).style(Style::default().fg(Color::Cyan)))
    .block(
        Block::default()
            .title(" 订单 (d 删除, c 清空) ")
            .borders(Borders::ALL)
            .border_style(focus_style(app.cashier_focus == CashierFocus::Cart)),
    )
    .row_highlight_style(Style::default().bg(Color::DarkGray));
    let mut cart_state = TableState::default();
    if app.cashier_focus == CashierFocus::Cart && !session.cart().is_empty() {
        cart_state = cart_state.with_selected(Some(app.cart_cursor));
    }
    f.render_stateful_widget(cart, right[1], &mut cart_state);

    let total = Paragraph::new(Line::from(vec![
        Span::raw("订单合计 "),
        Span::styled(
            money(session.cart().total()),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "   w 微信 z 支付宝 k 刷卡 f 人脸 | s 挂单 r 取单",
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(total, right[2]);
}

fn draw_orders(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" 订单管理 (Enter 查看, g 刷新) ")
        .borders(Borders::ALL);

    let orders = app.session.orders();
    if orders.is_empty() {
        let empty = Paragraph::new("暂无订单")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let rows: Vec<Row> = orders
        .iter()
        .map(|o| {
            Row::new(vec![
                o.order_no.clone(),
                money(o.total),
                payment_name(o.payment_method).to_string(),
                status_label(&o.status),
                local_time(o.created_at),
            ])
        })
        .collect();
    let table = Table::new(
        rows,
        [
            Constraint::Length(18),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Min(19),
        ],
    )
    .header(
        Row::new(vec!["订单号", "金额", "支付方式", "状态", "时间"])
            .style(Style::default().fg(Color::Cyan)),
    )
    .block(block)
    .row_highlight_style(Style::default().bg(Color::DarkGray));
    let mut state = TableState::default().with_selected(Some(app.order_cursor));
    f.render_stateful_widget(table, area, &mut state);
}

fn draw_users(f: &mut Frame, app: &App, area: Rect) {
    let rows: Vec<Row> = app
        .session
        .users()
        .iter()
        .map(|u| {
            let status = Span::styled(
                active_label(u.active),
                Style::default().fg(if u.active { Color::Green } else { Color::Red }),
            );
            Row::new(vec![
                Cell::from(u.id.to_string()),
                Cell::from(u.username.clone()),
                Cell::from(u.name.clone()),
                Cell::from(role_label(u.role)),
                Cell::from(status),
            ])
        })
        .collect();
    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Length(14),
            Constraint::Length(12),
            Constraint::Length(8),
            Constraint::Min(6),
        ],
    )
    .header(
        Row::new(vec!["ID", "用户名", "姓名", "角色", "状态"]).style(Style::default().fg(Color::Cyan)),
    )
    .block(
        Block::default()
            .title(" 用户管理 (Enter 启用/禁用) ")
            .borders(Borders::ALL),
    )
    .row_highlight_style(Style::default().bg(Color::DarkGray));
    let mut state = TableState::default().with_selected(Some(app.user_cursor));
    f.render_stateful_widget(table, area, &mut state);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let line = match app.session.notice() {
        Some(Notice::Info(msg)) => Line::from(Span::styled(
            msg.as_str(),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Some(Notice::Error(msg)) => Line::from(Span::styled(
            msg.as_str(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        None if app.session.view() == View::Login => Line::from(Span::styled(
            "Tab 切换输入  Enter 登录  Esc 退出",
            Style::default().fg(Color::DarkGray),
        )),
        None => Line::from(Span::styled(
            "1/2/3 切换页面  ↑↓ 选择  Tab 切换栏  PgUp/PgDn 日志  q 退出",
            Style::default().fg(Color::DarkGray),
        )),
    };
    f.render_widget(
        Paragraph::new(line).block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn draw_logs(f: &mut Frame, app: &App, area: Rect) {
    let logs = TuiLoggerWidget::default()
        .block(
            Block::default()
                .title(" Logs ")
                .border_style(Style::default().fg(Color::White).add_modifier(Modifier::DIM))
                .borders(Borders::ALL),
        )
        .output_separator('|')
        .output_timestamp(Some("%H:%M:%S".to_string()))
        .output_level(Some(TuiLoggerLevelOutput::Abbreviated))
        .output_target(false)
        .output_file(false)
        .output_line(false)
        .style(Style::default().fg(Color::White))
        .state(&app.logger_state);
    f.render_widget(logs, area);
}

fn draw_weight_modal(f: &mut Frame, title: &str, input: &Input) {
    let rect = centered_rect(40, 6, f.area());
    f.render_widget(Clear, rect);
    let text = vec![
        Line::from(vec![
            Span::raw("重量(g): "),
            Span::styled(input.value(), Style::default().fg(Color::Yellow)),
        ]),
        Line::from(Span::styled(
            "不填则随机生成  Enter 确认  Esc 取消",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    f.render_widget(Paragraph::new(text).block(block), rect);
    f.set_cursor_position((rect.x + 1 + 9 + input.visual_cursor() as u16, rect.y + 1));
}

fn draw_modal(f: &mut Frame, title: &str, text: Vec<Line>, width: u16, height: u16) {
    let rect = centered_rect(width, height, f.area());
    f.render_widget(Clear, rect);
    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    f.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: false }),
        rect,
    );
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::centered_rect;
    use ratatui::layout::Rect;

    #[test]
    fn centered_rect_fits_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered_rect(40, 10, area), Rect::new(30, 15, 40, 10));
        let small = Rect::new(5, 5, 20, 4);
        assert_eq!(centered_rect(40, 10, small), small);
    }
}

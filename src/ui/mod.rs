use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap};
use ratatui::Frame;

pub mod layout;
pub mod widgets;

use crate::app::{App, ConfirmButton, InputMode, Overlay, Screen};
use crate::config;
use crate::core::NotifyLevel;
use crate::domain::{ConfirmDialog, SelectionKey};
use layout::centered_rect;

pub fn draw(f: &mut Frame, app: &App) {
    let areas = layout::areas(f.size());

    draw_header(f, areas.header, app);
    draw_tab_bar(f, areas.tabs, app);
    match app.active_module() {
        Some(module) => module.render(f, areas.main, &app.ctx),
        None => draw_signed_out(f, areas.main, app),
    }
    draw_status_line(f, areas.status_line, app);
    draw_command_line(f, areas.command_line, app);

    for overlay in &app.overlays {
        match overlay {
            Overlay::Alert { title, body } => draw_alert(f, areas.size, title, body),
            Overlay::Confirm { pending, focus } => {
                draw_confirm(f, areas.size, pending.dialog(), *focus)
            }
            Overlay::Modal => draw_modal(f, areas.size),
            Overlay::Help => draw_help_popup(f, areas.size, app),
            Overlay::Settings => draw_settings_popup(f, areas.size, app),
        }
    }
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let session = if app.is_signed_in() {
        Span::styled(
            format!("● {}", app.ctx.username),
            Style::default().fg(Color::Green),
        )
    } else {
        Span::styled("○ signed out", Style::default().fg(Color::DarkGray))
    };
    let line = Line::from(vec![
        Span::styled(
            " showcase ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        session,
    ]);
    f.render_widget(Paragraph::new(line), area);
}

/// Draw the screen tab bar
fn draw_tab_bar(f: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<Line> = Screen::ALL
        .iter()
        .map(|screen| {
            Line::from(vec![
                Span::styled(
                    format!("{}:", screen.shortcut()),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(screen.label()),
            ])
        })
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.screens.index())
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .divider(" │ ");

    f.render_widget(tabs, area);
}

fn draw_signed_out(f: &mut Frame, area: Rect, app: &App) {
    let lines = vec![
        Line::from(Span::styled(
            "Signed out",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Press Enter to sign back in as {}", app.ctx.username)),
    ];
    let paragraph = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Dashboard"));
    f.render_widget(paragraph, centered_rect(50, 30, area));
}

fn level_color(level: NotifyLevel) -> Color {
    match level {
        NotifyLevel::Info => Color::Green,
        NotifyLevel::Warn => Color::Yellow,
        NotifyLevel::Error => Color::Red,
    }
}

fn draw_status_line(f: &mut Frame, area: Rect, app: &App) {
    let line = match app.status_text() {
        Some((text, level)) => Line::from(Span::styled(
            text.to_string(),
            Style::default().fg(level_color(level)),
        )),
        None => Line::from(vec![
            Span::styled("Screen ", Style::default().fg(Color::DarkGray)),
            Span::raw(format!("{}  ", app.active_screen().label())),
            Span::styled(
                "Tab/F1-F3 switch  : command  s settings  ? help  q quit",
                Style::default().fg(Color::DarkGray),
            ),
        ]),
    };

    let paragraph = Paragraph::new(line)
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Left);
    f.render_widget(paragraph, area);
}

fn command_hint(input: &str) -> Option<&'static str> {
    let head = input.split_whitespace().next()?;
    let hint = match head.to_lowercase().as_str() {
        "screen" | "go" => "screen <fundamentals|gallery|dashboard>",
        "tab" | "section" => "tab <basics|input|lists|advanced>",
        "reload" => "reload [n]  (all images, or image n)",
        "refresh" | "r" => "refresh dashboard data",
        "signout" | "logout" => "sign out of the dashboard",
        "signin" | "login" => "sign back in",
        "settings" | "set" => "show settings",
        "help" | "h" => "show help",
        "quit" | "q" => "quit",
        _ => return None,
    };
    Some(hint)
}

fn draw_command_line(f: &mut Frame, area: Rect, app: &App) {
    let line = match app.input_mode {
        InputMode::Command => {
            let mut spans = vec![
                Span::styled(":", Style::default().fg(Color::Cyan)),
                Span::raw(app.command.input.clone()),
                Span::styled("▏", Style::default().fg(Color::Cyan)),
            ];
            if let Some(hint) = command_hint(&app.command.input) {
                spans.push(Span::styled(
                    format!("   {hint}"),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            Line::from(spans)
        }
        InputMode::Normal => match app.command.last.as_deref() {
            Some(last) => Line::from(Span::styled(
                format!(":{last}"),
                Style::default().fg(Color::DarkGray),
            )),
            None => Line::from(""),
        },
    };
    f.render_widget(Paragraph::new(line), area);
}

fn draw_alert(f: &mut Frame, area: Rect, title: &str, body: &str) {
    let popup_area = centered_rect(50, 30, area);
    f.render_widget(Clear, popup_area);

    let mut lines: Vec<Line> = body.lines().map(|l| Line::from(l.to_string())).collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[ OK ]",
        Style::default().fg(Color::Black).bg(Color::Cyan),
    )));

    let paragraph = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .title(Span::styled(
                    title.to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                ))
                .borders(Borders::ALL),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, popup_area);
}

fn draw_confirm(f: &mut Frame, area: Rect, dialog: &ConfirmDialog, focus: ConfirmButton) {
    let popup_area = centered_rect(56, 34, area);
    f.render_widget(Clear, popup_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .margin(1)
        .split(popup_area);

    let block = Block::default()
        .title(Span::styled(
            dialog.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL);
    f.render_widget(block, popup_area);

    let body: Vec<Line> = dialog
        .body
        .lines()
        .map(|l| Line::from(l.to_string()))
        .collect();
    f.render_widget(
        Paragraph::new(Text::from(body))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        chunks[0],
    );

    let confirm_color = if dialog.destructive {
        Color::Red
    } else {
        Color::Cyan
    };
    let button = |label: &str, focused: bool, color: Color| {
        let style = if focused {
            Style::default().fg(Color::Black).bg(color)
        } else {
            Style::default().fg(color)
        };
        Span::styled(format!("[ {label} ]"), style)
    };
    let buttons = Line::from(vec![
        button(
            &dialog.cancel_label,
            focus == ConfirmButton::Cancel,
            Color::White,
        ),
        Span::raw("   "),
        button(
            &dialog.confirm_label,
            focus == ConfirmButton::Confirm,
            confirm_color,
        ),
    ]);
    f.render_widget(
        Paragraph::new(buttons).alignment(Alignment::Center),
        chunks[1],
    );
}

fn draw_modal(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(44, 30, area);
    f.render_widget(Clear, popup_area);

    let lines = vec![
        Line::from(Span::styled(
            "Modal Example",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("This is a modal dialog!"),
        Line::from(""),
        Line::from(Span::styled(
            "[ Close Modal ]",
            Style::default().fg(Color::Black).bg(Color::Cyan),
        )),
    ];
    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
    f.render_widget(paragraph, popup_area);
}

fn draw_help_popup(f: &mut Frame, area: Rect, app: &App) {
    let popup_area = centered_rect(72, 70, area);
    f.render_widget(Clear, popup_area);

    let lines = vec![
        Line::from("Navigation"),
        Line::from("  Tab / S-Tab Next / previous screen"),
        Line::from("  F1-F3      Jump to screen"),
        Line::from("  ←/→ [ ]    Previous / next section (Fundamentals)"),
        Line::from("  1-4        Jump to section (Fundamentals)"),
        Line::from("  ↑/↓ j/k    Move focus / selection"),
        Line::from("  Enter      Activate / open"),
        Line::from("  Esc        Back / close"),
        Line::from(""),
        Line::from("Actions"),
        Line::from("  L          Long press (Custom Touchable)"),
        Line::from("  r          Reload image (Gallery) / refresh (Dashboard)"),
        Line::from("  R          Reload all images"),
        Line::from("  x / X      Sign out / account sheet (Dashboard)"),
        Line::from("  s          Settings"),
        Line::from("  :          Command bar"),
        Line::from("  ?          Toggle help"),
        Line::from("  q          Quit"),
        Line::from(""),
        Line::from("Commands"),
        Line::from("  :screen gallery   :tab lists   :reload 2   :refresh"),
        Line::from("  :signout   :signin   :settings   :quit"),
        Line::from(""),
        Line::from(format!("Active screen: {}", app.active_screen().label())),
    ];

    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().title("Help").borders(Borders::ALL))
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, popup_area);
}

const RESTART_NOTE: &str =
    "Paths show what is in use. Latency, failure, asset and log settings apply on restart.";

fn draw_settings_popup(f: &mut Frame, area: Rect, app: &App) {
    let popup_area = centered_rect(70, 60, area);
    f.render_widget(Clear, popup_area);

    let label = Style::default().fg(Color::DarkGray);
    let path_or_none = |path: Option<std::path::PathBuf>| {
        path.map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none)".to_string())
    };
    let cfg = &app.config;
    let row = |name: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{name:<14}"), label),
            Span::raw(value),
        ])
    };

    let launched = &app.launched;

    let lines = vec![
        row("Config", path_or_none(config::config_path())),
        row("Log file", path_or_none(launched.log_path())),
        row("Assets", launched.asset_root().display().to_string()),
        Line::from(""),
        row("User", cfg.username.clone()),
        row("Latency", format!("{} ms", cfg.fetch_latency_ms)),
        row("Fail fetches", cfg.fail_fetches.to_string()),
        row("Loading demo", format!("{} ms", cfg.loading_demo_ms)),
        row("Images", cfg.images.len().to_string()),
        row("Log level", cfg.log_level.clone()),
        Line::from(""),
        Line::from(Span::styled(RESTART_NOTE, label)),
        Line::from(Span::styled("r reload config  Esc close", label)),
    ];

    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().title("Settings").borders(Borders::ALL))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, popup_area);
}

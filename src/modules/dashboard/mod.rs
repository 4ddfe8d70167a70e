//! Dashboard module - greeting header, refreshable overview cards, recent activity

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::core::{Action, Context, Module, SignOutStyle};
use crate::domain::{DashboardItem, FetchError, LoadTicket, RefreshableCollection, Settlement};
use crate::ui::widgets::{hex_color, Spinner};

const COLUMNS: usize = 2;
const ACCENT: &str = "#007AFF";

pub const RECENT_ACTIVITY: [(&str, &str); 3] = [
    ("New order received", "2 minutes ago"),
    ("User registration completed", "15 minutes ago"),
    ("Payment processed", "1 hour ago"),
];

pub const QUICK_ACTIONS: [&str; 3] = ["Create Report", "View Analytics", "Manage Users"];

/// The mounted dashboard. Dropped on sign-out; a new one gets a new `mount`.
pub struct DashboardScreen {
    mount: u64,
    collection: RefreshableCollection,
    selected: usize,
}

impl DashboardScreen {
    pub fn new(mount: u64) -> Self {
        Self {
            mount,
            collection: RefreshableCollection::new(),
            selected: 0,
        }
    }

    pub fn mount(&self) -> u64 {
        self.mount
    }

    pub fn collection(&self) -> &RefreshableCollection {
        &self.collection
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_item(&self) -> Option<DashboardItem> {
        self.collection.item(self.selected)
    }

    /// Start a load; `None` when one is already running
    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        self.collection.begin_load()
    }

    pub fn settle(
        &mut self,
        ticket: LoadTicket,
        outcome: Result<Vec<DashboardItem>, FetchError>,
    ) -> Settlement {
        let settlement = self.collection.settle(ticket, outcome);
        let len = self.collection.len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
        settlement
    }

    pub fn abandon(&mut self, ticket: LoadTicket) -> bool {
        self.collection.abandon(ticket)
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.collection.len();
        if len == 0 {
            return;
        }
        let next = self.selected as isize + delta;
        if (0..len as isize).contains(&next) {
            self.selected = next as usize;
        }
    }

    fn card_alert(&self) -> Action {
        match self.selected_item() {
            Some(item) => Action::Alert {
                title: item.title.clone(),
                body: format!("Value: {}\n{}", item.value, item.description),
            },
            None => Action::None,
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, ctx: &Context) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(16)])
            .split(area);

        let greeting = vec![
            Line::from(Span::styled(
                "Welcome back,",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(Span::styled(
                format!("{}!", ctx.username),
                Style::default().add_modifier(Modifier::BOLD),
            )),
        ];
        frame.render_widget(Paragraph::new(greeting), chunks[0]);

        let button = Paragraph::new(Line::from(Span::styled(
            " Sign Out (x) ",
            Style::default().fg(Color::White).bg(Color::Red),
        )));
        frame.render_widget(button, chunks[1]);
    }

    fn render_cards(&self, frame: &mut Frame, area: Rect, ctx: &Context) {
        let snapshot = self.collection.snapshot();
        let mut title = vec![Span::styled(
            "Dashboard Overview",
            Style::default().add_modifier(Modifier::BOLD),
        )];
        if let Some(loaded_at) = snapshot.loaded_at {
            title.push(Span::styled(
                format!("  updated {}", loaded_at.format("%H:%M:%S")),
                Style::default().fg(Color::DarkGray),
            ));
        }
        let block = Block::default().borders(Borders::ALL).title(Line::from(title));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.height == 0 {
            return;
        }

        let body = if snapshot.is_refreshing {
            let status = Rect::new(inner.x, inner.y, inner.width, 1);
            let spinner = Spinner::new(ctx.tick)
                .label("Refreshing...")
                .style(Style::default().fg(hex_color(ACCENT)));
            frame.render_widget(spinner, status);
            Rect::new(
                inner.x,
                inner.y + 1,
                inner.width,
                inner.height.saturating_sub(1),
            )
        } else {
            inner
        };

        if snapshot.items.is_empty() {
            if !snapshot.is_refreshing {
                let hint = if snapshot.last_error.is_some() {
                    "No data. Press r to retry."
                } else {
                    "No data yet."
                };
                frame.render_widget(
                    Paragraph::new(Span::styled(hint, Style::default().fg(Color::DarkGray))),
                    body,
                );
            }
            return;
        }

        let rows = snapshot.items.len().div_ceil(COLUMNS);
        let row_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                std::iter::repeat(Constraint::Length(5))
                    .take(rows)
                    .chain(std::iter::once(Constraint::Min(0)))
                    .collect::<Vec<_>>(),
            )
            .split(body);

        for (row, chunk) in snapshot.items.chunks(COLUMNS).enumerate() {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(row_areas[row]);
            for (col, item) in chunk.iter().enumerate() {
                let index = row * COLUMNS + col;
                self.render_card(frame, cols[col], item, index == self.selected);
            }
        }
    }

    fn render_card(&self, frame: &mut Frame, area: Rect, item: &DashboardItem, selected: bool) {
        let accent = hex_color(&item.color);
        let border = if selected {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let lines = vec![
            Line::from(Span::styled(
                item.value.clone(),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            )),
            Line::from(item.title.clone()),
            Line::from(Span::styled(
                item.description.clone(),
                Style::default().fg(Color::DarkGray),
            )),
        ];
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(Span::styled("▌", Style::default().fg(accent)));
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_activity(&self, frame: &mut Frame, area: Rect) {
        let mut lines: Vec<Line> = RECENT_ACTIVITY
            .iter()
            .flat_map(|(title, when)| {
                [
                    Line::from(vec![
                        Span::styled("● ", Style::default().fg(hex_color(ACCENT))),
                        Span::raw(*title),
                    ]),
                    Line::from(Span::styled(
                        format!("  {when}"),
                        Style::default().fg(Color::DarkGray),
                    )),
                ]
            })
            .collect();
        lines.push(Line::from(""));
        lines.push(Line::from(
            QUICK_ACTIONS
                .iter()
                .flat_map(|label| [Span::raw(format!("[ {label} ]")), Span::raw(" ")])
                .collect::<Vec<_>>(),
        ));

        let block = Block::default()
            .borders(Borders::ALL)
            .title("Recent Activity");
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

impl Module for DashboardScreen {
    fn id(&self) -> &'static str {
        "dashboard"
    }

    fn handle_key(&mut self, key: KeyEvent, _ctx: &mut Context) -> Action {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.move_selection(-1);
                Action::None
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.move_selection(1);
                Action::None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_selection(-(COLUMNS as isize));
                Action::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_selection(COLUMNS as isize);
                Action::None
            }
            KeyCode::Enter => self.card_alert(),
            KeyCode::Char('r') => Action::Refresh,
            KeyCode::Char('x') => Action::PresentSignOut(SignOutStyle::Inline),
            KeyCode::Char('X') => Action::PresentSignOut(SignOutStyle::Sheet),
            _ => Action::None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, ctx: &Context) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(8),
                Constraint::Length(10),
            ])
            .split(area);

        self.render_header(frame, chunks[0], ctx);
        self.render_cards(frame, chunks[1], ctx);
        self.render_activity(frame, chunks[2]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ActionQueue;
    use crossterm::event::KeyModifiers;

    fn items() -> Vec<DashboardItem> {
        (1..=4)
            .map(|i| {
                DashboardItem::new(
                    i.to_string(),
                    format!("Card {i}"),
                    "desc",
                    format!("{i}"),
                    "#4CAF50",
                )
            })
            .collect()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_grid_navigation_clamps() {
        let (queue, _rx) = ActionQueue::new();
        let mut ctx = Context::new("demo", queue);
        let mut screen = DashboardScreen::new(1);
        let ticket = screen.begin_load().unwrap();
        screen.settle(ticket, Ok(items()));

        screen.handle_key(key(KeyCode::Down), &mut ctx);
        assert_eq!(screen.selected(), 2);
        screen.handle_key(key(KeyCode::Right), &mut ctx);
        assert_eq!(screen.selected(), 3);
        screen.handle_key(key(KeyCode::Down), &mut ctx);
        assert_eq!(screen.selected(), 3);
        screen.handle_key(key(KeyCode::Up), &mut ctx);
        assert_eq!(screen.selected(), 1);
    }

    #[test]
    fn test_enter_raises_card_alert() {
        let (queue, _rx) = ActionQueue::new();
        let mut ctx = Context::new("demo", queue);
        let mut screen = DashboardScreen::new(1);
        assert!(matches!(
            screen.handle_key(key(KeyCode::Enter), &mut ctx),
            Action::None
        ));

        let ticket = screen.begin_load().unwrap();
        screen.settle(ticket, Ok(items()));
        match screen.handle_key(key(KeyCode::Enter), &mut ctx) {
            Action::Alert { title, body } => {
                assert_eq!(title, "Card 1");
                assert_eq!(body, "Value: 1\ndesc");
            }
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn test_selection_clamped_after_smaller_batch() {
        let mut screen = DashboardScreen::new(1);
        let ticket = screen.begin_load().unwrap();
        screen.settle(ticket, Ok(items()));
        screen.selected = 3;
        let ticket = screen.begin_load().unwrap();
        screen.settle(ticket, Ok(items().into_iter().take(2).collect()));
        assert_eq!(screen.selected(), 1);
    }
}

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs, Wrap};
use ratatui::Frame;

use super::content::{Card, Element, Section, TextStyle};
use super::Fundamentals;
use crate::core::{Context, Module};
use crate::domain::SelectionKey;
use crate::ui::widgets::{hex_color, spinner_frame};

const ACCENT: &str = "#007AFF";

pub(super) fn draw(frame: &mut Frame, area: Rect, screen: &Fundamentals, ctx: &Context) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // title + subtitle
            Constraint::Length(1), // section tabs
            Constraint::Min(4),    // cards
            Constraint::Length(1), // footer
        ])
        .split(area);

    let header = vec![
        Line::from(Span::styled(
            "Fundamentals",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Essential concepts and components",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(header), chunks[0]);

    let titles: Vec<Line> = Section::ALL
        .iter()
        .enumerate()
        .map(|(i, section)| {
            Line::from(vec![
                Span::styled(format!("{}:", i + 1), Style::default().fg(Color::DarkGray)),
                Span::raw(section.label()),
            ])
        })
        .collect();
    let tabs = Tabs::new(titles)
        .select(Section::ALL.iter().position(|s| *s == screen.active_section()).unwrap_or(0))
        .style(Style::default().fg(Color::White))
        .highlight_style(Style::default().fg(hex_color(ACCENT)).add_modifier(Modifier::BOLD))
        .divider(" │ ");
    frame.render_widget(tabs, chunks[1]);

    let view = screen.current_view();
    draw_cards(frame, chunks[2], view.title, &view.cards, ctx.tick);

    let hint = if screen.captures_input() {
        "Typing - Enter/Esc to finish"
    } else {
        "←/→ section  ↑/↓ focus  Enter activate  L long press"
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            hint,
            Style::default().fg(Color::DarkGray),
        ))),
        chunks[3],
    );
}

fn draw_cards(frame: &mut Frame, area: Rect, title: &str, cards: &[Card], tick: u64) {
    let outer = Block::default()
        .borders(Borders::ALL)
        .title(title.to_string())
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let rendered: Vec<(&Card, Vec<Line<'static>>)> = cards
        .iter()
        .map(|card| {
            let lines = card
                .elements
                .iter()
                .flat_map(|element| element_lines(element, tick))
                .collect();
            (card, lines)
        })
        .collect();

    let mut constraints: Vec<Constraint> = rendered
        .iter()
        .map(|(_, lines)| Constraint::Length(lines.len() as u16 + 2))
        .collect();
    constraints.push(Constraint::Min(0));

    let slots = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for ((card, lines), slot) in rendered.into_iter().zip(slots.iter()) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(
                card.title,
                Style::default().add_modifier(Modifier::BOLD),
            ));
        frame.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
            *slot,
        );
    }
}

fn focus_marker(focused: bool) -> Span<'static> {
    if focused {
        Span::styled("› ", Style::default().fg(hex_color(ACCENT)))
    } else {
        Span::raw("  ")
    }
}

fn element_lines(element: &Element, tick: u64) -> Vec<Line<'static>> {
    let dim = Style::default().fg(Color::DarkGray);
    match element {
        Element::Text(text) => vec![Line::from(text.clone())],
        Element::Styled(text, style) => {
            let style = match style {
                TextStyle::Normal => Style::default(),
                TextStyle::Bold => Style::default().add_modifier(Modifier::BOLD),
                TextStyle::Italic => Style::default().add_modifier(Modifier::ITALIC),
                TextStyle::Colored => Style::default().fg(hex_color(ACCENT)),
            };
            vec![Line::from(Span::styled(*text, style))]
        }
        Element::Swatch { label, color } => vec![Line::from(vec![
            Span::styled("██████ ", Style::default().fg(hex_color(color))),
            Span::raw(*label),
        ])],
        Element::Image { source, caption } => vec![
            Line::from(vec![Span::raw("▣ "), Span::raw(*caption)]),
            Line::from(Span::styled(format!("  {source}"), dim)),
        ],
        Element::ListRow { title, description } => vec![Line::from(vec![
            Span::styled(*title, Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(format!("  {description}"), dim),
        ])],
        Element::Heading(heading) => vec![Line::from(Span::styled(
            *heading,
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        ))],
        Element::Entry(entry) => vec![Line::from(format!("  {entry}"))],
        Element::Field {
            placeholder,
            value,
            focused,
            editing,
        } => {
            let body = if value.is_empty() && !editing {
                Span::styled(*placeholder, dim)
            } else {
                Span::raw(value.clone())
            };
            let mut spans = vec![focus_marker(*focused), Span::raw("[ "), body];
            if *editing {
                spans.push(Span::styled("▏", Style::default().fg(hex_color(ACCENT))));
            }
            spans.push(Span::raw(" ]"));
            vec![Line::from(spans)]
        }
        Element::Button {
            label,
            focused,
            busy,
        } => {
            let button = if *busy {
                Span::styled(format!("[ {} {label} ]", spinner_frame(tick)), dim)
            } else if *focused {
                Span::styled(
                    format!("[ {label} ]"),
                    Style::default()
                        .fg(Color::Black)
                        .bg(hex_color(ACCENT)),
                )
            } else {
                Span::styled(format!("[ {label} ]"), Style::default().fg(hex_color(ACCENT)))
            };
            vec![Line::from(vec![focus_marker(*focused), button])]
        }
        Element::Toggle { label, on, focused } => {
            let knob = if *on {
                Span::styled("[ ●]", Style::default().fg(Color::Green))
            } else {
                Span::styled("[○ ]", dim)
            };
            vec![Line::from(vec![
                focus_marker(*focused),
                Span::raw(format!("{label}  ")),
                knob,
            ])]
        }
    }
}

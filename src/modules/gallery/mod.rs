//! Image gallery - one load-state controller per configured image

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use tracing::debug;

use crate::config::ImageEntry;
use crate::core::{Action, Context, Module};
use crate::domain::{ImageEvent, ImageLoadController, ImageSource};
use crate::ui::widgets::Spinner;

const SLOT_HEIGHT: u16 = 6;
const PLACEHOLDER: &str = "Image Placeholder";

/// A configured image and the controller tracking its current attempt
pub struct ImageSlot {
    entry: ImageEntry,
    source: ImageSource,
    controller: ImageLoadController,
    attempt: u64,
}

impl ImageSlot {
    fn new(entry: ImageEntry) -> Self {
        let source = entry.image_source();
        let controller = ImageLoadController::new(entry.title.clone());
        Self {
            entry,
            source,
            controller,
            attempt: 0,
        }
    }

    pub fn title(&self) -> &str {
        &self.entry.title
    }

    pub fn description(&self) -> &str {
        &self.entry.description
    }

    pub fn source(&self) -> &ImageSource {
        &self.source
    }

    pub fn controller(&self) -> &ImageLoadController {
        &self.controller
    }

    pub fn attempt(&self) -> u64 {
        self.attempt
    }
}

/// Work order for the runtime: load `source` and tag the signals with `slot`/`attempt`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub slot: usize,
    pub attempt: u64,
    pub source: ImageSource,
}

pub struct Gallery {
    slots: Vec<ImageSlot>,
    selected: usize,
}

impl Gallery {
    pub fn new(entries: &[ImageEntry]) -> Self {
        Self {
            slots: entries.iter().cloned().map(ImageSlot::new).collect(),
            selected: 0,
        }
    }

    pub fn slots(&self) -> &[ImageSlot] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&ImageSlot> {
        self.slots.get(index)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Start a new attempt for one slot (or all of them).
    ///
    /// Each slot goes back to Loading immediately; signals carrying an older
    /// attempt number are dropped from then on.
    pub fn begin_reload(&mut self, target: Option<usize>) -> Vec<ImageRequest> {
        let indices: Vec<usize> = match target {
            Some(index) if index < self.slots.len() => vec![index],
            Some(index) => {
                debug!(index, "reload of unknown image slot ignored");
                Vec::new()
            }
            None => (0..self.slots.len()).collect(),
        };

        indices
            .into_iter()
            .map(|index| {
                let slot = &mut self.slots[index];
                slot.attempt += 1;
                slot.controller.reload();
                ImageRequest {
                    slot: index,
                    attempt: slot.attempt,
                    source: slot.source.clone(),
                }
            })
            .collect()
    }

    /// Route a load signal to its slot. Returns whether the signal was accepted;
    /// a restart while already loading is accepted without changing anything.
    pub fn apply_signal(&mut self, slot: usize, attempt: u64, event: ImageEvent) -> bool {
        let Some(target) = self.slots.get_mut(slot) else {
            debug!(slot, "signal for unknown image slot");
            return false;
        };
        if target.attempt != attempt {
            debug!(
                slot,
                attempt,
                current = target.attempt,
                "signal from superseded attempt dropped"
            );
            return false;
        }
        target.controller.handle(event)
    }

    fn select_next(&mut self) {
        if !self.slots.is_empty() {
            self.selected = (self.selected + 1).min(self.slots.len() - 1);
        }
    }

    fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn slot_lines(&self, slot: &ImageSlot) -> Vec<Line<'static>> {
        let dim = Style::default().fg(Color::DarkGray);
        let state = slot.controller.snapshot();
        let presentation = state.presentation();
        let mut lines = Vec::new();

        if presentation.show_indicator {
            // spinner row
            lines.push(Line::from(""));
        }
        if presentation.show_image {
            lines.push(Line::from(vec![
                Span::styled("▣ ", Style::default().fg(Color::Green)),
                Span::raw(slot.source.to_string()),
            ]));
            lines.push(Line::from(Span::styled(
                format!("✓ {} loaded", slot.entry.title),
                Style::default().fg(Color::Green),
            )));
        }
        if presentation.show_error {
            let red = Style::default().fg(Color::Red);
            lines.push(Line::from(vec![
                Span::styled("▢ ", dim),
                Span::styled(PLACEHOLDER, dim),
            ]));
            let mut error = vec![Span::styled(
                "Failed to load image",
                red.add_modifier(Modifier::BOLD),
            )];
            if let Some(failure) = state.failure() {
                error.push(Span::styled(format!(": {failure}"), red));
            }
            lines.push(Line::from(error));
        }
        if !slot.entry.description.is_empty() {
            lines.push(Line::from(Span::styled(slot.entry.description.clone(), dim)));
        }
        lines
    }
}

impl Module for Gallery {
    fn id(&self) -> &'static str {
        "gallery"
    }

    fn handle_key(&mut self, key: KeyEvent, _ctx: &mut Context) -> Action {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                Action::None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_prev();
                Action::None
            }
            KeyCode::Char('r') if !self.slots.is_empty() => {
                Action::ReloadImages(Some(self.selected))
            }
            KeyCode::Char('R') => Action::ReloadImages(None),
            _ => Action::None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, ctx: &Context) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(area);

        let header = vec![
            Line::from(Span::styled(
                "Image Component Demo",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "r reload selected  R reload all",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        frame.render_widget(Paragraph::new(header), chunks[0]);

        let visible = (chunks[1].height / SLOT_HEIGHT).max(1) as usize;
        let first = self.selected.saturating_sub(visible - 1);
        let shown: Vec<(usize, &ImageSlot)> =
            self.slots.iter().enumerate().skip(first).take(visible).collect();

        let mut constraints = vec![Constraint::Length(SLOT_HEIGHT); shown.len()];
        constraints.push(Constraint::Min(0));
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(chunks[1]);

        for ((index, slot), row) in shown.into_iter().zip(rows.iter()) {
            let border = if index == self.selected {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let block = Block::default()
                .borders(Borders::ALL)
                .title(slot.entry.title.clone())
                .border_style(border);
            let inner = block.inner(*row);
            frame.render_widget(block, *row);

            frame.render_widget(
                Paragraph::new(self.slot_lines(slot)).wrap(Wrap { trim: true }),
                inner,
            );
            if slot.controller.presentation().show_indicator && inner.height > 0 {
                let line = Rect::new(inner.x, inner.y, inner.width, 1);
                frame.render_widget(Spinner::new(ctx.tick).label("Loading..."), line);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LoadPhase;

    fn entries() -> Vec<ImageEntry> {
        vec![
            ImageEntry {
                title: "Remote".into(),
                source: "https://example.com/a.png".into(),
                description: String::new(),
            },
            ImageEntry {
                title: "Local".into(),
                source: "logo.png".into(),
                description: "bundled".into(),
            },
        ]
    }

    #[test]
    fn test_begin_reload_all_bumps_attempts() {
        let mut gallery = Gallery::new(&entries());
        let requests = gallery.begin_reload(None);
        assert_eq!(requests.len(), 2);
        assert!(requests.iter().all(|r| r.attempt == 1));
        assert!(requests[0].source.is_remote());
    }

    #[test]
    fn test_stale_attempt_is_dropped() {
        let mut gallery = Gallery::new(&entries());
        gallery.begin_reload(Some(0));
        gallery.begin_reload(Some(0));

        assert!(!gallery.apply_signal(0, 1, ImageEvent::LoadSucceeded));
        assert_eq!(gallery.slot(0).unwrap().controller().phase(), LoadPhase::Loading);

        assert!(gallery.apply_signal(0, 2, ImageEvent::LoadFailed("HTTP 404".into())));
        assert_eq!(gallery.slot(0).unwrap().controller().phase(), LoadPhase::Failed);
    }

    #[test]
    fn test_reload_unknown_slot_is_noop() {
        let mut gallery = Gallery::new(&entries());
        assert!(gallery.begin_reload(Some(9)).is_empty());
        assert!(!gallery.apply_signal(9, 1, ImageEvent::LoadSucceeded));
    }

    #[test]
    fn test_reload_after_failure_returns_to_loading() {
        let mut gallery = Gallery::new(&entries());
        gallery.begin_reload(Some(1));
        gallery.apply_signal(1, 1, ImageEvent::LoadFailed("missing".into()));
        gallery.begin_reload(Some(1));
        let slot = gallery.slot(1).unwrap();
        assert_eq!(slot.controller().phase(), LoadPhase::Loading);
        assert_eq!(slot.controller().last_error(), None);
    }

    #[test]
    fn test_restart_while_loading_is_accepted_without_change() {
        let mut gallery = Gallery::new(&entries());
        gallery.begin_reload(Some(0));
        let before = gallery.slot(0).unwrap().controller().snapshot();
        assert!(gallery.apply_signal(0, 1, ImageEvent::LoadStarted));
        assert_eq!(gallery.slot(0).unwrap().controller().snapshot(), before);
    }

    fn rendered(gallery: &Gallery) -> String {
        use crate::core::ActionQueue;
        use ratatui::backend::TestBackend;
        use ratatui::Terminal;

        let (queue, _rx) = ActionQueue::new();
        let ctx = Context::new("demo", queue);
        let mut terminal = Terminal::new(TestBackend::new(60, 14)).unwrap();
        terminal
            .draw(|f| gallery.render(f, f.size(), &ctx))
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer.get(x, y).symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_failed_slot_shows_placeholder_and_reason() {
        let mut gallery = Gallery::new(&entries());
        gallery.begin_reload(None);
        gallery.apply_signal(0, 1, ImageEvent::LoadFailed("HTTP 404".into()));
        gallery.apply_signal(1, 1, ImageEvent::LoadSucceeded);

        let screen = rendered(&gallery);
        assert!(screen.contains("Image Placeholder"), "{screen}");
        assert!(screen.contains("Failed to load image: HTTP 404"), "{screen}");
        assert!(screen.contains("Local loaded"), "{screen}");
        assert!(!screen.contains("Remote loaded"), "{screen}");
    }
}

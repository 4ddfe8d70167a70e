//! Activity indicator driven by the UI tick

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

const FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Glyph for the given tick
pub fn spinner_frame(tick: u64) -> char {
    FRAMES[(tick % FRAMES.len() as u64) as usize]
}

/// Single-line spinner followed by an optional label
pub struct Spinner<'a> {
    tick: u64,
    label: &'a str,
    style: Style,
}

impl<'a> Spinner<'a> {
    pub fn new(tick: u64) -> Self {
        Self {
            tick,
            label: "",
            style: Style::default().fg(Color::Cyan),
        }
    }

    pub fn label(mut self, label: &'a str) -> Self {
        self.label = label;
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

impl Widget for Spinner<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        buf.get_mut(area.x, area.y)
            .set_char(spinner_frame(self.tick))
            .set_style(self.style);
        if !self.label.is_empty() && area.width > 2 {
            buf.set_stringn(
                area.x + 2,
                area.y,
                self.label,
                (area.width - 2) as usize,
                Style::default(),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_cycle() {
        assert_eq!(spinner_frame(0), spinner_frame(FRAMES.len() as u64));
        assert_ne!(spinner_frame(0), spinner_frame(1));
    }

    #[test]
    fn test_render_writes_glyph_and_label() {
        let area = Rect::new(0, 0, 12, 1);
        let mut buf = Buffer::empty(area);
        Spinner::new(0).label("Loading").render(area, &mut buf);
        assert_eq!(buf.get(0, 0).symbol(), "⠋");
        assert_eq!(buf.get(2, 0).symbol(), "L");
    }

    #[test]
    fn test_style_applies_to_glyph_only() {
        let area = Rect::new(0, 0, 12, 1);
        let mut buf = Buffer::empty(area);
        Spinner::new(0)
            .label("Loading")
            .style(Style::default().fg(Color::Red))
            .render(area, &mut buf);
        assert_eq!(buf.get(0, 0).fg, Color::Red);
        assert_ne!(buf.get(2, 0).fg, Color::Red);
    }
}

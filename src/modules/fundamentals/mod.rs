//! Fundamentals screen - a tour of basic, input, list and advanced components

mod content;
mod render;

pub use content::{
    Card, Control, Element, FundamentalsState, Section, SectionView, TextStyle, REMOTE_LOGO,
};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::Frame;
use tracing::{debug, info, warn};

use crate::core::{Action, Command, Context, Module, NotifyLevel};
use crate::domain::{ConfirmDialog, PendingConfirm, SelectionError, SelectionKey, ViewSelection};

pub struct Fundamentals {
    sections: ViewSelection<Section>,
    state: FundamentalsState,
    focus: usize,
}

impl Default for Fundamentals {
    fn default() -> Self {
        Self::new()
    }
}

impl Fundamentals {
    pub fn new() -> Self {
        let mut screen = Self {
            sections: ViewSelection::new(),
            state: FundamentalsState::default(),
            focus: 0,
        };
        screen.sync_focus();
        screen
    }

    pub fn active_section(&self) -> Section {
        self.sections.active()
    }

    pub fn state(&self) -> &FundamentalsState {
        &self.state
    }

    /// Select a section by its key; an unknown key leaves the selection alone
    pub fn select_section(&mut self, key: &str) -> Result<Section, SelectionError> {
        let section = self.sections.select(key)?;
        self.focus = 0;
        self.sync_focus();
        Ok(section)
    }

    pub fn current_view(&self) -> SectionView {
        self.sections.current_view(&self.state)
    }

    pub fn focused(&self) -> Option<Control> {
        self.state.focused
    }

    pub fn set_viewport(&mut self, viewport: (u16, u16)) {
        self.state.viewport = viewport;
    }

    /// End the simulated loading; returns whether it was running
    pub fn finish_loading(&mut self) -> bool {
        let was_loading = std::mem::replace(&mut self.state.loading, false);
        if was_loading {
            info!("loading demo finished");
        }
        was_loading
    }

    /// Run the focused control
    pub fn activate(&mut self) -> Action {
        let Some(control) = self.state.focused else {
            return Action::None;
        };
        match control {
            Control::TextInput => {
                self.state.editing = true;
                Action::None
            }
            Control::BasicButton | Control::CustomButton => {
                Action::Confirm(button_pressed())
            }
            Control::NotificationsSwitch => {
                self.state.notifications = !self.state.notifications;
                info!(enabled = self.state.notifications, "notifications toggled");
                Action::None
            }
            Control::Decrement => self.bump_counter(-1),
            Control::Increment => self.bump_counter(1),
            Control::StartLoading => {
                if self.state.loading {
                    return Action::Notify("Already loading".to_string(), NotifyLevel::Info);
                }
                self.state.loading = true;
                Action::StartLoadingDemo
            }
            Control::OpenModal => Action::OpenModal,
        }
    }

    /// Long press; only the custom touchable reacts
    pub fn long_press(&mut self) -> Action {
        if self.state.focused != Some(Control::CustomButton) {
            return Action::None;
        }
        Action::Alert {
            title: "Long Press".to_string(),
            body: "You held the button!".to_string(),
        }
    }

    fn bump_counter(&mut self, delta: i64) -> Action {
        self.state.counter += delta;
        info!(counter = self.state.counter, "counter changed");
        Action::None
    }

    fn move_focus(&mut self, forward: bool) {
        let len = self.sections.active().controls().len();
        if len == 0 {
            return;
        }
        self.focus = if forward {
            (self.focus + 1) % len
        } else {
            (self.focus + len - 1) % len
        };
        self.sync_focus();
    }

    fn sync_focus(&mut self) {
        self.state.focused = self.sections.active().controls().get(self.focus).copied();
    }

    fn switch_section(&mut self, section: Section) {
        self.sections.select_key(section);
        self.focus = 0;
        self.sync_focus();
    }

    fn edit_text(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => {
                self.state.editing = false;
                debug!(len = self.state.text.len(), "text entry finished");
            }
            KeyCode::Backspace => {
                self.state.text.pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.text.push(c);
            }
            _ => {}
        }
    }
}

fn button_pressed() -> PendingConfirm {
    ConfirmDialog::new("Button Pressed", "You pressed the button!")
        .confirm_label("OK")
        .present(|| info!("OK Pressed"), || debug!("button alert cancelled"))
}

impl Module for Fundamentals {
    fn id(&self) -> &'static str {
        "fundamentals"
    }

    fn handle_key(&mut self, key: KeyEvent, ctx: &mut Context) -> Action {
        self.set_viewport(ctx.viewport);

        if self.state.editing {
            self.edit_text(key);
            return Action::None;
        }

        match key.code {
            KeyCode::Left | KeyCode::Char('[') | KeyCode::Char('h') => {
                let section = self.sections.cycle(false);
                self.switch_section(section);
                Action::None
            }
            KeyCode::Right | KeyCode::Char(']') | KeyCode::Char('l') => {
                let section = self.sections.cycle(true);
                self.switch_section(section);
                Action::None
            }
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                if let Some(section) = Section::ALL.get(index) {
                    self.switch_section(*section);
                }
                Action::None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_focus(false);
                Action::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_focus(true);
                Action::None
            }
            KeyCode::Enter if key.modifiers.contains(KeyModifiers::SHIFT) => self.long_press(),
            KeyCode::Char('L') => self.long_press(),
            KeyCode::Enter => self.activate(),
            _ => Action::None,
        }
    }

    fn handle_command(&mut self, cmd: &Command, _ctx: &mut Context) -> Action {
        match cmd {
            Command::Section(key) => match self.select_section(key) {
                Ok(section) => {
                    debug!(section = section.key(), "section selected");
                    Action::None
                }
                Err(err) => {
                    warn!("{err}");
                    Action::Notify(err.to_string(), NotifyLevel::Warn)
                }
            },
            _ => Action::None,
        }
    }

    fn captures_input(&self) -> bool {
        self.state.editing
    }

    fn render(&self, frame: &mut Frame, area: Rect, ctx: &Context) {
        render::draw(frame, area, self, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ActionQueue;

    fn ctx() -> Context {
        let (queue, _rx) = ActionQueue::new();
        Context::new("demo", queue)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_starts_on_basics_without_focus() {
        let screen = Fundamentals::new();
        assert_eq!(screen.active_section(), Section::Basics);
        assert_eq!(screen.focused(), None);
    }

    #[test]
    fn test_unknown_section_keeps_selection() {
        let mut screen = Fundamentals::new();
        let mut ctx = ctx();
        screen.select_section("lists").unwrap();
        let action = screen.handle_command(&Command::Section("charts".into()), &mut ctx);
        assert!(matches!(action, Action::Notify(_, NotifyLevel::Warn)));
        assert_eq!(screen.active_section(), Section::Lists);
    }

    #[test]
    fn test_counter_buttons() {
        let mut screen = Fundamentals::new();
        let mut ctx = ctx();
        screen.select_section("advanced").unwrap();
        assert_eq!(screen.focused(), Some(Control::Decrement));
        screen.handle_key(press(KeyCode::Enter), &mut ctx);
        screen.handle_key(press(KeyCode::Down), &mut ctx);
        screen.handle_key(press(KeyCode::Enter), &mut ctx);
        screen.handle_key(press(KeyCode::Enter), &mut ctx);
        assert_eq!(screen.state().counter, 1);
    }

    #[test]
    fn test_text_entry_captures_input() {
        let mut screen = Fundamentals::new();
        let mut ctx = ctx();
        screen.select_section("input").unwrap();
        screen.handle_key(press(KeyCode::Enter), &mut ctx);
        assert!(screen.captures_input());
        for c in "hi q".chars() {
            screen.handle_key(press(KeyCode::Char(c)), &mut ctx);
        }
        screen.handle_key(press(KeyCode::Backspace), &mut ctx);
        screen.handle_key(press(KeyCode::Esc), &mut ctx);
        assert!(!screen.captures_input());
        assert_eq!(screen.state().text, "hi ");
    }

    #[test]
    fn test_start_loading_once() {
        let mut screen = Fundamentals::new();
        screen.select_section("advanced").unwrap();
        screen.move_focus(true);
        screen.move_focus(true);
        assert_eq!(screen.focused(), Some(Control::StartLoading));
        assert!(matches!(screen.activate(), Action::StartLoadingDemo));
        assert!(matches!(screen.activate(), Action::Notify(..)));
        assert!(screen.finish_loading());
        assert!(!screen.finish_loading());
    }

    #[test]
    fn test_long_press_only_on_custom_button() {
        let mut screen = Fundamentals::new();
        screen.select_section("input").unwrap();
        assert!(matches!(screen.long_press(), Action::None));
        screen.move_focus(true);
        screen.move_focus(true);
        assert!(matches!(screen.long_press(), Action::Alert { .. }));
    }

    #[test]
    fn test_button_press_presents_confirm() {
        let mut screen = Fundamentals::new();
        screen.select_section("input").unwrap();
        screen.move_focus(true);
        match screen.activate() {
            Action::Confirm(pending) => {
                assert_eq!(pending.dialog().title, "Button Pressed");
                pending.confirm();
            }
            other => panic!("unexpected action {other:?}"),
        }
    }
}

//! Module trait for screen-level UI components

use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use ratatui::Frame;

use super::{Action, Command, Context};

/// Trait for screens that can handle input and render themselves
pub trait Module {
    fn id(&self) -> &'static str;

    /// Handle keyboard input
    /// Returns an Action describing what should happen
    fn handle_key(&mut self, key: KeyEvent, ctx: &mut Context) -> Action;

    /// Handle a parsed `:` command addressed to this screen
    fn handle_command(&mut self, _cmd: &Command, _ctx: &mut Context) -> Action {
        Action::None
    }

    /// Whether the module currently consumes raw text (global keys are suspended)
    fn captures_input(&self) -> bool {
        false
    }

    fn render(&self, frame: &mut Frame, area: Rect, ctx: &Context);
}

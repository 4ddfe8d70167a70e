//! Shared context passed to modules

use super::ActionQueue;

/// Shared context available to all modules
#[derive(Debug, Clone)]
pub struct Context {
    /// Display name of the signed-in user
    pub username: String,

    /// Terminal size in cells (width, height)
    pub viewport: (u16, u16),

    /// UI tick counter, drives spinners
    pub tick: u64,

    /// Where dialog callbacks post their actions
    pub actions: ActionQueue,
}

impl Context {
    pub fn new(username: impl Into<String>, actions: ActionQueue) -> Self {
        Self {
            username: username.into(),
            viewport: (0, 0),
            tick: 0,
            actions,
        }
    }

    /// Possessive form used by the sign-out sheet
    pub fn account_owner(&self) -> String {
        format!("{}'s", self.username)
    }
}

//! Actions that modules can return to communicate with the app

use std::sync::mpsc::{self, Receiver, Sender};

use crate::domain::PendingConfirm;

/// Actions returned by modules (or posted by dialog callbacks) to request
/// state changes from the app
#[derive(Debug)]
pub enum Action {
    /// No action needed
    None,

    /// Show notification in status line
    Notify(String, NotifyLevel),

    /// Single-button alert overlay
    Alert { title: String, body: String },

    /// Present a two-button confirmation
    Confirm(PendingConfirm),

    /// Open the fundamentals modal
    OpenModal,

    /// Close current overlay/popup
    CloseOverlay,

    /// Start the simulated loading timer
    StartLoadingDemo,

    /// Reload one gallery image (by index) or all of them
    ReloadImages(Option<usize>),

    /// Refresh dashboard data
    Refresh,

    /// Ask the user whether to sign out
    PresentSignOut(SignOutStyle),

    /// Sign-out confirmed
    SignOut,

    /// Sign-out dismissed
    SignOutCancelled,

    /// Re-mount the dashboard after a sign-out
    SignIn,

    /// Request quit
    Quit,
}

/// Notification levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Warn,
    Error,
}

/// Which sign-out surface to present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignOutStyle {
    /// Header button: a single confirmation
    Inline,
    /// Full sheet with account details, followed by a second confirmation
    Sheet,
}

/// Queue through which callbacks hand actions back to the single state owner
#[derive(Debug, Clone)]
pub struct ActionQueue {
    tx: Sender<Action>,
}

impl ActionQueue {
    pub fn new() -> (Self, Receiver<Action>) {
        let (tx, rx) = mpsc::channel();
        (Self { tx }, rx)
    }

    pub fn post(&self, action: Action) {
        // The receiver only goes away on shutdown
        let _ = self.tx.send(action);
    }

    /// A callback that posts `action` when invoked
    pub fn callback(&self, action: Action) -> impl FnOnce() + Send + 'static {
        let tx = self.tx.clone();
        move || {
            let _ = tx.send(action);
        }
    }
}

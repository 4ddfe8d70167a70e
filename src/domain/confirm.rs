//! Two-outcome confirmation dialog: exactly one of `confirm`/`cancel` fires

use std::fmt;

type Callback = Box<dyn FnOnce() + Send + 'static>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    Confirmed,
    Cancelled,
}

/// Title, body and the two labeled actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDialog {
    pub title: String,
    pub body: String,
    pub cancel_label: String,
    pub confirm_label: String,
    /// Render the confirm action as destructive
    pub destructive: bool,
}

impl ConfirmDialog {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            cancel_label: "Cancel".to_string(),
            confirm_label: "OK".to_string(),
            destructive: false,
        }
    }

    pub fn confirm_label(mut self, label: impl Into<String>) -> Self {
        self.confirm_label = label.into();
        self
    }

    pub fn cancel_label(mut self, label: impl Into<String>) -> Self {
        self.cancel_label = label.into();
        self
    }

    pub fn destructive(mut self) -> Self {
        self.destructive = true;
        self
    }

    /// Bind the two callbacks. The returned value must be resolved once;
    /// dropping it unresolved counts as a cancel.
    pub fn present<C, X>(self, on_confirm: C, on_cancel: X) -> PendingConfirm
    where
        C: FnOnce() + Send + 'static,
        X: FnOnce() + Send + 'static,
    {
        PendingConfirm {
            dialog: self,
            on_confirm: Some(Box::new(on_confirm)),
            on_cancel: Some(Box::new(on_cancel)),
        }
    }
}

/// A presented dialog awaiting its single outcome
pub struct PendingConfirm {
    dialog: ConfirmDialog,
    on_confirm: Option<Callback>,
    on_cancel: Option<Callback>,
}

impl PendingConfirm {
    pub fn dialog(&self) -> &ConfirmDialog {
        &self.dialog
    }

    pub fn confirm(self) -> ConfirmOutcome {
        self.resolve(ConfirmOutcome::Confirmed)
    }

    pub fn cancel(self) -> ConfirmOutcome {
        self.resolve(ConfirmOutcome::Cancelled)
    }

    /// Backdrop tap / back action
    pub fn dismiss(self) -> ConfirmOutcome {
        self.resolve(ConfirmOutcome::Cancelled)
    }

    pub fn resolve(mut self, outcome: ConfirmOutcome) -> ConfirmOutcome {
        let confirm = self.on_confirm.take();
        let cancel = self.on_cancel.take();
        let chosen = match outcome {
            ConfirmOutcome::Confirmed => confirm,
            ConfirmOutcome::Cancelled => cancel,
        };
        if let Some(callback) = chosen {
            callback();
        }
        outcome
    }
}

impl Drop for PendingConfirm {
    fn drop(&mut self) {
        self.on_confirm = None;
        if let Some(cancel) = self.on_cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for PendingConfirm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingConfirm")
            .field("dialog", &self.dialog)
            .field("resolved", &self.on_cancel.is_none())
            .finish()
    }
}

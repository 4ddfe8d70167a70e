//! Sign-out confirmations: the inline header button and the full sheet

use crate::core::{Action, ActionQueue, Context};
use crate::domain::{ConfirmDialog, PendingConfirm};

const SIGN_OUT: &str = "Sign Out";

/// Single confirmation raised by the header button
pub fn inline_sign_out(actions: &ActionQueue) -> PendingConfirm {
    ConfirmDialog::new(SIGN_OUT, "Are you sure you want to sign out?")
        .confirm_label(SIGN_OUT)
        .destructive()
        .present(
            actions.callback(Action::SignOut),
            actions.callback(Action::SignOutCancelled),
        )
}

/// Account sheet; its Sign Out action asks once more before signing out
pub fn sign_out_sheet(ctx: &Context) -> PendingConfirm {
    let body = format!(
        "Are you sure you want to sign out of {} account?\n\
         You will need to enter your credentials again to access your account.",
        ctx.account_owner()
    );
    let next = ctx.actions.clone();
    ConfirmDialog::new(SIGN_OUT, body)
        .confirm_label(SIGN_OUT)
        .destructive()
        .present(
            move || {
                let pending = confirm_sign_out(&next);
                next.post(Action::Confirm(pending));
            },
            ctx.actions.callback(Action::SignOutCancelled),
        )
}

/// Second step of the sheet
pub fn confirm_sign_out(actions: &ActionQueue) -> PendingConfirm {
    ConfirmDialog::new(
        "Confirm Sign Out",
        "Are you sure you want to sign out? You will need to log in again to access your account.",
    )
    .confirm_label(SIGN_OUT)
    .destructive()
    .present(
        actions.callback(Action::SignOut),
        actions.callback(Action::SignOutCancelled),
    )
}

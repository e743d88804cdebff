//! UI Bridge Module
//!
//! Defines the commands a renderer sends to the async runtime and the loop
//! that applies them to an [`AuthViewModel`].

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::view_model::AuthViewModel;

/// Commands sent from the UI to the async runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiCommand {
    /// Screen appeared; restore the session.
    Restore,

    /// User pressed the sign-in action.
    SignIn,

    /// User pressed the sign-out action.
    SignOut,

    /// User closed the alert dialog.
    DismissAlert,
}

/// Applies one command to the view model.
pub async fn dispatch(view_model: &AuthViewModel, command: UiCommand) {
    match command {
        UiCommand::Restore => view_model.restore().await,
        UiCommand::SignIn => view_model.sign_in().await,
        UiCommand::SignOut => view_model.sign_out().await,
        UiCommand::DismissAlert => view_model.dismiss_alert(),
    }
}

/// Consumes commands until every sender is dropped.
///
/// Each command runs on its own task, so a sign-in waiting on the user does
/// not hold back later commands. Whether a concurrent sign-in or sign-out
/// runs at all is decided by the view model, not by this loop. Returns once
/// the channel is closed and all dispatched commands have finished.
pub async fn run_command_loop(
    view_model: Arc<AuthViewModel>,
    mut commands: mpsc::UnboundedReceiver<UiCommand>,
) {
    let mut tasks = JoinSet::new();

    while let Some(command) = commands.recv().await {
        debug!(?command, "ui command received");
        let view_model = Arc::clone(&view_model);
        tasks.spawn(async move { dispatch(&view_model, command).await });

        while let Some(finished) = tasks.try_join_next() {
            log_task_result(finished);
        }
    }

    while let Some(finished) = tasks.join_next().await {
        log_task_result(finished);
    }
    debug!("ui command channel closed");
}

fn log_task_result(result: Result<(), tokio::task::JoinError>) {
    if let Err(error) = result {
        warn!(%error, "ui command task failed");
    }
}

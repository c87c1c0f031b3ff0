//! Async event loop that feeds commands into a form and fires its debounce
//! timer.

use std::time::Instant;

use serde_json::Value;
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant as TokioInstant};
use tracing::{debug, warn};

use crate::error::FormError;
use crate::form::{ChangeEvent, ChangeOutcome, DynamicForm, SubmitOutcome};

/// Input to the driver loop.
#[derive(Debug, Clone, PartialEq)]
pub enum FormCommand {
    /// A raw control event.
    Input(ChangeEvent),
    /// An edit of a named field, routed like its control would route it.
    Edit {
        /// Field name.
        field: String,
        /// New value.
        value: Value,
    },
    /// Press the submit button.
    Submit,
    /// Ask the hook to render.
    Render,
}

/// What the driver reports back to its hook.
#[derive(Debug)]
pub enum DriverNotice {
    /// The debounced change pipeline ran.
    Changed(ChangeOutcome),
    /// A submit was processed.
    Submitted(SubmitOutcome),
    /// A render was requested.
    RenderRequested,
    /// An input command was refused.
    InputRejected(FormError),
}

/// Runs the form until the command channel closes.
///
/// Everything happens on the calling task: the form and its callbacks do not
/// need to be `Send`. A change still pending when the channel closes is
/// flushed before returning.
pub async fn drive<H>(
    form: &mut DynamicForm,
    commands: &mut mpsc::UnboundedReceiver<FormCommand>,
    mut hook: H,
) where
    H: FnMut(&mut DynamicForm, DriverNotice),
{
    loop {
        let deadline = form.next_deadline();
        tokio::select! {
            biased;

            () = wait_until(deadline) => {
                if let Some(outcome) = form.poll(now()) {
                    hook(form, DriverNotice::Changed(outcome));
                }
            }
            command = commands.recv() => {
                let Some(command) = command else {
                    debug!("command channel closed");
                    if let Some(outcome) = form.flush() {
                        hook(form, DriverNotice::Changed(outcome));
                    }
                    return;
                };
                let result = match command {
                    FormCommand::Input(event) => form.handle(event, now()),
                    FormCommand::Edit { field, value } => form.edit(&field, value, now()),
                    FormCommand::Submit => {
                        let outcome = form.submit();
                        hook(form, DriverNotice::Submitted(outcome));
                        Ok(())
                    }
                    FormCommand::Render => {
                        hook(form, DriverNotice::RenderRequested);
                        Ok(())
                    }
                };
                if let Err(err) = result {
                    warn!(error = %err, "input rejected");
                    hook(form, DriverNotice::InputRejected(err));
                }
            }
        }
    }
}

fn now() -> Instant {
    TokioInstant::now().into_std()
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(TokioInstant::from_std(deadline)).await,
        None => std::future::pending().await,
    }
}

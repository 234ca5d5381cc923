pub mod commands;
pub mod status;

use rfbridge_core::command::Command;
use rfbridge_core::Outcome;

use crate::error::AppError;
use crate::state::AppState;

/// Reply text reported when the remote stayed silent, preserved from the
/// reference deployment so existing callers keep working.
pub const NO_REPLY_TEXT: &str = "No reply";

/// Run one command through the transaction manager on the blocking pool and
/// map its outcome to reply text. The core's lock serializes concurrent
/// handlers; each request queues behind it for at most the reply timeout.
pub(crate) async fn run_exchange(app: &AppState, command: Command) -> Result<String, AppError> {
    let radio = app.radio.clone();
    let outcome = tokio::task::spawn_blocking(move || radio.exchange(&command.wire_text()))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    match outcome {
        Outcome::Reply(text) => Ok(text),
        Outcome::NoReply => Ok(NO_REPLY_TEXT.to_string()),
        Outcome::SendFailed => Err(AppError::send_failed(command)),
    }
}

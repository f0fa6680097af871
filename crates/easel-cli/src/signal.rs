//! Cancellation on Ctrl+C.

use tokio::signal::ctrl_c;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::TRACING_TARGET_SHUTDOWN;

/// Cancels `token` when Ctrl+C is received.
///
/// The returned task finishes early if the token is cancelled by someone
/// else; abort it once the guarded work is done.
pub fn cancel_on_ctrl_c(token: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            biased;

            () = token.cancelled() => {}

            result = ctrl_c() => match result {
                Ok(()) => {
                    tracing::info!(
                        target: TRACING_TARGET_SHUTDOWN,
                        "Received Ctrl+C signal, cancelling dispatch"
                    );
                    token.cancel();
                }
                Err(e) => {
                    tracing::error!(
                        target: TRACING_TARGET_SHUTDOWN,
                        error = %e,
                        "Failed to install Ctrl+C handler"
                    );
                }
            },
        }
    })
}

//! Graceful shutdown handling.

use tokio_util::sync::CancellationToken;

/// Cancels `cancel` on Ctrl-C.
///
/// Returns the listener task; it ends after the first signal or when the
/// token is cancelled elsewhere.
pub fn cancel_on_ctrl_c(cancel: CancellationToken) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                match result {
                    Ok(()) => log::info!("Interrupt received, shutting down"),
                    Err(e) => log::warn!("Failed to listen for Ctrl-C: {e}"),
                }
                cancel.cancel();
            }
            _ = cancel.cancelled() => {}
        }
    })
}

/// Cancels `cancel` and waits for background tasks to finish.
pub async fn shutdown_gracefully(
    cancel: CancellationToken,
    tasks: impl IntoIterator<Item = tokio::task::JoinHandle<()>>,
) {
    cancel.cancel();
    for task in tasks {
        let _ = task.await;
    }
}

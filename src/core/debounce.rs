//! Trailing-edge debounce for search text input.
//!
//! Keystroke-rate edits are collapsed so that only the value still present
//! after a quiet period is committed downstream. The timer restarts on every
//! edit; exactly one commit fires per quiet period, carrying the latest
//! value at elapse time.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

/// Handle to a running debounce task.
///
/// Dropping the handle cancels the task; a pending commit is discarded and
/// nothing further is emitted.
pub struct SearchDebouncer {
    input_tx: mpsc::UnboundedSender<String>,
    task: JoinHandle<()>,
}

impl SearchDebouncer {
    /// Spawn a debounce task with the given quiet period. Returns the handle
    /// and the receiver on which committed queries arrive.
    pub fn spawn(quiet_period: Duration) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        let (commit_tx, commit_rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(input_rx, commit_tx, quiet_period));
        (Self { input_tx, task }, commit_rx)
    }

    /// Record the latest text value and restart the quiet-period timer.
    pub fn on_text_changed(&self, text: impl Into<String>) {
        // Send only fails when the task is gone, i.e. after cancellation.
        let _ = self.input_tx.send(text.into());
    }
}

impl Drop for SearchDebouncer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run(
    mut input_rx: mpsc::UnboundedReceiver<String>,
    commit_tx: mpsc::UnboundedSender<String>,
    quiet_period: Duration,
) {
    loop {
        // Idle until the first edit of a burst arrives.
        let Some(mut latest) = input_rx.recv().await else {
            return;
        };

        let sleep = time::sleep(quiet_period);
        tokio::pin!(sleep);

        loop {
            tokio::select! {
                changed = input_rx.recv() => match changed {
                    Some(text) => {
                        latest = text;
                        sleep.as_mut().reset(Instant::now() + quiet_period);
                    }
                    // Input side torn down: drop the pending commit.
                    None => return,
                },
                () = &mut sleep => {
                    if commit_tx.send(latest).is_err() {
                        return;
                    }
                    break;
                }
            }
        }
    }
}

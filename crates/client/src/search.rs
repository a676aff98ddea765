//! Debounced search input.

use std::time::Duration;

use tokio::sync::watch;

/// Delay used by the board and calendar search boxes.
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Forward the latest query from `input` once it has stayed unchanged for
/// `delay`. Intermediate keystrokes are dropped.
///
/// The returned receiver starts with the input's current value. When the
/// input sender is dropped the pending value is flushed and forwarding stops.
/// Must be called from within a Tokio runtime.
pub fn debounce_search(mut input: watch::Receiver<String>, delay: Duration) -> watch::Receiver<String> {
    let initial = input.borrow_and_update().clone();
    let (tx, rx) = watch::channel(initial);

    tokio::spawn(async move {
        while input.changed().await.is_ok() {
            let mut open = true;
            loop {
                tokio::select! {
                    changed = input.changed() => {
                        if changed.is_err() {
                            open = false;
                            break;
                        }
                    }
                    () = tokio::time::sleep(delay) => break,
                }
            }

            let latest = input.borrow_and_update().clone();
            tx.send_if_modified(|current| {
                if *current == latest {
                    false
                } else {
                    *current = latest;
                    true
                }
            });
            if !open || tx.is_closed() {
                break;
            }
        }
    });

    rx
}

use tokio::sync::watch;
use tokio::time::{interval, Duration};

use crate::common::{trace, warn};
use crate::core::SessionHandle;

// Periodic pending-user count for the admin dashboard. Best effort and
// scoped to the view that started it: dropping (or cancelling) the
// watcher stops the task. A failed poll is logged and the loop continues,
// except that a session expiry ends it, since the forced logout already
// owns the user-visible outcome.
pub struct PendingWatcher {
    count: watch::Receiver<usize>,
    stop: watch::Sender<bool>,
}

impl PendingWatcher {
    pub fn spawn(handle: SessionHandle, period: Duration) -> Self {
        let (count_send, count_recv) = watch::channel(0);
        let (stop_send, mut stop_recv) = watch::channel(false);

        tokio::spawn(async move {
            // first tick fires immediately
            let mut ticker = interval(period);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        match handle.users().await {
                            Ok(users) => {
                                let pending =
                                    users.iter().filter(|user| user.is_pending()).count();
                                let _ = count_send.send(pending);
                            }
                            Err(err) if err.is_session_expired() => {
                                warn!("Pending user poll stopped, session expired");
                                break;
                            }
                            Err(err) => {
                                warn!(%err, "Pending user poll failed");
                            }
                        }
                    }
                    // cancelled, or the watcher was dropped
                    _ = stop_recv.changed() => break,
                }
            }

            trace!("Pending watcher stopped");
        });

        Self {
            count: count_recv,
            stop: stop_send,
        }
    }

    // Latest observed count; 0 until the first successful poll.
    pub fn pending_count(&self) -> usize {
        *self.count.borrow()
    }

    pub async fn changed(&mut self) {
        let _ = self.count.changed().await;
    }

    pub fn cancel(&self) {
        let _ = self.stop.send(true);
    }
}

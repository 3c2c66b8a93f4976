//! Cancellation token for in-flight requests

use tokio::sync::watch;

/// Sender half: held next to the in-flight execution and fired on cancel.
#[derive(Debug)]
pub struct CancellationToken {
    tx: watch::Sender<bool>,
}

/// Receiver half: raced against the transport call.
#[derive(Debug, Clone)]
pub struct CancellationReceiver {
    rx: watch::Receiver<bool>,
}

impl CancellationToken {
    /// Creates a linked token/receiver pair.
    #[must_use]
    pub fn new() -> (Self, CancellationReceiver) {
        let (tx, rx) = watch::channel(false);
        (Self { tx }, CancellationReceiver { rx })
    }

    /// Signals cancellation. Calling it more than once has no further effect.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    /// Returns true once `cancel` has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }
}

impl CancellationReceiver {
    /// Completes when the linked token is cancelled.
    ///
    /// If the token is dropped without cancelling, this never completes.
    pub async fn cancelled(&mut self) {
        loop {
            if *self.rx.borrow_and_update() {
                return;
            }
            if self.rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }

    /// Returns true if the linked token has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }
}

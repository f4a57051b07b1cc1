//! Caller-driven cancellation of an export flow

use tokio::sync::watch;

/// Read side of a cancellation flag
///
/// Wraps a `watch::Receiver<bool>`; `true` means the caller wants the flow
/// to stop. The CLI drives it from Ctrl+C, library users from anything.
///
/// # Example
///
/// ```
/// use mytracker::core::export::CancelSignal;
///
/// let (tx, signal) = CancelSignal::pair();
/// assert!(!signal.is_cancelled());
/// tx.send(true).unwrap();
/// assert!(signal.is_cancelled());
/// ```
#[derive(Debug, Clone)]
pub struct CancelSignal {
    receiver: Option<watch::Receiver<bool>>,
}

impl CancelSignal {
    /// A signal that never fires
    pub fn never() -> Self {
        Self { receiver: None }
    }

    /// Creates a sender and the signal it controls
    pub fn pair() -> (watch::Sender<bool>, Self) {
        let (tx, rx) = watch::channel(false);
        (tx, Self::from(rx))
    }

    /// Returns true once cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.receiver.as_ref().is_some_and(|rx| *rx.borrow())
    }

    /// Resolves when cancellation is requested
    ///
    /// Stays pending forever if the sender is dropped without firing.
    pub async fn cancelled(&mut self) {
        let Some(rx) = self.receiver.as_mut() else {
            return std::future::pending().await;
        };
        if rx.wait_for(|cancelled| *cancelled).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

impl Default for CancelSignal {
    fn default() -> Self {
        Self::never()
    }
}

impl From<watch::Receiver<bool>> for CancelSignal {
    fn from(receiver: watch::Receiver<bool>) -> Self {
        Self {
            receiver: Some(receiver),
        }
    }
}

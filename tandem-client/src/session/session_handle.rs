use crate::session::SessionEvent;
use tokio::sync::{mpsc, oneshot};

/// Caller side of a running [`SessionController`](crate::SessionController).
///
/// Dropping the handle unmounts the session.
pub struct SessionHandle {
    unmount_tx: Option<oneshot::Sender<()>>,
    events_rx: mpsc::UnboundedReceiver<SessionEvent>,
}

impl SessionHandle {
    pub(crate) fn new(
        unmount_tx: oneshot::Sender<()>,
        events_rx: mpsc::UnboundedReceiver<SessionEvent>,
    ) -> Self {
        Self {
            unmount_tx: Some(unmount_tx),
            events_rx,
        }
    }

    /// Asks the session to leave the room and release everything. Only the
    /// first call has an effect.
    pub fn leave(&mut self) {
        if let Some(tx) = self.unmount_tx.take() {
            let _ = tx.send(());
        }
    }

    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        self.events_rx.recv().await
    }
}

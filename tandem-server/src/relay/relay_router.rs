use crate::room::RoomDirectory;
use crate::signaling::SignalingOutput;
use futures::future::join_all;
use std::sync::Arc;
use tandem_core::{PeerId, RoomId, SignalEnvelope};
use tracing::{debug, warn};

/// Forwards offer/answer/candidate envelopes to the other members of a room.
///
/// Payloads are passed through untouched apart from the sender stamp.
#[derive(Clone)]
pub struct RelayRouter {
    directory: Arc<RoomDirectory>,
    output: Arc<dyn SignalingOutput>,
}

impl RelayRouter {
    pub fn new(directory: Arc<RoomDirectory>, output: Arc<dyn SignalingOutput>) -> Self {
        Self { directory, output }
    }

    /// Returns how many recipients the envelope reached.
    pub async fn relay(&self, from: PeerId, envelope: SignalEnvelope) -> usize {
        let kind = envelope.kind();
        if !kind.is_relayable() {
            warn!("Refusing to relay {} envelope from {}", kind, from);
            return 0;
        }

        let room_id = envelope.room_id().clone();
        if !self.directory.is_member(&room_id, &from) {
            warn!(
                "Peer {} sent {} to room '{}' without joining it",
                from, kind, room_id
            );
            return 0;
        }

        let recipients = self.directory.members_of(&room_id, &from);
        let delivered = self.fan_out(&recipients, envelope.with_sender(from)).await;
        debug!(
            "Relayed {} from {} in '{}' to {}/{} peer(s)",
            kind,
            from,
            room_id,
            delivered,
            recipients.len()
        );
        delivered
    }

    /// Tells the remaining members of `room_id` that `from` is gone.
    pub async fn announce_leave(&self, room_id: &RoomId, from: PeerId) -> usize {
        let recipients = self.directory.members_of(room_id, &from);
        if recipients.is_empty() {
            return 0;
        }

        let envelope = SignalEnvelope::leave(room_id.clone()).with_sender(from);
        self.fan_out(&recipients, envelope).await
    }

    async fn fan_out(&self, recipients: &[PeerId], envelope: SignalEnvelope) -> usize {
        let sends = recipients.iter().map(|peer_id| {
            let envelope = envelope.clone();
            async move { self.output.send_envelope(peer_id, envelope).await }
        });

        join_all(sends)
            .await
            .into_iter()
            .filter(|delivered| *delivered)
            .count()
    }
}

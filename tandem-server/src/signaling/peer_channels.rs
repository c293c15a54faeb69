use crate::signaling::SignalingOutput;
use async_trait::async_trait;
use axum::extract::ws::Message;
use dashmap::DashMap;
use tandem_core::{PeerId, SignalEnvelope, encode};
use tokio::sync::mpsc;
use tracing::debug;

/// Outbound queues of every open WebSocket, keyed by the peer id assigned
/// at upgrade time.
#[derive(Default)]
pub struct PeerChannels {
    peers: DashMap<PeerId, mpsc::UnboundedSender<Message>>,
}

impl PeerChannels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_peer(&self, peer_id: PeerId, tx: mpsc::UnboundedSender<Message>) {
        self.peers.insert(peer_id, tx);
    }

    pub fn remove_peer(&self, peer_id: &PeerId) -> bool {
        self.peers.remove(peer_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }
}

#[async_trait]
impl SignalingOutput for PeerChannels {
    async fn send_envelope(&self, peer_id: &PeerId, envelope: SignalEnvelope) -> bool {
        let Some(peer) = self.peers.get(peer_id) else {
            debug!(
                "Dropping {} for disconnected peer {}",
                envelope.kind(),
                peer_id
            );
            return false;
        };

        let text = encode(&envelope);
        if let Err(e) = peer.send(Message::Text(text.into())) {
            debug!("Failed to queue WS message for {}: {}", peer_id, e);
            return false;
        }
        true
    }
}

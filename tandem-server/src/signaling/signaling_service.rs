use crate::config::ServerConfig;
use crate::relay::RelayRouter;
use crate::room::{JoinOutcome, RoomDirectory};
use crate::signaling::{PeerChannels, SignalingOutput};
use async_trait::async_trait;
use axum::extract::ws::Message;
use std::sync::Arc;
use tandem_core::{PeerId, RoomId, SignalEnvelope, SignalKind, decode};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

struct SignalingInner {
    peers: Arc<PeerChannels>,
    directory: Arc<RoomDirectory>,
    router: RelayRouter,
}

/// Rendezvous service state shared by every WebSocket connection.
#[derive(Clone)]
pub struct SignalingService {
    inner: Arc<SignalingInner>,
}

impl SignalingService {
    pub fn new(config: &ServerConfig) -> Self {
        let peers = Arc::new(PeerChannels::new());
        let directory = Arc::new(RoomDirectory::new(config.room_capacity));
        let router = RelayRouter::new(directory.clone(), peers.clone());

        Self {
            inner: Arc::new(SignalingInner {
                peers,
                directory,
                router,
            }),
        }
    }

    pub fn directory(&self) -> &Arc<RoomDirectory> {
        &self.inner.directory
    }

    pub fn connected_peers(&self) -> usize {
        self.inner.peers.len()
    }

    pub fn add_peer(&self, peer_id: PeerId, tx: mpsc::UnboundedSender<Message>) {
        self.inner.peers.add_peer(peer_id, tx);
    }

    /// Entry point for one inbound text frame.
    pub async fn handle_text(&self, peer_id: PeerId, text: &str) {
        match decode(text) {
            Ok(envelope) => self.handle_envelope(peer_id, envelope).await,
            Err(e) if e.is_unknown_kind() => {
                debug!("Ignoring envelope from {}: {}", peer_id, e);
            }
            Err(e) => warn!("Invalid envelope from {}: {}", peer_id, e),
        }
    }

    pub async fn handle_envelope(&self, peer_id: PeerId, envelope: SignalEnvelope) {
        match envelope.kind() {
            SignalKind::Join => self.handle_join(peer_id, envelope.room_id()).await,
            SignalKind::Offer | SignalKind::Answer | SignalKind::Candidate => {
                self.inner.router.relay(peer_id, envelope).await;
            }
            SignalKind::Leave => self.handle_leave(peer_id, envelope.room_id()).await,
            SignalKind::Roster | SignalKind::RoomFull => {
                warn!(
                    "Peer {} sent server-only {} envelope, dropping",
                    peer_id,
                    envelope.kind()
                );
            }
        }
    }

    async fn handle_join(&self, peer_id: PeerId, room_id: &RoomId) {
        let reply = match self.inner.directory.join(room_id, peer_id) {
            JoinOutcome::Joined { roster } => SignalEnvelope::roster(room_id.clone(), roster),
            JoinOutcome::RoomFull => SignalEnvelope::room_full(room_id.clone()),
        };
        self.send_envelope(&peer_id, reply).await;
    }

    async fn handle_leave(&self, peer_id: PeerId, room_id: &RoomId) {
        if self.inner.directory.leave(room_id, &peer_id) {
            self.inner.router.announce_leave(room_id, peer_id).await;
        }
    }

    /// Cleanup for a closed connection, graceful or not.
    pub async fn disconnect(&self, peer_id: &PeerId) {
        self.inner.peers.remove_peer(peer_id);

        for room_id in self.inner.directory.disconnect(peer_id) {
            self.inner.router.announce_leave(&room_id, *peer_id).await;
        }
        info!("Peer {} cleaned up", peer_id);
    }
}

#[async_trait]
impl SignalingOutput for SignalingService {
    async fn send_envelope(&self, peer_id: &PeerId, envelope: SignalEnvelope) -> bool {
        self.inner.peers.send_envelope(peer_id, envelope).await
    }
}

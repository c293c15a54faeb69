use async_trait::async_trait;
use tandem_core::{PeerId, SignalEnvelope};

/// Outbound side of the signaling transport, as seen by the room logic.
///
/// The WebSocket layer implements it; tests swap in a recorder.
#[async_trait]
pub trait SignalingOutput: Send + Sync {
    /// Deliver one envelope to one connected peer.
    ///
    /// Returns `false` when the peer is no longer reachable. That is not an
    /// error for the caller.
    async fn send_envelope(&self, peer_id: &PeerId, envelope: SignalEnvelope) -> bool;
}

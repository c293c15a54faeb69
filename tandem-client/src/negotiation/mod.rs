//! Per-call negotiation state: who offers, what has been applied to the
//! transport, which remote candidates are still waiting for a remote
//! description.
//!
//! Every transition takes `&mut self`, so at most one transport operation is
//! in flight at a time. Dropping a transition future half-way is allowed;
//! the owner then closes the session.

mod handle_candidate_impl;
mod handle_remote_answer_impl;
mod handle_remote_offer_impl;
mod handle_roster_impl;
mod policy;

pub use policy::should_originate_offer;

use crate::capture::{LocalStream, MediaCapture};
use crate::config::ClientConfig;
use crate::error::NegotiationError;
use crate::transport::{PeerTransport, TransportConnector, TransportEvent};
use tandem_core::{CloseReason, IceCandidate, PeerId, RoomId, SignalEnvelope, SignalPayload};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Idle,
    Joined,
    Offering,
    Answering,
    Connected,
    Closed,
    Failed,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Closed | Phase::Failed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Undetermined,
    Offerer,
    Answerer,
}

pub struct NegotiationSession<C, M>
where
    C: TransportConnector,
    M: MediaCapture,
{
    room_id: RoomId,
    config: ClientConfig,
    role: Role,
    phase: Phase,
    joined: bool,
    pending_candidates: Vec<IceCandidate>,
    remote_description_set: bool,
    local_offer_outstanding: bool,
    transport: Option<C::Transport>,
    local_stream: Option<LocalStream>,
    close_reason: Option<CloseReason>,
    connector: C,
    capture: M,
    events_tx: mpsc::UnboundedSender<TransportEvent>,
}

impl<C, M> NegotiationSession<C, M>
where
    C: TransportConnector,
    M: MediaCapture,
{
    pub fn new(
        room_id: RoomId,
        config: ClientConfig,
        connector: C,
        capture: M,
        events_tx: mpsc::UnboundedSender<TransportEvent>,
    ) -> Self {
        Self {
            room_id,
            config,
            role: Role::Undetermined,
            phase: Phase::Idle,
            joined: false,
            pending_candidates: Vec::new(),
            remote_description_set: false,
            local_offer_outstanding: false,
            transport: None,
            local_stream: None,
            close_reason: None,
            connector,
            capture,
            events_tx,
        }
    }

    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Whether a roster was ever received, i.e. the service counts us as a
    /// room member.
    pub fn has_joined(&self) -> bool {
        self.joined
    }

    pub fn pending_candidates(&self) -> usize {
        self.pending_candidates.len()
    }

    pub fn has_transport(&self) -> bool {
        self.transport.is_some()
    }

    pub fn local_stream(&self) -> Option<&LocalStream> {
        self.local_stream.as_ref()
    }

    pub fn close_reason(&self) -> Option<CloseReason> {
        self.close_reason
    }

    pub fn join_envelope(&self) -> SignalEnvelope {
        SignalEnvelope::join(self.room_id.clone())
    }

    pub fn leave_envelope(&self) -> SignalEnvelope {
        SignalEnvelope::leave(self.room_id.clone())
    }

    /// Feeds one inbound envelope through the state machine and returns the
    /// envelopes to send in response.
    pub async fn on_envelope(
        &mut self,
        envelope: SignalEnvelope,
    ) -> Result<Vec<SignalEnvelope>, NegotiationError> {
        if self.phase.is_terminal() {
            debug!("Ignoring {} in {:?}", envelope.kind(), self.phase);
            return Ok(Vec::new());
        }
        if envelope.room_id() != &self.room_id {
            debug!(
                "Ignoring {} addressed to room '{}'",
                envelope.kind(),
                envelope.room_id()
            );
            return Ok(Vec::new());
        }

        let sender = envelope.sender();
        match envelope.into_payload() {
            SignalPayload::Roster { members } => self.on_roster(members).await,
            SignalPayload::RoomFull => {
                self.on_room_full().await;
                Ok(Vec::new())
            }
            SignalPayload::Offer { sdp } => self.on_remote_offer(sdp).await,
            SignalPayload::Answer { sdp } => self.on_remote_answer(sdp).await,
            SignalPayload::Candidate(candidate) => {
                self.on_remote_candidate(candidate).await?;
                Ok(Vec::new())
            }
            SignalPayload::Leave => {
                self.on_remote_leave(sender).await;
                Ok(Vec::new())
            }
            SignalPayload::Join => {
                debug!("Ignoring join echoed by the service");
                Ok(Vec::new())
            }
        }
    }

    /// Wraps a freshly gathered local candidate for sending. Not gated on the
    /// negotiation phase, only on the session being alive.
    pub fn on_local_candidate(&self, candidate: IceCandidate) -> Option<SignalEnvelope> {
        match self.phase {
            Phase::Idle | Phase::Closed | Phase::Failed => None,
            _ => Some(SignalEnvelope::candidate(self.room_id.clone(), candidate)),
        }
    }

    /// Releases the transport and moves to `Closed`. Safe to call repeatedly.
    pub async fn close(&mut self, reason: CloseReason) {
        if self.phase.is_terminal() {
            return;
        }
        self.pending_candidates.clear();
        self.release_transport().await;
        self.close_reason = Some(reason);
        self.set_phase(Phase::Closed);
    }

    /// Releases the transport and moves to `Failed`.
    pub async fn fail(&mut self) {
        if self.phase.is_terminal() {
            return;
        }
        self.pending_candidates.clear();
        self.release_transport().await;
        self.close_reason = Some(CloseReason::ProtocolError);
        self.set_phase(Phase::Failed);
    }

    async fn on_room_full(&mut self) {
        match self.phase {
            Phase::Idle | Phase::Joined => {
                warn!("Room '{}' is full", self.room_id);
                self.close(CloseReason::RoomFull).await;
            }
            phase => debug!("Ignoring room_full in {:?}", phase),
        }
    }

    /// Any `leave` relayed into our room ends the call, whatever the phase and
    /// even if the leaver never sent an offer.
    async fn on_remote_leave(&mut self, sender: Option<PeerId>) {
        match sender {
            Some(peer_id) => info!("Remote peer {} left room '{}'", peer_id, self.room_id),
            None => info!("Remote peer left room '{}'", self.room_id),
        }
        self.close(CloseReason::RemoteDisconnect).await;
    }

    async fn release_transport(&mut self) {
        if let Some(mut transport) = self.transport.take() {
            transport.close().await;
            info!("Transport session released");
        }
    }

    fn transport_mut(&mut self) -> Result<&mut C::Transport, NegotiationError> {
        let phase = self.phase;
        self.transport
            .as_mut()
            .ok_or(NegotiationError::MissingTransport(phase))
    }

    fn set_phase(&mut self, next: Phase) {
        if self.phase != next {
            debug!("Negotiation phase {:?} -> {:?}", self.phase, next);
            self.phase = next;
        }
    }
}

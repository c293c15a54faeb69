use crate::capture::MediaCapture;
use crate::channel::{SignalChannel, WsSignalChannel};
use crate::config::ClientConfig;
use crate::error::{ChannelError, NegotiationError, SessionError, TransportError};
use crate::negotiation::{NegotiationSession, Phase};
use crate::session::{SessionEvent, SessionHandle};
use crate::transport::{TransportConnector, TransportEvent};
use tandem_core::{CloseReason, RoomId, SignalEnvelope};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

/// Why the event loop stopped.
pub(super) enum LoopExit {
    Unmounted,
    ChannelDropped,
    /// The negotiation closed itself (room full, remote leave).
    Settled,
    Failed(SessionError),
}

/// Owns one call: the signaling channel, the negotiation state and through
/// it the transport session.
///
/// All inputs are handled one at a time by [`run`](Self::run). On exit the
/// transport and the channel are each released exactly once.
pub struct SessionController<S, C, M>
where
    S: SignalChannel,
    C: TransportConnector,
    M: MediaCapture,
{
    pub(super) channel: S,
    pub(super) channel_closed: bool,
    pub(super) negotiation: NegotiationSession<C, M>,
    transport_rx: mpsc::UnboundedReceiver<TransportEvent>,
    unmount_rx: oneshot::Receiver<()>,
    pub(super) events_tx: mpsc::UnboundedSender<SessionEvent>,
    pub(super) reported_phase: Phase,
    local_stream_reported: bool,
}

impl<C, M> SessionController<WsSignalChannel, C, M>
where
    C: TransportConnector,
    M: MediaCapture,
{
    /// Opens a WebSocket to the rendezvous service at `url` and builds a
    /// session on top of it.
    pub async fn connect(
        url: &str,
        room_id: RoomId,
        config: ClientConfig,
        connector: C,
        capture: M,
    ) -> Result<(Self, SessionHandle), ChannelError> {
        let channel = WsSignalChannel::connect(url).await?;
        Ok(Self::new(room_id, config, channel, connector, capture))
    }
}

impl<S, C, M> SessionController<S, C, M>
where
    S: SignalChannel,
    C: TransportConnector,
    M: MediaCapture,
{
    pub fn new(
        room_id: RoomId,
        config: ClientConfig,
        channel: S,
        connector: C,
        capture: M,
    ) -> (Self, SessionHandle) {
        let (transport_tx, transport_rx) = mpsc::unbounded_channel();
        let (unmount_tx, unmount_rx) = oneshot::channel();
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        let negotiation = NegotiationSession::new(room_id, config, connector, capture, transport_tx);
        let controller = Self {
            channel,
            channel_closed: false,
            negotiation,
            transport_rx,
            unmount_rx,
            events_tx,
            reported_phase: Phase::Idle,
            local_stream_reported: false,
        };

        (controller, SessionHandle::new(unmount_tx, events_rx))
    }

    pub fn negotiation(&self) -> &NegotiationSession<C, M> {
        &self.negotiation
    }

    /// Joins the room and drives the call until it closes, fails or the
    /// handle asks to leave.
    pub async fn run(mut self) -> Result<CloseReason, SessionError> {
        info!("Session for room '{}' started", self.negotiation.room_id());

        let join = self.negotiation.join_envelope();
        let exit = match self.channel.send(&join).await {
            Ok(()) => self.drive().await,
            Err(e) => LoopExit::Failed(e.into()),
        };

        let result = self.teardown(exit).await;
        info!("Session for room '{}' finished", self.negotiation.room_id());
        result
    }

    async fn drive(&mut self) -> LoopExit {
        loop {
            if self.negotiation.phase().is_terminal() {
                return LoopExit::Settled;
            }

            tokio::select! {
                biased;

                _ = &mut self.unmount_rx => return LoopExit::Unmounted,

                inbound = self.channel.recv() => {
                    let envelope = match inbound {
                        Some(Ok(envelope)) => envelope,
                        Some(Err(e)) if e.is_unknown_kind() => {
                            debug!("Ignoring envelope: {}", e);
                            continue;
                        }
                        Some(Err(e)) => {
                            warn!("Dropping malformed envelope: {}", e);
                            continue;
                        }
                        None => {
                            info!("Signaling channel dropped");
                            return LoopExit::ChannelDropped;
                        }
                    };
                    if let Some(exit) = self.handle_envelope(envelope).await {
                        return exit;
                    }
                }

                Some(event) = self.transport_rx.recv() => {
                    if let Some(exit) = self.handle_transport_event(event).await {
                        return exit;
                    }
                }
            }
        }
    }

    async fn handle_envelope(&mut self, envelope: SignalEnvelope) -> Option<LoopExit> {
        // A step still pending when the caller leaves is dropped, never applied.
        let result = tokio::select! {
            biased;
            _ = &mut self.unmount_rx => return Some(LoopExit::Unmounted),
            result = self.negotiation.on_envelope(envelope) => result,
        };
        self.report_progress();

        let outgoing = match result {
            Ok(outgoing) => outgoing,
            Err(e) => return Some(LoopExit::Failed(e.into())),
        };

        for envelope in outgoing {
            if let Err(e) = self.channel.send(&envelope).await {
                warn!("Failed to send {}: {}", envelope.kind(), e);
                return Some(LoopExit::ChannelDropped);
            }
        }
        None
    }

    async fn handle_transport_event(&mut self, event: TransportEvent) -> Option<LoopExit> {
        match event {
            TransportEvent::LocalCandidate(candidate) => {
                let envelope = self.negotiation.on_local_candidate(candidate)?;
                if let Err(e) = self.channel.send(&envelope).await {
                    warn!("Failed to send local candidate: {}", e);
                    return Some(LoopExit::ChannelDropped);
                }
                None
            }
            TransportEvent::RemoteTrack(track) => {
                info!("Remote {:?} track {} arrived", track.kind, track.id);
                self.emit(SessionEvent::RemoteTrack(track));
                None
            }
            TransportEvent::ConnectionFailed(reason) => {
                let error = NegotiationError::Transport(TransportError::ConnectionFailed(reason));
                Some(LoopExit::Failed(error.into()))
            }
        }
    }

    pub(super) fn report_progress(&mut self) {
        if !self.local_stream_reported {
            if let Some(stream) = self.negotiation.local_stream() {
                let stream = stream.clone();
                self.local_stream_reported = true;
                self.emit(SessionEvent::LocalStream(stream));
            }
        }

        let phase = self.negotiation.phase();
        if phase != self.reported_phase {
            self.reported_phase = phase;
            self.emit(SessionEvent::PhaseChanged(phase));
        }
    }

    pub(super) fn emit(&self, event: SessionEvent) {
        // The handle may already be gone.
        let _ = self.events_tx.send(event);
    }
}

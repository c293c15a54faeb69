mod webrtc_transport;

pub use webrtc_transport::*;

use crate::capture::{LocalStream, TrackKind};
use crate::error::TransportError;
use async_trait::async_trait;
use tandem_core::{IceCandidate, IceServerConfig, SessionDescription};
use tokio::sync::mpsc;

/// Events the transport raises on its own schedule.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    /// A local candidate was gathered and should go to the remote peer.
    LocalCandidate(IceCandidate),
    /// Remote media arrived.
    RemoteTrack(RemoteTrack),
    /// The connection is unrecoverable.
    ConnectionFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTrack {
    pub id: String,
    pub stream_id: String,
    pub kind: TrackKind,
}

/// The underlying peer transport session (offer/answer, candidates, media).
///
/// Only one operation is ever outstanding per session.
#[async_trait(?Send)]
pub trait PeerTransport {
    async fn create_offer(&mut self) -> Result<SessionDescription, TransportError>;

    async fn create_answer(&mut self) -> Result<SessionDescription, TransportError>;

    async fn set_local_description(
        &mut self,
        desc: SessionDescription,
    ) -> Result<(), TransportError>;

    async fn set_remote_description(
        &mut self,
        desc: SessionDescription,
    ) -> Result<(), TransportError>;

    /// Must only be called once a remote description is in place.
    async fn add_ice_candidate(&mut self, candidate: IceCandidate) -> Result<(), TransportError>;

    async fn attach_stream(&mut self, stream: &LocalStream) -> Result<(), TransportError>;

    async fn close(&mut self);
}

/// Creates transport sessions. Events of the created session are pushed
/// into `events`.
#[async_trait(?Send)]
pub trait TransportConnector {
    type Transport: PeerTransport;

    async fn connect(
        &self,
        ice_servers: &[IceServerConfig],
        events: mpsc::UnboundedSender<TransportEvent>,
    ) -> Result<Self::Transport, TransportError>;
}

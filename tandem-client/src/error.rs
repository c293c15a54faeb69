use thiserror::Error;

/// Failure inside the peer transport: description or candidate application,
/// offer/answer creation, or the connection itself.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("webrtc: {0}")]
    WebRtc(#[from] webrtc::Error),

    #[error("transport rejected the operation: {0}")]
    Rejected(String),

    #[error("connection failed: {0}")]
    ConnectionFailed(String),
}

/// Local media could not be acquired. Never fatal for negotiation.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("no capture device available")]
    NoDevice,

    #[error("capture permission denied")]
    PermissionDenied,
}

#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("websocket: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("signaling channel is closed")]
    Closed,
}

#[derive(Debug, Error)]
pub enum NegotiationError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A transition needed the transport session before one was created.
    #[error("no transport session in phase {0:?}")]
    MissingTransport(crate::negotiation::Phase),
}

/// Why [`SessionController::run`](crate::SessionController::run) gave up.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("negotiation failed: {0}")]
    Negotiation(#[from] NegotiationError),

    #[error("signaling channel failed: {0}")]
    Channel(#[from] ChannelError),
}

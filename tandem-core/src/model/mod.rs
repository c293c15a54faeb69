mod close;
mod envelope;
mod ice;
mod peer;
mod room;

pub use close::CloseReason;
pub use envelope::{
    IceCandidate, SdpType, SessionDescription, SignalEnvelope, SignalKind, SignalPayload,
};
pub use ice::IceServerConfig;
pub use peer::PeerId;
pub use room::RoomId;

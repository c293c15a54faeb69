use crate::model::{SdpType, SignalKind};
use thiserror::Error;

/// A signaling frame that could not be turned into an envelope.
///
/// Receivers log and drop the single message; the session carries on.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed signal frame: {0}")]
    Frame(#[source] serde_json::Error),

    #[error("unknown signal kind '{0}'")]
    UnknownKind(String),

    #[error("invalid {kind} payload: {source}")]
    Payload {
        kind: SignalKind,
        #[source]
        source: serde_json::Error,
    },

    #[error("{kind} envelope carries sdpType '{found}'")]
    SdpTypeMismatch { kind: SignalKind, found: SdpType },

    #[error("room id is empty")]
    EmptyRoom,
}

/// A room name that is empty after trimming.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("room name must not be blank")]
pub struct BlankRoomId;

impl DecodeError {
    /// Unknown kinds are tolerated so that the protocol can grow additively.
    pub fn is_unknown_kind(&self) -> bool {
        matches!(self, DecodeError::UnknownKind(_))
    }
}

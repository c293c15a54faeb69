use crate::model::peer::PeerId;
use crate::model::room::RoomId;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SdpType {
    Offer,
    Answer,
}

impl fmt::Display for SdpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SdpType::Offer => f.write_str("offer"),
            SdpType::Answer => f.write_str("answer"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDescription {
    pub sdp_type: SdpType,
    pub sdp: String,
}

impl SessionDescription {
    pub fn offer(sdp: impl Into<String>) -> Self {
        Self {
            sdp_type: SdpType::Offer,
            sdp: sdp.into(),
        }
    }

    pub fn answer(sdp: impl Into<String>) -> Self {
        Self {
            sdp_type: SdpType::Answer,
            sdp: sdp.into(),
        }
    }
}

/// Network path descriptor, shaped like the browser's `RTCIceCandidateInit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IceCandidate {
    pub candidate: String,
    #[serde(default)]
    pub sdp_mid: Option<String>,
    #[serde(default, rename = "sdpMLineIndex")]
    pub sdp_m_line_index: Option<u16>,
    #[serde(default)]
    pub username_fragment: Option<String>,
}

impl IceCandidate {
    pub fn new(candidate: impl Into<String>) -> Self {
        Self {
            candidate: candidate.into(),
            sdp_mid: None,
            sdp_m_line_index: None,
            username_fragment: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    Join,
    Roster,
    RoomFull,
    Offer,
    Answer,
    Candidate,
    Leave,
}

impl SignalKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SignalKind::Join => "join",
            SignalKind::Roster => "roster",
            SignalKind::RoomFull => "room_full",
            SignalKind::Offer => "offer",
            SignalKind::Answer => "answer",
            SignalKind::Candidate => "candidate",
            SignalKind::Leave => "leave",
        }
    }

    pub fn parse(kind: &str) -> Option<Self> {
        match kind {
            "join" => Some(SignalKind::Join),
            "roster" => Some(SignalKind::Roster),
            "room_full" => Some(SignalKind::RoomFull),
            "offer" => Some(SignalKind::Offer),
            "answer" => Some(SignalKind::Answer),
            "candidate" => Some(SignalKind::Candidate),
            "leave" => Some(SignalKind::Leave),
            _ => None,
        }
    }

    /// Kinds the rendezvous service forwards between room members without
    /// looking inside.
    pub fn is_relayable(self) -> bool {
        matches!(
            self,
            SignalKind::Offer | SignalKind::Answer | SignalKind::Candidate
        )
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalPayload {
    Join,
    Roster { members: Vec<PeerId> },
    RoomFull,
    Offer { sdp: String },
    Answer { sdp: String },
    Candidate(IceCandidate),
    Leave,
}

impl SignalPayload {
    pub fn kind(&self) -> SignalKind {
        match self {
            SignalPayload::Join => SignalKind::Join,
            SignalPayload::Roster { .. } => SignalKind::Roster,
            SignalPayload::RoomFull => SignalKind::RoomFull,
            SignalPayload::Offer { .. } => SignalKind::Offer,
            SignalPayload::Answer { .. } => SignalKind::Answer,
            SignalPayload::Candidate(_) => SignalKind::Candidate,
            SignalPayload::Leave => SignalKind::Leave,
        }
    }
}

/// One signaling message. Immutable once built; `with_sender` produces a
/// stamped copy for relaying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalEnvelope {
    room_id: RoomId,
    sender: Option<PeerId>,
    payload: SignalPayload,
}

impl SignalEnvelope {
    pub fn new(room_id: RoomId, payload: SignalPayload) -> Self {
        Self {
            room_id,
            sender: None,
            payload,
        }
    }

    pub fn join(room_id: RoomId) -> Self {
        Self::new(room_id, SignalPayload::Join)
    }

    pub fn roster(room_id: RoomId, members: Vec<PeerId>) -> Self {
        Self::new(room_id, SignalPayload::Roster { members })
    }

    pub fn room_full(room_id: RoomId) -> Self {
        Self::new(room_id, SignalPayload::RoomFull)
    }

    pub fn offer(room_id: RoomId, sdp: impl Into<String>) -> Self {
        Self::new(room_id, SignalPayload::Offer { sdp: sdp.into() })
    }

    pub fn answer(room_id: RoomId, sdp: impl Into<String>) -> Self {
        Self::new(room_id, SignalPayload::Answer { sdp: sdp.into() })
    }

    /// Wraps a local description into the matching offer/answer envelope.
    pub fn description(room_id: RoomId, desc: SessionDescription) -> Self {
        match desc.sdp_type {
            SdpType::Offer => Self::offer(room_id, desc.sdp),
            SdpType::Answer => Self::answer(room_id, desc.sdp),
        }
    }

    pub fn candidate(room_id: RoomId, candidate: IceCandidate) -> Self {
        Self::new(room_id, SignalPayload::Candidate(candidate))
    }

    pub fn leave(room_id: RoomId) -> Self {
        Self::new(room_id, SignalPayload::Leave)
    }

    pub fn with_sender(mut self, sender: PeerId) -> Self {
        self.sender = Some(sender);
        self
    }

    pub fn kind(&self) -> SignalKind {
        self.payload.kind()
    }

    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    pub fn sender(&self) -> Option<PeerId> {
        self.sender
    }

    pub fn payload(&self) -> &SignalPayload {
        &self.payload
    }

    pub fn into_payload(self) -> SignalPayload {
        self.payload
    }
}

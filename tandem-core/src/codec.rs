//! JSON text framing for [`SignalEnvelope`].
//!
//! Every frame is an object with a `kind` discriminant, the `roomId`, an
//! optional `senderPeerId` stamped by the rendezvous service and a
//! kind-specific `payload`. The `kind` field alone decides how the payload
//! is read.

use crate::error::DecodeError;
use crate::model::{
    IceCandidate, PeerId, RoomId, SdpType, SignalEnvelope, SignalKind, SignalPayload,
};
use serde::Deserialize;
use serde_json::{Map, Value, json};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireFrame {
    kind: String,
    room_id: String,
    #[serde(default)]
    sender_peer_id: Option<PeerId>,
    #[serde(default)]
    payload: Option<Value>,
}

#[derive(Deserialize)]
struct EmptyPayload {}

#[derive(Deserialize)]
struct RosterPayload {
    members: Vec<PeerId>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DescriptionPayload {
    sdp_type: SdpType,
    sdp: String,
}

#[derive(Deserialize)]
struct CandidatePayload {
    candidate: IceCandidate,
}

pub fn encode(envelope: &SignalEnvelope) -> String {
    let mut frame = Map::new();
    frame.insert("kind".into(), Value::from(envelope.kind().as_str()));
    frame.insert("roomId".into(), Value::from(envelope.room_id().as_str()));
    if let Some(sender) = envelope.sender() {
        frame.insert("senderPeerId".into(), Value::from(sender.to_string()));
    }
    frame.insert("payload".into(), payload_value(envelope.payload()));

    Value::Object(frame).to_string()
}

fn payload_value(payload: &SignalPayload) -> Value {
    match payload {
        SignalPayload::Join | SignalPayload::RoomFull | SignalPayload::Leave => json!({}),
        SignalPayload::Roster { members } => {
            let members: Vec<String> = members.iter().map(ToString::to_string).collect();
            json!({ "members": members })
        }
        SignalPayload::Offer { sdp } => json!({ "sdpType": "offer", "sdp": sdp }),
        SignalPayload::Answer { sdp } => json!({ "sdpType": "answer", "sdp": sdp }),
        SignalPayload::Candidate(c) => json!({
            "candidate": {
                "candidate": c.candidate,
                "sdpMid": c.sdp_mid,
                "sdpMLineIndex": c.sdp_m_line_index,
                "usernameFragment": c.username_fragment,
            }
        }),
    }
}

pub fn decode(text: &str) -> Result<SignalEnvelope, DecodeError> {
    let frame: WireFrame = serde_json::from_str(text).map_err(DecodeError::Frame)?;

    let kind = SignalKind::parse(&frame.kind).ok_or(DecodeError::UnknownKind(frame.kind))?;

    let room_id = RoomId::new(frame.room_id).map_err(|_| DecodeError::EmptyRoom)?;

    let payload = frame.payload.unwrap_or_else(|| json!({}));
    let payload = decode_payload(kind, payload)?;

    let envelope = SignalEnvelope::new(room_id, payload);
    Ok(match frame.sender_peer_id {
        Some(sender) => envelope.with_sender(sender),
        None => envelope,
    })
}

fn decode_payload(kind: SignalKind, value: Value) -> Result<SignalPayload, DecodeError> {
    let invalid = |source| DecodeError::Payload { kind, source };

    match kind {
        SignalKind::Join | SignalKind::RoomFull | SignalKind::Leave => {
            serde_json::from_value::<EmptyPayload>(value).map_err(invalid)?;
            Ok(match kind {
                SignalKind::Join => SignalPayload::Join,
                SignalKind::RoomFull => SignalPayload::RoomFull,
                _ => SignalPayload::Leave,
            })
        }
        SignalKind::Roster => {
            let roster: RosterPayload = serde_json::from_value(value).map_err(invalid)?;
            Ok(SignalPayload::Roster {
                members: roster.members,
            })
        }
        SignalKind::Offer | SignalKind::Answer => {
            let desc: DescriptionPayload = serde_json::from_value(value).map_err(invalid)?;
            match (kind, desc.sdp_type) {
                (SignalKind::Offer, SdpType::Offer) => Ok(SignalPayload::Offer { sdp: desc.sdp }),
                (SignalKind::Answer, SdpType::Answer) => {
                    Ok(SignalPayload::Answer { sdp: desc.sdp })
                }
                (_, found) => Err(DecodeError::SdpTypeMismatch { kind, found }),
            }
        }
        SignalKind::Candidate => {
            let payload: CandidatePayload = serde_json::from_value(value).map_err(invalid)?;
            Ok(SignalPayload::Candidate(payload.candidate))
        }
    }
}

use std::fmt;

/// Why a signaling channel was closed.
///
/// Advisory only: the code is passed to the channel close frame and logged,
/// the protocol never branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CloseReason {
    /// Unmount, navigation or an explicit leave.
    Normal,
    RoomFull,
    ProtocolError,
    RemoteDisconnect,
}

impl CloseReason {
    pub fn code(self) -> u16 {
        match self {
            CloseReason::Normal => 1000,
            CloseReason::RoomFull => 4001,
            CloseReason::ProtocolError => 4002,
            CloseReason::RemoteDisconnect => 4003,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            CloseReason::Normal => "session ended",
            CloseReason::RoomFull => "room is full",
            CloseReason::ProtocolError => "negotiation failed",
            CloseReason::RemoteDisconnect => "remote peer disconnected",
        }
    }

    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            1000 => Some(CloseReason::Normal),
            4001 => Some(CloseReason::RoomFull),
            4002 => Some(CloseReason::ProtocolError),
            4003 => Some(CloseReason::RemoteDisconnect),
            _ => None,
        }
    }
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.description(), self.code())
    }
}

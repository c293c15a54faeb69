use crate::error::BlankRoomId;
use std::fmt;

/// Opaque rendezvous room name, stable for the lifetime of a call.
///
/// Never blank: construction rejects names that are empty after trimming.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(name: impl Into<String>) -> Result<Self, BlankRoomId> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(BlankRoomId);
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for RoomId {
    type Error = BlankRoomId;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl TryFrom<String> for RoomId {
    type Error = BlankRoomId;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

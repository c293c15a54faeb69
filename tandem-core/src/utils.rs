pub const DEFAULT_STUN_ADDR: &str = "stun:stun.l.google.com:19302";
pub const DEFAULT_STUN_ADDR_2: &str = "stun:stun1.l.google.com:19302";

/// Default capacity of a rendezvous room: one offerer and one answerer.
pub const DEFAULT_ROOM_CAPACITY: usize = 2;

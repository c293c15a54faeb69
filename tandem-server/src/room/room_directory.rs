use crate::room::room_membership::{JoinOutcome, RoomMembership};
use dashmap::DashMap;
use std::collections::HashSet;
use tandem_core::{PeerId, RoomId};
use tracing::{debug, info, warn};

/// Which peers are in which room.
///
/// Every mutation of a room happens under that room's map entry, so the
/// capacity check and the insertion are one step. Rooms are independent of
/// each other and reaped once empty.
pub struct RoomDirectory {
    rooms: DashMap<RoomId, RoomMembership>,
    peer_rooms: DashMap<PeerId, HashSet<RoomId>>,
    capacity: usize,
}

impl RoomDirectory {
    pub fn new(capacity: usize) -> Self {
        Self {
            rooms: DashMap::new(),
            peer_rooms: DashMap::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn join(&self, room_id: &RoomId, peer_id: PeerId) -> JoinOutcome {
        let outcome = {
            let mut membership = self.rooms.entry(room_id.clone()).or_default();

            if membership.contains(&peer_id) {
                debug!("Peer {} re-joined room '{}'", peer_id, room_id);
                JoinOutcome::Joined {
                    roster: membership.others(&peer_id),
                }
            } else if membership.len() >= self.capacity {
                JoinOutcome::RoomFull
            } else {
                let roster = membership.others(&peer_id);
                membership.insert(peer_id);
                // Indexed while the room entry is still locked.
                self.peer_rooms
                    .entry(peer_id)
                    .or_default()
                    .insert(room_id.clone());
                JoinOutcome::Joined { roster }
            }
        };

        match &outcome {
            JoinOutcome::Joined { roster } => {
                info!(
                    "Peer {} joined room '{}' ({} already present)",
                    peer_id,
                    room_id,
                    roster.len()
                );
            }
            JoinOutcome::RoomFull => {
                warn!(
                    "Peer {} rejected: room '{}' is at capacity {}",
                    peer_id, room_id, self.capacity
                );
            }
        }

        outcome
    }

    /// Removes `peer_id` from the room. Leaving a room one is not in is a no-op.
    pub fn leave(&self, room_id: &RoomId, peer_id: &PeerId) -> bool {
        let removed = self.remove_member(room_id, peer_id);

        if removed {
            if let Some(mut rooms) = self.peer_rooms.get_mut(peer_id) {
                rooms.remove(room_id);
            }
            self.peer_rooms.remove_if(peer_id, |_, rooms| rooms.is_empty());
            info!("Peer {} left room '{}'", peer_id, room_id);
        }

        removed
    }

    /// Drops the peer from every room it belongs to and returns those rooms.
    pub fn disconnect(&self, peer_id: &PeerId) -> Vec<RoomId> {
        let Some((_, rooms)) = self.peer_rooms.remove(peer_id) else {
            return Vec::new();
        };

        let left: Vec<RoomId> = rooms
            .into_iter()
            .filter(|room_id| self.remove_member(room_id, peer_id))
            .collect();

        if !left.is_empty() {
            info!("Peer {} disconnected from {} room(s)", peer_id, left.len());
        }
        left
    }

    pub fn members_of(&self, room_id: &RoomId, asking: &PeerId) -> Vec<PeerId> {
        self.rooms
            .get(room_id)
            .map(|membership| membership.others(asking))
            .unwrap_or_default()
    }

    pub fn is_member(&self, room_id: &RoomId, peer_id: &PeerId) -> bool {
        self.rooms
            .get(room_id)
            .is_some_and(|membership| membership.contains(peer_id))
    }

    pub fn rooms_of(&self, peer_id: &PeerId) -> Vec<RoomId> {
        self.peer_rooms
            .get(peer_id)
            .map(|rooms| rooms.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    fn remove_member(&self, room_id: &RoomId, peer_id: &PeerId) -> bool {
        let removed = self
            .rooms
            .get_mut(room_id)
            .map(|mut membership| membership.remove(peer_id))
            .unwrap_or(false);

        self.rooms
            .remove_if(room_id, |_, membership| membership.is_empty());
        removed
    }
}

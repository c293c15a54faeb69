use tandem_core::PeerId;

/// Peers currently joined to one room, in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomMembership {
    members: Vec<PeerId>,
}

impl RoomMembership {
    pub fn contains(&self, peer_id: &PeerId) -> bool {
        self.members.contains(peer_id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Everyone except `peer_id`.
    pub fn others(&self, peer_id: &PeerId) -> Vec<PeerId> {
        self.members
            .iter()
            .filter(|member| *member != peer_id)
            .copied()
            .collect()
    }

    pub(crate) fn insert(&mut self, peer_id: PeerId) {
        if !self.contains(&peer_id) {
            self.members.push(peer_id);
        }
    }

    pub(crate) fn remove(&mut self, peer_id: &PeerId) -> bool {
        let before = self.members.len();
        self.members.retain(|member| member != peer_id);
        self.members.len() != before
    }
}

/// Result of a join attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    /// The peer is a member. `roster` lists the other members as they were
    /// at the moment of joining.
    Joined { roster: Vec<PeerId> },
    /// Capacity reached; membership was left untouched.
    RoomFull,
}

use tandem_core::PeerId;

/// Glare tie-break: only the peer that finds someone already in the room
/// creates the offer. The first arrival waits for it.
///
/// Relies on the service reporting the roster atomically with the join.
pub fn should_originate_offer(roster: &[PeerId]) -> bool {
    !roster.is_empty()
}

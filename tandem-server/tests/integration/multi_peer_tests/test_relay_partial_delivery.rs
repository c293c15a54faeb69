use std::sync::Arc;
use tandem_core::{IceCandidate, PeerId, RoomId, SignalEnvelope};
use tandem_server::{RelayRouter, RoomDirectory};

use crate::integration::init_tracing;
use crate::utils::MockSignalingOutput;

fn setup(capacity: usize) -> (Arc<RoomDirectory>, MockSignalingOutput, RelayRouter) {
    let directory = Arc::new(RoomDirectory::new(capacity));
    let (output, _rx) = MockSignalingOutput::new();
    let router = RelayRouter::new(directory.clone(), Arc::new(output.clone()));
    (directory, output, router)
}

#[tokio::test]
async fn test_one_unreachable_recipient_does_not_block_others() {
    init_tracing();

    let (directory, output, router) = setup(4);
    let room = RoomId::new("r1").unwrap();
    let peers: Vec<PeerId> = (0..4).map(|_| PeerId::new()).collect();
    for peer in &peers {
        directory.join(&room, *peer);
    }
    output.make_unreachable(peers[1]);

    let envelope = SignalEnvelope::candidate(room.clone(), IceCandidate::new("candidate:x"));
    let delivered = router.relay(peers[0], envelope.clone()).await;

    assert_eq!(delivered, 2);
    assert!(output.delivered_to(&peers[1]).await.is_empty());
    for peer in &peers[2..] {
        assert_eq!(
            output.delivered_to(peer).await,
            vec![envelope.clone().with_sender(peers[0])]
        );
    }
    assert!(output.delivered_to(&peers[0]).await.is_empty());
}

#[tokio::test]
async fn test_relay_requires_membership_and_relayable_kind() {
    init_tracing();

    let (directory, output, router) = setup(2);
    let room = RoomId::new("r1").unwrap();
    let (a, b, outsider) = (PeerId::new(), PeerId::new(), PeerId::new());
    directory.join(&room, a);
    directory.join(&room, b);

    let from_outsider = router
        .relay(outsider, SignalEnvelope::offer(room.clone(), "sneaky"))
        .await;
    let join_relay = router.relay(a, SignalEnvelope::join(room.clone())).await;
    let roster_relay = router
        .relay(a, SignalEnvelope::roster(room.clone(), vec![a]))
        .await;

    assert_eq!(from_outsider, 0);
    assert_eq!(join_relay, 0);
    assert_eq!(roster_relay, 0);
    assert_eq!(output.delivery_count().await, 0);
}

#[tokio::test]
async fn test_relay_passes_payload_through_untouched() {
    init_tracing();

    let (directory, output, router) = setup(2);
    let room = RoomId::new("r1").unwrap();
    let (a, b) = (PeerId::new(), PeerId::new());
    directory.join(&room, a);
    directory.join(&room, b);

    let odd_sdp = "not really sdp \u{1F600} but the router does not care";
    let delivered = router
        .relay(a, SignalEnvelope::answer(room.clone(), odd_sdp))
        .await;

    assert_eq!(delivered, 1);
    assert_eq!(
        output.delivered_to(&b).await,
        vec![SignalEnvelope::answer(room, odd_sdp).with_sender(a)]
    );
}

#[tokio::test]
async fn test_announce_leave_reaches_remaining_members() {
    init_tracing();

    let (directory, output, router) = setup(2);
    let room = RoomId::new("r1").unwrap();
    let (a, b) = (PeerId::new(), PeerId::new());
    directory.join(&room, a);
    directory.join(&room, b);

    directory.leave(&room, &b);
    let delivered = router.announce_leave(&room, b).await;

    assert_eq!(delivered, 1);
    assert_eq!(
        output.delivered_to(&a).await,
        vec![SignalEnvelope::leave(room).with_sender(b)]
    );
}

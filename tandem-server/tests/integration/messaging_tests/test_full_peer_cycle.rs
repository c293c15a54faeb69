use tandem_core::{IceCandidate, PeerId, RoomId, SignalEnvelope, SignalKind, SignalPayload};
use tandem_server::ServerConfig;

use crate::integration::init_tracing;
use crate::utils::{TestClient, start_test_server};

#[tokio::test]
async fn test_full_peer_cycle() {
    init_tracing();

    let (addr, _service) = start_test_server(ServerConfig::default())
        .await
        .expect("Failed to start server");
    let room = RoomId::new("r1").unwrap();

    let mut a = TestClient::connect(addr).await.expect("connect A");
    let mut b = TestClient::connect(addr).await.expect("connect B");

    let a_roster = a.join("r1").await.expect("A join");
    assert_eq!(a_roster, SignalEnvelope::roster(room.clone(), vec![]));

    let b_roster = b.join("r1").await.expect("B join");
    let SignalPayload::Roster { members } = b_roster.payload() else {
        panic!("expected roster, got {:?}", b_roster);
    };
    assert_eq!(members.len(), 1);
    let a_id: PeerId = members[0];

    // B arrived second, so B offers.
    b.send(&SignalEnvelope::offer(room.clone(), "<sdp-B>"))
        .await
        .expect("send offer");
    let offer = a.recv().await.expect("A receives offer");
    assert_eq!(offer.kind(), SignalKind::Offer);
    assert_eq!(offer.payload(), &SignalPayload::Offer { sdp: "<sdp-B>".into() });
    let b_id = offer.sender().expect("relayed offer must carry the sender");
    assert_ne!(a_id, b_id);

    a.send(&SignalEnvelope::answer(room.clone(), "<sdp-A>"))
        .await
        .expect("send answer");
    let answer = b.recv().await.expect("B receives answer");
    assert_eq!(
        answer,
        SignalEnvelope::answer(room.clone(), "<sdp-A>").with_sender(a_id)
    );

    let candidate = IceCandidate {
        candidate: "candidate:1 1 udp 2122260223 192.168.1.4 54400 typ host".into(),
        sdp_mid: Some("0".into()),
        sdp_m_line_index: Some(0),
        username_fragment: Some("abcd".into()),
    };
    a.send(&SignalEnvelope::candidate(room.clone(), candidate.clone()))
        .await
        .expect("send candidate");
    let relayed = b.recv().await.expect("B receives candidate");
    assert_eq!(relayed.payload(), &SignalPayload::Candidate(candidate));
    assert_eq!(relayed.sender(), Some(a_id));

    // Relay never echoes to the sender.
    assert!(a.expect_silence().await);

    b.send(&SignalEnvelope::leave(room.clone()))
        .await
        .expect("send leave");
    let leave = a.recv().await.expect("A hears leave");
    assert_eq!(leave, SignalEnvelope::leave(room).with_sender(b_id));

    a.close().await.expect("close A");
    b.close().await.expect("close B");
}

use tandem_core::{RoomId, SignalEnvelope, SignalKind};
use tandem_server::ServerConfig;

use crate::integration::init_tracing;
use crate::utils::{SIGNAL_TIMEOUT_MS, TestClient, start_test_server, wait_until};

/// Peers that send `join` and vanish before reading the reply must not keep
/// a seat once their socket is gone.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_abrupt_drop_after_join_frees_seat() {
    init_tracing();

    let (addr, service) = start_test_server(ServerConfig::default())
        .await
        .expect("Failed to start server");
    let room = RoomId::new("r1").unwrap();

    for _ in 0..20 {
        let mut ghost = TestClient::connect(addr).await.expect("connect");
        ghost
            .send(&SignalEnvelope::join(room.clone()))
            .await
            .expect("send join");
        drop(ghost);
    }

    let directory = service.directory().clone();
    assert!(
        wait_until(
            || directory.room_count() == 0 && service.connected_peers() == 0,
            SIGNAL_TIMEOUT_MS
        )
        .await,
        "dropped peers still hold seats"
    );

    // Both seats are free again.
    let mut a = TestClient::connect(addr).await.expect("connect A");
    let mut b = TestClient::connect(addr).await.expect("connect B");
    let a_reply = a.join("r1").await.expect("A join");
    let b_reply = b.join("r1").await.expect("B join");
    assert_eq!(a_reply, SignalEnvelope::roster(room.clone(), vec![]));
    assert_eq!(b_reply.kind(), SignalKind::Roster);

    a.close().await.expect("close A");
    b.close().await.expect("close B");
}

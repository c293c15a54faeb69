use tandem_client::{Phase, Role, TransportEvent};
use tandem_core::{PeerId, SdpType, SignalEnvelope, SignalPayload};

use crate::integration::init_tracing;
use crate::utils::{MockCapture, MockConnector, TransportCall, candidate, mock_session, room};

#[tokio::test]
async fn test_first_arrival_waits_for_offer() {
    init_tracing();
    let connector = MockConnector::new("A");
    let capture = MockCapture::new();
    let (mut session, _events) = mock_session(&connector, &capture);

    let out = session
        .on_envelope(SignalEnvelope::roster(room(), vec![]))
        .await
        .expect("roster");

    assert!(out.is_empty());
    assert_eq!(session.phase(), Phase::Joined);
    assert_eq!(session.role(), Role::Undetermined);
    assert_eq!(connector.connect_count(), 1);
    assert_eq!(capture.call_count(), 1);
    assert_eq!(session.local_stream(), Some(&MockCapture::stream()));
    assert_eq!(
        connector.calls(),
        vec![TransportCall::Attach("local-stream".into())]
    );
}

#[tokio::test]
async fn test_second_arrival_originates_offer() {
    init_tracing();
    let connector = MockConnector::new("B");
    let capture = MockCapture::new();
    let (mut session, _events) = mock_session(&connector, &capture);

    let out = session
        .on_envelope(SignalEnvelope::roster(room(), vec![PeerId::new()]))
        .await
        .expect("roster");

    assert_eq!(out, vec![SignalEnvelope::offer(room(), "offer-from-B")]);
    assert_eq!(session.phase(), Phase::Offering);
    assert_eq!(session.role(), Role::Offerer);
    assert_eq!(
        connector.calls(),
        vec![
            TransportCall::Attach("local-stream".into()),
            TransportCall::CreateOffer,
            TransportCall::SetLocal(SdpType::Offer),
        ]
    );
}

#[tokio::test]
async fn test_capture_failure_still_offers() {
    init_tracing();
    let connector = MockConnector::new("B");
    let capture = MockCapture::denied();
    let (mut session, _events) = mock_session(&connector, &capture);

    let out = session
        .on_envelope(SignalEnvelope::roster(room(), vec![PeerId::new()]))
        .await
        .expect("capture failure must not abort negotiation");

    assert_eq!(out.len(), 1);
    assert!(matches!(out[0].payload(), SignalPayload::Offer { .. }));
    assert_eq!(capture.call_count(), 1);
    assert!(session.local_stream().is_none());
    assert_eq!(
        connector.count(|c| matches!(c, TransportCall::Attach(_))),
        0
    );
}

#[tokio::test]
async fn test_answer_moves_offerer_to_connected() {
    init_tracing();
    let connector = MockConnector::new("B");
    let capture = MockCapture::new();
    let (mut session, _events) = mock_session(&connector, &capture);

    session
        .on_envelope(SignalEnvelope::roster(room(), vec![PeerId::new()]))
        .await
        .expect("roster");
    let out = session
        .on_envelope(SignalEnvelope::answer(room(), "answer-from-A"))
        .await
        .expect("answer");

    assert!(out.is_empty());
    assert_eq!(session.phase(), Phase::Connected);
    assert_eq!(
        connector.calls().last(),
        Some(&TransportCall::SetRemote(SdpType::Answer))
    );
}

#[tokio::test]
async fn test_local_candidates_follow_session_liveness() {
    init_tracing();
    let connector = MockConnector::new("B");
    let capture = MockCapture::new();
    let (mut session, mut events) = mock_session(&connector, &capture);

    assert_eq!(session.on_local_candidate(candidate(1)), None);

    session
        .on_envelope(SignalEnvelope::roster(room(), vec![PeerId::new()]))
        .await
        .expect("roster");

    // The transport hands candidates to the event sink it was built with.
    assert!(connector.emit(TransportEvent::LocalCandidate(candidate(2))));
    let Some(TransportEvent::LocalCandidate(gathered)) = events.recv().await else {
        panic!("expected a local candidate event");
    };

    assert_eq!(
        session.on_local_candidate(gathered),
        Some(SignalEnvelope::candidate(room(), candidate(2)))
    );
}

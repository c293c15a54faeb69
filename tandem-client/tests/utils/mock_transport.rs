use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};
use tandem_client::{
    LocalStream, PeerTransport, TransportConnector, TransportError, TransportEvent,
};
use tandem_core::{IceCandidate, IceServerConfig, SdpType, SessionDescription};
use tokio::sync::mpsc;

/// One call observed on a [`MockTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportCall {
    CreateOffer,
    CreateAnswer,
    SetLocal(SdpType),
    SetRemote(SdpType),
    AddCandidate(String),
    Attach(String),
    Close,
}

#[derive(Default)]
struct MockTransportState {
    label: String,
    calls: Vec<TransportCall>,
    connects: usize,
    remote_description_set: bool,
    premature_candidates: usize,
    fail_set_remote: bool,
    fail_connect: bool,
    stall_create_offer: bool,
    events: Option<mpsc::UnboundedSender<TransportEvent>>,
}

/// Connector whose transports record every call in a shared log.
#[derive(Clone, Default)]
pub struct MockConnector {
    state: Arc<Mutex<MockTransportState>>,
}

impl MockConnector {
    /// `label` ends up in the generated SDP, e.g. `offer-from-B`.
    pub fn new(label: &str) -> Self {
        let connector = Self::default();
        connector.state().label = label.to_owned();
        connector
    }

    fn state(&self) -> MutexGuard<'_, MockTransportState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn fail_set_remote(self) -> Self {
        self.state().fail_set_remote = true;
        self
    }

    pub fn fail_connect(self) -> Self {
        self.state().fail_connect = true;
        self
    }

    /// `create_offer` never completes.
    pub fn stall_create_offer(self) -> Self {
        self.state().stall_create_offer = true;
        self
    }

    pub fn offer_sdp(&self) -> String {
        format!("offer-from-{}", self.state().label)
    }

    pub fn answer_sdp(&self) -> String {
        format!("answer-from-{}", self.state().label)
    }

    pub fn calls(&self) -> Vec<TransportCall> {
        self.state().calls.clone()
    }

    pub fn connect_count(&self) -> usize {
        self.state().connects
    }

    pub fn close_count(&self) -> usize {
        self.count(|call| *call == TransportCall::Close)
    }

    pub fn count(&self, predicate: impl Fn(&TransportCall) -> bool) -> usize {
        self.state().calls.iter().filter(|c| predicate(c)).count()
    }

    /// Candidates handed to `add_ice_candidate`, in call order.
    pub fn added_candidates(&self) -> Vec<String> {
        self.state()
            .calls
            .iter()
            .filter_map(|call| match call {
                TransportCall::AddCandidate(c) => Some(c.clone()),
                _ => None,
            })
            .collect()
    }

    /// Candidates applied before any remote description.
    pub fn premature_candidates(&self) -> usize {
        self.state().premature_candidates
    }

    /// Raise a transport event as the real stack would from a callback.
    pub fn emit(&self, event: TransportEvent) -> bool {
        match &self.state().events {
            Some(tx) => tx.send(event).is_ok(),
            None => false,
        }
    }
}

#[async_trait(?Send)]
impl TransportConnector for MockConnector {
    type Transport = MockTransport;

    async fn connect(
        &self,
        _ice_servers: &[IceServerConfig],
        events: mpsc::UnboundedSender<TransportEvent>,
    ) -> Result<MockTransport, TransportError> {
        let mut state = self.state();
        if state.fail_connect {
            return Err(TransportError::ConnectionFailed("mock connect".into()));
        }
        state.connects += 1;
        state.events = Some(events);
        Ok(MockTransport {
            state: self.state.clone(),
        })
    }
}

pub struct MockTransport {
    state: Arc<Mutex<MockTransportState>>,
}

impl MockTransport {
    fn state(&self) -> MutexGuard<'_, MockTransportState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record(&self, call: TransportCall) {
        self.state().calls.push(call);
    }
}

#[async_trait(?Send)]
impl PeerTransport for MockTransport {
    async fn create_offer(&mut self) -> Result<SessionDescription, TransportError> {
        self.record(TransportCall::CreateOffer);
        if self.state().stall_create_offer {
            std::future::pending::<()>().await;
        }
        let sdp = format!("offer-from-{}", self.state().label);
        Ok(SessionDescription::offer(sdp))
    }

    async fn create_answer(&mut self) -> Result<SessionDescription, TransportError> {
        self.record(TransportCall::CreateAnswer);
        let sdp = format!("answer-from-{}", self.state().label);
        Ok(SessionDescription::answer(sdp))
    }

    async fn set_local_description(
        &mut self,
        desc: SessionDescription,
    ) -> Result<(), TransportError> {
        self.record(TransportCall::SetLocal(desc.sdp_type));
        Ok(())
    }

    async fn set_remote_description(
        &mut self,
        desc: SessionDescription,
    ) -> Result<(), TransportError> {
        self.record(TransportCall::SetRemote(desc.sdp_type));
        let mut state = self.state();
        if state.fail_set_remote {
            return Err(TransportError::Rejected("mock remote description".into()));
        }
        state.remote_description_set = true;
        Ok(())
    }

    async fn add_ice_candidate(&mut self, candidate: IceCandidate) -> Result<(), TransportError> {
        let mut state = self.state();
        state
            .calls
            .push(TransportCall::AddCandidate(candidate.candidate));
        if !state.remote_description_set {
            state.premature_candidates += 1;
            return Err(TransportError::Rejected("no remote description".into()));
        }
        Ok(())
    }

    async fn attach_stream(&mut self, stream: &LocalStream) -> Result<(), TransportError> {
        self.record(TransportCall::Attach(stream.id.clone()));
        Ok(())
    }

    async fn close(&mut self) {
        self.record(TransportCall::Close);
    }
}

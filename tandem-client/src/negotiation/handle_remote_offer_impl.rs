use crate::capture::MediaCapture;
use crate::error::NegotiationError;
use crate::negotiation::{NegotiationSession, Phase, Role};
use crate::transport::{PeerTransport, TransportConnector};
use tandem_core::{SessionDescription, SignalEnvelope};
use tracing::{info, warn};

impl<C, M> NegotiationSession<C, M>
where
    C: TransportConnector,
    M: MediaCapture,
{
    pub(super) async fn on_remote_offer(
        &mut self,
        sdp: String,
    ) -> Result<Vec<SignalEnvelope>, NegotiationError> {
        if self.phase != Phase::Joined {
            warn!(
                "Ignoring offer in {:?} as {:?} (room '{}')",
                self.phase, self.role, self.room_id
            );
            return Ok(Vec::new());
        }

        info!("Received offer in room '{}'", self.room_id);
        self.role = Role::Answerer;
        self.set_phase(Phase::Answering);

        self.transport_mut()?
            .set_remote_description(SessionDescription::offer(sdp))
            .await?;
        self.remote_description_set = true;
        self.flush_pending_candidates().await?;

        let transport = self.transport_mut()?;
        let answer = transport.create_answer().await?;
        transport.set_local_description(answer.clone()).await?;

        self.set_phase(Phase::Connected);
        info!("Sending answer to room '{}'", self.room_id);

        Ok(vec![SignalEnvelope::description(
            self.room_id.clone(),
            answer,
        )])
    }
}

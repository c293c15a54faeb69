use crate::capture::MediaCapture;
use crate::error::NegotiationError;
use crate::negotiation::{NegotiationSession, Phase};
use crate::transport::{PeerTransport, TransportConnector};
use tandem_core::{SessionDescription, SignalEnvelope};
use tracing::{info, warn};

impl<C, M> NegotiationSession<C, M>
where
    C: TransportConnector,
    M: MediaCapture,
{
    pub(super) async fn on_remote_answer(
        &mut self,
        sdp: String,
    ) -> Result<Vec<SignalEnvelope>, NegotiationError> {
        if self.phase != Phase::Offering || !self.local_offer_outstanding {
            warn!(
                "Ignoring answer without an outstanding offer ({:?})",
                self.phase
            );
            return Ok(Vec::new());
        }

        self.transport_mut()?
            .set_remote_description(SessionDescription::answer(sdp))
            .await?;
        self.remote_description_set = true;
        self.local_offer_outstanding = false;
        self.set_phase(Phase::Connected);
        info!("Answer applied in room '{}'", self.room_id);

        self.flush_pending_candidates().await?;
        Ok(Vec::new())
    }
}

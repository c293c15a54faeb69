use crate::capture::MediaCapture;
use crate::error::NegotiationError;
use crate::negotiation::{NegotiationSession, Phase, Role, should_originate_offer};
use crate::transport::{PeerTransport, TransportConnector};
use tandem_core::{PeerId, SignalEnvelope};
use tracing::{debug, info, warn};

impl<C, M> NegotiationSession<C, M>
where
    C: TransportConnector,
    M: MediaCapture,
{
    pub(super) async fn on_roster(
        &mut self,
        members: Vec<PeerId>,
    ) -> Result<Vec<SignalEnvelope>, NegotiationError> {
        if self.phase != Phase::Idle {
            debug!("Ignoring roster in {:?}", self.phase);
            return Ok(Vec::new());
        }

        info!(
            "Joined room '{}' ({} peer(s) already present)",
            self.room_id,
            members.len()
        );
        self.joined = true;

        let transport = self
            .connector
            .connect(&self.config.ice_servers, self.events_tx.clone())
            .await?;
        self.transport = Some(transport);

        self.acquire_local_media().await;
        self.set_phase(Phase::Joined);

        if !should_originate_offer(&members) {
            info!("First in room '{}', waiting for an offer", self.room_id);
            return Ok(Vec::new());
        }

        let offer = self.originate_offer().await?;
        Ok(vec![offer])
    }

    /// Capture is best-effort: a peer without local media can still
    /// negotiate and receive.
    async fn acquire_local_media(&mut self) {
        let stream = match self
            .capture
            .acquire_local_stream(&self.config.constraints)
            .await
        {
            Ok(stream) => stream,
            Err(e) => {
                warn!("Continuing without local media: {}", e);
                return;
            }
        };

        if let Some(transport) = self.transport.as_mut() {
            if let Err(e) = transport.attach_stream(&stream).await {
                warn!("Failed to attach local stream {}: {}", stream.id, e);
            }
        }
        self.local_stream = Some(stream);
    }

    async fn originate_offer(&mut self) -> Result<SignalEnvelope, NegotiationError> {
        let transport = self.transport_mut()?;
        let offer = transport.create_offer().await?;
        transport.set_local_description(offer.clone()).await?;

        self.role = Role::Offerer;
        self.local_offer_outstanding = true;
        self.set_phase(Phase::Offering);
        info!("Sending offer to room '{}'", self.room_id);

        Ok(SignalEnvelope::description(self.room_id.clone(), offer))
    }
}

use crate::capture::MediaCapture;
use crate::error::NegotiationError;
use crate::negotiation::{NegotiationSession, Phase};
use crate::transport::{PeerTransport, TransportConnector};
use tandem_core::IceCandidate;
use tracing::debug;

impl<C, M> NegotiationSession<C, M>
where
    C: TransportConnector,
    M: MediaCapture,
{
    /// Applies a remote candidate, or buffers it until a remote description
    /// has been set on the transport.
    pub(super) async fn on_remote_candidate(
        &mut self,
        candidate: IceCandidate,
    ) -> Result<(), NegotiationError> {
        if matches!(self.phase, Phase::Idle | Phase::Closed | Phase::Failed) {
            debug!("Dropping remote candidate in {:?}", self.phase);
            return Ok(());
        }

        if !self.remote_description_set {
            self.pending_candidates.push(candidate);
            debug!(
                "Buffered remote candidate ({} pending)",
                self.pending_candidates.len()
            );
            return Ok(());
        }

        self.transport_mut()?.add_ice_candidate(candidate).await?;
        Ok(())
    }

    /// Applies buffered candidates once each, in arrival order.
    pub(super) async fn flush_pending_candidates(&mut self) -> Result<(), NegotiationError> {
        let pending = std::mem::take(&mut self.pending_candidates);
        if pending.is_empty() {
            return Ok(());
        }

        debug!("Flushing {} buffered remote candidate(s)", pending.len());
        let transport = self.transport_mut()?;
        for candidate in pending {
            transport.add_ice_candidate(candidate).await?;
        }
        Ok(())
    }
}

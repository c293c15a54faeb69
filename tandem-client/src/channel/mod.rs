mod ws_channel;

pub use ws_channel::*;

use crate::error::ChannelError;
use async_trait::async_trait;
use tandem_core::{CloseReason, DecodeError, SignalEnvelope};

/// Ordered, reliable link to the rendezvous service.
///
/// `recv` must be cancel-safe: the session loop races it against other
/// inputs and drops it when another branch wins.
#[async_trait(?Send)]
pub trait SignalChannel {
    async fn send(&mut self, envelope: &SignalEnvelope) -> Result<(), ChannelError>;

    /// Next inbound envelope, or `None` once the channel has dropped.
    async fn recv(&mut self) -> Option<Result<SignalEnvelope, DecodeError>>;

    async fn close(&mut self, reason: CloseReason);
}

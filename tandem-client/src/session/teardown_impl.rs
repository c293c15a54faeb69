use crate::capture::MediaCapture;
use crate::channel::SignalChannel;
use crate::error::SessionError;
use crate::session::session_controller::LoopExit;
use crate::session::{SessionController, SessionEvent};
use crate::transport::TransportConnector;
use tandem_core::CloseReason;
use tracing::{debug, error, info};

impl<S, C, M> SessionController<S, C, M>
where
    S: SignalChannel,
    C: TransportConnector,
    M: MediaCapture,
{
    pub(super) async fn teardown(&mut self, exit: LoopExit) -> Result<CloseReason, SessionError> {
        match exit {
            LoopExit::Unmounted => {
                info!("Leaving room '{}'", self.negotiation.room_id());
                self.send_leave().await;
                self.finish(CloseReason::Normal).await;
                Ok(CloseReason::Normal)
            }
            LoopExit::ChannelDropped => {
                self.finish(CloseReason::RemoteDisconnect).await;
                Ok(CloseReason::RemoteDisconnect)
            }
            LoopExit::Settled => {
                let reason = self
                    .negotiation
                    .close_reason()
                    .unwrap_or(CloseReason::Normal);
                self.send_leave().await;
                self.finish(reason).await;
                Ok(reason)
            }
            LoopExit::Failed(err) => {
                error!("Session failed: {}", err);
                self.send_leave().await;
                self.negotiation.fail().await;
                self.report_progress();
                self.close_channel(CloseReason::ProtocolError).await;
                self.emit(SessionEvent::Failed(err.to_string()));
                Err(err)
            }
        }
    }

    async fn finish(&mut self, reason: CloseReason) {
        self.negotiation.close(reason).await;
        self.report_progress();
        self.close_channel(reason).await;
        self.emit(SessionEvent::Closed(reason));
    }

    /// Only a peer the service counts as a member has anything to leave. A
    /// rejected joiner never received a roster.
    async fn send_leave(&mut self) {
        if !self.negotiation.has_joined() || self.channel_closed {
            return;
        }
        let leave = self.negotiation.leave_envelope();
        if let Err(e) = self.channel.send(&leave).await {
            debug!("Could not send leave: {}", e);
        }
    }

    async fn close_channel(&mut self, reason: CloseReason) {
        if self.channel_closed {
            return;
        }
        self.channel_closed = true;
        self.channel.close(reason).await;
    }
}

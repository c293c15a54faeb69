use crate::channel::SignalChannel;
use crate::error::ChannelError;
use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use tandem_core::{CloseReason, DecodeError, SignalEnvelope, decode, encode};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, info, warn};

/// [`SignalChannel`] over a WebSocket to the rendezvous service.
pub struct WsSignalChannel {
    ws: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WsSignalChannel {
    pub async fn connect(url: &str) -> Result<Self, ChannelError> {
        let (ws, _) = connect_async(url).await?;
        info!("Signaling channel open: {}", url);
        Ok(Self { ws })
    }
}

#[async_trait(?Send)]
impl SignalChannel for WsSignalChannel {
    async fn send(&mut self, envelope: &SignalEnvelope) -> Result<(), ChannelError> {
        self.ws.send(Message::text(encode(envelope))).await?;
        Ok(())
    }

    async fn recv(&mut self) -> Option<Result<SignalEnvelope, DecodeError>> {
        loop {
            match self.ws.next().await? {
                Ok(Message::Text(text)) => return Some(decode(text.as_str())),
                Ok(Message::Close(frame)) => {
                    debug!("Server closed signaling channel: {:?}", frame);
                    return None;
                }
                Ok(_) => continue,
                Err(e) => {
                    warn!("Signaling channel error: {}", e);
                    return None;
                }
            }
        }
    }

    async fn close(&mut self, reason: CloseReason) {
        let frame = CloseFrame {
            code: CloseCode::from(reason.code()),
            reason: reason.description().into(),
        };
        if let Err(e) = self.ws.close(Some(frame)).await {
            debug!("Closing signaling channel: {}", e);
        }
        info!("Signaling channel closed: {}", reason);
    }
}

mod session_controller;
mod session_handle;
mod teardown_impl;

pub use session_controller::*;
pub use session_handle::*;

use crate::capture::LocalStream;
use crate::negotiation::Phase;
use crate::transport::RemoteTrack;
use tandem_core::CloseReason;

/// Progress reported to whoever mounted the call.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    PhaseChanged(Phase),
    LocalStream(LocalStream),
    RemoteTrack(RemoteTrack),
    Closed(CloseReason),
    Failed(String),
}

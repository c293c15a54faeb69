use crate::error::CaptureError;
use async_trait::async_trait;

/// What to ask the capture device for. Video only unless told otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaConstraints {
    pub video: bool,
    pub audio: bool,
}

impl Default for MediaConstraints {
    fn default() -> Self {
        Self {
            video: true,
            audio: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackKind {
    Audio,
    Video,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaTrack {
    pub id: String,
    pub kind: TrackKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalStream {
    pub id: String,
    pub tracks: Vec<MediaTrack>,
}

#[async_trait(?Send)]
pub trait MediaCapture {
    async fn acquire_local_stream(
        &mut self,
        constraints: &MediaConstraints,
    ) -> Result<LocalStream, CaptureError>;
}

/// Capture for headless peers: there is never a device.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCapture;

#[async_trait(?Send)]
impl MediaCapture for NullCapture {
    async fn acquire_local_stream(
        &mut self,
        _constraints: &MediaConstraints,
    ) -> Result<LocalStream, CaptureError> {
        Err(CaptureError::NoDevice)
    }
}

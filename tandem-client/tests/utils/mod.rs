pub mod mock_transport;

pub use mock_capture::*;
pub use mock_channel::*;
pub use mock_transport::*;
pub use session_helpers::*;

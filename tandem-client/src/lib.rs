mod capture;
mod channel;
mod config;
mod error;
mod negotiation;
mod session;
mod transport;

pub use capture::*;
pub use channel::*;
pub use config::*;
pub use error::*;
pub use negotiation::*;
pub use session::*;
pub use transport::*;

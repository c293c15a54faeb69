mod room_directory;
mod room_membership;

pub use room_directory::*;
pub use room_membership::*;

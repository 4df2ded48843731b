// Core module: buffer protocol framing and types (NO I/O dependencies)
pub mod types;
pub mod protocol;

pub use types::*;
pub use protocol::*;

// Transport module: exact-count blocking byte streams to the buffer server
pub mod traits;
pub mod unix;
pub mod tcp;

pub use traits::Transport;
pub use unix::*;
pub use tcp::*;

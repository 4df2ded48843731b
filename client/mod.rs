// client: buffer client library for acquisition tools, viewers, control scripts, etc.
pub mod config;
pub mod error;
pub mod exchange;

pub use config::ClientConfig;
pub use error::{ClientError, ExchangeError, Phase, Result};
pub use exchange::exchange;

pub use rtbuf_core::{Command, FrameError, Message, MessageDef, HEADER_SIZE, VERSION};
pub use rtbuf_transport::{TcpTransport, Transport, UnixSocketTransport};

use tracing::debug;

/// A connection to one buffer server, issuing one exchange at a time.
///
/// `request` takes `&mut self`, so a client shared between threads has to be
/// wrapped in a lock by the caller.
pub struct BufferClient {
    transport: Box<dyn Transport>,
}

impl BufferClient {
    pub fn connect(host: &str, port: u16) -> Result<Self> {
        let addr = format!("{}:{}", host, port);
        let mut transport = TcpTransport::new(&addr);
        transport.connect()?;

        Ok(BufferClient {
            transport: Box::new(transport),
        })
    }

    pub fn connect_unix(path: &str) -> Result<Self> {
        let mut transport = UnixSocketTransport::new(path);
        transport.connect()?;

        Ok(BufferClient {
            transport: Box::new(transport),
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let mut transport = TcpTransport::new(&config.address());
        transport.set_timeouts(config.timeout, config.timeout)?;
        transport.connect()?;

        Ok(BufferClient {
            transport: Box::new(transport),
        })
    }

    /// Use a transport that is already connected.
    pub fn from_transport<T: Transport + 'static>(transport: T) -> Self {
        BufferClient {
            transport: Box::new(transport),
        }
    }

    /// Run one exchange. A failed exchange leaves the stream mid-frame, so
    /// callers should reconnect before retrying.
    pub fn request(&mut self, request: &Message) -> Result<Message> {
        Ok(exchange(&mut self.transport, request)?)
    }

    /// Build a request from parts and run it.
    pub fn call(&mut self, command: Command, payload: Vec<u8>) -> Result<Message> {
        let request = Message::new(command, payload)?;
        self.request(&request)
    }

    pub fn disconnect(&mut self) -> Result<()> {
        debug!("closing buffer connection");
        self.transport.disconnect()?;
        Ok(())
    }
}

impl Drop for BufferClient {
    fn drop(&mut self) {
        let _ = self.transport.disconnect();
    }
}

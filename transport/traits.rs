// Transport abstraction - allows pluggable communication backends
use std::io::{ErrorKind, Result};
use tracing::debug;

pub trait Transport: Send {
    fn send(&mut self, data: &[u8]) -> Result<usize>;
    fn receive(&mut self, buf: &mut [u8]) -> Result<usize>;
    fn connect(&mut self) -> Result<()>;
    fn disconnect(&mut self) -> Result<()>;

    /// Write all of `data`, returning how many bytes actually went out.
    ///
    /// Stops early on a zero-length write or a hard I/O error, so a result
    /// below `data.len()` means the stream is no longer usable for framing.
    fn write_exact(&mut self, data: &[u8]) -> usize {
        let mut written = 0;
        while written < data.len() {
            match self.send(&data[written..]) {
                Ok(0) => break,
                Ok(n) => written += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    debug!(error = %e, written, wanted = data.len(), "write stopped early");
                    break;
                }
            }
        }
        written
    }

    /// Fill all of `buf`, returning how many bytes were actually read.
    fn read_exact(&mut self, buf: &mut [u8]) -> usize {
        let mut read = 0;
        while read < buf.len() {
            match self.receive(&mut buf[read..]) {
                Ok(0) => break,
                Ok(n) => read += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    debug!(error = %e, read, wanted = buf.len(), "read stopped early");
                    break;
                }
            }
        }
        read
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&mut self, data: &[u8]) -> Result<usize> {
        (**self).send(data)
    }

    fn receive(&mut self, buf: &mut [u8]) -> Result<usize> {
        (**self).receive(buf)
    }

    fn connect(&mut self) -> Result<()> {
        (**self).connect()
    }

    fn disconnect(&mut self) -> Result<()> {
        (**self).disconnect()
    }

    fn write_exact(&mut self, data: &[u8]) -> usize {
        (**self).write_exact(data)
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> usize {
        (**self).read_exact(buf)
    }
}

pub(crate) fn not_connected() -> std::io::Error {
    std::io::Error::new(ErrorKind::NotConnected, "Not connected")
}

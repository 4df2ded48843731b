// TCP transport implementation (blocking)
use crate::traits::{not_connected, Transport};
use std::io::{Read, Result, Write};
use std::net::TcpStream;
use std::time::Duration;
use tracing::debug;

pub struct TcpTransport {
    address: String,
    stream: Option<TcpStream>,
    read_timeout: Option<Duration>,
    write_timeout: Option<Duration>,
    nodelay: bool,
}

impl TcpTransport {
    pub fn new(address: &str) -> Self {
        TcpTransport {
            address: address.to_string(),
            stream: None,
            read_timeout: None,
            write_timeout: None,
            nodelay: true,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    /// Socket timeouts; `None` blocks forever. Applied now and on every reconnect.
    pub fn set_timeouts(&mut self, read: Option<Duration>, write: Option<Duration>) -> Result<()> {
        self.read_timeout = read;
        self.write_timeout = write;
        if let Some(ref stream) = self.stream {
            stream.set_read_timeout(read)?;
            stream.set_write_timeout(write)?;
        }
        Ok(())
    }

    pub fn set_nodelay(&mut self, nodelay: bool) -> Result<()> {
        self.nodelay = nodelay;
        if let Some(ref stream) = self.stream {
            stream.set_nodelay(nodelay)?;
        }
        Ok(())
    }
}

impl Transport for TcpTransport {
    fn send(&mut self, data: &[u8]) -> Result<usize> {
        if let Some(ref mut stream) = self.stream {
            stream.write(data)
        } else {
            Err(not_connected())
        }
    }

    fn receive(&mut self, buf: &mut [u8]) -> Result<usize> {
        if let Some(ref mut stream) = self.stream {
            stream.read(buf)
        } else {
            Err(not_connected())
        }
    }

    fn connect(&mut self) -> Result<()> {
        let stream = TcpStream::connect(&self.address)?;
        stream.set_read_timeout(self.read_timeout)?;
        stream.set_write_timeout(self.write_timeout)?;
        stream.set_nodelay(self.nodelay)?;
        debug!(address = %self.address, "tcp transport connected");
        self.stream = Some(stream);
        Ok(())
    }

    fn disconnect(&mut self) -> Result<()> {
        if self.stream.take().is_some() {
            debug!(address = %self.address, "tcp transport disconnected");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::ErrorKind;
    use std::net::TcpListener;
    use std::thread;

    #[test]
    fn unconnected_transport_reports_not_connected() {
        let mut t = TcpTransport::new("127.0.0.1:1");
        let err = t.send(b"x").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotConnected);
        assert_eq!(t.write_exact(b"abc"), 0);
    }

    #[test]
    fn loopback_exact_io() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        let server = thread::spawn(move || {
            let (mut sock, _) = listener.accept().unwrap();
            let mut buf = [0u8; 4];
            sock.read_exact(&mut buf).unwrap();
            sock.write_all(&buf).unwrap();
        });

        let mut t = TcpTransport::new(&addr);
        assert_eq!(t.address(), addr);
        t.set_timeouts(Some(Duration::from_secs(5)), Some(Duration::from_secs(5)))
            .unwrap();
        t.set_nodelay(false).unwrap();
        t.connect().unwrap();
        assert!(t.is_connected());
        assert_eq!(t.write_exact(&[4, 3, 2, 1]), 4);
        let mut echo = [0u8; 4];
        assert_eq!(Transport::read_exact(&mut t, &mut echo), 4);
        assert_eq!(echo, [4, 3, 2, 1]);
        t.disconnect().unwrap();
        assert!(!t.is_connected());
        server.join().unwrap();
    }
}

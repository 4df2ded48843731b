// Unix socket transport implementation for co-located buffer servers
use crate::traits::{not_connected, Transport};
use nix::sys::socket::{setsockopt, sockopt};
use std::io::{Read, Result, Write};
use std::os::unix::io::{AsRawFd, RawFd};
use std::os::unix::net::UnixStream;
use std::time::Duration;
use tracing::debug;

pub struct UnixSocketTransport {
    socket_path: String,
    stream: Option<UnixStream>,
    timeout: Option<Duration>,
}

impl UnixSocketTransport {
    pub fn new(socket_path: &str) -> Self {
        UnixSocketTransport {
            socket_path: socket_path.to_string(),
            stream: None,
            timeout: None,
        }
    }

    pub fn socket_path(&self) -> &str {
        &self.socket_path
    }

    /// Get raw file descriptor for low-level operations (fcntl, getsockopt, etc.)
    pub fn as_raw_fd(&self) -> Option<RawFd> {
        self.stream.as_ref().map(|s| s.as_raw_fd())
    }

    /// Read and write timeout; `None` blocks forever.
    pub fn set_timeout(&mut self, timeout: Option<Duration>) -> Result<()> {
        self.timeout = timeout;
        if let Some(ref stream) = self.stream {
            stream.set_read_timeout(timeout)?;
            stream.set_write_timeout(timeout)?;
        }
        Ok(())
    }

    /// Set socket send buffer size (SO_SNDBUF)
    pub fn set_send_buffer_size(&self, size: usize) -> Result<()> {
        if let Some(ref stream) = self.stream {
            setsockopt(stream, sockopt::SndBuf, &size).map_err(std::io::Error::from)?;
        }
        Ok(())
    }

    /// Set socket receive buffer size (SO_RCVBUF)
    pub fn set_recv_buffer_size(&self, size: usize) -> Result<()> {
        if let Some(ref stream) = self.stream {
            setsockopt(stream, sockopt::RcvBuf, &size).map_err(std::io::Error::from)?;
        }
        Ok(())
    }
}

impl Transport for UnixSocketTransport {
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
        let stream = UnixStream::connect(&self.socket_path)?;

        // Exchanges block until the full response is in
        stream.set_nonblocking(false)?;
        stream.set_read_timeout(self.timeout)?;
        stream.set_write_timeout(self.timeout)?;

        self.stream = Some(stream);

        // Room for a full sample block per request
        if let Err(e) = self.set_send_buffer_size(65536) {
            debug!(error = %e, "could not raise SO_SNDBUF");
        }
        if let Err(e) = self.set_recv_buffer_size(65536) {
            debug!(error = %e, "could not raise SO_RCVBUF");
        }

        debug!(path = %self.socket_path, "unix transport connected");
        Ok(())
    }

    fn disconnect(&mut self) -> Result<()> {
        self.stream = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::net::UnixListener;
    use std::thread;

    #[test]
    fn exchanges_bytes_over_socket_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rtbuf.sock");
        let listener = UnixListener::bind(&path).unwrap();
        let server = thread::spawn(move || {
            let (mut sock, _) = listener.accept().unwrap();
            let mut buf = [0u8; 3];
            sock.read_exact(&mut buf).unwrap();
            buf.reverse();
            sock.write_all(&buf).unwrap();
        });

        let mut t = UnixSocketTransport::new(path.to_str().unwrap());
        assert_eq!(t.socket_path(), path.to_str().unwrap());
        t.set_timeout(Some(Duration::from_secs(5))).unwrap();
        t.connect().unwrap();
        assert!(t.as_raw_fd().is_some());
        assert_eq!(t.write_exact(b"abc"), 3);
        let mut back = [0u8; 3];
        assert_eq!(Transport::read_exact(&mut t, &mut back), 3);
        assert_eq!(&back, b"cba");
        server.join().unwrap();
    }

    #[test]
    fn missing_socket_fails_to_connect() {
        let mut t = UnixSocketTransport::new("/nonexistent/rtbuf.sock");
        assert!(t.connect().is_err());
        assert!(t.as_raw_fd().is_none());
    }
}

// Scripted in-memory transport for exchange tests
#![allow(dead_code)]

use rtbuf_client::{Command, MessageDef, Transport};
use std::io::Result;

/// Which exact-count call to cut short, and how many bytes it moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    Write { call: usize, transferred: usize },
    Read { call: usize, transferred: usize },
}

pub struct ScriptedTransport {
    inbound: Vec<u8>,
    pos: usize,
    fault: Option<Fault>,
    /// Bytes accepted from the client.
    pub written: Vec<u8>,
    /// Requested length of every `write_exact` call, in order.
    pub write_calls: Vec<usize>,
    /// Requested length of every `read_exact` call, in order.
    pub read_calls: Vec<usize>,
}

impl ScriptedTransport {
    /// Serve `inbound` to reads. Recording buffers are sized up front so the
    /// transport itself never allocates during an exchange.
    pub fn new(inbound: Vec<u8>) -> Self {
        ScriptedTransport {
            inbound,
            pos: 0,
            fault: None,
            written: Vec::with_capacity(64 * 1024),
            write_calls: Vec::with_capacity(16),
            read_calls: Vec::with_capacity(16),
        }
    }

    pub fn with_fault(mut self, fault: Fault) -> Self {
        self.fault = Some(fault);
        self
    }

    fn limit(&self, requested: usize, is_write: bool, call: usize) -> usize {
        match self.fault {
            Some(Fault::Write { call: c, transferred }) if is_write && c == call => {
                requested.min(transferred)
            }
            Some(Fault::Read { call: c, transferred }) if !is_write && c == call => {
                requested.min(transferred)
            }
            _ => requested,
        }
    }
}

impl Transport for ScriptedTransport {
    fn send(&mut self, data: &[u8]) -> Result<usize> {
        self.written.extend_from_slice(data);
        Ok(data.len())
    }

    fn receive(&mut self, buf: &mut [u8]) -> Result<usize> {
        let n = buf.len().min(self.inbound.len() - self.pos);
        buf[..n].copy_from_slice(&self.inbound[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }

    fn connect(&mut self) -> Result<()> {
        Ok(())
    }

    fn disconnect(&mut self) -> Result<()> {
        Ok(())
    }

    fn write_exact(&mut self, data: &[u8]) -> usize {
        let call = self.write_calls.len();
        self.write_calls.push(data.len());
        let n = self.limit(data.len(), true, call);
        self.written.extend_from_slice(&data[..n]);
        n
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> usize {
        let call = self.read_calls.len();
        self.read_calls.push(buf.len());
        let available = self.inbound.len() - self.pos;
        let n = self.limit(buf.len(), false, call).min(available);
        buf[..n].copy_from_slice(&self.inbound[self.pos..self.pos + n]);
        self.pos += n;
        n
    }
}

/// Wire bytes of a response with an explicit header, followed by `payload`.
pub fn response_bytes(version: u16, command: Command, bufsize: u32, payload: &[u8]) -> Vec<u8> {
    let def = MessageDef {
        version,
        command,
        bufsize,
    };
    let mut bytes = def.to_bytes().to_vec();
    bytes.extend_from_slice(payload);
    bytes
}

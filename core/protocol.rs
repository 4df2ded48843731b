// Buffer protocol framing - pure data structures, no I/O
use crate::types::{Command, VERSION};
use thiserror::Error;

/// Encoded size of a [`MessageDef`] on the wire.
pub const HEADER_SIZE: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    #[error("payload of {len} bytes does not fit a u32 bufsize")]
    PayloadTooLarge { len: usize },

    #[error("header declares {declared} payload bytes, got {actual}")]
    LengthMismatch { declared: u32, actual: usize },

    #[error("header needs 8 bytes, got {len}")]
    Truncated { len: usize },
}

// Message definition header (8 bytes)
//
// Layout, all little-endian:
//   0..2  version
//   2..4  command
//   4..8  bufsize
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageDef {
    pub version: u16,
    pub command: Command,
    pub bufsize: u32,
}

impl MessageDef {
    pub fn new(command: Command, bufsize: u32) -> Self {
        MessageDef {
            version: VERSION,
            command,
            bufsize,
        }
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..2].copy_from_slice(&self.version.to_le_bytes());
        bytes[2..4].copy_from_slice(&self.command.0.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.bufsize.to_le_bytes());
        bytes
    }

    pub fn decode(bytes: &[u8; HEADER_SIZE]) -> Self {
        MessageDef {
            version: u16::from_le_bytes([bytes[0], bytes[1]]),
            command: Command(u16::from_le_bytes([bytes[2], bytes[3]])),
            bufsize: u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FrameError> {
        match bytes.get(..HEADER_SIZE).and_then(|b| <&[u8; HEADER_SIZE]>::try_from(b).ok()) {
            Some(header) => Ok(Self::decode(header)),
            None => Err(FrameError::Truncated { len: bytes.len() }),
        }
    }

    /// Payload length as a buffer size.
    pub fn payload_len(&self) -> usize {
        self.bufsize as usize
    }
}

/// A header together with exactly `bufsize` payload bytes.
///
/// Fields are private so the length invariant cannot be broken after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    def: MessageDef,
    payload: Vec<u8>,
}

impl Message {
    /// Build a message at the current [`VERSION`], deriving `bufsize` from the payload.
    pub fn new(command: Command, payload: Vec<u8>) -> Result<Self, FrameError> {
        let bufsize = u32::try_from(payload.len())
            .map_err(|_| FrameError::PayloadTooLarge { len: payload.len() })?;
        Ok(Message {
            def: MessageDef::new(command, bufsize),
            payload,
        })
    }

    pub fn empty(command: Command) -> Self {
        Message {
            def: MessageDef::new(command, 0),
            payload: Vec::new(),
        }
    }

    /// Pair an existing header with its payload, checking the declared length.
    pub fn from_parts(def: MessageDef, payload: Vec<u8>) -> Result<Self, FrameError> {
        if def.payload_len() != payload.len() {
            return Err(FrameError::LengthMismatch {
                declared: def.bufsize,
                actual: payload.len(),
            });
        }
        Ok(Message { def, payload })
    }

    pub fn header(&self) -> &MessageDef {
        &self.def
    }

    pub fn version(&self) -> u16 {
        self.def.version
    }

    pub fn command(&self) -> Command {
        self.def.command
    }

    pub fn bufsize(&self) -> u32 {
        self.def.bufsize
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }

    /// Header and payload as they appear on the wire.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(HEADER_SIZE + self.payload.len());
        bytes.extend_from_slice(&self.def.to_bytes());
        bytes.extend_from_slice(&self.payload);
        bytes
    }
}

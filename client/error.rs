// Error types for the buffer client
use rtbuf_core::FrameError;
use std::fmt;
use thiserror::Error;

/// Which half of a framed message an I/O step was moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Header,
    Payload,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Phase::Header => write!(f, "header"),
            Phase::Payload => write!(f, "payload"),
        }
    }
}

/// Failure of a single request/response exchange. Always terminal for the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExchangeError {
    #[error("short {phase} write: {actual} of {expected} bytes")]
    ShortWrite {
        phase: Phase,
        expected: usize,
        actual: usize,
    },

    #[error("short {phase} read: {actual} of {expected} bytes")]
    ShortRead {
        phase: Phase,
        expected: usize,
        actual: usize,
    },

    #[error("incorrect version: expected {expected}, got {actual}")]
    VersionMismatch { expected: u16, actual: u16 },
}

impl ExchangeError {
    pub fn phase(&self) -> Option<Phase> {
        match self {
            ExchangeError::ShortWrite { phase, .. } | ExchangeError::ShortRead { phase, .. } => {
                Some(*phase)
            }
            ExchangeError::VersionMismatch { .. } => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("exchange failed: {0}")]
    Exchange(#[from] ExchangeError),

    #[error("invalid message: {0}")]
    Frame(#[from] FrameError),

    #[error("invalid value {value:?} for {var}")]
    Config { var: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, ClientError>;

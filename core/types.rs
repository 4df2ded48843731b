// Core types shared by the transport and client crates
use std::fmt;

/// Protocol version spoken by this client. Responses must match exactly.
pub const VERSION: u16 = 0x0001;

// Command code (2 bytes). Opaque to the exchange, named here for callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Command(pub u16);

impl Command {
    pub const PUT_HDR: Command = Command(0x0101);
    pub const PUT_DAT: Command = Command(0x0102);
    pub const PUT_EVT: Command = Command(0x0103);
    pub const PUT_OK: Command = Command(0x0104);
    pub const PUT_ERR: Command = Command(0x0105);

    pub const GET_HDR: Command = Command(0x0201);
    pub const GET_DAT: Command = Command(0x0202);
    pub const GET_EVT: Command = Command(0x0203);
    pub const GET_OK: Command = Command(0x0204);
    pub const GET_ERR: Command = Command(0x0205);

    pub const FLUSH_HDR: Command = Command(0x0301);
    pub const FLUSH_DAT: Command = Command(0x0302);
    pub const FLUSH_EVT: Command = Command(0x0303);
    pub const FLUSH_OK: Command = Command(0x0304);
    pub const FLUSH_ERR: Command = Command(0x0305);

    pub const WAIT_DAT: Command = Command(0x0402);
    pub const WAIT_OK: Command = Command(0x0404);
    pub const WAIT_ERR: Command = Command(0x0405);

    const KNOWN: [(Command, &'static str); 18] = [
        (Command::PUT_HDR, "PUT_HDR"),
        (Command::PUT_DAT, "PUT_DAT"),
        (Command::PUT_EVT, "PUT_EVT"),
        (Command::PUT_OK, "PUT_OK"),
        (Command::PUT_ERR, "PUT_ERR"),
        (Command::GET_HDR, "GET_HDR"),
        (Command::GET_DAT, "GET_DAT"),
        (Command::GET_EVT, "GET_EVT"),
        (Command::GET_OK, "GET_OK"),
        (Command::GET_ERR, "GET_ERR"),
        (Command::FLUSH_HDR, "FLUSH_HDR"),
        (Command::FLUSH_DAT, "FLUSH_DAT"),
        (Command::FLUSH_EVT, "FLUSH_EVT"),
        (Command::FLUSH_OK, "FLUSH_OK"),
        (Command::FLUSH_ERR, "FLUSH_ERR"),
        (Command::WAIT_DAT, "WAIT_DAT"),
        (Command::WAIT_OK, "WAIT_OK"),
        (Command::WAIT_ERR, "WAIT_ERR"),
    ];

    /// Well-known name of this code, if it has one.
    pub fn name(&self) -> Option<&'static str> {
        Self::KNOWN
            .iter()
            .find(|(cmd, _)| cmd == self)
            .map(|(_, name)| *name)
    }

    /// Look up a code by its well-known name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::KNOWN
            .iter()
            .find(|(_, known)| known.eq_ignore_ascii_case(name))
            .map(|(cmd, _)| *cmd)
    }
}

impl From<u16> for Command {
    fn from(code: u16) -> Self {
        Command(code)
    }
}

impl From<Command> for u16 {
    fn from(cmd: Command) -> Self {
        cmd.0
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "{:#06x}", self.0),
        }
    }
}

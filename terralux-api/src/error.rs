use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Frame carried no command byte
    EmptyFrame,
    /// Command identifier absent from the command table
    UnknownCommand(u8),
    /// Frame ended before a field could be read
    Truncated { needed: usize, available: usize },
    /// String does not fit a one-byte length prefix
    StringTooLong(usize),
    /// Character outside the single-byte range
    InvalidCharacter(char),
    /// Device answered with a non-success status byte
    Rejected { command: u8, status: u8 },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyFrame => write!(f, "Empty frame"),
            Self::UnknownCommand(id) => write!(f, "Unknown command: 0x{:02X}", id),
            Self::Truncated { needed, available } => write!(
                f,
                "Truncated frame: needed {} bytes, {} available",
                needed, available
            ),
            Self::StringTooLong(len) => write!(f, "String too long: {} bytes", len),
            Self::InvalidCharacter(c) => write!(f, "Invalid character: {:?}", c),
            Self::Rejected { command, status } => write!(
                f,
                "Command 0x{:02X} rejected with status 0x{:02X}",
                command, status
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CodecError {}

pub type Result<T> = core::result::Result<T, CodecError>;

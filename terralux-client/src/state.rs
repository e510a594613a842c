/// Transport state as seen by the controller.
///
/// `Disconnected` covers both "no transport yet" and a transport that is
/// still closing; `Closed` means the transport finished closing and a new
/// one has to be created before anything can be sent.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConnectionState {
    #[default]
    Disconnected = 0,
    Connecting = 1,
    Open = 2,
    Closed = 3,
}

impl ConnectionState {
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Connecting,
            2 => Self::Open,
            3 => Self::Closed,
            _ => Self::Disconnected,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

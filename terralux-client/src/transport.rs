use std::fmt;

use crate::error::ClientError;
use crate::state::ConnectionState;

/// Identifies one transport created by [`Connector::open`].
///
/// Every reconnect hands out a new id so events still in flight from a
/// replaced transport can be told apart and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct SessionId(pub u64);

impl SessionId {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    Open,
    Error(String),
    Message(Vec<u8>),
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEvent {
    pub session: SessionId,
    pub event: TransportEvent,
}

/// Binary frame pipe owned by the controller.
pub trait Transport {
    fn state(&self) -> ConnectionState;

    /// Queues one frame; only called while [`Transport::state`] is `Open`.
    fn transmit(&mut self, frame: Vec<u8>) -> Result<(), ClientError>;

    fn close(&mut self);
}

/// Creates transports. Lifecycle events of the new transport must be
/// reported tagged with `session`.
pub trait Connector {
    type Transport: Transport;

    fn open(&mut self, session: SessionId) -> Result<Self::Transport, ClientError>;
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_sequence() {
        let session = SessionId::default();
        assert_eq!(session.next(), SessionId(1));
        assert_eq!(SessionId(u64::MAX).next(), SessionId(0));
        assert_eq!(SessionId(7).to_string(), "#7");
    }
}

pub mod callbacks;
pub mod controller;
pub mod error;
pub mod runner;
pub mod settings;
pub mod state;
pub mod target;
pub mod transport;
pub mod ws;

pub use callbacks::Callbacks;
pub use controller::Controller;
pub use error::ClientError;
pub use runner::{Client, ClientCommand, ClientHandle};
pub use state::ConnectionState;
pub use target::ConnectionTarget;
pub use transport::{Connector, SessionEvent, SessionId, Transport, TransportEvent};
pub use ws::{WsConnector, WsTransport};

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use futures_util::{SinkExt, StreamExt};
use log::{debug, info, warn};
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use crate::error::ClientError;
use crate::state::ConnectionState;
use crate::transport::{Connector, SessionEvent, SessionId, Transport, TransportEvent};

/// Opens binary websocket sessions, one tokio task per session.
///
/// Must be used from within a tokio runtime.
#[derive(Debug, Clone)]
pub struct WsConnector {
    url: String,
    events: mpsc::UnboundedSender<SessionEvent>,
}

impl WsConnector {
    pub fn new(url: impl Into<String>, events: mpsc::UnboundedSender<SessionEvent>) -> Self {
        Self {
            url: url.into(),
            events,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Connector for WsConnector {
    type Transport = WsTransport;

    fn open(&mut self, session: SessionId) -> Result<WsTransport, ClientError> {
        let state = Arc::new(AtomicU8::new(ConnectionState::Connecting.as_u8()));
        let (outgoing_tx, outgoing_rx) = mpsc::unbounded_channel();

        tokio::spawn(run_session(
            self.url.clone(),
            session,
            state.clone(),
            outgoing_rx,
            self.events.clone(),
        ));

        Ok(WsTransport {
            session,
            state,
            outgoing: outgoing_tx,
        })
    }
}

/// Handle to a running websocket session. Dropping it closes the socket.
#[derive(Debug)]
pub struct WsTransport {
    session: SessionId,
    state: Arc<AtomicU8>,
    outgoing: mpsc::UnboundedSender<Vec<u8>>,
}

impl Transport for WsTransport {
    fn state(&self) -> ConnectionState {
        ConnectionState::from_u8(self.state.load(Ordering::Acquire))
    }

    fn transmit(&mut self, frame: Vec<u8>) -> Result<(), ClientError> {
        self.outgoing
            .send(frame)
            .map_err(|_| ClientError::TransportGone(self.session.0))
    }

    fn close(&mut self) {
        let (closed, _) = mpsc::unbounded_channel();
        self.outgoing = closed;
    }
}

async fn run_session(
    url: String,
    session: SessionId,
    state: Arc<AtomicU8>,
    mut outgoing: mpsc::UnboundedReceiver<Vec<u8>>,
    events: mpsc::UnboundedSender<SessionEvent>,
) {
    let notify = |event: TransportEvent| {
        if events.send(SessionEvent { session, event }).is_err() {
            debug!("Session {} has no listener", session);
        }
    };
    let set_state = |value: ConnectionState| state.store(value.as_u8(), Ordering::Release);

    let socket = match connect_async(url.as_str()).await {
        Ok((socket, _)) => socket,
        Err(e) => {
            warn!("Failed to connect to {}: {}", url, e);
            set_state(ConnectionState::Closed);
            notify(TransportEvent::Error(e.to_string()));
            notify(TransportEvent::Closed);
            return;
        }
    };

    info!("Connected to {}", url);
    set_state(ConnectionState::Open);
    notify(TransportEvent::Open);

    let (mut sink, mut stream) = socket.split();
    let mut failure = None;

    loop {
        tokio::select! {
            frame = outgoing.recv() => match frame {
                Some(frame) => {
                    if let Err(e) = sink.send(Message::Binary(frame.into())).await {
                        failure = Some(e.to_string());
                        break;
                    }
                }
                None => {
                    set_state(ConnectionState::Disconnected);
                    if let Err(e) = sink.close().await {
                        debug!("Closing session {} failed: {}", session, e);
                    }
                    break;
                }
            },
            message = stream.next() => match message {
                Some(Ok(Message::Binary(data))) => notify(TransportEvent::Message(data.to_vec())),
                Some(Ok(Message::Text(_))) => warn!("Ignoring text message on session {}", session),
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    failure = Some(e.to_string());
                    break;
                }
            },
        }
    }

    set_state(ConnectionState::Closed);
    if let Some(e) = failure {
        warn!("Session {} failed: {}", session, e);
        notify(TransportEvent::Error(e));
    }
    notify(TransportEvent::Closed);
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn test_refused_connection_reports_error_then_closed() {
        let (events_tx, mut events_rx) = mpsc::unbounded_channel();
        let mut connector = WsConnector::new("ws://127.0.0.1:1", events_tx);

        let transport = connector.open(SessionId(3)).unwrap();
        assert_eq!(transport.state(), ConnectionState::Connecting);

        let first = tokio::time::timeout(Duration::from_secs(5), events_rx.recv())
            .await
            .unwrap()
            .unwrap();
        let second = events_rx.recv().await.unwrap();

        assert_eq!(first.session, SessionId(3));
        assert!(matches!(first.event, TransportEvent::Error(_)));
        assert_eq!(second.event, TransportEvent::Closed);
        assert_eq!(transport.state(), ConnectionState::Closed);
    }

    #[test]
    fn test_transmit_after_close_fails() {
        let (outgoing, _rx) = mpsc::unbounded_channel();
        let mut transport = WsTransport {
            session: SessionId(1),
            state: Arc::new(AtomicU8::new(ConnectionState::Open.as_u8())),
            outgoing,
        };

        assert!(transport.transmit(vec![0x05]).is_ok());
        transport.close();
        assert!(matches!(
            transport.transmit(vec![0x05]),
            Err(ClientError::TransportGone(1))
        ));
    }
}

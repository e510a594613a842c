use std::net::SocketAddr;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use terralux_mock::device::DeviceState;
use terralux_mock::responder::Responder;
use terralux_mock::serve;
use terralux_mock::simulate::Simulator;
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

pub type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Mock device server on an ephemeral local port, stopped on drop.
pub struct MockDevice {
    pub addr: SocketAddr,
    task: JoinHandle<()>,
}

impl MockDevice {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let responder = Responder::new(DeviceState::default(), Simulator::seeded(7));

        let task = tokio::spawn(async move {
            serve(listener, responder, std::future::pending()).await.unwrap();
        });

        Self { addr, task }
    }

    pub fn url(&self, path: &str) -> String {
        format!("ws://{}{}", self.addr, path)
    }

    pub async fn socket(&self, path: &str) -> Socket {
        let (socket, _) = connect_async(self.url(path)).await.unwrap();
        socket
    }
}

impl Drop for MockDevice {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Sends one binary frame and waits for the binary answer.
pub async fn exchange(socket: &mut Socket, request: &[u8]) -> Vec<u8> {
    socket
        .send(Message::Binary(request.to_vec().into()))
        .await
        .unwrap();

    loop {
        let message = tokio::time::timeout(Duration::from_secs(5), socket.next())
            .await
            .expect("no answer from mock device")
            .expect("socket closed")
            .unwrap();

        if let Message::Binary(data) = message {
            return data.to_vec();
        }
    }
}

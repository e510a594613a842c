use std::sync::Arc;

use axum::Router;
use axum::extract::ws::{Message as WsMessage, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use axum::routing::get;
use futures::{SinkExt, StreamExt};
use tokio::sync::Mutex;

use crate::responder::Responder;
use crate::simulate::SampleSource;

pub type SharedResponder<S> = Arc<Mutex<Responder<S>>>;

/// Websocket endpoint at `/` and `/ws`. All connections talk to the same
/// device.
pub fn device_router<S: SampleSource + 'static>(responder: SharedResponder<S>) -> Router {
    Router::new()
        .route("/", get(ws_handler::<S>))
        .route("/ws", get(ws_handler::<S>))
        .with_state(responder)
}

async fn ws_handler<S: SampleSource + 'static>(
    ws: WebSocketUpgrade,
    State(responder): State<SharedResponder<S>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_websocket(socket, responder))
}

async fn handle_websocket<S: SampleSource>(socket: WebSocket, responder: SharedResponder<S>) {
    let (mut sender, mut receiver) = socket.split();

    tracing::info!("New client connected");

    while let Some(result) = receiver.next().await {
        match result {
            Ok(WsMessage::Binary(request)) => {
                let response = responder.lock().await.handle(&request);

                if let Err(e) = sender.send(WsMessage::Binary(response)).await {
                    tracing::warn!("Failed to send response: {}", e);
                    break;
                }
            }
            Ok(WsMessage::Text(_)) => tracing::warn!("Ignoring text message"),
            Ok(WsMessage::Close(_)) => break,
            Err(e) => {
                tracing::warn!("WebSocket error: {}", e);
                break;
            }
            _ => {}
        }
    }

    tracing::info!("Client disconnected");
}

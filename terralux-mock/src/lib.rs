use std::future::Future;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::Mutex;

use crate::device::DeviceState;
use crate::error::MockError;
use crate::responder::Responder;
use crate::server::device_router;
use crate::settings::Settings;
use crate::simulate::{SampleSource, Simulator};

pub mod device;
pub mod error;
pub mod responder;
pub mod server;
pub mod settings;
pub mod simulate;

pub async fn run(settings: &Arc<Settings>) -> Result<(), MockError> {
    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| MockError::Bind {
            addr: addr.clone(),
            source,
        })?;

    let state = DeviceState::with_connection(settings.device.clone().into());
    let responder = Responder::new(state, Simulator::new());

    tracing::info!("Mock device listening on {}", addr);

    serve(listener, responder, shutdown_signal()).await
}

/// Serves one device on an already bound listener until `shutdown` resolves.
pub async fn serve<S, F>(listener: TcpListener, responder: Responder<S>, shutdown: F) -> Result<(), MockError>
where
    S: SampleSource + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    let app = device_router(Arc::new(Mutex::new(responder)));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

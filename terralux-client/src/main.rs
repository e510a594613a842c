use terralux_client::settings::Settings;
use terralux_client::{Callbacks, Client};

/// Covers the client library and the callbacks logged by this binary.
fn default_directive(level: &str) -> String {
    let lib_name = env!("CARGO_PKG_NAME").replace('-', "_");
    let bin_name = env!("CARGO_CRATE_NAME");

    format!("{lib_name}={level},{bin_name}={level}")
}

#[tokio::main]
async fn main() {
    let settings = Settings::new().expect("Failed to load settings.");

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directive(&settings.logger.level).into()),
        )
        .init();

    let callbacks = Callbacks::default()
        .on_before_connect(|| tracing::info!("Connecting..."))
        .on_connected(|| tracing::info!("Connected"))
        .on_timeout(|| tracing::warn!("Device is not answering, reconnecting"))
        .on_error(|| tracing::error!("Connection error"))
        .on_disconnected(|| tracing::info!("Disconnected"))
        .on_connection_parameters(|params| {
            tracing::info!("Access point {} on site {}", params.ssid, params.site);
        })
        .on_status(|status| {
            tracing::info!(
                "{} sun={} color={}:{}:{} uv={} white={} fito={} fan={} humidifier={} {} kPa {} \u{b0}C {} %",
                status.timestamp,
                status.mode.is_sun(),
                status.color.r,
                status.color.g,
                status.color.b,
                status.ultraviolet,
                status.white,
                status.fito,
                status.fan,
                status.humidifier,
                status.pressure,
                status.temperature,
                status.humidity,
            );
        })
        .on_day_measurements(|day| {
            for hour in 0..day.pressure.len() {
                tracing::info!(
                    "Hour {:>2}: {} kPa {} \u{b0}C {} %",
                    hour,
                    day.pressure[hour],
                    day.temperature[hour],
                    day.humidity[hour],
                );
            }
        });

    let (client, handle) = Client::new(&settings.monitor, callbacks);

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = handle.shutdown();
        }
    });

    if let Err(e) = client.run().await {
        tracing::error!("Monitor stopped: {}", e);
    }
}

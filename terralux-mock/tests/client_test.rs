use std::time::Duration;

use terralux_api::{Color, DeviceStatus, Mode};
use terralux_client::settings::Monitor;
use terralux_client::{Callbacks, Client, ConnectionTarget};
use tokio::sync::mpsc;

mod common;
use common::mock_device::MockDevice;

#[derive(Debug)]
enum Seen {
    Connected,
    Parameters(String),
    Status(DeviceStatus),
    Day(usize),
}

fn monitor_for(device: &MockDevice) -> Monitor {
    Monitor {
        page_host: "localhost:3000".into(),
        retry_limit: 5,
        poll_interval_ms: 3_600_000,
        target: ConnectionTarget {
            local_endpoint: device.url("/"),
            ..Default::default()
        },
    }
}

fn reporting_callbacks(seen: mpsc::UnboundedSender<Seen>) -> Callbacks {
    let connected = seen.clone();
    let parameters = seen.clone();
    let status = seen.clone();

    Callbacks::default()
        .on_connected(move || {
            let _ = connected.send(Seen::Connected);
        })
        .on_connection_parameters(move |params| {
            let _ = parameters.send(Seen::Parameters(params.ssid.clone()));
        })
        .on_status(move |device_status| {
            let _ = status.send(Seen::Status(device_status.clone()));
        })
        .on_day_measurements(move |day| {
            let _ = seen.send(Seen::Day(day.pressure.len()));
        })
}

async fn next(seen: &mut mpsc::UnboundedReceiver<Seen>) -> Seen {
    tokio::time::timeout(Duration::from_secs(5), seen.recv())
        .await
        .expect("client went quiet")
        .expect("client stopped")
}

#[tokio::test]
async fn test_client_startup_sequence() {
    let device = MockDevice::start().await;
    let (seen_tx, mut seen) = mpsc::unbounded_channel();
    let (client, handle) = Client::new(&monitor_for(&device), reporting_callbacks(seen_tx));
    let task = tokio::spawn(client.run());

    assert!(matches!(next(&mut seen).await, Seen::Connected));
    assert!(matches!(next(&mut seen).await, Seen::Parameters(ssid) if ssid == "TestAccessPoint"));
    assert!(matches!(next(&mut seen).await, Seen::Status(status) if status.mode == Mode::SunImitation));
    assert!(matches!(next(&mut seen).await, Seen::Day(24)));

    handle.shutdown().unwrap();
    task.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_client_changes_device_state() {
    let device = MockDevice::start().await;
    let (seen_tx, mut seen) = mpsc::unbounded_channel();
    let (client, handle) = Client::new(&monitor_for(&device), reporting_callbacks(seen_tx));
    let task = tokio::spawn(client.run());

    while !matches!(next(&mut seen).await, Seen::Day(_)) {}

    handle.set_color(Color::new(10, 20, 30)).unwrap();
    handle.get_status().unwrap();

    let status = loop {
        if let Seen::Status(status) = next(&mut seen).await {
            break status;
        }
    };
    assert_eq!(status.mode, Mode::Color);
    assert_eq!(status.color, Color::new(10, 20, 30));

    handle.set_sun_imitation_mode(true).unwrap();

    let status = loop {
        if let Seen::Status(status) = next(&mut seen).await {
            break status;
        }
    };
    assert_eq!(status.mode, Mode::SunImitation);
    assert_eq!(status.color, Color::WHITE);

    handle.shutdown().unwrap();
    task.await.unwrap().unwrap();
}

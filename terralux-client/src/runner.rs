use std::time::Duration;

use log::{info, warn};
use terralux_api::{Actuator, Color, ConnectionParameters};
use tokio::sync::mpsc;
use tokio::time::{self, MissedTickBehavior};

use crate::callbacks::Callbacks;
use crate::controller::Controller;
use crate::error::ClientError;
use crate::settings::Monitor;
use crate::transport::{Connector, SessionEvent};
use crate::ws::WsConnector;

/// Operation requested by the UI side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCommand {
    GetStatus,
    GetDayMeasurements,
    GetConnectionParameters,
    SetConnectionParameters(ConnectionParameters),
    SetColor(Color),
    SetSunImitationMode(bool),
    SetActuator(Actuator, u8),
    Shutdown,
}

/// Cloneable sender for [`ClientCommand`]s into a running [`Client`].
#[derive(Debug, Clone)]
pub struct ClientHandle {
    commands: mpsc::UnboundedSender<ClientCommand>,
}

impl ClientHandle {
    pub fn send(&self, command: ClientCommand) -> Result<(), ClientError> {
        self.commands.send(command).map_err(|_| ClientError::Stopped)
    }

    pub fn get_status(&self) -> Result<(), ClientError> {
        self.send(ClientCommand::GetStatus)
    }

    pub fn get_day_measurements(&self) -> Result<(), ClientError> {
        self.send(ClientCommand::GetDayMeasurements)
    }

    pub fn set_color(&self, color: Color) -> Result<(), ClientError> {
        self.send(ClientCommand::SetColor(color))
    }

    pub fn set_sun_imitation_mode(&self, enabled: bool) -> Result<(), ClientError> {
        self.send(ClientCommand::SetSunImitationMode(enabled))
    }

    pub fn set_actuator(&self, actuator: Actuator, value: u8) -> Result<(), ClientError> {
        self.send(ClientCommand::SetActuator(actuator, value))
    }

    pub fn set_connection_parameters(&self, params: ConnectionParameters) -> Result<(), ClientError> {
        self.send(ClientCommand::SetConnectionParameters(params))
    }

    pub fn shutdown(&self) -> Result<(), ClientError> {
        self.send(ClientCommand::Shutdown)
    }
}

/// Event loop around a [`Controller`]: transport events, UI commands and
/// the status poll are handled one at a time on a single task.
pub struct Client<C: Connector> {
    controller: Controller<C>,
    events: mpsc::UnboundedReceiver<SessionEvent>,
    commands: mpsc::UnboundedReceiver<ClientCommand>,
    poll_interval: Duration,
}

impl Client<WsConnector> {
    pub fn new(settings: &Monitor, callbacks: Callbacks) -> (Self, ClientHandle) {
        let endpoint = settings.endpoint();
        info!("Device endpoint {}", endpoint);

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let connector = WsConnector::new(endpoint, events_tx);
        let controller = Controller::with_retry_limit(connector, callbacks, settings.retry_limit);

        Self::with_controller(
            controller,
            events_rx,
            Duration::from_millis(settings.poll_interval_ms),
        )
    }
}

impl<C: Connector> Client<C> {
    pub fn with_controller(
        controller: Controller<C>,
        events: mpsc::UnboundedReceiver<SessionEvent>,
        poll_interval: Duration,
    ) -> (Self, ClientHandle) {
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();

        let client = Self {
            controller,
            events,
            commands: commands_rx,
            poll_interval,
        };

        (client, ClientHandle { commands: commands_tx })
    }

    /// Connects, then runs until [`ClientCommand::Shutdown`] or until every
    /// handle is dropped.
    pub async fn run(mut self) -> Result<(), ClientError> {
        self.controller.connect()?;

        let period = self.poll_interval.max(Duration::from_millis(1));
        let mut poll = time::interval_at(time::Instant::now() + period, period);
        poll.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                Some(SessionEvent { session, event }) = self.events.recv() => {
                    self.controller.handle_event(session, event);
                }
                command = self.commands.recv() => match command {
                    Some(ClientCommand::Shutdown) | None => break,
                    Some(command) => {
                        if let Err(e) = self.dispatch(command) {
                            warn!("Command failed: {}", e);
                        }
                    }
                },
                _ = poll.tick() => {
                    if let Err(e) = self.controller.get_status() {
                        warn!("Status poll failed: {}", e);
                    }
                }
            }
        }

        info!("Client stopped");
        self.controller.disconnect();

        Ok(())
    }

    fn dispatch(&mut self, command: ClientCommand) -> Result<(), ClientError> {
        match command {
            ClientCommand::GetStatus => self.controller.get_status(),
            ClientCommand::GetDayMeasurements => self.controller.get_day_measurements(),
            ClientCommand::GetConnectionParameters => self.controller.get_connection_parameters(),
            ClientCommand::SetConnectionParameters(params) => {
                self.controller.set_connection_parameters(params)
            }
            ClientCommand::SetColor(color) => self.controller.set_color(color),
            ClientCommand::SetSunImitationMode(enabled) => {
                self.controller.set_sun_imitation_mode(enabled)
            }
            ClientCommand::SetActuator(actuator, value) => {
                self.controller.set_actuator(actuator, value)
            }
            ClientCommand::Shutdown => Ok(()),
        }
    }
}

use log::{debug, info, warn};
use terralux_api::{Actuator, CodecError, Color, ConnectionParameters, Request, Response};

use crate::callbacks::Callbacks;
use crate::error::ClientError;
use crate::state::ConnectionState;
use crate::transport::{Connector, SessionId, Transport, TransportEvent};

/// Default number of unanswered sends tolerated before a reconnect.
pub const RETRY_LIMIT: u32 = 5;

/// Client side of the device link.
///
/// The controller performs no IO of its own. Outgoing frames go through
/// the [`Transport`] handed out by the [`Connector`]; incoming lifecycle
/// events are fed back through [`Controller::handle_event`]. Nothing
/// here waits for a reply and replies are not correlated with requests.
pub struct Controller<C: Connector> {
    connector: C,
    transport: Option<C::Transport>,
    session: SessionId,
    retries: u32,
    retry_limit: u32,
    callbacks: Callbacks,
}

impl<C: Connector> Controller<C> {
    pub fn new(connector: C, callbacks: Callbacks) -> Self {
        Self::with_retry_limit(connector, callbacks, RETRY_LIMIT)
    }

    pub fn with_retry_limit(connector: C, callbacks: Callbacks, retry_limit: u32) -> Self {
        Self {
            connector,
            transport: None,
            session: SessionId::default(),
            retries: 0,
            retry_limit,
            callbacks,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.transport
            .as_ref()
            .map_or(ConnectionState::Disconnected, Transport::state)
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    pub fn retries(&self) -> u32 {
        self.retries
    }

    pub fn callbacks_mut(&mut self) -> &mut Callbacks {
        &mut self.callbacks
    }

    /// Replaces the transport with a fresh session unless one is already
    /// connecting.
    pub fn connect(&mut self) -> Result<(), ClientError> {
        if self.state() == ConnectionState::Connecting {
            debug!("Connect skipped, session {} is still connecting", self.session);
            return Ok(());
        }

        if self.retries > self.retry_limit {
            warn!("No answer after {} attempts, reconnecting", self.retries);
            self.callbacks.timeout();
        } else {
            self.callbacks.before_connect();
        }

        if let Some(mut previous) = self.transport.take() {
            previous.close();
        }

        self.session = self.session.next();
        info!("Opening transport session {}", self.session);
        self.transport = Some(self.connector.open(self.session)?);
        self.retries = 0;

        Ok(())
    }

    /// Closes the current transport without opening a new one.
    pub fn disconnect(&mut self) {
        if let Some(mut transport) = self.transport.take() {
            info!("Closing transport session {}", self.session);
            transport.close();
        }
    }

    /// Sends one encoded request frame.
    ///
    /// A frame that cannot be transmitted right now is dropped without
    /// notice and counted as a retry: a closed transport or an exceeded
    /// retry limit triggers [`Controller::connect`], a connecting transport
    /// resets the retry counter. Transmitting on an open transport leaves
    /// the counter alone.
    pub fn send(&mut self, frame: Vec<u8>) -> Result<(), ClientError> {
        let state = self.state();
        if state == ConnectionState::Closed || self.retries > self.retry_limit {
            self.retries = self.retries.saturating_add(1);
            return self.connect();
        }

        match (state, self.transport.as_mut()) {
            (ConnectionState::Open, Some(transport)) => {
                if let Err(e) = transport.transmit(frame) {
                    warn!("Dropping frame on session {}: {}", self.session, e);
                }
            }
            (ConnectionState::Connecting, _) => {
                debug!("Dropping frame while session {} is connecting", self.session);
                self.retries = 0;
            }
            _ => {
                debug!("Dropping frame, no open transport");
                self.retries = self.retries.saturating_add(1);
            }
        }

        Ok(())
    }

    pub fn request(&mut self, request: &Request) -> Result<(), ClientError> {
        debug!("Request {}", request.command().name());
        let frame = request.encode()?;
        self.send(frame)
    }

    pub fn get_connection_parameters(&mut self) -> Result<(), ClientError> {
        self.request(&Request::GetConnectionParameters)
    }

    pub fn set_connection_parameters(&mut self, params: ConnectionParameters) -> Result<(), ClientError> {
        self.request(&Request::SetConnectionParameters(params))
    }

    pub fn get_status(&mut self) -> Result<(), ClientError> {
        self.request(&Request::GetStatus)
    }

    pub fn get_day_measurements(&mut self) -> Result<(), ClientError> {
        self.request(&Request::GetDayMeasurements)
    }

    pub fn set_color(&mut self, color: Color) -> Result<(), ClientError> {
        self.request(&Request::SetColor(color))
    }

    /// Switches the mode and asks for a status refresh right away.
    pub fn set_sun_imitation_mode(&mut self, enabled: bool) -> Result<(), ClientError> {
        self.request(&Request::SetSunImitationMode(enabled))?;
        self.get_status()
    }

    pub fn set_actuator(&mut self, actuator: Actuator, value: u8) -> Result<(), ClientError> {
        self.request(&Request::SetActuator(actuator, value))
    }

    pub fn set_ultraviolet(&mut self, value: u8) -> Result<(), ClientError> {
        self.set_actuator(Actuator::UltraViolet, value)
    }

    pub fn set_white(&mut self, value: u8) -> Result<(), ClientError> {
        self.set_actuator(Actuator::White, value)
    }

    pub fn set_fito(&mut self, value: u8) -> Result<(), ClientError> {
        self.set_actuator(Actuator::Fito, value)
    }

    pub fn set_fan(&mut self, value: u8) -> Result<(), ClientError> {
        self.set_actuator(Actuator::Fan, value)
    }

    pub fn set_humidifier(&mut self, value: u8) -> Result<(), ClientError> {
        self.set_actuator(Actuator::Humidifier, value)
    }

    /// Reacts to one lifecycle event. Events of replaced sessions are ignored.
    pub fn handle_event(&mut self, session: SessionId, event: TransportEvent) {
        if session != self.session {
            debug!("Ignoring {:?} from stale session {}", event, session);
            return;
        }

        match event {
            TransportEvent::Open => self.on_open(),
            TransportEvent::Error(message) => {
                warn!("Transport error on session {}: {}", session, message);
                self.callbacks.error();
            }
            TransportEvent::Message(data) => self.on_message(&data),
            TransportEvent::Closed => {
                info!("Transport session {} closed", session);
                self.callbacks.disconnected();
            }
        }
    }

    fn on_open(&mut self) {
        info!("Transport session {} open", self.session);
        self.retries = 0;
        self.callbacks.connected();

        for request in [
            Request::GetConnectionParameters,
            Request::GetStatus,
            Request::GetDayMeasurements,
        ] {
            if let Err(e) = self.request(&request) {
                warn!("Startup request {} failed: {}", request.command().name(), e);
            }
        }
    }

    fn on_message(&mut self, data: &[u8]) {
        self.retries = 0;

        match Response::decode(data) {
            Ok(Response::ConnectionParameters(params)) => {
                debug!("Connection parameters: ssid {} site {}", params.ssid, params.site);
                self.callbacks.connection_parameters(&params);
            }
            Ok(Response::Ack(command)) => debug!("{} acknowledged", command.name()),
            Ok(Response::Status(status)) => {
                debug!(
                    "Status: {:?} color {}:{}:{} at {}",
                    status.mode, status.color.r, status.color.g, status.color.b, status.timestamp
                );
                self.callbacks.status(&status);
            }
            Ok(Response::DayMeasurements(measurements)) => {
                debug!("Day measurements received");
                self.callbacks.day_measurements(&measurements);
            }
            Err(CodecError::Rejected { command, status }) => {
                debug!("Command {:#04x} rejected with status {:#04x}", command, status);
            }
            Err(CodecError::UnknownCommand(command)) => {
                debug!("Ignoring frame with unknown command {:#04x}", command);
            }
            Err(e) => warn!("Dropping malformed frame: {}", e),
        }
    }
}

impl<C: Connector> Drop for Controller<C> {
    fn drop(&mut self) {
        self.disconnect();
    }
}

use terralux_api::{
    CodecError, CommandId, DAY_SAMPLES, DayMeasurements, DeviceStatus, Request, RequestFrame,
    Response, ResponseFrame,
};
use time::format_description::well_known::Rfc2822;
use time::{Duration, OffsetDateTime};

use crate::device::DeviceState;
use crate::simulate::{SampleSource, Simulator};

/// Answers request frames on behalf of one simulated device.
///
/// Every request gets exactly one response frame back. Requests that cannot
/// be decoded are answered with an error status: `[0x00, 0xFF]` when the
/// command is unknown, `[command, 0xFF]` when its payload is malformed.
pub struct Responder<S = Simulator> {
    state: DeviceState,
    source: S,
    clock: fn() -> OffsetDateTime,
}

impl<S: SampleSource> Responder<S> {
    pub fn new(state: DeviceState, source: S) -> Self {
        Self::with_clock(state, source, OffsetDateTime::now_utc)
    }

    pub fn with_clock(state: DeviceState, source: S, clock: fn() -> OffsetDateTime) -> Self {
        Self {
            state,
            source,
            clock,
        }
    }

    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    pub fn handle(&mut self, request: &[u8]) -> Vec<u8> {
        let command = match RequestFrame::parse(request) {
            Ok(frame) => frame.command,
            Err(_) => {
                tracing::warn!("Empty request");
                return ResponseFrame::rejection(CommandId::UNKNOWN);
            }
        };

        let request = match Request::decode(request) {
            Ok(request) => request,
            Err(CodecError::UnknownCommand(id)) => {
                tracing::warn!("Unknown command {:#04x}", id);
                return ResponseFrame::rejection(CommandId::UNKNOWN);
            }
            Err(e) => {
                tracing::warn!("Malformed request {:#04x}: {}", command, e);
                return ResponseFrame::rejection(command);
            }
        };

        tracing::debug!("Rx: {}", request.command().name());

        match self.apply(request).encode() {
            Ok(frame) => frame,
            Err(e) => {
                tracing::error!("Failed to encode response to {:#04x}: {}", command, e);
                ResponseFrame::rejection(command)
            }
        }
    }

    fn apply(&mut self, request: Request) -> Response {
        match request {
            Request::GetConnectionParameters => {
                Response::ConnectionParameters(self.state.connection.clone())
            }
            Request::SetConnectionParameters(params) => {
                tracing::info!(
                    "Connection parameters received: ssid {} site {}",
                    params.ssid,
                    params.site
                );
                Response::Ack(CommandId::SetConnectionParameters)
            }
            Request::SetColor(color) => {
                tracing::info!("Set color {}:{}:{}", color.r, color.g, color.b);
                self.state.set_color(color);
                Response::Ack(CommandId::SetColor)
            }
            Request::SetSunImitationMode(enabled) => {
                tracing::info!("Set sun imitation mode {}", enabled);
                self.state.set_sun_imitation(enabled);
                Response::Ack(CommandId::SetSunImitationMode)
            }
            Request::SetActuator(actuator, value) => {
                tracing::info!("Set {} {}", actuator.name(), value);
                self.state.set_actuator(actuator, value);
                Response::Ack(actuator.command())
            }
            Request::GetStatus => Response::Status(self.status()),
            Request::GetDayMeasurements => Response::DayMeasurements(self.day_measurements()),
        }
    }

    fn status(&mut self) -> DeviceStatus {
        let now = (self.clock)();
        let timestamp = now.format(&Rfc2822).unwrap_or_else(|e| {
            tracing::warn!("Cannot format timestamp: {}", e);
            String::new()
        });

        self.state.status(self.source.sample(now), timestamp)
    }

    /// One sample per hour over the last day, oldest first.
    fn day_measurements(&mut self) -> DayMeasurements {
        let now = (self.clock)();
        let mut measurements = DayMeasurements::default();

        for index in 0..DAY_SAMPLES {
            let hours_ago = (DAY_SAMPLES - index) as i64;
            let sample = self.source.sample(now - Duration::hours(hours_ago));

            measurements.pressure[index] = sample.pressure;
            measurements.temperature[index] = sample.temperature;
            measurements.humidity[index] = sample.humidity;
        }

        measurements
    }
}

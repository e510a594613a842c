use serde::{Deserialize, Serialize};
use terralux_api::{Actuator, Color, ConnectionParameters, DeviceStatus, Mode};

use crate::simulate::Sample;

/// Mutable state of one simulated device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceState {
    pub mode: Mode,
    pub color: Color,
    pub ultraviolet: u8,
    pub white: u8,
    pub fito: u8,
    pub fan: u8,
    pub humidifier: u8,
    /// Reported by `get connection parameters`, never changed at runtime
    pub connection: ConnectionParameters,
}

impl Default for DeviceState {
    fn default() -> Self {
        Self::with_connection(ConnectionParameters::new(
            "TestAccessPoint",
            "TestPassword",
            "testsite",
        ))
    }
}

impl DeviceState {
    pub fn with_connection(connection: ConnectionParameters) -> Self {
        Self {
            mode: Mode::SunImitation,
            color: Color::WHITE,
            ultraviolet: 80,
            white: 160,
            fito: 240,
            fan: 2,
            humidifier: 1,
            connection,
        }
    }

    pub fn set_color(&mut self, color: Color) {
        self.mode = Mode::Color;
        self.color = color;
    }

    /// Turning sun imitation on forces full white; turning it off keeps the
    /// last color.
    pub fn set_sun_imitation(&mut self, enabled: bool) {
        if enabled {
            self.mode = Mode::SunImitation;
            self.color = Color::WHITE;
        } else {
            self.mode = Mode::Color;
        }
    }

    /// Any manual actuator change leaves sun imitation mode.
    pub fn set_actuator(&mut self, actuator: Actuator, value: u8) {
        self.mode = Mode::Color;
        *self.actuator_mut(actuator) = value;
    }

    pub fn actuator(&self, actuator: Actuator) -> u8 {
        match actuator {
            Actuator::UltraViolet => self.ultraviolet,
            Actuator::White => self.white,
            Actuator::Fito => self.fito,
            Actuator::Fan => self.fan,
            Actuator::Humidifier => self.humidifier,
        }
    }

    fn actuator_mut(&mut self, actuator: Actuator) -> &mut u8 {
        match actuator {
            Actuator::UltraViolet => &mut self.ultraviolet,
            Actuator::White => &mut self.white,
            Actuator::Fito => &mut self.fito,
            Actuator::Fan => &mut self.fan,
            Actuator::Humidifier => &mut self.humidifier,
        }
    }

    pub fn status(&self, sample: Sample, timestamp: String) -> DeviceStatus {
        DeviceStatus {
            mode: self.mode,
            color: self.color,
            ultraviolet: self.ultraviolet,
            white: self.white,
            fito: self.fito,
            fan: self.fan,
            humidifier: self.humidifier,
            pressure: sample.pressure,
            temperature: sample.temperature,
            humidity: sample.humidity,
            timestamp,
        }
    }
}

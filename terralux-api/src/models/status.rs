use alloc::string::String;

use serde::{Deserialize, Serialize};

use super::{Humidity, Pressure, Temperature};
use crate::command::CommandId;

/// Lighting mode reported by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// Color driven by the built-in daylight simulation
    SunImitation,
    /// Color set manually
    Color,
    /// Any other mode byte, kept as received
    Unknown(u8),
}

impl Mode {
    pub const SUN_IMITATION: u8 = 0;
    pub const COLOR: u8 = 1;
    pub const UNKNOWN: u8 = 0xFF;

    pub fn from_u8(value: u8) -> Self {
        match value {
            Self::SUN_IMITATION => Self::SunImitation,
            Self::COLOR => Self::Color,
            other => Self::Unknown(other),
        }
    }

    pub fn as_u8(self) -> u8 {
        match self {
            Self::SunImitation => Self::SUN_IMITATION,
            Self::Color => Self::COLOR,
            Self::Unknown(raw) => raw,
        }
    }

    pub fn is_sun(self) -> bool {
        self == Self::SunImitation
    }
}

impl Default for Mode {
    fn default() -> Self {
        Self::Unknown(Self::UNKNOWN)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Single-byte outputs that are set one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Actuator {
    UltraViolet,
    White,
    Fito,
    Fan,
    Humidifier,
}

impl Actuator {
    pub const ALL: [Self; 5] = [
        Self::UltraViolet,
        Self::White,
        Self::Fito,
        Self::Fan,
        Self::Humidifier,
    ];

    pub fn command(self) -> CommandId {
        match self {
            Self::UltraViolet => CommandId::SetUltraViolet,
            Self::White => CommandId::SetWhite,
            Self::Fito => CommandId::SetFito,
            Self::Fan => CommandId::SetFan,
            Self::Humidifier => CommandId::SetHumidifier,
        }
    }

    pub fn from_command(command: CommandId) -> Option<Self> {
        match command {
            CommandId::SetUltraViolet => Some(Self::UltraViolet),
            CommandId::SetWhite => Some(Self::White),
            CommandId::SetFito => Some(Self::Fito),
            CommandId::SetFan => Some(Self::Fan),
            CommandId::SetHumidifier => Some(Self::Humidifier),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::UltraViolet => "ultraviolet",
            Self::White => "white",
            Self::Fito => "fito",
            Self::Fan => "fan",
            Self::Humidifier => "humidifier",
        }
    }
}

/// Snapshot returned by the get status command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceStatus {
    /// Current lighting mode
    pub mode: Mode,
    /// Current RGB output
    pub color: Color,
    /// Ultraviolet channel brightness
    pub ultraviolet: u8,
    /// White channel brightness
    pub white: u8,
    /// Fito channel brightness
    pub fito: u8,
    /// Fan speed step
    pub fan: u8,
    /// Humidifier state
    pub humidifier: u8,
    pub pressure: Pressure,
    pub temperature: Temperature,
    pub humidity: Humidity,
    /// Device local time as formatted by the device
    pub timestamp: String,
}

impl DeviceStatus {
    pub fn actuator(&self, actuator: Actuator) -> u8 {
        match actuator {
            Actuator::UltraViolet => self.ultraviolet,
            Actuator::White => self.white,
            Actuator::Fito => self.fito,
            Actuator::Fan => self.fan,
            Actuator::Humidifier => self.humidifier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_u8() {
        assert_eq!(Mode::from_u8(0), Mode::SunImitation);
        assert_eq!(Mode::from_u8(1), Mode::Color);
        assert_eq!(Mode::from_u8(7), Mode::Unknown(7));
        assert_eq!(Mode::from_u8(7).as_u8(), 7);
    }

    #[test]
    fn test_only_sun_imitation_is_sun() {
        assert!(Mode::SunImitation.is_sun());
        assert!(!Mode::Color.is_sun());
        assert!(!Mode::Unknown(0xFF).is_sun());
    }

    #[test]
    fn test_actuator_command_mapping() {
        for actuator in Actuator::ALL {
            assert_eq!(Actuator::from_command(actuator.command()), Some(actuator));
        }
        assert_eq!(Actuator::from_command(CommandId::SetColor), None);
    }
}

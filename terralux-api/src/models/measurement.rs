use core::fmt;

use serde::{Deserialize, Serialize};

/// Samples per field in a day measurements response, one per hour.
pub const DAY_SAMPLES: usize = 24;

/// Air pressure in kPa × 1000.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pressure(pub u32);

/// Temperature in °C × 100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Temperature(pub i16);

/// Relative humidity in % × 100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Humidity(pub u16);

impl Pressure {
    pub const SCALE: f64 = 0.001;

    pub fn kpa(self) -> f64 {
        self.0 as f64 * Self::SCALE
    }
}

impl Temperature {
    pub const SCALE: f64 = 0.01;

    pub fn celsius(self) -> f64 {
        self.0 as f64 * Self::SCALE
    }
}

impl Humidity {
    pub const SCALE: f64 = 0.01;

    pub fn percent(self) -> f64 {
        self.0 as f64 * Self::SCALE
    }
}

impl fmt::Display for Pressure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.kpa())
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.celsius())
    }
}

impl fmt::Display for Humidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.percent())
    }
}

/// Hourly history of the last day, oldest sample first.
///
/// On the wire the samples are grouped by field: all pressures, then all
/// temperatures, then all humidities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayMeasurements {
    pub pressure: [Pressure; DAY_SAMPLES],
    pub temperature: [Temperature; DAY_SAMPLES],
    pub humidity: [Humidity; DAY_SAMPLES],
}

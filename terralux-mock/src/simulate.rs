use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use terralux_api::{Humidity, Pressure, Temperature};
use time::OffsetDateTime;

/// Raw limits of the device sensors.
pub const PRESSURE_RANGE: (u32, u32) = (90_000, 110_000);
pub const TEMPERATURE_RANGE: (i16, i16) = (0, 3_500);
pub const HUMIDITY_RANGE: (u16, u16) = (0, 9_500);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sample {
    pub pressure: Pressure,
    pub temperature: Temperature,
    pub humidity: Humidity,
}

/// Produces sensor readings for a point in time.
pub trait SampleSource: Send {
    fn sample(&mut self, at: OffsetDateTime) -> Sample;
}

/// Terrarium climate following a daily curve plus gaussian noise.
#[derive(Debug, Clone)]
pub struct Simulator {
    rng: StdRng,
}

impl Simulator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn noise(&mut self, deviation: f64) -> f64 {
        let unit: f64 = self.rng.sample(StandardNormal);
        unit * deviation
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleSource for Simulator {
    fn sample(&mut self, at: OffsetDateTime) -> Sample {
        let day_fraction = day_fraction(at);

        let kpa = simulated_pressure(day_fraction) + self.noise(0.05);
        let celsius = simulated_temperature(day_fraction) + self.noise(0.2);
        let percent = simulated_humidity(day_fraction) + self.noise(1.0);

        Sample {
            pressure: Pressure(to_raw(kpa, Pressure::SCALE, PRESSURE_RANGE) as u32),
            temperature: Temperature(to_raw(celsius, Temperature::SCALE, TEMPERATURE_RANGE) as i16),
            humidity: Humidity(to_raw(percent, Humidity::SCALE, HUMIDITY_RANGE) as u16),
        }
    }
}

fn to_raw<T: Into<f64>>(value: f64, scale: f64, (min, max): (T, T)) -> f64 {
    (value / scale).round().clamp(min.into(), max.into())
}

/// Seconds since midnight as a fraction of the day.
pub fn day_fraction(at: OffsetDateTime) -> f64 {
    let seconds = at.hour() as u32 * 3600 + at.minute() as u32 * 60 + at.second() as u32;
    seconds as f64 / 86_400.0
}

/// Semidiurnal pressure tide around standard pressure, in kPa.
pub fn simulated_pressure(day_fraction: f64) -> f64 {
    101.325 + (day_fraction * 2.0 * TAU).cos() * 0.15
}

/// Basking lamp heating, warmest in the early afternoon, in °C.
pub fn simulated_temperature(day_fraction: f64) -> f64 {
    let radians = (day_fraction - 0.35) * TAU;
    25.0 + radians.sin() * 5.0
}

/// Relative humidity in %, dropping under the lamp and rising with the night mist.
pub fn simulated_humidity(day_fraction: f64) -> f64 {
    let radians = day_fraction * TAU;

    if (0.3..=0.7).contains(&day_fraction) {
        70.0 - radians.sin().max(0.0) * 15.0
    } else {
        80.0 + radians.cos().max(0.0) * 10.0
    }
}

mod connection;
mod measurement;
mod status;

pub use connection::ConnectionParameters;
pub use measurement::{DAY_SAMPLES, DayMeasurements, Humidity, Pressure, Temperature};
pub use status::{Actuator, Color, DeviceStatus, Mode};

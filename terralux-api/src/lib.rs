#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod codec;
pub mod command;
pub mod error;
pub mod models;

pub use codec::{Reader, Request, RequestFrame, Response, ResponseFrame, Status, Writer, decode_string};
pub use command::{COMMAND_TABLE, CommandEntry, CommandId};
pub use error::CodecError;
pub use models::{
    Actuator, Color, ConnectionParameters, DAY_SAMPLES, DayMeasurements, DeviceStatus, Humidity,
    Mode, Pressure, Temperature,
};

//! Byte layout of every command frame.
//!
//! Requests are `[command][payload]`, responses `[command][status][payload]`.
//! Multi-byte integers are little-endian and strings carry a one-byte
//! length prefix.

mod cursor;
mod frame;
pub(crate) mod request;
pub(crate) mod response;

pub use cursor::{Reader, Writer, decode_string};
pub use frame::{RequestFrame, ResponseFrame, Status};
pub use request::Request;
pub use response::Response;

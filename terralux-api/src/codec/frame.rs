use alloc::vec;
use alloc::vec::Vec;

use crate::error::{CodecError, Result};

/// Result byte carried by every response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status(u8);

impl Status {
    pub const SUCCESS: Self = Self(0x00);
    pub const ERROR: Self = Self(0xFF);

    pub fn from_u8(value: u8) -> Self {
        Self(value)
    }

    pub fn as_u8(&self) -> u8 {
        self.0
    }

    /// Any byte other than `0x00` means the command was rejected.
    pub fn is_success(&self) -> bool {
        *self == Self::SUCCESS
    }
}

/// Client to device frame: `[command][payload]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestFrame<'a> {
    pub command: u8,
    pub payload: &'a [u8],
}

impl<'a> RequestFrame<'a> {
    pub const HEADER_SIZE: usize = 1;

    pub fn parse(data: &'a [u8]) -> Result<Self> {
        let (&command, payload) = data.split_first().ok_or(CodecError::EmptyFrame)?;
        Ok(Self { command, payload })
    }
}

/// Device to client frame: `[command][status][payload]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseFrame<'a> {
    pub command: u8,
    pub status: Status,
    pub payload: &'a [u8],
}

impl<'a> ResponseFrame<'a> {
    pub const HEADER_SIZE: usize = 2;

    pub fn parse(data: &'a [u8]) -> Result<Self> {
        match data {
            [] => Err(CodecError::EmptyFrame),
            [command, status, payload @ ..] => Ok(Self {
                command: *command,
                status: Status::from_u8(*status),
                payload,
            }),
            _ => Err(CodecError::Truncated {
                needed: Self::HEADER_SIZE,
                available: data.len(),
            }),
        }
    }

    /// Header-only frame signalling that `command` was not executed.
    pub fn rejection(command: u8) -> Vec<u8> {
        vec![command, Status::ERROR.as_u8()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status() {
        assert!(Status::SUCCESS.is_success());
        assert!(!Status::ERROR.is_success());
        assert!(!Status::from_u8(0x01).is_success());
    }

    #[test]
    fn test_request_frame() {
        let frame = RequestFrame::parse(&[0x03, 10, 20, 30]).unwrap();
        assert_eq!(frame.command, 0x03);
        assert_eq!(frame.payload, &[10, 20, 30]);

        assert_eq!(RequestFrame::parse(&[]).unwrap_err(), CodecError::EmptyFrame);
    }

    #[test]
    fn test_response_frame() {
        let frame = ResponseFrame::parse(&[0x05, 0x00, 0x01]).unwrap();
        assert_eq!(frame.command, 0x05);
        assert!(frame.status.is_success());
        assert_eq!(frame.payload, &[0x01]);

        let frame = ResponseFrame::parse(&[0x03, 0x00]).unwrap();
        assert!(frame.payload.is_empty());

        assert_eq!(ResponseFrame::parse(&[]).unwrap_err(), CodecError::EmptyFrame);
        assert_eq!(
            ResponseFrame::parse(&[0x05]).unwrap_err(),
            CodecError::Truncated {
                needed: 2,
                available: 1
            }
        );
    }

    #[test]
    fn test_rejection() {
        assert_eq!(ResponseFrame::rejection(0x00), [0x00, 0xFF]);
    }
}

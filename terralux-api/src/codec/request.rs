use alloc::vec::Vec;

use super::cursor::{Reader, Writer};
use super::frame::RequestFrame;
use crate::command::{CommandEntry, CommandId};
use crate::error::{CodecError, Result};
use crate::models::{Actuator, Color, ConnectionParameters};

/// Command sent from the client to the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    GetConnectionParameters,
    SetConnectionParameters(ConnectionParameters),
    SetColor(Color),
    SetSunImitationMode(bool),
    GetStatus,
    SetActuator(Actuator, u8),
    GetDayMeasurements,
}

impl Request {
    pub const ON: u8 = 0x01;
    pub const OFF: u8 = 0x00;

    pub fn command(&self) -> CommandId {
        match self {
            Self::GetConnectionParameters => CommandId::GetConnectionParameters,
            Self::SetConnectionParameters(_) => CommandId::SetConnectionParameters,
            Self::SetColor(_) => CommandId::SetColor,
            Self::SetSunImitationMode(_) => CommandId::SetSunImitationMode,
            Self::GetStatus => CommandId::GetStatus,
            Self::SetActuator(actuator, _) => actuator.command(),
            Self::GetDayMeasurements => CommandId::GetDayMeasurements,
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut writer = Writer::with_capacity(4);
        writer.u8(self.command().as_u8());

        match self {
            Self::GetConnectionParameters | Self::GetStatus | Self::GetDayMeasurements => {}
            Self::SetConnectionParameters(params) => {
                writer
                    .string(&params.ssid)?
                    .string(&params.password)?
                    .string(&params.site)?;
            }
            Self::SetColor(color) => {
                writer.u8(color.r).u8(color.g).u8(color.b);
            }
            Self::SetSunImitationMode(enabled) => {
                writer.u8(if *enabled { Self::ON } else { Self::OFF });
            }
            Self::SetActuator(_, value) => {
                writer.u8(*value);
            }
        }

        Ok(writer.into_bytes())
    }

    pub fn decode(data: &[u8]) -> Result<Self> {
        let frame = RequestFrame::parse(data)?;
        let entry =
            CommandEntry::lookup(frame.command).ok_or(CodecError::UnknownCommand(frame.command))?;
        (entry.decode_request)(entry.id, &mut Reader::new(frame.payload))
    }
}

pub(crate) fn get_connection_parameters(_: CommandId, _: &mut Reader<'_>) -> Result<Request> {
    Ok(Request::GetConnectionParameters)
}

pub(crate) fn set_connection_parameters(_: CommandId, reader: &mut Reader<'_>) -> Result<Request> {
    let ssid = reader.string()?;
    let password = reader.string()?;
    let site = reader.string()?;
    Ok(Request::SetConnectionParameters(ConnectionParameters {
        ssid,
        password,
        site,
    }))
}

pub(crate) fn set_color(_: CommandId, reader: &mut Reader<'_>) -> Result<Request> {
    let r = reader.u8()?;
    let g = reader.u8()?;
    let b = reader.u8()?;
    Ok(Request::SetColor(Color::new(r, g, b)))
}

pub(crate) fn set_sun_imitation_mode(_: CommandId, reader: &mut Reader<'_>) -> Result<Request> {
    Ok(Request::SetSunImitationMode(reader.u8()? == Request::ON))
}

pub(crate) fn get_status(_: CommandId, _: &mut Reader<'_>) -> Result<Request> {
    Ok(Request::GetStatus)
}

pub(crate) fn set_actuator(command: CommandId, reader: &mut Reader<'_>) -> Result<Request> {
    let actuator =
        Actuator::from_command(command).ok_or(CodecError::UnknownCommand(command.as_u8()))?;
    Ok(Request::SetActuator(actuator, reader.u8()?))
}

pub(crate) fn get_day_measurements(_: CommandId, _: &mut Reader<'_>) -> Result<Request> {
    Ok(Request::GetDayMeasurements)
}

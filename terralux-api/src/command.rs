use crate::codec::{Reader, Request, Response, request, response};
use crate::error::Result;

/// Command identifier, the first byte of every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CommandId {
    GetConnectionParameters = 0x01,
    SetConnectionParameters = 0x02,
    SetColor = 0x03,
    SetSunImitationMode = 0x04,
    GetStatus = 0x05,
    SetUltraViolet = 0x06,
    SetWhite = 0x07,
    SetFito = 0x08,
    SetFan = 0x09,
    SetHumidifier = 0x0A,
    GetDayMeasurements = 0x0B,
}

impl CommandId {
    /// Identifier the device uses when answering a request it cannot parse
    pub const UNKNOWN: u8 = 0x00;

    pub fn from_u8(value: u8) -> Option<Self> {
        CommandEntry::lookup(value).map(|entry| entry.id)
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn entry(self) -> &'static CommandEntry {
        &COMMAND_TABLE[self as usize - 1]
    }

    pub fn name(self) -> &'static str {
        self.entry().name
    }
}

pub type RequestDecoder = fn(CommandId, &mut Reader<'_>) -> Result<Request>;
pub type ResponseDecoder = fn(CommandId, &mut Reader<'_>) -> Result<Response>;

/// Payload decoders for one command, shared by both ends of the link.
#[derive(Debug)]
pub struct CommandEntry {
    pub id: CommandId,
    pub name: &'static str,
    pub decode_request: RequestDecoder,
    pub decode_response: ResponseDecoder,
}

impl CommandEntry {
    pub fn lookup(id: u8) -> Option<&'static CommandEntry> {
        (id as usize)
            .checked_sub(1)
            .and_then(|index| COMMAND_TABLE.get(index))
    }
}

/// Ordered by identifier so that entry `n` sits at index `n - 1`.
pub static COMMAND_TABLE: [CommandEntry; 11] = [
    CommandEntry {
        id: CommandId::GetConnectionParameters,
        name: "get connection parameters",
        decode_request: request::get_connection_parameters,
        decode_response: response::connection_parameters,
    },
    CommandEntry {
        id: CommandId::SetConnectionParameters,
        name: "set connection parameters",
        decode_request: request::set_connection_parameters,
        decode_response: response::ack,
    },
    CommandEntry {
        id: CommandId::SetColor,
        name: "set color",
        decode_request: request::set_color,
        decode_response: response::ack,
    },
    CommandEntry {
        id: CommandId::SetSunImitationMode,
        name: "set sun imitation mode",
        decode_request: request::set_sun_imitation_mode,
        decode_response: response::ack,
    },
    CommandEntry {
        id: CommandId::GetStatus,
        name: "get status",
        decode_request: request::get_status,
        decode_response: response::status,
    },
    CommandEntry {
        id: CommandId::SetUltraViolet,
        name: "set ultraviolet",
        decode_request: request::set_actuator,
        decode_response: response::ack,
    },
    CommandEntry {
        id: CommandId::SetWhite,
        name: "set white",
        decode_request: request::set_actuator,
        decode_response: response::ack,
    },
    CommandEntry {
        id: CommandId::SetFito,
        name: "set fito",
        decode_request: request::set_actuator,
        decode_response: response::ack,
    },
    CommandEntry {
        id: CommandId::SetFan,
        name: "set fan",
        decode_request: request::set_actuator,
        decode_response: response::ack,
    },
    CommandEntry {
        id: CommandId::SetHumidifier,
        name: "set humidifier",
        decode_request: request::set_actuator,
        decode_response: response::ack,
    },
    CommandEntry {
        id: CommandId::GetDayMeasurements,
        name: "get day measurements",
        decode_request: request::get_day_measurements,
        decode_response: response::day_measurements,
    },
];

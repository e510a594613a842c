use alloc::vec::Vec;

use super::cursor::{Reader, Writer};
use super::frame::{ResponseFrame, Status};
use crate::command::{CommandEntry, CommandId};
use crate::error::{CodecError, Result};
use crate::models::{
    Color, ConnectionParameters, DAY_SAMPLES, DayMeasurements, DeviceStatus, Humidity, Mode,
    Pressure, Temperature,
};

/// Successful answer from the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    ConnectionParameters(ConnectionParameters),
    /// Header-only acknowledgement of a setter command
    Ack(CommandId),
    Status(DeviceStatus),
    DayMeasurements(DayMeasurements),
}

impl Response {
    /// Status payload size before the timestamp string
    pub const STATUS_FIXED_SIZE: usize = 17;
    pub const DAY_MEASUREMENTS_SIZE: usize = DAY_SAMPLES * (4 + 2 + 2);

    pub fn command(&self) -> CommandId {
        match self {
            Self::ConnectionParameters(_) => CommandId::GetConnectionParameters,
            Self::Ack(command) => *command,
            Self::Status(_) => CommandId::GetStatus,
            Self::DayMeasurements(_) => CommandId::GetDayMeasurements,
        }
    }

    /// Encodes the response with a success status byte.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut writer = Writer::with_capacity(ResponseFrame::HEADER_SIZE + self.payload_hint());
        writer
            .u8(self.command().as_u8())
            .u8(Status::SUCCESS.as_u8());

        match self {
            Self::ConnectionParameters(params) => {
                writer
                    .string(&params.ssid)?
                    .string(&params.password)?
                    .string(&params.site)?;
            }
            Self::Ack(_) => {}
            Self::Status(status) => {
                writer
                    .u8(status.mode.as_u8())
                    .u8(status.color.r)
                    .u8(status.color.g)
                    .u8(status.color.b)
                    .u8(status.ultraviolet)
                    .u8(status.white)
                    .u8(status.fito)
                    .u8(status.fan)
                    .u8(status.humidifier)
                    .u32(status.pressure.0)
                    .i16(status.temperature.0)
                    .u16(status.humidity.0)
                    .string(&status.timestamp)?;
            }
            Self::DayMeasurements(measurements) => {
                for pressure in &measurements.pressure {
                    writer.u32(pressure.0);
                }
                for temperature in &measurements.temperature {
                    writer.i16(temperature.0);
                }
                for humidity in &measurements.humidity {
                    writer.u16(humidity.0);
                }
            }
        }

        Ok(writer.into_bytes())
    }

    /// Decodes a full response frame. Rejected frames are reported as
    /// [`CodecError::Rejected`] and their payload is left untouched.
    pub fn decode(data: &[u8]) -> Result<Self> {
        let frame = ResponseFrame::parse(data)?;
        if !frame.status.is_success() {
            return Err(CodecError::Rejected {
                command: frame.command,
                status: frame.status.as_u8(),
            });
        }
        Self::decode_payload(frame.command, frame.payload)
    }

    pub fn decode_payload(command: u8, payload: &[u8]) -> Result<Self> {
        let entry = CommandEntry::lookup(command).ok_or(CodecError::UnknownCommand(command))?;
        (entry.decode_response)(entry.id, &mut Reader::new(payload))
    }

    fn payload_hint(&self) -> usize {
        match self {
            Self::ConnectionParameters(params) => {
                3 + params.ssid.len() + params.password.len() + params.site.len()
            }
            Self::Ack(_) => 0,
            Self::Status(status) => Self::STATUS_FIXED_SIZE + 1 + status.timestamp.len(),
            Self::DayMeasurements(_) => Self::DAY_MEASUREMENTS_SIZE,
        }
    }
}

pub(crate) fn connection_parameters(_: CommandId, reader: &mut Reader<'_>) -> Result<Response> {
    let ssid = reader.string()?;
    let password = reader.string()?;
    let site = reader.string()?;
    Ok(Response::ConnectionParameters(ConnectionParameters {
        ssid,
        password,
        site,
    }))
}

pub(crate) fn ack(command: CommandId, _: &mut Reader<'_>) -> Result<Response> {
    Ok(Response::Ack(command))
}

pub(crate) fn status(_: CommandId, reader: &mut Reader<'_>) -> Result<Response> {
    let mode = Mode::from_u8(reader.u8()?);
    let color = Color::new(reader.u8()?, reader.u8()?, reader.u8()?);

    Ok(Response::Status(DeviceStatus {
        mode,
        color,
        ultraviolet: reader.u8()?,
        white: reader.u8()?,
        fito: reader.u8()?,
        fan: reader.u8()?,
        humidifier: reader.u8()?,
        pressure: Pressure(reader.u32()?),
        temperature: Temperature(reader.i16()?),
        humidity: Humidity(reader.u16()?),
        timestamp: reader.string()?,
    }))
}

pub(crate) fn day_measurements(_: CommandId, reader: &mut Reader<'_>) -> Result<Response> {
    let mut measurements = DayMeasurements::default();

    for pressure in measurements.pressure.iter_mut() {
        *pressure = Pressure(reader.u32()?);
    }
    for temperature in measurements.temperature.iter_mut() {
        *temperature = Temperature(reader.i16()?);
    }
    for humidity in measurements.humidity.iter_mut() {
        *humidity = Humidity(reader.u16()?);
    }

    Ok(Response::DayMeasurements(measurements))
}

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};
    use alloc::vec;

    use super::*;

    fn sample_status(mode: Mode) -> DeviceStatus {
        DeviceStatus {
            mode,
            color: Color::new(10, 20, 30),
            ultraviolet: 80,
            white: 160,
            fito: 240,
            fan: 2,
            humidifier: 1,
            pressure: Pressure(101270),
            temperature: Temperature(2340),
            humidity: Humidity(4360),
            timestamp: String::from("Fri, 16 Oct 2026 12:00:00 +0000"),
        }
    }

    #[test]
    fn test_status_layout() {
        let status = sample_status(Mode::Color);
        let encoded = Response::Status(status.clone()).encode().unwrap();

        assert_eq!(&encoded[..2], &[0x05, 0x00]);
        assert_eq!(encoded[2], Mode::COLOR);
        assert_eq!(&encoded[3..6], &[10, 20, 30]);
        assert_eq!(&encoded[6..11], &[80, 160, 240, 2, 1]);
        assert_eq!(u32::from_le_bytes(encoded[11..15].try_into().unwrap()), 101270);
        assert_eq!(i16::from_le_bytes(encoded[15..17].try_into().unwrap()), 2340);
        assert_eq!(u16::from_le_bytes(encoded[17..19].try_into().unwrap()), 4360);
        assert_eq!(encoded[19] as usize, status.timestamp.len());
        assert_eq!(encoded.len(), 20 + status.timestamp.len());

        assert_eq!(Response::decode(&encoded).unwrap(), Response::Status(status));
    }

    #[test]
    fn test_status_mode_flag() {
        for (mode, sun) in [
            (Mode::SunImitation, true),
            (Mode::Color, false),
            (Mode::Unknown(0xFF), false),
            (Mode::Unknown(2), false),
        ] {
            let encoded = Response::Status(sample_status(mode)).encode().unwrap();
            let Response::Status(decoded) = Response::decode(&encoded).unwrap() else {
                panic!("expected status response");
            };
            assert_eq!(decoded.mode.is_sun(), sun);
        }
    }

    #[test]
    fn test_negative_temperature() {
        let mut status = sample_status(Mode::Color);
        status.temperature = Temperature(-1250);
        let encoded = Response::Status(status).encode().unwrap();
        let Response::Status(decoded) = Response::decode(&encoded).unwrap() else {
            panic!("expected status response");
        };
        assert_eq!(decoded.temperature.to_string(), "-12.50");
    }

    #[test]
    fn test_day_measurements() {
        let mut measurements = DayMeasurements::default();
        for hour in 0..DAY_SAMPLES {
            measurements.pressure[hour] = Pressure(95000 + hour as u32 * 100);
            measurements.temperature[hour] = Temperature(hour as i16 * 100);
            measurements.humidity[hour] = Humidity(5000 + hour as u16);
        }

        let encoded = Response::DayMeasurements(measurements.clone())
            .encode()
            .unwrap();
        assert_eq!(encoded.len(), 2 + Response::DAY_MEASUREMENTS_SIZE);
        // Grouped by field: the first temperature follows the last pressure.
        assert_eq!(&encoded[2..6], &95000u32.to_le_bytes());
        assert_eq!(&encoded[2 + 96..2 + 98], &0i16.to_le_bytes());

        let Response::DayMeasurements(decoded) = Response::decode(&encoded).unwrap() else {
            panic!("expected day measurements");
        };
        assert_eq!(decoded, measurements);
        assert_eq!(decoded.pressure[0].to_string(), "95.0");
        assert_eq!(decoded.pressure[23].to_string(), "97.3");
        assert_eq!(decoded.temperature[5].to_string(), "5.00");
        assert_eq!(decoded.humidity[1].to_string(), "50.01");
    }

    #[test]
    fn test_connection_parameters() {
        let params = ConnectionParameters::new("TestAccessPoint", "TestPassword", "testsite");
        let encoded = Response::ConnectionParameters(params.clone())
            .encode()
            .unwrap();
        assert_eq!(encoded.len(), 2 + 3 + 15 + 12 + 8);
        assert_eq!(
            Response::decode(&encoded).unwrap(),
            Response::ConnectionParameters(params)
        );
    }

    #[test]
    fn test_ack() {
        let encoded = Response::Ack(CommandId::SetColor).encode().unwrap();
        assert_eq!(encoded, vec![0x03, 0x00]);
        assert_eq!(
            Response::decode(&encoded).unwrap(),
            Response::Ack(CommandId::SetColor)
        );
    }

    #[test]
    fn test_rejected_payload_is_not_read() {
        assert_eq!(
            Response::decode(&[0x05, 0xFF]).unwrap_err(),
            CodecError::Rejected {
                command: 0x05,
                status: 0xFF
            }
        );
        assert_eq!(
            Response::decode(&[0x00, 0xFF]).unwrap_err(),
            CodecError::Rejected {
                command: 0x00,
                status: 0xFF
            }
        );
    }

    #[test]
    fn test_truncated_status_fails() {
        let encoded = Response::Status(sample_status(Mode::Color)).encode().unwrap();
        assert!(matches!(
            Response::decode(&encoded[..18]),
            Err(CodecError::Truncated { .. })
        ));
        assert!(matches!(
            Response::decode(&encoded[..encoded.len() - 1]),
            Err(CodecError::Truncated { .. })
        ));
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            Response::decode(&[0x42, 0x00]).unwrap_err(),
            CodecError::UnknownCommand(0x42)
        );
    }
}

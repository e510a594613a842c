use alloc::string::String;
use alloc::vec::Vec;

use crate::error::{CodecError, Result};

/// Forward-only view over a frame that reads little-endian fields.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self::at(data, 0)
    }

    pub fn at(data: &'a [u8], offset: usize) -> Self {
        Self { data, offset }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    pub fn u8(&mut self) -> Result<u8> {
        Ok(self.take::<1>()?[0])
    }

    pub fn u16(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.take()?))
    }

    pub fn i16(&mut self) -> Result<i16> {
        Ok(i16::from_le_bytes(self.take()?))
    }

    pub fn u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.take()?))
    }

    /// Reads a length-prefixed string, one char per raw byte.
    pub fn string(&mut self) -> Result<String> {
        let len = self.u8()? as usize;
        let bytes = self.slice(len)?;
        Ok(bytes.iter().copied().map(char::from).collect())
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.slice(N)?);
        Ok(out)
    }

    fn slice(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self.offset.checked_add(len).ok_or(CodecError::Truncated {
            needed: usize::MAX,
            available: self.data.len(),
        })?;
        let bytes = self
            .data
            .get(self.offset..end)
            .ok_or(CodecError::Truncated {
                needed: end,
                available: self.data.len(),
            })?;
        self.offset = end;
        Ok(bytes)
    }
}

/// Decodes the string at `offset`, returning it with the bytes consumed.
pub fn decode_string(data: &[u8], offset: usize) -> Result<(String, usize)> {
    let mut reader = Reader::at(data, offset);
    let value = reader.string()?;
    Ok((value, reader.offset() - offset))
}

#[derive(Debug, Clone, Default)]
pub struct Writer {
    buffer: Vec<u8>,
}

impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    pub fn u8(&mut self, value: u8) -> &mut Self {
        self.buffer.push(value);
        self
    }

    pub fn u16(&mut self, value: u16) -> &mut Self {
        self.buffer.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn i16(&mut self, value: i16) -> &mut Self {
        self.buffer.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn u32(&mut self, value: u32) -> &mut Self {
        self.buffer.extend_from_slice(&value.to_le_bytes());
        self
    }

    /// Writes a length-prefixed string. Every char must fit in one byte.
    pub fn string(&mut self, value: &str) -> Result<&mut Self> {
        let len = value.chars().count();
        if len > u8::MAX as usize {
            return Err(CodecError::StringTooLong(len));
        }

        self.buffer.reserve(len + 1);
        self.buffer.push(len as u8);
        for c in value.chars() {
            let byte = u8::try_from(c).map_err(|_| CodecError::InvalidCharacter(c))?;
            self.buffer.push(byte);
        }
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn test_little_endian_fields() {
        let mut writer = Writer::new();
        writer.u8(0xAB).u16(0x1234).i16(-2).u32(95000);
        let bytes = writer.into_bytes();

        assert_eq!(bytes, vec![0xAB, 0x34, 0x12, 0xFE, 0xFF, 0x18, 0x73, 0x01, 0x00]);

        let mut reader = Reader::new(&bytes);
        assert_eq!(reader.u8().unwrap(), 0xAB);
        assert_eq!(reader.u16().unwrap(), 0x1234);
        assert_eq!(reader.i16().unwrap(), -2);
        assert_eq!(reader.u32().unwrap(), 95000);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_empty_string_consumes_one_byte() {
        let data = [0x00, 0x03, b'a', b'b', b'c'];
        let (value, consumed) = decode_string(&data, 0).unwrap();
        assert_eq!(value, "");
        assert_eq!(consumed, 1);

        let (value, consumed) = decode_string(&data, consumed).unwrap();
        assert_eq!(value, "abc");
        assert_eq!(consumed, 4);
    }

    #[test]
    fn test_consecutive_strings_advance_offset() {
        let mut writer = Writer::new();
        writer
            .string("TestAccessPoint")
            .unwrap()
            .string("TestPassword")
            .unwrap()
            .string("testsite")
            .unwrap();
        let bytes = writer.into_bytes();

        let mut reader = Reader::new(&bytes);
        assert_eq!(reader.string().unwrap(), "TestAccessPoint");
        assert_eq!(reader.offset(), 16);
        assert_eq!(reader.string().unwrap(), "TestPassword");
        assert_eq!(reader.string().unwrap(), "testsite");
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_raw_bytes_map_to_chars() {
        let data = [0x02, 0xE9, 0x00];
        let (value, _) = decode_string(&data, 0).unwrap();
        assert_eq!(value, "\u{e9}\u{0}");

        let mut writer = Writer::new();
        writer.string(&value).unwrap();
        assert_eq!(writer.into_bytes(), data);
    }

    #[test]
    fn test_string_limits() {
        let long = "x".repeat(256);
        assert_eq!(
            Writer::new().string(&long).unwrap_err(),
            CodecError::StringTooLong(256)
        );
        assert_eq!(
            Writer::new().string("caf\u{2603}").unwrap_err(),
            CodecError::InvalidCharacter('\u{2603}')
        );
        assert!(Writer::new().string(&"x".repeat(255)).is_ok());
    }

    #[test]
    fn test_truncated_reads() {
        let mut reader = Reader::new(&[0x01, 0x02]);
        assert_eq!(
            reader.u32().unwrap_err(),
            CodecError::Truncated {
                needed: 4,
                available: 2
            }
        );

        let data = [0x05, b'a', b'b'];
        assert_eq!(
            decode_string(&data, 0).unwrap_err(),
            CodecError::Truncated {
                needed: 6,
                available: 3
            }
        );
        assert!(decode_string(&data, 10).is_err());
    }

    #[test]
    fn test_offset_overflow_is_truncated() {
        let data = [0x01, b'a'];
        let truncated = CodecError::Truncated {
            needed: usize::MAX,
            available: 2,
        };

        assert_eq!(Reader::at(&data, usize::MAX).u32().unwrap_err(), truncated);
        assert_eq!(decode_string(&data, usize::MAX).unwrap_err(), truncated);
    }
}

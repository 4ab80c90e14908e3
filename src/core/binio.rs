/*!
# Typed Binary I/O

Buffered reads and writes of 32-bit signed integers and IEEE-754 single
precision floats with an explicit byte order. Edge streams are little-endian;
cluster record streams are big-endian. The byte order is always named at the
call site, never inherited from the platform.

Short reads surface as [`SensegraphError::IoRead`] and failed writes as
[`SensegraphError::IoWrite`].
*/

use byteorder::{BigEndian, LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};

use crate::core::error::{Result, SensegraphError};

/// Reads a little-endian `i32`, or `None` when the stream ends exactly at
/// the field boundary.
///
/// A stream that ends partway through the 4 bytes is a torn record and is
/// reported as a read error, not as end of stream.
pub fn try_read_i32_le<R: Read>(reader: &mut R) -> Result<Option<i32>> {
    let mut buf = [0u8; 4];
    let mut filled = 0;
    while filled < buf.len() {
        let n = reader
            .read(&mut buf[filled..])
            .map_err(|e| SensegraphError::io_read(e.to_string()))?;
        if n == 0 {
            if filled == 0 {
                return Ok(None);
            }
            return Err(SensegraphError::io_read(
                "stream ended inside a 4-byte field",
            ));
        }
        filled += n;
    }
    Ok(Some(i32::from_le_bytes(buf)))
}

/// Reads a little-endian `i32`.
pub fn read_i32_le<R: Read>(reader: &mut R) -> Result<i32> {
    reader
        .read_i32::<LittleEndian>()
        .map_err(|e| SensegraphError::io_read(e.to_string()))
}

/// Reads a little-endian `f32`.
pub fn read_f32_le<R: Read>(reader: &mut R) -> Result<f32> {
    reader
        .read_f32::<LittleEndian>()
        .map_err(|e| SensegraphError::io_read(e.to_string()))
}

/// Fills `out` with little-endian `f32` values.
pub fn read_f32_slice_le<R: Read>(reader: &mut R, out: &mut [f32]) -> Result<()> {
    reader
        .read_f32_into::<LittleEndian>(out)
        .map_err(|e| SensegraphError::io_read(e.to_string()))
}

/// Writes a little-endian `i32`.
pub fn write_i32_le<W: Write>(writer: &mut W, value: i32) -> Result<()> {
    writer
        .write_i32::<LittleEndian>(value)
        .map_err(|e| SensegraphError::io_write(e.to_string()))
}

/// Writes a little-endian `f32`.
pub fn write_f32_le<W: Write>(writer: &mut W, value: f32) -> Result<()> {
    writer
        .write_f32::<LittleEndian>(value)
        .map_err(|e| SensegraphError::io_write(e.to_string()))
}

/// Writes a big-endian `i32`.
pub fn write_i32_be<W: Write>(writer: &mut W, value: i32) -> Result<()> {
    writer
        .write_i32::<BigEndian>(value)
        .map_err(|e| SensegraphError::io_write(e.to_string()))
}

/// Writes a big-endian `f32` (IEEE-754 bit pattern).
pub fn write_f32_be<W: Write>(writer: &mut W, value: f32) -> Result<()> {
    writer
        .write_f32::<BigEndian>(value)
        .map_err(|e| SensegraphError::io_write(e.to_string()))
}

/// Flushes a buffered writer, mapping failure to a write error.
pub fn flush<W: Write>(writer: &mut W) -> Result<()> {
    writer
        .flush()
        .map_err(|e| SensegraphError::io_write(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_little_endian_layout() {
        let mut buf = Vec::new();
        write_i32_le(&mut buf, 1).unwrap();
        write_f32_le(&mut buf, 1.0).unwrap();
        // Least-significant byte first.
        assert_eq!(&buf[..4], &[1, 0, 0, 0]);
        assert_eq!(&buf[4..], 1.0f32.to_le_bytes());

        let mut cursor = Cursor::new(buf);
        assert_eq!(read_i32_le(&mut cursor).unwrap(), 1);
        assert_eq!(read_f32_le(&mut cursor).unwrap(), 1.0);
    }

    #[test]
    fn test_big_endian_layout() {
        let mut buf = Vec::new();
        write_i32_be(&mut buf, 1).unwrap();
        write_f32_be(&mut buf, -2.5).unwrap();
        assert_eq!(&buf[..4], &[0, 0, 0, 1]);
        assert_eq!(&buf[4..], (-2.5f32).to_be_bytes());
    }

    #[test]
    fn test_try_read_distinguishes_eof_from_torn_field() {
        let mut empty = Cursor::new(Vec::<u8>::new());
        assert!(try_read_i32_le(&mut empty).unwrap().is_none());

        let mut torn = Cursor::new(vec![0x01, 0x02]);
        assert!(try_read_i32_le(&mut torn).is_err());
    }

    #[test]
    fn test_short_read_is_an_error() {
        let mut cursor = Cursor::new(vec![0u8; 3]);
        assert!(read_i32_le(&mut cursor).is_err());
    }
}

//! Little-endian binary primitives
//!
//! Shared by the stroke and bit vector encoders and by the reference
//! library asset format. Reading goes through [`ByteReader`], a bounds
//! checked cursor over a byte slice; writing uses the free `write_*`
//! functions on any [`Write`].

use crate::error::{Error, Result};
use std::io::Write;

/// Cursor over a byte slice that reports truncation as a decode error.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Create a reader positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current byte offset
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of unread bytes
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Take the next `n` bytes.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        if n > self.remaining() {
            return Err(Error::DecodeError(format!(
                "data truncated: need {n} bytes at offset {} but only {} remain",
                self.pos,
                self.remaining()
            )));
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// Skip the next `n` bytes.
    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.read_bytes(n).map(|_| ())
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(i16::from_le_bytes(self.read_array()?))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_le_bytes(self.read_array()?))
    }
}

pub fn write_u8(writer: &mut impl Write, v: u8) -> Result<()> {
    writer.write_all(&[v])?;
    Ok(())
}

pub fn write_u16(writer: &mut impl Write, v: u16) -> Result<()> {
    writer.write_all(&v.to_le_bytes())?;
    Ok(())
}

pub fn write_i16(writer: &mut impl Write, v: i16) -> Result<()> {
    writer.write_all(&v.to_le_bytes())?;
    Ok(())
}

pub fn write_u32(writer: &mut impl Write, v: u32) -> Result<()> {
    writer.write_all(&v.to_le_bytes())?;
    Ok(())
}

pub fn write_f32(writer: &mut impl Write, v: f32) -> Result<()> {
    writer.write_all(&v.to_le_bytes())?;
    Ok(())
}

/// Convert a length to the `u32` used by count fields.
pub fn count_u32(n: usize, what: &str) -> Result<u32> {
    u32::try_from(n).map_err(|_| Error::InvalidParameter(format!("too many {what}: {n}")))
}

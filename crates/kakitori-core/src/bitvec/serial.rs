//! Serialization for BitVector
//!
//! # Format layout
//!
//! ```text
//! u32      bit length L, little-endian
//! ceil(L / 8) bytes, bits packed least significant first
//! ```
//!
//! Storing the bit length rather than the byte count keeps lengths that
//! are not multiples of 8 intact.

use super::BitVector;
use crate::binary::{self, ByteReader};
use crate::error::{Error, Result};
use std::io::Write;

/// Largest bit length accepted when decoding
const MAX_BITS: usize = 1 << 20;

impl BitVector {
    /// Read a bit vector from a binary reader.
    pub fn read_from(reader: &mut ByteReader<'_>) -> Result<Self> {
        let len = reader.read_u32()? as usize;
        if len > MAX_BITS {
            return Err(Error::DecodeError(format!(
                "bit vector too large: {len} bits exceeds maximum {MAX_BITS}"
            )));
        }
        let bytes = reader.read_bytes(len.div_ceil(8))?;
        let mut v = BitVector {
            bytes: bytes.to_vec(),
            len,
        };
        v.clear_tail();
        Ok(v)
    }

    /// Read a bit vector from a byte slice.
    pub fn read_from_bytes(data: &[u8]) -> Result<Self> {
        Self::read_from(&mut ByteReader::new(data))
    }

    /// Write a bit vector to a writer.
    pub fn write_to_writer(&self, writer: &mut impl Write) -> Result<()> {
        binary::write_u32(writer, binary::count_u32(self.len, "bits")?)?;
        writer.write_all(&self.bytes)?;
        Ok(())
    }

    /// Write a bit vector to a byte vector.
    pub fn write_to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(4 + self.bytes.len());
        self.write_to_writer(&mut buf)?;
        Ok(buf)
    }
}

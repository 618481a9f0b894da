//! Serialization for Stroke
//!
//! Compact binary point lists, as embedded in reference library assets.
//!
//! # Format layout
//!
//! ```text
//! u16      point count N
//! N × {
//!   i16    x, fixed point
//!   i16    y, fixed point
//! }
//! ```
//!
//! All integers are little-endian. Coordinates are stored multiplied by
//! [`FIXED_POINT_SCALE`], which covers `[-3.2767, 3.2767]` at a resolution
//! of `1e-4`.

use super::Stroke;
use crate::binary::{self, ByteReader};
use crate::error::{Error, Result};
use crate::point::Point;
use std::io::Write;

/// Stored coordinate units per unit of stroke space
pub const FIXED_POINT_SCALE: f64 = 10000.0;

fn to_fixed(v: f64) -> Result<i16> {
    let scaled = (v * FIXED_POINT_SCALE).round();
    if !(f64::from(i16::MIN)..=f64::from(i16::MAX)).contains(&scaled) {
        return Err(Error::InvalidParameter(format!(
            "coordinate {v} outside the storable range"
        )));
    }
    Ok(scaled as i16)
}

impl Stroke {
    /// Read a stroke from a binary reader.
    ///
    /// Consecutive duplicate points collapse as they do for [`Stroke::push`].
    pub fn read_from(reader: &mut ByteReader<'_>) -> Result<Self> {
        let n = reader.read_u16()?;
        let mut stroke = Stroke::new();
        for _ in 0..n {
            let x = f64::from(reader.read_i16()?) / FIXED_POINT_SCALE;
            let y = f64::from(reader.read_i16()?) / FIXED_POINT_SCALE;
            stroke.push(Point::new(x, y));
        }
        Ok(stroke)
    }

    /// Read a stroke from a byte slice.
    pub fn read_from_bytes(data: &[u8]) -> Result<Self> {
        Self::read_from(&mut ByteReader::new(data))
    }

    /// Write a stroke to a writer.
    pub fn write_to_writer(&self, writer: &mut impl Write) -> Result<()> {
        let n = u16::try_from(self.len()).map_err(|_| {
            Error::InvalidParameter(format!("too many points to store: {}", self.len()))
        })?;
        binary::write_u16(writer, n)?;
        for p in self.points() {
            binary::write_i16(writer, to_fixed(p.x)?)?;
            binary::write_i16(writer, to_fixed(p.y)?)?;
        }
        Ok(())
    }

    /// Write a stroke to a byte vector.
    pub fn write_to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(2 + 4 * self.len());
        self.write_to_writer(&mut buf)?;
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stroke_serial_layout() {
        let s = Stroke::from_points([Point::new(0.5, 0.25), Point::new(-0.1, 1.0)]);
        let bytes = s.write_to_bytes().unwrap();
        assert_eq!(bytes.len(), 2 + 2 * 4);
        assert_eq!(&bytes[..2], &[2, 0]);
        assert_eq!(&bytes[2..4], &5000i16.to_le_bytes());
        assert_eq!(&bytes[6..8], &(-1000i16).to_le_bytes());

        let back = Stroke::read_from_bytes(&bytes).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn test_stroke_serial_quantizes() {
        let s = Stroke::from_points([Point::new(0.123456, 0.0), Point::new(1.0, 0.987654)]);
        let back = Stroke::read_from_bytes(&s.write_to_bytes().unwrap()).unwrap();
        assert_eq!(back.len(), 2);
        assert!((back.point(0).x - 0.1235).abs() < 1e-9);
        assert!((back.point(1).y - 0.9877).abs() < 1e-9);
    }

    #[test]
    fn test_stroke_serial_out_of_range() {
        let s = Stroke::from_points([Point::new(0.0, 0.0), Point::new(4.0, 0.0)]);
        assert!(matches!(s.write_to_bytes(), Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn test_stroke_serial_truncated() {
        assert!(matches!(
            Stroke::read_from_bytes(&[3, 0, 1, 0, 1, 0]),
            Err(Error::DecodeError(_))
        ));
    }
}

//! Serialization for ReferenceLibrary
//!
//! Binary asset format, all integers little-endian.
//!
//! # Format layout
//!
//! ```text
//! magic        4   b"KKTR"
//! version      2   u16
//! elements     4   u32 count, then per element:
//!   owner      1   tag: 0 none, 1 kanji index, 2 code point; u32 follows if tag != 0
//!   pattern    1   u8
//!   parts      1   u8 count (at most 4), then one u32 per part
//!   strokes    2   u16 count, then one point list per stroke
//!   recdata    1   u8 flag; if 1, per stroke:
//!                    u32 best model, f32 best distance,
//!                    one bit vector per element stroke
//! models       4   u32 count, then one point list per model
//! aux          4   u32 byte length of auxiliary tables, skipped on read
//! ```
//!
//! Point lists and bit vectors use the encodings of [`Stroke`] and
//! [`BitVector`]. Model strokes are stored as they are and read back by
//! plain point append. Reading validates the whole asset and hands it to
//! [`ReferenceLibrary::new`], which fills in missing recognition data.

use super::{CharOwner, Element, MAX_PARTS, ReferenceLibrary, StrokeRecData};
use crate::error::{RecogError, RecogResult};
use kakitori_core::binary::{self, ByteReader};
use kakitori_core::{BitVector, Stroke};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::debug;

/// Asset magic bytes
pub const LIBRARY_MAGIC: [u8; 4] = *b"KKTR";

/// Version written by [`ReferenceLibrary::write_to_writer`]
pub const LIBRARY_VERSION: u16 = 2;

/// Oldest version that can be read
pub const MIN_LIBRARY_VERSION: u16 = 2;

/// Maximum input size in bytes
const MAX_INPUT_SIZE: u64 = 256_000_000;

const OWNER_NONE: u8 = 0;
const OWNER_KANJI: u8 = 1;
const OWNER_CODE_POINT: u8 = 2;

impl ReferenceLibrary {
    /// Read a library from a reader.
    pub fn read_from_reader(reader: &mut impl Read) -> RecogResult<Self> {
        let mut buf = Vec::new();
        reader.take(MAX_INPUT_SIZE + 1).read_to_end(&mut buf)?;
        if buf.len() as u64 > MAX_INPUT_SIZE {
            return Err(RecogError::InvalidAsset(format!(
                "input too large: exceeds maximum allowed size of {MAX_INPUT_SIZE} bytes"
            )));
        }
        Self::read_from_bytes(&buf)
    }

    /// Read a library from a file.
    pub fn read_from_file(path: impl AsRef<Path>) -> RecogResult<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::read_from_reader(&mut BufReader::new(file))
    }

    /// Read a library from a byte slice.
    pub fn read_from_bytes(data: &[u8]) -> RecogResult<Self> {
        let mut r = ByteReader::new(data);

        let mut magic = [0u8; 4];
        magic.copy_from_slice(r.read_bytes(4)?);
        if magic != LIBRARY_MAGIC {
            return Err(RecogError::BadMagic {
                expected: LIBRARY_MAGIC,
                actual: magic,
            });
        }
        let version = r.read_u16()?;
        if !(MIN_LIBRARY_VERSION..=LIBRARY_VERSION).contains(&version) {
            return Err(RecogError::UnsupportedVersion {
                version,
                min: MIN_LIBRARY_VERSION,
                max: LIBRARY_VERSION,
            });
        }

        // Every element takes at least 6 bytes, which bounds the count
        let count = r.read_u32()? as usize;
        if count > r.remaining() / 6 {
            return Err(RecogError::InvalidAsset(format!(
                "element count {count} exceeds the data size"
            )));
        }
        let mut elements = Vec::with_capacity(count);
        for index in 0..count {
            elements.push(read_element(&mut r, index)?);
        }

        let model_count = r.read_u32()? as usize;
        if model_count > r.remaining() / 2 {
            return Err(RecogError::InvalidAsset(format!(
                "model count {model_count} exceeds the data size"
            )));
        }
        let mut models = Vec::with_capacity(model_count);
        for _ in 0..model_count {
            models.push(Stroke::read_from(&mut r)?);
        }

        let aux = r.read_u32()? as usize;
        r.skip(aux)?;
        if r.remaining() != 0 {
            return Err(RecogError::InvalidAsset(format!(
                "{} trailing bytes after the library data",
                r.remaining()
            )));
        }

        debug!(
            version,
            elements = elements.len(),
            models = models.len(),
            bytes = data.len(),
            "read reference library asset"
        );
        Self::new(models, elements)
    }

    /// Write a library to a writer.
    pub fn write_to_writer(&self, writer: &mut impl Write) -> RecogResult<()> {
        writer.write_all(&LIBRARY_MAGIC)?;
        binary::write_u16(writer, LIBRARY_VERSION)?;

        binary::write_u32(writer, binary::count_u32(self.elements.len(), "elements")?)?;
        for element in &self.elements {
            write_element(writer, element)?;
        }

        binary::write_u32(writer, binary::count_u32(self.models.len(), "models")?)?;
        for model in &self.models {
            model.write_to_writer(writer)?;
        }

        // No auxiliary tables
        binary::write_u32(writer, 0)?;
        Ok(())
    }

    /// Write a library to a file.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> RecogResult<()> {
        let file = std::fs::File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        self.write_to_writer(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Write a library to a byte vector.
    pub fn write_to_bytes(&self) -> RecogResult<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_to_writer(&mut buf)?;
        Ok(buf)
    }
}

fn read_element(r: &mut ByteReader<'_>, index: usize) -> RecogResult<Element> {
    let owner = match r.read_u8()? {
        OWNER_NONE => CharOwner::None,
        OWNER_KANJI => CharOwner::Kanji(r.read_u32()?),
        OWNER_CODE_POINT => {
            let v = r.read_u32()?;
            let c = char::from_u32(v).ok_or_else(|| {
                RecogError::InvalidAsset(format!("element {index}: invalid code point {v:#x}"))
            })?;
            CharOwner::CodePoint(c)
        }
        tag => {
            return Err(RecogError::InvalidAsset(format!(
                "element {index}: unknown owner tag {tag}"
            )));
        }
    };
    let pattern = r.read_u8()?;

    let part_count = r.read_u8()? as usize;
    if part_count > MAX_PARTS {
        return Err(RecogError::InvalidAsset(format!(
            "element {index}: {part_count} parts, at most {MAX_PARTS} allowed"
        )));
    }
    let mut parts = Vec::with_capacity(part_count);
    for _ in 0..part_count {
        parts.push(r.read_u32()?);
    }

    let stroke_count = r.read_u16()? as usize;
    let mut strokes = Vec::with_capacity(stroke_count);
    for _ in 0..stroke_count {
        strokes.push(Stroke::read_from(r)?);
    }

    let mut element = Element::new(owner, strokes)
        .with_pattern(pattern)
        .with_parts(parts);
    match r.read_u8()? {
        0 => {}
        1 => {
            let mut recdata = Vec::with_capacity(stroke_count);
            for _ in 0..stroke_count {
                let best_model = r.read_u32()? as usize;
                let best_distance = f64::from(r.read_f32()?);
                let mut positions = Vec::with_capacity(stroke_count);
                for _ in 0..stroke_count {
                    positions.push(BitVector::read_from(r)?);
                }
                recdata.push(StrokeRecData {
                    best_model,
                    best_distance,
                    positions,
                });
            }
            element = element.with_recdata(recdata);
        }
        flag => {
            return Err(RecogError::InvalidAsset(format!(
                "element {index}: unknown recdata flag {flag}"
            )));
        }
    }
    Ok(element)
}

fn write_element(writer: &mut impl Write, element: &Element) -> RecogResult<()> {
    match element.owner {
        CharOwner::None => binary::write_u8(writer, OWNER_NONE)?,
        CharOwner::Kanji(k) => {
            binary::write_u8(writer, OWNER_KANJI)?;
            binary::write_u32(writer, k)?;
        }
        CharOwner::CodePoint(c) => {
            binary::write_u8(writer, OWNER_CODE_POINT)?;
            binary::write_u32(writer, u32::from(c))?;
        }
    }
    binary::write_u8(writer, element.pattern)?;

    // Part count was checked against MAX_PARTS on construction
    binary::write_u8(writer, element.parts.len() as u8)?;
    for &part in &element.parts {
        binary::write_u32(writer, part)?;
    }

    let stroke_count = u16::try_from(element.strokes.len()).map_err(|_| {
        RecogError::InvalidParameter(format!("too many strokes: {}", element.strokes.len()))
    })?;
    binary::write_u16(writer, stroke_count)?;
    for stroke in &element.strokes {
        stroke.write_to_writer(writer)?;
    }

    match element.recdata() {
        None => binary::write_u8(writer, 0)?,
        Some(recdata) => {
            binary::write_u8(writer, 1)?;
            for rd in recdata {
                binary::write_u32(writer, binary::count_u32(rd.best_model, "models")?)?;
                binary::write_f32(writer, rd.best_distance as f32)?;
                for bits in &rd.positions {
                    bits.write_to_writer(writer)?;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kakitori_core::{Point, dissect, simplify};

    fn stroke(points: &[(f64, f64)]) -> Stroke {
        points.iter().map(|&p| Point::from(p)).collect()
    }

    fn sample_library() -> ReferenceLibrary {
        let h = stroke(&[(0.1, 0.5), (0.9, 0.5)]);
        let v = stroke(&[(0.5, 0.1), (0.5, 0.9)]);
        let models = vec![
            dissect(&simplify(h.points(), false)),
            dissect(&simplify(v.points(), false)),
        ];
        let elements = vec![
            Element::new(CharOwner::CodePoint('十'), vec![h.clone(), v.clone()]).with_pattern(3),
            Element::new(CharOwner::Kanji(7), vec![v]),
            Element::new(CharOwner::None, vec![h]).with_parts(vec![0, 1]),
        ];
        ReferenceLibrary::new(models, elements).unwrap()
    }

    #[test]
    fn test_library_serial_header() {
        let bytes = sample_library().write_to_bytes().unwrap();
        assert_eq!(&bytes[..4], b"KKTR");
        assert_eq!(&bytes[4..6], &LIBRARY_VERSION.to_le_bytes());
        assert_eq!(&bytes[6..10], &3u32.to_le_bytes());
        assert_eq!(&bytes[bytes.len() - 4..], &[0, 0, 0, 0]);
    }

    #[test]
    fn test_library_serial_round_trip() {
        let lib = sample_library();
        let bytes = lib.write_to_bytes().unwrap();
        let back = ReferenceLibrary::read_from_bytes(&bytes).unwrap();

        assert_eq!(back.len(), 3);
        assert_eq!(back.model_count(), 2);
        assert_eq!(back.character(0), Some(CharOwner::CodePoint('十')));
        assert_eq!(back.character(1), Some(CharOwner::Kanji(7)));
        assert_eq!(back.element(0).unwrap().pattern, 3);
        assert_eq!(back.element(2).unwrap().parts, vec![0, 1]);
        assert_eq!(
            back.element(0).unwrap().recdata(),
            lib.element(0).unwrap().recdata()
        );
        assert_eq!(back.write_to_bytes().unwrap(), bytes);
    }

    #[test]
    fn test_library_serial_skips_aux() {
        let mut bytes = sample_library().write_to_bytes().unwrap();
        let n = bytes.len();
        bytes[n - 4..].copy_from_slice(&3u32.to_le_bytes());
        bytes.extend_from_slice(b"abc");
        assert!(ReferenceLibrary::read_from_bytes(&bytes).is_ok());

        bytes.push(0);
        assert!(matches!(
            ReferenceLibrary::read_from_bytes(&bytes),
            Err(RecogError::InvalidAsset(_))
        ));
    }

    #[test]
    fn test_library_serial_rejects_bad_header() {
        let mut bytes = sample_library().write_to_bytes().unwrap();
        bytes[0] = b'X';
        assert!(matches!(
            ReferenceLibrary::read_from_bytes(&bytes),
            Err(RecogError::BadMagic { .. })
        ));

        let mut bytes = sample_library().write_to_bytes().unwrap();
        bytes[4..6].copy_from_slice(&1u16.to_le_bytes());
        assert!(matches!(
            ReferenceLibrary::read_from_bytes(&bytes),
            Err(RecogError::UnsupportedVersion { version: 1, .. })
        ));
    }

    #[test]
    fn test_library_serial_truncated() {
        let bytes = sample_library().write_to_bytes().unwrap();
        for len in [3, 8, 20, bytes.len() - 1] {
            assert!(ReferenceLibrary::read_from_bytes(&bytes[..len]).is_err());
        }
    }
}

//! # cmap — Character to Glyph Index Mapping Table
//!
//! Implementation of the `cmap` table.
//!
//! *Specification:*
//! [OpenType](https://docs.microsoft.com/en-us/typography/opentype/spec/cmap),
//! [TrueType](https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6cmap.html).
//!
//! The `cmap` table provides mappings from character codes to glyph ids.
//! This allows typesetting systems using the font to resolve the glyphs needed to display a string of characters.
//!
//! A `cmap` table consists of one or multiple subtables accessed by encoding records.
//! A record describes the format of its associated subtable, the intended platform, and the encoding.
//! Records using the same subtable format share a single copy of the subtable.
//!
//! Icon fonts only map characters of the Basic Multilingual Plane, so the table produced here consists of one [format 4](format4) subtable referenced by a Unicode and a Windows record.
//!
//! # Example
//!
//! ```
//! # use iconforge::data::CharacterMap;
//! # use iconforge::sfnt::tables::cmap::compile;
//! let mut map = CharacterMap::new();
//! map.insert('\u{E000}', 1);
//! map.insert('\u{E001}', 2);
//! let table = compile(&map);
//! ```

pub mod format4;

use crate::data::CharacterMap;
use bytes::{BufMut, Bytes, BytesMut};
use itertools::Itertools;
use lazy_static::lazy_static;
use std::cmp;
use std::collections::HashMap;
use std::fmt;
use std::mem::size_of;

/// The size in bytes of the `version` field.
const VERSION_FIELD_SIZE: usize = size_of::<u16>();
/// The size in bytes of the `numTables` field.
const NUM_TABLES_FIELD_SIZE: usize = size_of::<u16>();
/// The size in bytes of the `platformID` field.
const PLATFORM_ID_FIELD_SIZE: usize = size_of::<u16>();
/// The size in bytes of the `encodingID` field.
const ENCODING_ID_FIELD_SIZE: usize = size_of::<u16>();
/// The size in bytes of the `subtableOffset` field.
const SUBTABLE_OFFSET_FIELD_SIZE: usize = size_of::<u32>();
/// The size if bytes of an encoding record.
const ENCODING_RECORD_SIZE: usize =
    PLATFORM_ID_FIELD_SIZE + ENCODING_ID_FIELD_SIZE + SUBTABLE_OFFSET_FIELD_SIZE;
/// The size in bytes of the table header.
const CONSTANT_SIZE: usize = VERSION_FIELD_SIZE + NUM_TABLES_FIELD_SIZE;

lazy_static! {
    /// The records used to represent BMP only character maps in order of `Ord`.
    static ref BMP_RECORDS: Vec<EncodingRecord> = vec![
        EncodingRecord {
            encoding: Encoding::Unicode(UnicodeEncoding::Bmp),
            format: RecordFormat::Format4,
        },
        EncodingRecord {
            encoding: Encoding::Windows(WindowsEncoding::Bmp),
            format: RecordFormat::Format4,
        },
    ];
}

/// Returns a `cmap` table for the given character map.
///
/// Mappings outside the Basic Multilingual Plane are ignored.
pub fn compile(map: &CharacterMap) -> Bytes {
    compile_records(map, &BMP_RECORDS)
}

/// Returns a `cmap` table for the given character map using the given encoding records.
///
/// The records must be sorted in order of `Ord`.
pub fn compile_records(map: &CharacterMap, records: &[EncodingRecord]) -> Bytes {
    let mut subtables: HashMap<RecordFormat, Bytes> = records
        .iter()
        .map(|x| x.format)
        .unique()
        .map(|format| {
            let subtable = match format {
                RecordFormat::Format4 => format4::compile(map),
            };

            (format, subtable)
        })
        .collect();

    let fixed_size = CONSTANT_SIZE + (records.len() * ENCODING_RECORD_SIZE);
    let length = fixed_size + subtables.values().map(Bytes::len).sum::<usize>();
    let mut buf = BytesMut::with_capacity(length);

    let version: u16 = 0;
    buf.put_u16(version);

    let num_tables: u16 = records.len() as u16;
    buf.put_u16(num_tables);

    let mut subtable_offsets: HashMap<RecordFormat, u32> = HashMap::new();
    let mut subtable_offset: u32 = fixed_size as u32;

    for record in records {
        log::trace!("cmap encoding record {}", record);

        buf.put_u16(record.encoding.platform_id());
        buf.put_u16(record.encoding.encoding_id());

        if let Some(&offset) = subtable_offsets.get(&record.format) {
            // reuse already registered subtable
            buf.put_u32(offset);
        } else {
            // register subtable format
            buf.put_u32(subtable_offset);
            subtable_offsets.insert(record.format, subtable_offset);
            subtable_offset += subtables[&record.format].len() as u32;
        }
    }

    for format in records.iter().map(|x| x.format).unique() {
        if let Some(subtable) = subtables.remove(&format) {
            buf.put(subtable);
        }
    }

    assert_eq!(length, buf.len());

    buf.freeze()
}

/// An encoding record describes a `cmap` subtable.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct EncodingRecord {
    /// The encoding used by the subtable.
    pub encoding: Encoding,
    /// The subtable format.
    pub format: RecordFormat,
}

impl cmp::PartialOrd for EncodingRecord {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl cmp::Ord for EncodingRecord {
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        self.encoding.cmp(&other.encoding)
    }
}

impl fmt::Display for EncodingRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.encoding, self.format)
    }
}

/// The combination of a platform id and a matching encoding id.
#[derive(Debug, PartialOrd, Ord, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Encoding {
    /// The Unicode platform.
    Unicode(UnicodeEncoding),
    /// The Windows platform.
    Windows(WindowsEncoding),
}

impl Encoding {
    /// The `platformID` of the encoding.
    pub fn platform_id(&self) -> u16 {
        match self {
            Self::Unicode(_) => 0,
            Self::Windows(_) => 3,
        }
    }

    /// The `encodingID` of the encoding.
    pub fn encoding_id(&self) -> u16 {
        match self {
            Self::Unicode(encoding) => encoding.id(),
            Self::Windows(encoding) => encoding.id(),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.platform_id(), self.encoding_id())
    }
}

/// The supported Unicode encodings.
#[derive(Debug, PartialOrd, Ord, PartialEq, Eq, Hash, Clone, Copy)]
pub enum UnicodeEncoding {
    /// The Unicode Basic Multilingual Plane codespace.
    Bmp,
}

impl UnicodeEncoding {
    /// Returns the `encodingID` of the encoding.
    pub fn id(&self) -> u16 {
        match self {
            Self::Bmp => 3,
        }
    }
}

/// The supported Windows encodings.
#[derive(Debug, PartialOrd, Ord, PartialEq, Eq, Hash, Clone, Copy)]
pub enum WindowsEncoding {
    /// The Unicode Basic Multilingual Plane codespace.
    Bmp,
}

impl WindowsEncoding {
    /// Returns the `encodingID` of the encoding.
    pub fn id(&self) -> u16 {
        match self {
            Self::Bmp => 1,
        }
    }
}

/// The supported `cmap` subtable formats.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum RecordFormat {
    /// The subtable format 4.
    Format4,
}

impl RecordFormat {
    /// Returns the id of the format.
    pub fn id(&self) -> u16 {
        match self {
            Self::Format4 => 4,
        }
    }
}

impl fmt::Display for RecordFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

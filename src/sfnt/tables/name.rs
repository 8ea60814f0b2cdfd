//! # name — Naming Table
//!
//! Implementation of the `name` table.
//!
//! *Specification:*
//! [OpenType](https://docs.microsoft.com/en-us/typography/opentype/spec/name),
//! [TrueType](https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6name.html).
//!
//! All names are written once for the Windows platform with Unicode BMP encoding and the language US English.
//! Strings are stored in UTF-16BE.

use crate::data::Source;
use bytes::{BufMut, Bytes, BytesMut};
use std::mem::size_of;

/// The Windows platform.
const PLATFORM_ID: u16 = 3;
/// Unicode BMP encoding on the Windows platform.
const ENCODING_ID: u16 = 1;
/// US English on the Windows platform.
const LANGUAGE_ID: u16 = 0x0409;

/// The size in bytes of the table header (`format`, `count`, `storageOffset`).
const HEADER_SIZE: usize = 3 * size_of::<u16>();
/// The size in bytes of a name record.
const NAME_RECORD_SIZE: usize = 6 * size_of::<u16>();

/// The name ids written by [`compile`].
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub enum NameId {
    /// Font family name.
    Family = 1,
    /// Font subfamily name.
    Subfamily = 2,
    /// Unique font identifier.
    UniqueId = 3,
    /// Full font name.
    FullName = 4,
    /// Version string.
    Version = 5,
    /// PostScript name.
    PostScriptName = 6,
}

/// Returns the name records of `source` in order of increasing name id.
pub fn names(source: &Source) -> Vec<(NameId, String)> {
    let version = "Version 1.000".to_string();
    let postscript_name = source.postscript_name();

    vec![
        (NameId::Family, source.family_name.clone()),
        (NameId::Subfamily, source.style_name.clone()),
        (
            NameId::UniqueId,
            format!("{};{}", version, postscript_name),
        ),
        (NameId::FullName, source.font_name.clone()),
        (NameId::Version, version),
        (NameId::PostScriptName, postscript_name),
    ]
}

/// Returns the `name` table of `source`.
pub fn compile(source: &Source) -> Bytes {
    let names = names(source);
    let strings: Vec<Vec<u8>> = names
        .iter()
        .map(|(_, x)| x.encode_utf16().flat_map(u16::to_be_bytes).collect())
        .collect();

    let storage_offset = HEADER_SIZE + names.len() * NAME_RECORD_SIZE;
    let length = storage_offset + strings.iter().map(Vec::len).sum::<usize>();
    let mut buf = BytesMut::with_capacity(length);

    let format = 0;
    buf.put_u16(format);
    buf.put_u16(names.len() as u16);
    buf.put_u16(storage_offset as u16);

    let mut string_offset = 0;

    for ((name_id, _), string) in names.iter().zip(&strings) {
        buf.put_u16(PLATFORM_ID);
        buf.put_u16(ENCODING_ID);
        buf.put_u16(LANGUAGE_ID);
        buf.put_u16(*name_id as u16);
        buf.put_u16(string.len() as u16);
        buf.put_u16(string_offset as u16);
        string_offset += string.len();
    }

    for string in &strings {
        buf.put_slice(string);
    }

    assert_eq!(length, buf.len());

    buf.freeze()
}

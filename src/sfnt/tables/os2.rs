//! # OS/2 — OS/2 and Windows Metrics Table
//!
//! Implementation of the version 4 `OS/2` table.
//!
//! *Specification:*
//! [OpenType](https://docs.microsoft.com/en-us/typography/opentype/spec/os2).

use super::FontMetrics;
use crate::ctx::Context;
use crate::data::Source;
use bytes::{BufMut, Bytes, BytesMut};

/// The size in bytes of a version 4 table.
const SIZE: usize = 96;
/// The table version.
const VERSION: u16 = 4;
/// Normal (Regular) weight.
const WEIGHT_CLASS_NORMAL: u16 = 400;
/// Medium (normal) width.
const WIDTH_CLASS_NORMAL: u16 = 5;
/// Installable embedding.
const FS_TYPE_INSTALLABLE: u16 = 0;
/// `fsSelection` bit for regular fonts.
const FS_SELECTION_REGULAR: u16 = 1 << 6;
/// `fsSelection` bit requesting the typographic metrics to be used for line spacing.
const FS_SELECTION_USE_TYPO_METRICS: u16 = 1 << 7;
/// The first code point of the private use area of the Basic Multilingual Plane.
const PRIVATE_USE_AREA_START: char = '\u{E000}';
/// The last code point of the private use area of the Basic Multilingual Plane.
const PRIVATE_USE_AREA_END: char = '\u{F8FF}';
/// The `ulUnicodeRange` bit of the private use area of the Basic Multilingual Plane.
const UNICODE_RANGE_PRIVATE_USE_AREA: u32 = 60;
/// The vendor id of fonts without a registered vendor.
const VENDOR_ID: [u8; 4] = *b"NONE";

/// Returns the four `ulUnicodeRange` fields for the characters of `source`.
///
/// Only the private use area is detected; icon fonts contain nothing else.
fn unicode_ranges(source: &Source) -> [u32; 4] {
    let mut ranges = [0u32; 4];

    if source
        .character_map
        .range(PRIVATE_USE_AREA_START..=PRIVATE_USE_AREA_END)
        .next()
        .is_some()
    {
        let bit = UNICODE_RANGE_PRIVATE_USE_AREA as usize;
        ranges[bit / 32] |= 1 << (bit % 32);
    }

    ranges
}

/// Returns the `OS/2` table.
pub fn compile(source: &Source, metrics: &FontMetrics, ctx: &Context) -> Bytes {
    let mut buf = BytesMut::with_capacity(SIZE);
    let em = ctx.units_per_em as i16;

    let first_char = source.character_map.keys().next().map_or(0, |&x| x as u32);
    let last_char = source.character_map.keys().last().map_or(0, |&x| x as u32);

    buf.put_u16(VERSION);
    buf.put_i16(metrics.average_advance_width);
    buf.put_u16(WEIGHT_CLASS_NORMAL);
    buf.put_u16(WIDTH_CLASS_NORMAL);
    buf.put_u16(FS_TYPE_INSTALLABLE);

    // subscript and superscript size and offset
    buf.put_i16(em * 13 / 20);
    buf.put_i16(em * 7 / 10);
    buf.put_i16(0);
    buf.put_i16(em * 7 / 50);
    buf.put_i16(em * 13 / 20);
    buf.put_i16(em * 7 / 10);
    buf.put_i16(0);
    buf.put_i16(em * 12 / 25);

    // strikeout size and position
    buf.put_i16(em / 20);
    buf.put_i16(em * 13 / 50);

    buf.put_i16(0); // sFamilyClass
    buf.put_bytes(0, 10); // panose

    for range in &unicode_ranges(source) {
        buf.put_u32(*range);
    }

    buf.put_slice(&VENDOR_ID);
    buf.put_u16(FS_SELECTION_REGULAR | FS_SELECTION_USE_TYPO_METRICS);
    buf.put_u16(first_char.min(0xFFFF) as u16);
    buf.put_u16(last_char.min(0xFFFF) as u16);
    buf.put_i16(ctx.ascender);
    buf.put_i16(ctx.descender);
    buf.put_i16(0); // sTypoLineGap
    buf.put_u16(ctx.ascender.max(metrics.bounds.y_max).max(0) as u16);
    buf.put_u16((-ctx.descender).max(-metrics.bounds.y_min).max(0) as u16);
    buf.put_u32(0); // ulCodePageRange1
    buf.put_u32(0); // ulCodePageRange2
    buf.put_i16(0); // sxHeight
    buf.put_i16(0); // sCapHeight
    buf.put_u16(0); // usDefaultChar
    buf.put_u16(0x20); // usBreakChar
    buf.put_u16(0); // usMaxContext

    assert_eq!(SIZE, buf.len());

    buf.freeze()
}

//! # head — Font Header Table
//!
//! Implementation of the `head` table.
//!
//! *Specification:*
//! [OpenType](https://docs.microsoft.com/en-us/typography/opentype/spec/head),
//! [TrueType](https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6head.html).
//!
//! The `checksumAdjustment` field is written as zero and set by [`sfnt::compile`](crate::sfnt::compile) once the complete font is known.
//! The created and modified timestamps are zero (1904-01-01) so that identical sources compile to identical fonts.

use super::loca::LocaFormat;
use super::FontMetrics;
use crate::ctx::Context;
use crate::sfnt::types::{Fixed, Tag};
use bytes::{BufMut, Bytes, BytesMut};

/// The tag of the `head` table.
pub const TAG: Tag = Tag(*b"head");
/// The offset in bytes of the `checksumAdjustment` field.
pub const CHECKSUM_ADJUSTMENT_OFFSET: usize = 8;
/// The size in bytes of the table.
const SIZE: usize = 54;
/// The value of the `magicNumber` field.
const MAGIC_NUMBER: u32 = 0x5F0F_3CF5;

/// Baseline at y = 0.
const FLAG_BASELINE_AT_ZERO: u16 = 1 << 0;
/// Left sidebearing point at x = 0.
const FLAG_LSB_AT_ZERO: u16 = 1 << 1;
/// Force ppem to integer values.
const FLAG_INTEGER_PPEM: u16 = 1 << 3;

/// The smallest readable size in pixels.
const LOWEST_REC_PPEM: u16 = 8;
/// Deprecated; fully mixed directional glyphs.
const FONT_DIRECTION_HINT: i16 = 2;

/// Returns the `head` table.
pub fn compile(metrics: &FontMetrics, loca_format: LocaFormat, ctx: &Context) -> Bytes {
    let mut buf = BytesMut::with_capacity(SIZE);

    buf.put_u16(1); // majorVersion
    buf.put_u16(0); // minorVersion
    buf.put_u32(Fixed::ONE.0); // fontRevision
    buf.put_u32(0); // checksumAdjustment
    buf.put_u32(MAGIC_NUMBER);
    buf.put_u16(FLAG_BASELINE_AT_ZERO | FLAG_LSB_AT_ZERO | FLAG_INTEGER_PPEM);
    buf.put_u16(ctx.units_per_em);
    buf.put_i64(0); // created
    buf.put_i64(0); // modified
    buf.put_i16(metrics.bounds.x_min);
    buf.put_i16(metrics.bounds.y_min);
    buf.put_i16(metrics.bounds.x_max);
    buf.put_i16(metrics.bounds.y_max);
    buf.put_u16(0); // macStyle
    buf.put_u16(LOWEST_REC_PPEM);
    buf.put_i16(FONT_DIRECTION_HINT);
    buf.put_i16(loca_format.index_to_loc_format());
    buf.put_i16(0); // glyphDataFormat

    assert_eq!(SIZE, buf.len());

    buf.freeze()
}

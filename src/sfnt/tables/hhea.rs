//! # hhea — Horizontal Header Table
//!
//! Implementation of the `hhea` table.
//!
//! *Specification:*
//! [OpenType](https://docs.microsoft.com/en-us/typography/opentype/spec/hhea),
//! [TrueType](https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6hhea.html).

use super::FontMetrics;
use crate::ctx::Context;
use crate::sfnt::types::Fixed;
use bytes::{BufMut, Bytes, BytesMut};

/// The size in bytes of the table.
const SIZE: usize = 36;

/// Returns the `hhea` table.
///
/// Every glyph has its own long horizontal metric, so `numberOfHMetrics` equals the number of glyphs.
pub fn compile(metrics: &FontMetrics, num_glyphs: usize, ctx: &Context) -> Bytes {
    let mut buf = BytesMut::with_capacity(SIZE);

    buf.put_u32(Fixed::ONE.0); // version
    buf.put_i16(ctx.ascender);
    buf.put_i16(ctx.descender);
    buf.put_i16(0); // lineGap
    buf.put_u16(metrics.advance_width_max);
    buf.put_i16(metrics.min_left_side_bearing);
    buf.put_i16(metrics.min_right_side_bearing);
    buf.put_i16(metrics.x_max_extent);
    buf.put_i16(1); // caretSlopeRise
    buf.put_i16(0); // caretSlopeRun
    buf.put_i16(0); // caretOffset
    buf.put_bytes(0, 4 * 2); // reserved
    buf.put_i16(0); // metricDataFormat
    buf.put_u16(num_glyphs as u16);

    assert_eq!(SIZE, buf.len());

    buf.freeze()
}

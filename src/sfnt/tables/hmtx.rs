//! # hmtx — Horizontal Metrics Table
//!
//! Implementation of the `hmtx` table.
//!
//! *Specification:*
//! [OpenType](https://docs.microsoft.com/en-us/typography/opentype/spec/hmtx),
//! [TrueType](https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6hmtx.html).

use crate::data::Glyph;
use bytes::{BufMut, Bytes, BytesMut};

/// Returns the `hmtx` table with one long horizontal metric per glyph.
///
/// The left side bearing is the minimum x coordinate of the glyph, or zero for glyphs without contours.
pub fn compile(glyphs: &[Glyph]) -> Bytes {
    let mut buf = BytesMut::with_capacity(glyphs.len() * 4);

    for glyph in glyphs {
        buf.put_u16(glyph.advance_width);
        buf.put_i16(glyph.outline.bounds().map_or(0, |x| x.x_min));
    }

    buf.freeze()
}

//! # maxp — Maximum Profile
//!
//! Implementation of the version 1.0 `maxp` table used by fonts with TrueType outlines.
//!
//! *Specification:*
//! [OpenType](https://docs.microsoft.com/en-us/typography/opentype/spec/maxp),
//! [TrueType](https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6maxp.html).
//!
//! Glyphs carry no instructions and no components, so all hinting and composite maxima are zero.

use super::glyf::CompiledGlyphs;
use crate::sfnt::types::Fixed;
use bytes::{BufMut, Bytes, BytesMut};

/// The size in bytes of the table.
const SIZE: usize = 32;
/// The number of zones; `2` includes the twilight zone.
const MAX_ZONES: u16 = 2;

/// Returns the `maxp` table for `num_glyphs` glyphs compiled into `glyf`.
pub fn compile(num_glyphs: usize, glyf: &CompiledGlyphs) -> Bytes {
    let mut buf = BytesMut::with_capacity(SIZE);

    buf.put_u32(Fixed::ONE.0); // version
    buf.put_u16(num_glyphs as u16);
    buf.put_u16(glyf.max_points);
    buf.put_u16(glyf.max_contours);
    buf.put_u16(0); // maxCompositePoints
    buf.put_u16(0); // maxCompositeContours
    buf.put_u16(MAX_ZONES);
    buf.put_u16(0); // maxTwilightPoints
    buf.put_u16(0); // maxStorage
    buf.put_u16(0); // maxFunctionDefs
    buf.put_u16(0); // maxInstructionDefs
    buf.put_u16(0); // maxStackElements
    buf.put_u16(0); // maxSizeOfInstructions
    buf.put_u16(0); // maxComponentElements
    buf.put_u16(0); // maxComponentDepth

    assert_eq!(SIZE, buf.len());

    buf.freeze()
}

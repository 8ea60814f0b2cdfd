//! # post — PostScript Table
//!
//! Implementation of the version 2.0 `post` table.
//!
//! *Specification:*
//! [OpenType](https://docs.microsoft.com/en-us/typography/opentype/spec/post),
//! [TrueType](https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6post.html).
//!
//! Version 2.0 stores a name for every glyph.
//! `.notdef` refers to the standard Macintosh glyph name with index `0`; all other names are stored as Pascal strings.
//! Icon fonts are monospaced, so `isFixedPitch` is set whenever all glyphs share one advance width.

use crate::ctx::Context;
use crate::data::Glyph;
use crate::sfnt::types::Fixed;
use bytes::{BufMut, Bytes, BytesMut};

/// The index of `.notdef` among the standard Macintosh glyph names.
const NOTDEF_STANDARD_INDEX: u16 = 0;
/// The number of standard Macintosh glyph names; custom name indices start here.
const STANDARD_NAMES_COUNT: u16 = 258;
/// The maximum length of a glyph name.
const MAX_NAME_LENGTH: usize = 63;

/// Returns whether `name` can be stored as a glyph name.
///
/// Glyph names consist of at most 63 characters from `A-Z`, `a-z`, `0-9`, `.`, `_`, and `-`, and do not start with a digit or a period (unless the name is `.notdef`).
pub fn is_valid_glyph_name(name: &str) -> bool {
    if name == ".notdef" {
        return true;
    }

    let first_ok = name
        .chars()
        .next()
        .map_or(false, |c| !c.is_ascii_digit() && c != '.');

    first_ok
        && name.len() <= MAX_NAME_LENGTH
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-')
}

/// Returns the `post` table.
///
/// Names that are not [valid](is_valid_glyph_name) are replaced by names derived from the glyph id.
pub fn compile(glyphs: &[Glyph], ctx: &Context) -> Bytes {
    let mut buf = BytesMut::new();

    let is_fixed_pitch = glyphs
        .iter()
        .all(|x| x.advance_width == ctx.advance_width);

    buf.put_u32(Fixed::version(2, 0).0);
    buf.put_u32(0); // italicAngle
    buf.put_i16(ctx.descender / 2); // underlinePosition
    buf.put_i16((ctx.units_per_em / 20) as i16); // underlineThickness
    buf.put_u32(is_fixed_pitch as u32);
    buf.put_u32(0); // minMemType42
    buf.put_u32(0); // maxMemType42
    buf.put_u32(0); // minMemType1
    buf.put_u32(0); // maxMemType1

    buf.put_u16(glyphs.len() as u16);

    let mut names: Vec<String> = Vec::new();

    for (gid, glyph) in glyphs.iter().enumerate() {
        if glyph.name == ".notdef" {
            buf.put_u16(NOTDEF_STANDARD_INDEX);
            continue;
        }

        let name = if is_valid_glyph_name(&glyph.name) {
            glyph.name.clone()
        } else {
            let fallback = format!("glyph{:05}", gid);
            log::warn!(
                "glyph name '{}' is invalid, using '{}'",
                glyph.name,
                fallback
            );
            fallback
        };

        buf.put_u16(STANDARD_NAMES_COUNT + names.len() as u16);
        names.push(name);
    }

    for name in &names {
        buf.put_u8(name.len() as u8);
        buf.put_slice(name.as_bytes());
    }

    buf.freeze()
}

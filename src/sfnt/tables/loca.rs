//! # loca — Index to Location
//!
//! Implementation of the `loca` table.
//!
//! *Specification:*
//! [OpenType](https://docs.microsoft.com/en-us/typography/opentype/spec/loca),
//! [TrueType](https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6loca.html).
//!
//! The table stores the offset of every glyph into the `glyf` table plus one final offset marking the end of the last glyph.
//! The short format stores offsets divided by two in 16 bits; the long format stores them verbatim in 32 bits.

use crate::ctx::Context;
use bytes::{BufMut, Bytes, BytesMut};

/// The largest offset the short format can represent.
const MAX_SHORT_OFFSET: u32 = 2 * u16::MAX as u32;

/// The format of the `loca` table, referenced by `head.indexToLocFormat`.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum LocaFormat {
    /// Offsets are stored as `Offset16` divided by two.
    Short,
    /// Offsets are stored as `Offset32`.
    Long,
}

impl LocaFormat {
    /// The value of `head.indexToLocFormat` for this format.
    pub fn index_to_loc_format(&self) -> i16 {
        match self {
            Self::Short => 0,
            Self::Long => 1,
        }
    }
}

/// The compiled `loca` table.
#[derive(Debug, Clone)]
pub struct CompiledLoca {
    /// The `loca` table.
    pub data: Bytes,
    /// The format used by `data`.
    pub format: LocaFormat,
}

/// Returns the `loca` table for the given `glyf` offsets.
///
/// The short format is used if [`Context::loca_short_offsets`] is set and all offsets are even and small enough.
pub fn compile(offsets: &[u32], ctx: &Context) -> CompiledLoca {
    let fits_short = offsets
        .iter()
        .all(|&x| x % 2 == 0 && x <= MAX_SHORT_OFFSET);

    let format = if ctx.loca_short_offsets && fits_short {
        LocaFormat::Short
    } else {
        LocaFormat::Long
    };

    log::info!("Write Index to Location ({:?})", format);

    let mut buf = BytesMut::new();

    for &offset in offsets {
        match format {
            LocaFormat::Short => buf.put_u16((offset / 2) as u16),
            LocaFormat::Long => buf.put_u32(offset),
        }
    }

    CompiledLoca {
        data: buf.freeze(),
        format,
    }
}

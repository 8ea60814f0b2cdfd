//! Implementation of the SFNT container format.

pub mod tables;
pub mod types;

use crate::ctx::Context;
use crate::data::Source;
use bytes::{BufMut, Bytes, BytesMut};
use std::convert::TryInto;
use std::mem::size_of;
use types::{SearchParams, Tag};

/// The `sfntVersion` of fonts with TrueType outlines.
pub const TRUETYPE_VERSION: u32 = 0x0001_0000;

/// The size in bytes of the `sfntVersion` field.
const SFNT_VERSION_FIELD_SIZE: usize = size_of::<u32>();
/// The size in bytes of the `numTables` field.
const NUM_TABLES_FIELD_SIZE: usize = size_of::<u16>();
/// The size in bytes of the `searchRange` field.
const SEARCH_RANGE_FIELD_SIZE: usize = size_of::<u16>();
/// The size in bytes of the `entrySelector` field.
const ENTRY_SELECTOR_FIELD_SIZE: usize = size_of::<u16>();
/// The size in bytes of the `rangeShift` field.
const RANGE_SHIFT_FIELD_SIZE: usize = size_of::<u16>();
/// The size in bytes of a `tableTag` field.
const TABLE_TAG_FIELD_SIZE: usize = size_of::<u32>();
/// The size in bytes of a `checksum` field.
const CHECKSUM_FIELD_SIZE: usize = size_of::<u32>();
/// The size in bytes of an `offset` field.
const OFFSET_FIELD_SIZE: usize = size_of::<u32>();
/// The size in bytes of a `length` field.
const LENGTH_FIELD_SIZE: usize = size_of::<u32>();
/// The size in bytes of the table directory preamble.
const PREAMBLE_SIZE: usize = SFNT_VERSION_FIELD_SIZE
    + NUM_TABLES_FIELD_SIZE
    + SEARCH_RANGE_FIELD_SIZE
    + ENTRY_SELECTOR_FIELD_SIZE
    + RANGE_SHIFT_FIELD_SIZE;
/// The size in bytes of a `TableRecord`.
const TABLE_RECORD_SIZE: usize =
    TABLE_TAG_FIELD_SIZE + CHECKSUM_FIELD_SIZE + OFFSET_FIELD_SIZE + LENGTH_FIELD_SIZE;
/// The value the checksum of a complete font must add up to.
const CHECKSUM_MAGIC: u32 = 0xB1B0_AFBA;

/// Returns the checksum of a table.
fn table_checksum(table: &[u8]) -> u32 {
    let iter = table.chunks_exact(4);
    let remainder = iter.remainder();

    let sum = iter.fold(0u32, |a, x| {
        // slice `x` is convertible to `&[u8, 4]` because of `chunks_exact(4)`
        a.wrapping_add(u32::from_be_bytes(x.try_into().unwrap()))
    });

    // add zero-padding to remainder
    let mut rest = [0; 4];
    rest[..remainder.len()].copy_from_slice(remainder);

    sum.wrapping_add(u32::from_be_bytes(rest))
}

/// Returns the number of zero bytes needed to pad `len` to a multiple of four.
fn padding(len: usize) -> usize {
    (4 - (len % 4)) % 4
}

/// Compiles an SFNT font.
///
/// `sfnt_version` is written to the first four bytes of the font.
/// The tables are sorted by tag, as required for the table directory, and written in that order.
///
/// If a `head` table is present, its `checksumAdjustment` field is set such that the checksum of the complete font is `0xB1B0AFBA`.
/// The field must be zero in the given `head` table.
///
/// # Example
///
/// ```
/// # use iconforge::data::Source;
/// # use iconforge::sfnt::types::Tag;
/// # use iconforge::sfnt::{compile, TRUETYPE_VERSION};
/// use iconforge::sfnt::tables;
///
/// let source = Source::default();
/// let tables = vec![
///     (Tag(*b"cmap"), tables::cmap::compile(&source.character_map)),
///     // ... tables ...
/// ];
///
/// let font = compile(TRUETYPE_VERSION, tables);
/// ```
pub fn compile(sfnt_version: u32, mut tables: Vec<(Tag, Bytes)>) -> Bytes {
    log::info!(
        "SFNT version: 0x{:08X}{}",
        sfnt_version,
        Tag::from_u32(sfnt_version).map_or(String::new(), |x| format!(" ({})", x))
    );

    tables.sort_by_key(|(tag, _)| *tag);

    log::info!("Write Table Directory Preamble");

    let directory_size = PREAMBLE_SIZE + (tables.len() * TABLE_RECORD_SIZE);
    let length = directory_size
        + tables
            .iter()
            .map(|(_, x)| x.len() + padding(x.len()))
            .sum::<usize>();
    let mut buf = BytesMut::with_capacity(length);

    buf.put_u32(sfnt_version);

    let num_tables: u16 = tables.len() as u16;
    buf.put_u16(num_tables);

    let search = SearchParams::new(num_tables, TABLE_RECORD_SIZE as u16);
    buf.put_u16(search.search_range);
    buf.put_u16(search.entry_selector);
    buf.put_u16(search.range_shift);

    log::info!("Write Table Records");

    let mut offset: u32 = directory_size as u32;
    let mut head_offset: Option<usize> = None;

    for (tag, table) in &tables {
        let tag = *tag;
        buf.put_u32(tag.into());

        let checksum = table_checksum(table);
        buf.put_u32(checksum);

        if tag == tables::head::TAG {
            head_offset = Some(offset as usize);
        }
        buf.put_u32(offset);

        let len = table.len();
        buf.put_u32(len as u32);

        offset += (len + padding(len)) as u32;
    }

    log::info!("Write Tables");

    for (tag, table) in tables {
        log::info!("writing table {} ...", tag);

        let len = table.len();

        buf.put(table);
        buf.put_bytes(0, padding(len));
    }

    assert_eq!(length, buf.len());

    if let Some(head_offset) = head_offset {
        let adjustment = CHECKSUM_MAGIC.wrapping_sub(table_checksum(&buf));
        let field = head_offset + tables::head::CHECKSUM_ADJUSTMENT_OFFSET;
        buf[field..field + 4].copy_from_slice(&adjustment.to_be_bytes());
        log::debug!("checksum adjustment: 0x{:08X}", adjustment);
    }

    buf.freeze()
}

/// Compiles a TrueType flavoured font.
///
/// The glyph outlines of `source` are stored in the `glyf` table.
pub fn compile_ttf(source: &Source, ctx: &Context) -> Bytes {
    log::info!(
        "Compile '{}' with {} glyphs",
        source.font_name,
        source.glyphs.len()
    );

    let num_glyphs = source.glyphs.len();
    let glyf = tables::glyf::compile(&source.glyphs, ctx);
    let loca = tables::loca::compile(&glyf.offsets, ctx);
    let maxp = tables::maxp::compile(num_glyphs, &glyf);
    let metrics = tables::FontMetrics::new(source, ctx);

    let tables = vec![
        (
            Tag(*b"OS/2"),
            tables::os2::compile(source, &metrics, ctx),
        ),
        (Tag(*b"cmap"), tables::cmap::compile(&source.character_map)),
        (Tag(*b"glyf"), glyf.data),
        (
            tables::head::TAG,
            tables::head::compile(&metrics, loca.format, ctx),
        ),
        (
            Tag(*b"hhea"),
            tables::hhea::compile(&metrics, num_glyphs, ctx),
        ),
        (Tag(*b"hmtx"), tables::hmtx::compile(&source.glyphs)),
        (Tag(*b"loca"), loca.data),
        (Tag(*b"maxp"), maxp),
        (Tag(*b"name"), tables::name::compile(source)),
        (Tag(*b"post"), tables::post::compile(&source.glyphs, ctx)),
    ];

    compile(TRUETYPE_VERSION, tables)
}

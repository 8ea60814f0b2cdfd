//! # Format 4: Segment mapping to delta values
//!
//! Implementation of the `cmap` format 4 subtable.
//!
//! *Specification:*
//! [OpenType](https://docs.microsoft.com/en-us/typography/opentype/spec/cmap#format-4-segment-mapping-to-delta-values),
//! [TrueType](https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6cmap.html).
//!
//! A format 4 subtable stores *segments* mapping a continuous range of character codes to glyph ids.
//! This module only forms *shift* segments: the glyph ids of a segment are continuous as well, so the mapping is stored as a single `idDelta` added to each character code.
//! Icon fonts assign consecutive code points to consecutive glyphs, which makes a single segment sufficient for a whole icon set.
//!
//! ```
//! # use iconforge::data::CharacterMap;
//! # use iconforge::sfnt::tables::cmap::format4::{compile_segments, encoding_segments, Segment};
//! let mut map = CharacterMap::new();
//! map.insert('\u{E000}', 1);
//! map.insert('\u{E001}', 2);
//! let mut segments = encoding_segments(&map);
//! segments.push(Segment::sentinel());
//! let subtable = compile_segments(&segments);
//! ```

use crate::data::CharacterMap;
use crate::sfnt::types::SearchParams;
use bytes::{BufMut, Bytes, BytesMut};
use spans::Spans;
use std::mem::size_of;

/// The Unicode scaler used as a sentinel value for the character search.
///
/// Quoting the [OpenType specification][spec]:
///
/// > For the search to terminate, the final start code and endCode values must be 0xFFFF.
///
/// [spec]: https://docs.microsoft.com/en-us/typography/opentype/spec/cmap#format-4-segment-mapping-to-delta-values
const SENTINEL_SCALER: char = '\u{FFFF}';

/// The size in bytes of the `format` field.
const FORMAT_FIELD_SIZE: usize = size_of::<u16>();
/// The size in bytes of the `length` field.
const LENGTH_FIELD_SIZE: usize = size_of::<u16>();
/// The size in bytes of the `language` field.
const LANGUAGE_FIELD_SIZE: usize = size_of::<u16>();
/// The size in bytes of the `segCountX2` field.
const SEG_COUNT_X2_FIELD_SIZE: usize = size_of::<u16>();
/// The size in bytes of the `searchRange` field.
const SEARCH_RANGE_FIELD_SIZE: usize = size_of::<u16>();
/// The size in bytes of the `entrySelector` field.
const ENTRY_SELECTOR_FIELD_SIZE: usize = size_of::<u16>();
/// The size in bytes of the `rangeShift` field.
const RANGE_SHIFT_FIELD_SIZE: usize = size_of::<u16>();
/// The size in bytes of an `endCode` field.
const END_CODE_FIELD_SIZE: usize = size_of::<u16>();
/// The size in bytes of the `reservedPad` field.
const RESERVED_PAD_FIELD_SIZE: usize = size_of::<u16>();
/// The size in bytes of a `startCode` field.
const START_CODE_FIELD_SIZE: usize = size_of::<u16>();
/// The size in bytes of an `idDelta` field.
const ID_DELTA_FIELD_SIZE: usize = size_of::<i16>();
/// The size in bytes of an `idRangeOffset` field.
const ID_RANGE_OFFSET_FIELD_SIZE: usize = size_of::<u16>();
/// The size in bytes of the subtable header and `reservedPad`.
const CONSTANT_SIZE: usize = FORMAT_FIELD_SIZE
    + LENGTH_FIELD_SIZE
    + LANGUAGE_FIELD_SIZE
    + SEG_COUNT_X2_FIELD_SIZE
    + SEARCH_RANGE_FIELD_SIZE
    + ENTRY_SELECTOR_FIELD_SIZE
    + RANGE_SHIFT_FIELD_SIZE
    + RESERVED_PAD_FIELD_SIZE;
/// The size in bytes of a single segment.
const SEGMENT_SIZE: usize =
    END_CODE_FIELD_SIZE + START_CODE_FIELD_SIZE + ID_DELTA_FIELD_SIZE + ID_RANGE_OFFSET_FIELD_SIZE;

/// Returns a `cmap` format 4 subtable representing the given character map.
///
/// Mappings at or above U+FFFF are ignored.
pub fn compile(map: &CharacterMap) -> Bytes {
    let mut segments = encoding_segments(map);
    segments.push(Segment::sentinel());

    compile_segments(&segments)
}

/// Returns a `cmap` format 4 subtable representing the given segments.
///
/// Note that this function does not automatically append a sentinel segment at the end of the segments vector.
/// If such a sentinel segment is desired it must be provided as the last element of `segments`.
pub fn compile_segments(segments: &[Segment]) -> Bytes {
    let length = CONSTANT_SIZE + segments.len() * SEGMENT_SIZE;
    let mut buf = BytesMut::with_capacity(length);

    let format = 4;
    buf.put_u16(format);

    buf.put_u16(length as u16);

    let language = 0;
    buf.put_u16(language);

    let seg_count = segments.len() as u16;
    buf.put_u16(seg_count * 2);

    let search = SearchParams::new(seg_count, 2);
    buf.put_u16(search.search_range);
    buf.put_u16(search.entry_selector);
    buf.put_u16(search.range_shift);

    // endCode
    for segment in segments {
        buf.put_u16(segment.end as u16);
    }

    let reserved_pad = 0;
    buf.put_u16(reserved_pad);

    // startCode
    for segment in segments {
        buf.put_u16(segment.start as u16);
    }

    // idDelta
    for segment in segments {
        let id_delta = (segment.start_glyph_id as i32).wrapping_sub(segment.start as i32) as i16;
        buf.put_i16(id_delta);
    }

    // idRangeOffset
    for _ in segments {
        buf.put_u16(0);
    }

    assert_eq!(length, buf.len());

    buf.freeze()
}

/// Returns a segmentation of the given character map suitable for [`compile_segments`].
///
/// A segment is formed for every run of mappings where both the character codes and the glyph ids are continuous.
/// The segments are returned in order of increasing character codes.
///
/// Note that this function does not automatically append a sentinel segment at the end of the segments vector.
pub fn encoding_segments(map: &CharacterMap) -> Vec<Segment> {
    let mappings = map.iter().take_while(|(&code, _)| code < SENTINEL_SCALER);
    let mut segments: Vec<Segment> = Vec::new();
    let mut spans = mappings.spans_by_key(
        |(&code, &gid)| (code as u32, gid),
        |(code_a, gid_a), (code_b, gid_b)| code_a + 1 == code_b && gid_a + 1 == gid_b,
    );

    while let Some(mut span) = spans.next() {
        let (&start, &start_glyph_id) = span.next().unwrap();
        let end = span.last().map_or(start, |(&x, _)| x);
        let segment = Segment {
            start,
            end,
            start_glyph_id,
        };
        log::trace!("cmap segment {:?}", segment);
        segments.push(segment);
    }

    segments
}

/// A range of continuous character codes mapping to continuous glyph ids.
#[derive(PartialEq, Eq, Hash, Clone)]
pub struct Segment {
    /// The start of the continuous character code range.
    pub start: char,
    /// The end of the continuous character code range.
    pub end: char,
    /// The glyph id of `start`.
    pub start_glyph_id: u32,
}

impl Segment {
    /// Returns a sentinel segment which is used to end a list of segments.
    ///
    /// The segment starts and ends at [`SENTINEL_SCALER`] and maps it to glyph id `0` (`.notdef`).
    pub fn sentinel() -> Segment {
        Segment {
            start: SENTINEL_SCALER,
            end: SENTINEL_SCALER,
            start_glyph_id: 0,
        }
    }

    /// The number of mappings managed by the segment.
    pub fn len(&self) -> usize {
        ((self.end as u32) - (self.start as u32)) as usize + 1
    }
}

impl std::fmt::Debug for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "<{:?}-{:?} → {} ({})>",
            self.start,
            self.end,
            self.start_glyph_id,
            self.len()
        )
    }
}

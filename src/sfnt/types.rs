//! Types used throughout an SFNT file.

use std::fmt;

/// Interpretation of four bytes as a four-letter tag.
///
/// Tags order by their big-endian `u32` value, which is the order required for the table directory.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Copy, Clone)]
pub struct Tag(pub [u8; 4]);

impl Tag {
    /// Creates a tag by interpreting a `u32` as 4 bytes with a big-endian layout.
    ///
    /// Returns `None` if any of the bytes are not in the range from `0x20` to `0x7E` (both inclusive). This value restriction matches the [OpenType specification for tags](https://docs.microsoft.com/en-us/typography/opentype/spec/otff#data-types).
    #[inline]
    pub fn from_u32(value: u32) -> Option<Tag> {
        let bytes = value.to_be_bytes();

        if bytes.iter().any(|&x| x < 0x20 || x > 0x7E) {
            None
        } else {
            Some(Tag(bytes))
        }
    }
}

impl From<Tag> for u32 {
    fn from(tag: Tag) -> u32 {
        let Tag(bytes) = tag;
        u32::from_be_bytes(bytes)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "'{}'", String::from_utf8_lossy(&self.0))
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Tag({})", self)
    }
}

/// A 16.16 fixed-point number.
///
/// Only the values needed by the compiled tables are constructible.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub struct Fixed(pub u32);

impl Fixed {
    /// The value `1.0`, also used as version number `1.0`.
    pub const ONE: Fixed = Fixed(0x0001_0000);

    /// Creates a version number such as `3.0` from its major and minor parts.
    pub const fn version(major: u16, minor: u16) -> Fixed {
        Fixed(((major as u32) << 16) | minor as u32)
    }
}

/// The fields used by SFNT structures to speed up binary searches over `count` items.
///
/// `unit` is the size in bytes of a single item.
/// This layout is shared by the table directory and `cmap` format 4.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub struct SearchParams {
    /// `unit` times the largest power of two less than or equal to `count`.
    pub search_range: u16,
    /// The base-2 logarithm of the largest power of two less than or equal to `count`.
    pub entry_selector: u16,
    /// `count * unit - search_range`.
    pub range_shift: u16,
}

impl SearchParams {
    /// Computes the binary search fields for `count` items of `unit` bytes each.
    pub fn new(count: u16, unit: u16) -> Self {
        if count == 0 {
            return SearchParams {
                search_range: 0,
                entry_selector: 0,
                range_shift: 0,
            };
        }

        let entry_selector = 15 - count.leading_zeros() as u16;
        let search_range = unit * (1 << entry_selector);
        let range_shift = count * unit - search_range;

        SearchParams {
            search_range,
            entry_selector,
            range_shift,
        }
    }
}

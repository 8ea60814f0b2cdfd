//! The tables of a TrueType font.
//!
//! Each module compiles one table (`glyf` and `loca` are compiled together).
//! Values shared by multiple tables are collected in [`FontMetrics`].

pub mod cmap;
pub mod glyf;
pub mod head;
pub mod hhea;
pub mod hmtx;
pub mod loca;
pub mod maxp;
pub mod name;
pub mod os2;
pub mod post;

use crate::ctx::Context;
use crate::data::{Bounds, Source};

/// Metrics derived from all glyphs of a font.
///
/// Glyphs without contours do not contribute to the bounding box and the side bearings.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct FontMetrics {
    /// The union of all glyph bounding boxes; all zero if no glyph has contours.
    pub bounds: Bounds,
    /// The maximum advance width.
    pub advance_width_max: u16,
    /// The average advance width of all glyphs with a non-zero advance.
    pub average_advance_width: i16,
    /// The minimum left side bearing.
    pub min_left_side_bearing: i16,
    /// The minimum right side bearing.
    pub min_right_side_bearing: i16,
    /// The maximum of `lsb + (xMax - xMin)`.
    pub x_max_extent: i16,
}

impl FontMetrics {
    /// Computes the metrics of the glyphs of `source`.
    pub fn new(source: &Source, ctx: &Context) -> Self {
        let mut bounds: Option<Bounds> = None;
        let mut min_left_side_bearing = i16::MAX;
        let mut min_right_side_bearing = i16::MAX;
        let mut x_max_extent = i16::MIN;

        for glyph in &source.glyphs {
            if let Some(b) = glyph.outline.bounds() {
                bounds = Some(bounds.map_or(b, |x| x.union(b)));
                let lsb = b.x_min;
                let rsb = glyph.advance_width as i32 - b.x_max as i32;
                min_left_side_bearing = min_left_side_bearing.min(lsb);
                min_right_side_bearing = min_right_side_bearing.min(clamp_i16(rsb));
                x_max_extent = x_max_extent.max(b.x_max);
            }
        }

        let advances: Vec<u32> = source
            .glyphs
            .iter()
            .map(|x| x.advance_width as u32)
            .filter(|&x| x != 0)
            .collect();
        let average_advance_width = if advances.is_empty() {
            ctx.advance_width as i16
        } else {
            let sum: u32 = advances.iter().sum();
            clamp_i16(((sum + advances.len() as u32 / 2) / advances.len() as u32) as i32)
        };

        let bounds = bounds.unwrap_or(Bounds {
            x_min: 0,
            y_min: 0,
            x_max: 0,
            y_max: 0,
        });
        let has_contours = min_left_side_bearing != i16::MAX;

        FontMetrics {
            bounds,
            advance_width_max: source
                .glyphs
                .iter()
                .map(|x| x.advance_width)
                .max()
                .unwrap_or(0),
            average_advance_width,
            min_left_side_bearing: if has_contours { min_left_side_bearing } else { 0 },
            min_right_side_bearing: if has_contours { min_right_side_bearing } else { 0 },
            x_max_extent: if has_contours { x_max_extent } else { 0 },
        }
    }
}

/// Converts `value` to `i16`, saturating at the bounds.
pub(crate) fn clamp_i16(value: i32) -> i16 {
    value.max(i16::MIN as i32).min(i16::MAX as i32) as i16
}

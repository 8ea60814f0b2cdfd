//! # glyf — Glyph Data
//!
//! Implementation of the `glyf` table.
//!
//! *Specification:*
//! [OpenType](https://docs.microsoft.com/en-us/typography/opentype/spec/glyf),
//! [TrueType](https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6glyf.html).
//!
//! Every glyph is written as a simple glyph without instructions.
//! Glyphs without contours occupy no space; their `loca` entry equals the following one.
//!
//! Point coordinates are stored as deltas from the previous point.
//! Deltas that fit into a byte are stored as a byte plus a sign flag, zero deltas are stored as a flag only.
//! With [`Context::glyf_repeat_flags`], runs of identical flags are stored once with a repeat count.
//! With [`Context::glyf_implied_on_curve_points`], on-curve points in the exact middle of two off-curve points are omitted since TrueType renderers infer them.

use crate::ctx::Context;
use crate::data::{Glyph, Outline, Point};
use bytes::{BufMut, Bytes, BytesMut};
use itertools::Itertools;
use std::convert::TryFrom;

/// The point is on the curve.
const ON_CURVE_POINT: u8 = 0x01;
/// The x delta is stored in one unsigned byte.
const X_SHORT_VECTOR: u8 = 0x02;
/// The y delta is stored in one unsigned byte.
const Y_SHORT_VECTOR: u8 = 0x04;
/// The next byte is the number of additional repetitions of this flag.
const REPEAT_FLAG: u8 = 0x08;
/// With `X_SHORT_VECTOR`: the x delta is positive. Without: the x delta is zero.
const X_IS_SAME_OR_POSITIVE: u8 = 0x10;
/// With `Y_SHORT_VECTOR`: the y delta is positive. Without: the y delta is zero.
const Y_IS_SAME_OR_POSITIVE: u8 = 0x20;

/// The compiled `glyf` table and the values other tables derive from it.
#[derive(Debug, Clone)]
pub struct CompiledGlyphs {
    /// The `glyf` table.
    pub data: Bytes,
    /// The offset of every glyph into `data`, followed by the length of `data`.
    ///
    /// Every offset is a multiple of four.
    pub offsets: Vec<u32>,
    /// The maximum number of points in a glyph.
    pub max_points: u16,
    /// The maximum number of contours in a glyph.
    pub max_contours: u16,
}

/// Returns the `glyf` table for the given glyphs.
pub fn compile(glyphs: &[Glyph], ctx: &Context) -> CompiledGlyphs {
    log::info!("Write Glyph Data");

    let mut buf = BytesMut::new();
    let mut offsets: Vec<u32> = Vec::with_capacity(glyphs.len() + 1);
    let mut max_points: u16 = 0;
    let mut max_contours: u16 = 0;

    for glyph in glyphs {
        offsets.push(buf.len() as u32);

        let outline = if ctx.glyf_implied_on_curve_points {
            drop_implied_points(&glyph.outline)
        } else {
            glyph.outline.clone()
        };

        max_points = max_points.max(outline.num_points() as u16);
        max_contours = max_contours.max(outline.contours.len() as u16);

        let data = compile_glyph(&outline, ctx);
        log::trace!("glyph '{}': {} bytes", glyph.name, data.len());

        buf.put(data);

        let padding = (4 - (buf.len() % 4)) % 4;
        buf.put_bytes(0, padding);
    }

    offsets.push(buf.len() as u32);

    CompiledGlyphs {
        data: buf.freeze(),
        offsets,
        max_points,
        max_contours,
    }
}

/// Returns the data of a simple glyph, or no data for an outline without contours.
pub fn compile_glyph(outline: &Outline, ctx: &Context) -> Bytes {
    let bounds = match outline.bounds() {
        Some(bounds) => bounds,
        None => return Bytes::new(),
    };

    let mut buf = BytesMut::new();

    buf.put_i16(outline.contours.len() as i16);
    buf.put_i16(bounds.x_min);
    buf.put_i16(bounds.y_min);
    buf.put_i16(bounds.x_max);
    buf.put_i16(bounds.y_max);

    // endPtsOfContours
    let mut end_point: i32 = -1;
    for contour in &outline.contours {
        end_point += contour.points.len() as i32;
        buf.put_u16(end_point as u16);
    }

    let instruction_length = 0;
    buf.put_u16(instruction_length);

    let points = outline.contours.iter().flat_map(|x| x.points.iter());
    let mut flags: Vec<u8> = Vec::with_capacity(outline.num_points());
    let mut x_coordinates = BytesMut::new();
    let mut y_coordinates = BytesMut::new();
    let (mut x, mut y) = (0i16, 0i16);

    for point in points {
        let mut flag = if point.on_curve { ON_CURVE_POINT } else { 0 };
        flag |= put_delta(
            &mut x_coordinates,
            point.x.wrapping_sub(x),
            X_SHORT_VECTOR,
            X_IS_SAME_OR_POSITIVE,
        );
        flag |= put_delta(
            &mut y_coordinates,
            point.y.wrapping_sub(y),
            Y_SHORT_VECTOR,
            Y_IS_SAME_OR_POSITIVE,
        );
        flags.push(flag);
        x = point.x;
        y = point.y;
    }

    if ctx.glyf_repeat_flags {
        for (count, flag) in flags.into_iter().dedup_with_count() {
            put_repeated_flag(&mut buf, flag, count);
        }
    } else {
        buf.put_slice(&flags);
    }

    buf.put(x_coordinates);
    buf.put(y_coordinates);

    buf.freeze()
}

/// Writes a coordinate delta and returns the flag bits describing its encoding.
fn put_delta(buf: &mut BytesMut, delta: i16, short_vector: u8, same_or_positive: u8) -> u8 {
    if delta == 0 {
        same_or_positive
    } else if let Ok(magnitude) = u8::try_from(delta.unsigned_abs()) {
        buf.put_u8(magnitude);
        if delta > 0 {
            short_vector | same_or_positive
        } else {
            short_vector
        }
    } else {
        buf.put_i16(delta);
        0
    }
}

/// Writes `flag` `count` times using the repeat flag.
fn put_repeated_flag(buf: &mut BytesMut, flag: u8, count: usize) {
    let mut remaining = count;

    while remaining > 0 {
        if remaining == 1 {
            buf.put_u8(flag);
            remaining = 0;
        } else {
            // the repeat count is a byte and excludes the flag itself
            let repeat = (remaining - 1).min(u8::MAX as usize);
            buf.put_u8(flag | REPEAT_FLAG);
            buf.put_u8(repeat as u8);
            remaining -= repeat + 1;
        }
    }
}

/// Returns `outline` without the on-curve points that lie exactly between two off-curve neighbours.
///
/// At least one on-curve point is kept in every contour.
fn drop_implied_points(outline: &Outline) -> Outline {
    let mut result = outline.clone();

    for contour in &mut result.contours {
        let points = &contour.points;
        let len = points.len();
        let mut implied: Vec<bool> = (0..len)
            .map(|i| {
                let prev = points[(i + len - 1) % len];
                let next = points[(i + 1) % len];
                is_implied(prev, points[i], next)
            })
            .collect();

        let on_curve_count = points.iter().filter(|x| x.on_curve).count();
        if implied.iter().filter(|&&x| x).count() == on_curve_count {
            if let Some(first) = implied.iter().position(|&x| x) {
                implied[first] = false;
            }
        }

        let kept: Vec<Point> = points
            .iter()
            .zip(implied)
            .filter(|(_, implied)| !implied)
            .map(|(point, _)| *point)
            .collect();
        contour.points = kept;
    }

    result
}

/// Whether `point` is the on-curve point a renderer infers between the off-curve points `prev` and `next`.
fn is_implied(prev: Point, point: Point, next: Point) -> bool {
    point.on_curve
        && !prev.on_curve
        && !next.on_curve
        && prev.x as i32 + next.x as i32 == 2 * point.x as i32
        && prev.y as i32 + next.y as i32 == 2 * point.y as i32
}

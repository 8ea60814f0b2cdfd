//! The source data of a font.

use crate::ctx::Context;
use std::collections::BTreeMap;

/// The PostScript name used when the font name contains no usable character.
pub const FALLBACK_POSTSCRIPT_NAME: &str = "Untitled";

/// The source of a font.
#[derive(Debug)]
pub struct Source {
    /// The name of the font family.
    pub family_name: String,
    /// The style name of the font.
    pub style_name: String,
    /// The full name of the font.
    pub font_name: String,
    /// The glyphs of the font, indexed by glyph id.
    ///
    /// The glyph with id `0` is the `.notdef` glyph.
    pub glyphs: Vec<Glyph>,
    /// The character map used by the font.
    pub character_map: CharacterMap,
}

impl Source {
    /// Creates a source named `name` that contains only the `.notdef` glyph.
    ///
    /// The family name and the full name are both set to `name`.
    pub fn new(name: &str, ctx: &Context) -> Self {
        Source {
            family_name: name.to_string(),
            style_name: "Regular".to_string(),
            font_name: name.to_string(),
            glyphs: vec![Glyph::notdef(ctx.advance_width)],
            character_map: CharacterMap::new(),
        }
    }

    /// Appends `glyph` and maps `code` to it; returns the glyph id of the new glyph.
    pub fn push_glyph(&mut self, code: char, glyph: Glyph) -> u32 {
        let gid = self.glyphs.len() as u32;
        self.glyphs.push(glyph);
        self.character_map.insert(code, gid);
        gid
    }

    /// The PostScript name of the font: the font name reduced to the characters PostScript allows.
    ///
    /// PostScript names are restricted to printable ASCII without spaces and a few delimiters.
    /// Returns [`FALLBACK_POSTSCRIPT_NAME`] if no character of the font name remains.
    pub fn postscript_name(&self) -> String {
        let name: String = self
            .font_name
            .chars()
            .filter(|&c| c.is_ascii_graphic() && !"[](){}<>/%".contains(c))
            .take(63)
            .collect();

        if name.is_empty() {
            FALLBACK_POSTSCRIPT_NAME.to_string()
        } else {
            name
        }
    }
}

impl Default for Source {
    fn default() -> Self {
        Source::new("Default", &Context::default())
    }
}

/// Maps Unicode scalers to glyph ids.
///
/// A `BTreeMap` is used since a character map is frequently accessed in ascending order of character codes.
pub type CharacterMap = BTreeMap<char, u32>;

/// A glyph of a font.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Glyph {
    /// The PostScript name of the glyph.
    pub name: String,
    /// The horizontal advance in font units.
    pub advance_width: u16,
    /// The outline of the glyph.
    pub outline: Outline,
}

impl Glyph {
    /// Returns an empty `.notdef` glyph.
    pub fn notdef(advance_width: u16) -> Self {
        Glyph {
            name: ".notdef".to_string(),
            advance_width,
            outline: Outline::default(),
        }
    }
}

/// The quadratic outline of a glyph.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct Outline {
    /// The closed contours of the outline.
    pub contours: Vec<Contour>,
}

impl Outline {
    /// Whether the outline has no contours.
    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    /// The total number of points of all contours.
    pub fn num_points(&self) -> usize {
        self.contours.iter().map(|x| x.points.len()).sum()
    }

    /// Returns the bounding box of all points, or `None` for an empty outline.
    ///
    /// Off-curve points are included, matching the bounding box TrueType stores in the glyph header.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut points = self.contours.iter().flat_map(|x| x.points.iter());
        let first = points.next()?;
        let init = Bounds {
            x_min: first.x,
            y_min: first.y,
            x_max: first.x,
            y_max: first.y,
        };

        Some(points.fold(init, |b, p| Bounds {
            x_min: b.x_min.min(p.x),
            y_min: b.y_min.min(p.y),
            x_max: b.x_max.max(p.x),
            y_max: b.y_max.max(p.y),
        }))
    }
}

/// A closed contour of an outline.
///
/// The last point connects back to the first point.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct Contour {
    /// The points of the contour.
    pub points: Vec<Point>,
}

/// A point of a contour in font units.
///
/// The y axis points up.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Point {
    /// The horizontal position.
    pub x: i16,
    /// The vertical position.
    pub y: i16,
    /// Whether the point lies on the curve; otherwise it is a quadratic control point.
    pub on_curve: bool,
}

impl Point {
    /// Creates an on-curve point.
    pub fn on(x: i16, y: i16) -> Self {
        Point {
            x,
            y,
            on_curve: true,
        }
    }

    /// Creates an off-curve point.
    pub fn off(x: i16, y: i16) -> Self {
        Point {
            x,
            y,
            on_curve: false,
        }
    }
}

/// An axis-aligned bounding box in font units.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Bounds {
    /// The minimum x coordinate.
    pub x_min: i16,
    /// The minimum y coordinate.
    pub y_min: i16,
    /// The maximum x coordinate.
    pub x_max: i16,
    /// The maximum y coordinate.
    pub y_max: i16,
}

impl Bounds {
    /// Returns the smallest bounding box containing both `self` and `other`.
    pub fn union(self, other: Bounds) -> Bounds {
        Bounds {
            x_min: self.x_min.min(other.x_min),
            y_min: self.y_min.min(other.y_min),
            x_max: self.x_max.max(other.x_max),
            y_max: self.y_max.max(other.y_max),
        }
    }
}

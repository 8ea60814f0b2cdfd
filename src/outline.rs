//! Import of SVG outlines into TrueType contours.
//!
//! The SVG document is resolved by `usvg`: basic shapes become paths, `viewBox` and nested transforms are folded into one absolute transform per path.
//! Every path is then mapped onto the em square and converted into quadratic contours.
//!
//! The canvas height of the document spans the em square: the top edge is placed at the ascender and the y axis is flipped to point up.
//! The horizontal axis uses the same scale, starting at x = 0.
//! Fill and stroke attributes are ignored; only the path geometry becomes part of the glyph.

use crate::ctx::Context;
use crate::data::{Contour, Outline, Point};
use kurbo::CubicBez;
use std::convert::TryFrom;
use std::fmt;
use usvg::tiny_skia_path::{self, PathSegment};
use usvg::{Node, Tree};

/// An error that may occur while importing an outline.
#[derive(Debug)]
pub enum ImportError {
    /// The document is not a valid SVG document.
    Svg(usvg::Error),
    /// A point lies outside the coordinate range of a TrueType glyph.
    OutOfRange {
        /// The x coordinate in font units.
        x: f64,
        /// The y coordinate in font units.
        y: f64,
    },
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Svg(e) => write!(f, "{}", e),
            Self::OutOfRange { x, y } => write!(
                f,
                "the point ({:.0}, {:.0}) exceeds the font unit range {}..={}",
                x,
                y,
                i16::MIN,
                i16::MAX
            ),
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Svg(e) => Some(e),
            Self::OutOfRange { .. } => None,
        }
    }
}

impl From<usvg::Error> for ImportError {
    fn from(e: usvg::Error) -> Self {
        ImportError::Svg(e)
    }
}

/// Parses an SVG document and returns its outline in font units.
///
/// Fails if a point of the outline does not fit into the `i16` coordinates of a glyph.
pub fn import(data: &[u8], ctx: &Context) -> Result<Outline, ImportError> {
    let tree = Tree::from_data(data, &usvg::Options::default())?;
    let mapping = EmMapping::new(&tree, ctx);

    let mut outline = Outline::default();
    collect_group(tree.root(), &mapping, ctx, &mut outline)?;

    log::trace!(
        "imported {} contours with {} points",
        outline.contours.len(),
        outline.num_points()
    );

    Ok(outline)
}

fn collect_group(
    group: &usvg::Group,
    mapping: &EmMapping,
    ctx: &Context,
    outline: &mut Outline,
) -> Result<(), ImportError> {
    for node in group.children() {
        match node {
            Node::Group(group) => collect_group(group, mapping, ctx, outline)?,
            Node::Path(path) => {
                let data = match path.data().clone().transform(path.abs_transform()) {
                    Some(data) => data,
                    None => {
                        log::warn!("skipping path '{}' with degenerate transform", path.id());
                        continue;
                    }
                };
                convert_path(&data, mapping, ctx.curve_tolerance, outline)?;
            }
            other => log::warn!("skipping node '{}' without outline data", other.id()),
        }
    }

    Ok(())
}

/// The mapping from SVG canvas coordinates to font units.
#[derive(Debug, Clone, Copy)]
struct EmMapping {
    scale: f64,
    ascender: f64,
}

impl EmMapping {
    fn new(tree: &Tree, ctx: &Context) -> Self {
        let em_height = ctx.ascender as f64 - ctx.descender as f64;
        EmMapping {
            scale: em_height / tree.size().height() as f64,
            ascender: ctx.ascender as f64,
        }
    }

    fn map(&self, p: tiny_skia_path::Point) -> kurbo::Point {
        kurbo::Point::new(
            p.x as f64 * self.scale,
            self.ascender - p.y as f64 * self.scale,
        )
    }
}

/// Rounds a point in font units to the integer grid.
fn quantize(p: kurbo::Point, on_curve: bool) -> Result<Point, ImportError> {
    let out_of_range = || ImportError::OutOfRange { x: p.x, y: p.y };
    let x = to_i16(p.x).ok_or_else(out_of_range)?;
    let y = to_i16(p.y).ok_or_else(out_of_range)?;

    Ok(Point { x, y, on_curve })
}

fn to_i16(value: f64) -> Option<i16> {
    let rounded = value.round();
    if rounded.is_finite() {
        i16::try_from(rounded as i64).ok()
    } else {
        None
    }
}

/// Appends the contours of `path` to `outline`.
fn convert_path(
    path: &tiny_skia_path::Path,
    mapping: &EmMapping,
    tolerance: f64,
    outline: &mut Outline,
) -> Result<(), ImportError> {
    let mut builder = ContourBuilder::default();

    for segment in path.segments() {
        match segment {
            PathSegment::MoveTo(p) => builder.move_to(mapping.map(p))?,
            PathSegment::LineTo(p) => builder.line_to(mapping.map(p))?,
            PathSegment::QuadTo(p1, p2) => builder.quad_to(mapping.map(p1), mapping.map(p2))?,
            PathSegment::CubicTo(p1, p2, p3) => {
                let cubic = CubicBez::new(
                    builder.current,
                    mapping.map(p1),
                    mapping.map(p2),
                    mapping.map(p3),
                );
                for (_, _, quad) in cubic.to_quads(tolerance) {
                    builder.quad_to(quad.p1, quad.p2)?;
                }
            }
            PathSegment::Close => builder.close(),
        }
    }

    builder.close();
    outline.contours.append(&mut builder.contours);

    Ok(())
}

/// Accumulates quadratic contours from path segments.
#[derive(Debug, Default)]
struct ContourBuilder {
    contours: Vec<Contour>,
    points: Vec<Point>,
    current: kurbo::Point,
}

impl ContourBuilder {
    fn move_to(&mut self, p: kurbo::Point) -> Result<(), ImportError> {
        self.close();
        self.points.push(quantize(p, true)?);
        self.current = p;
        Ok(())
    }

    fn line_to(&mut self, p: kurbo::Point) -> Result<(), ImportError> {
        self.points.push(quantize(p, true)?);
        self.current = p;
        Ok(())
    }

    fn quad_to(&mut self, control: kurbo::Point, p: kurbo::Point) -> Result<(), ImportError> {
        self.points.push(quantize(control, false)?);
        self.points.push(quantize(p, true)?);
        self.current = p;
        Ok(())
    }

    /// Finishes the current contour.
    ///
    /// An end point coinciding with the start point is dropped since contours close implicitly.
    /// Contours with fewer than three points enclose no area and are discarded.
    fn close(&mut self) {
        let mut points = std::mem::take(&mut self.points);

        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }

        if points.len() >= 3 {
            self.contours.push(Contour { points });
        }
    }
}

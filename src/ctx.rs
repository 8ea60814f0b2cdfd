//! The context with which a compilation is performed.

/// A context defines customization options.
#[derive(Debug, PartialEq, Clone)]
pub struct Context {
    /// The code point assigned to the first icon.
    ///
    /// Following icons are assigned the subsequent code points.
    pub base_code_point: char,
    /// The size of the em square in font units.
    pub units_per_em: u16,
    /// The advance width of every glyph in font units.
    pub advance_width: u16,
    /// The ascender in font units.
    ///
    /// The top edge of an imported SVG canvas is placed at this height.
    pub ascender: i16,
    /// The descender in font units; negative below the baseline.
    pub descender: i16,
    /// The maximum distance in font units between a cubic curve and its quadratic approximation.
    pub curve_tolerance: f64,
    /// Whether runs of identical point flags are compressed using the repeat flag in [`sfnt::tables::glyf`](crate::sfnt::tables::glyf).
    pub glyf_repeat_flags: bool,
    /// Whether on-curve points lying exactly between two off-curve points are omitted in [`sfnt::tables::glyf`](crate::sfnt::tables::glyf).
    pub glyf_implied_on_curve_points: bool,
    /// Whether [`sfnt::tables::loca`](crate::sfnt::tables::loca) may use the short offset format.
    pub loca_short_offsets: bool,
}

impl Context {
    /// Creates a context for an abstract optimization level.
    pub fn new(o: Optimization) -> Self {
        Context {
            base_code_point: '\u{E000}',
            units_per_em: 1000,
            advance_width: 1000,
            ascender: 800,
            descender: -200,
            curve_tolerance: 0.5,
            glyf_repeat_flags: o >= Optimization::O1,
            glyf_implied_on_curve_points: o >= Optimization::O2,
            loca_short_offsets: o >= Optimization::O1,
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Context::new(Optimization::O0)
    }
}

/// An abstract optimization level.
///
/// The optimization applies to the size of the compiled font.
/// Every level produces a valid font that renders identically.
///
/// The levels are ordered by increasing optimization.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub enum Optimization {
    /// Minimal optimization.
    ///
    /// Glyph data is written in its most direct form.
    /// This level is useful when inspecting the compiled tables by hand.
    O0,
    /// Basic optimization.
    ///
    /// Enables the encodings every font editor applies: repeated point flags and short `loca` offsets.
    O1,
    /// Advanced optimization.
    ///
    /// Additionally removes redundant on-curve points from quadratic contours.
    O2,
    /// Maximal optimization.
    ///
    /// Currently identical to `O2`.
    O3,
}

impl Default for Optimization {
    fn default() -> Self {
        Optimization::O0
    }
}

//! # Icon font builder
//!
//! Turns a directory of SVG icons into a TrueType font and a [symbol table](crate::symbols).
//!
//! Every file ending in `.svg` becomes one glyph.
//! The file name determines the name of the constant in the symbol table: `my-icon.svg` becomes `MY_ICON`.
//! Icons are assigned consecutive private-use code points in ascending order of their file names, starting at [`Context::base_code_point`].
//! Other files are ignored and do not consume a code point.
//!
//! ```no_run
//! # use iconforge::ctx::{Context, Optimization};
//! # use iconforge::icons::build_icon_font;
//! # use std::path::Path;
//! let ctx = Context::new(Optimization::O2);
//! let icons = build_icon_font(
//!     Path::new("assets/icons"),
//!     Path::new("assets/icons.ttf"),
//!     Path::new("assets/icons.rs"),
//!     "icons",
//!     &ctx,
//! )?;
//! println!("{} icons", icons.symbols.symbols.len());
//! # Ok::<(), iconforge::Error>(())
//! ```

use crate::ctx::Context;
use crate::data::{Glyph, Source};
use crate::error::Error;
use crate::outline;
use crate::sfnt;
use crate::symbols::{SymbolTable, FONT_SYMBOL};
use crate::util::fs;
use std::collections::HashMap;
use std::path::Path;

/// The file name suffix of icon files.
///
/// The comparison is case-sensitive.
pub const ICON_EXTENSION: &str = ".svg";

/// The last code point of the private use area of the Basic Multilingual Plane.
pub const LAST_PRIVATE_USE_CODE_POINT: char = '\u{F8FF}';

/// Returns the constant name of the icon file `file_name`.
///
/// Returns `None` if `file_name` does not end in [`ICON_EXTENSION`].
/// The name is not validated; see [`is_valid_symbol`].
///
/// ```
/// # use iconforge::icons::symbol_name;
/// assert_eq!(symbol_name("my-icon.svg"), Some("MY_ICON".to_string()));
/// assert_eq!(symbol_name("README.md"), None);
/// ```
pub fn symbol_name(file_name: &str) -> Option<String> {
    let stem = file_name.strip_suffix(ICON_EXTENSION)?;
    Some(stem.to_uppercase().replace('-', "_"))
}

/// Returns whether `symbol` can be used as the name of a Rust constant.
pub fn is_valid_symbol(symbol: &str) -> bool {
    let first_ok = symbol
        .chars()
        .next()
        .map_or(false, |c| c.is_ascii_alphabetic() || c == '_');

    first_ok
        && symbol != "_"
        && symbol.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Returns the file names of the icons in `dir` in ascending order.
///
/// Directories and entries whose names are not valid UTF-8 are skipped.
pub fn scan(dir: &Path) -> Result<Vec<String>, Error> {
    let entries = std::fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;
    let mut file_names = Vec::new();

    for entry in entries {
        let entry = entry.map_err(|e| Error::io(dir, e))?;

        let file_name = match entry.file_name().into_string() {
            Ok(x) => x,
            Err(name) => {
                log::warn!("skipping {:?}: file name is not valid UTF-8", name);
                continue;
            }
        };

        if !file_name.ends_with(ICON_EXTENSION) {
            log::trace!("skipping {}", file_name);
            continue;
        }

        let file_type = entry.file_type().map_err(|e| Error::io(entry.path(), e))?;
        if file_type.is_dir() {
            log::warn!("skipping directory {}", file_name);
            continue;
        }

        file_names.push(file_name);
    }

    file_names.sort();
    Ok(file_names)
}

/// The code point assigned to an icon file.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Assignment {
    /// The file name of the icon.
    pub file_name: String,
    /// The constant name of the icon.
    pub symbol: String,
    /// The assigned code point.
    pub code_point: char,
}

impl Assignment {
    /// The name of the glyph: the file name without its extension.
    pub fn glyph_name(&self) -> &str {
        self.file_name
            .strip_suffix(ICON_EXTENSION)
            .unwrap_or(&self.file_name)
    }
}

/// Assigns consecutive code points starting at `base` to the icons among `file_names`.
///
/// The file names are processed in ascending order, so the result does not depend on the order of `file_names`.
/// Names not ending in [`ICON_EXTENSION`] are ignored.
pub fn assign(file_names: &[String], base: char) -> Result<Vec<Assignment>, Error> {
    let mut sorted: Vec<&String> = file_names.iter().collect();
    sorted.sort();

    let mut claimed: HashMap<String, &str> = HashMap::new();
    let mut named: Vec<(&str, String)> = Vec::new();

    for file_name in sorted {
        let symbol = match symbol_name(file_name) {
            Some(x) => x,
            None => continue,
        };

        if !is_valid_symbol(&symbol) || symbol == FONT_SYMBOL {
            return Err(Error::InvalidSymbol {
                file_name: file_name.clone(),
                symbol,
            });
        }

        if let Some(first) = claimed.insert(symbol.clone(), file_name.as_str()) {
            return Err(Error::DuplicateSymbol {
                symbol,
                first: first.to_string(),
                second: file_name.clone(),
            });
        }

        named.push((file_name.as_str(), symbol));
    }

    let count = named.len();
    let mut assignments = Vec::with_capacity(count);

    for (offset, (file_name, symbol)) in named.into_iter().enumerate() {
        let code_point = (base as u32)
            .checked_add(offset as u32)
            .and_then(std::char::from_u32)
            .filter(|&x| x <= LAST_PRIVATE_USE_CODE_POINT)
            .ok_or(Error::CodePointsExhausted { count })?;

        assignments.push(Assignment {
            file_name: file_name.to_string(),
            symbol,
            code_point,
        });
    }

    Ok(assignments)
}

/// An icon font built in memory.
#[derive(Debug)]
pub struct IconFont {
    /// The font source with one glyph per icon.
    pub source: Source,
    /// The symbol table naming the code point of every icon.
    pub symbols: SymbolTable,
}

/// Builds the icon font of the icons in `dir` without writing any file.
pub fn build(dir: &Path, font_name: &str, ctx: &Context) -> Result<IconFont, Error> {
    let file_names = scan(dir)?;
    let assignments = assign(&file_names, ctx.base_code_point)?;

    let mut source = Source::new(font_name, ctx);
    let mut symbols = SymbolTable::new(font_name);

    for assignment in &assignments {
        let path = dir.join(&assignment.file_name);
        let data = fs::read(&path)?;
        let outline = outline::import(&data, ctx).map_err(|source| Error::Svg {
            path: path.clone(),
            source,
        })?;

        if outline.is_empty() {
            log::warn!("{} has no outline", assignment.file_name);
        }

        let gid = source.push_glyph(
            assignment.code_point,
            Glyph {
                name: assignment.glyph_name().to_string(),
                advance_width: ctx.advance_width,
                outline,
            },
        );
        symbols.push(&assignment.symbol, assignment.code_point);

        log::debug!(
            "{} → {} U+{:04X} (glyph {})",
            assignment.file_name,
            assignment.symbol,
            assignment.code_point as u32,
            gid
        );
    }

    Ok(IconFont { source, symbols })
}

/// Builds the icon font of the icons in `icons_dir` and writes the font to `font_path` and the symbol table to `table_path`.
///
/// Both artifacts are compiled before either is written.
/// A failure while reading or importing an icon leaves existing artifacts untouched.
pub fn build_icon_font(
    icons_dir: &Path,
    font_path: &Path,
    table_path: &Path,
    font_name: &str,
    ctx: &Context,
) -> Result<IconFont, Error> {
    log::info!("Build Icon Font from {}", icons_dir.display());

    let icons = build(icons_dir, font_name, ctx)?;

    log::info!("Compile Font");
    let font = sfnt::compile_ttf(&icons.source, ctx);
    let table = icons.symbols.render();

    fs::write_atomic(font_path, &font)?;
    fs::write_atomic(table_path, table.as_bytes())?;

    log::info!(
        "wrote {} glyphs ({} bytes) to {} and {} symbols to {}",
        icons.source.glyphs.len(),
        font.len(),
        font_path.display(),
        icons.symbols.symbols.len(),
        table_path.display()
    );

    Ok(icons)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ctx::Optimization;
    use std::path::PathBuf;

    const SQUARE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24"><path d="M4 4H20V20H4Z"/></svg>"#;
    const CIRCLE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24"><circle cx="12" cy="12" r="8"/></svg>"#;

    fn names(file_names: &[&str]) -> Vec<String> {
        file_names.iter().map(|x| x.to_string()).collect()
    }

    fn icon_dir(files: &[(&str, &str)]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (name, contents) in files {
            std::fs::write(dir.path().join(name), contents).unwrap();
        }
        dir
    }

    struct Outputs {
        font: PathBuf,
        table: PathBuf,
    }

    fn outputs(dir: &tempfile::TempDir) -> Outputs {
        Outputs {
            font: dir.path().join("icons.ttf"),
            table: dir.path().join("icons.rs"),
        }
    }

    #[test]
    fn test_symbol_name() {
        assert_eq!(symbol_name("my-icon.svg"), Some("MY_ICON".to_string()));
        assert_eq!(symbol_name("play.svg"), Some("PLAY".to_string()));
        assert_eq!(symbol_name("arrow-up-2.svg"), Some("ARROW_UP_2".to_string()));
        assert_eq!(symbol_name("snake_case.svg"), Some("SNAKE_CASE".to_string()));
        assert_eq!(symbol_name("README.md"), None);
        assert_eq!(symbol_name("shout.SVG"), None);
        assert_eq!(symbol_name("archive.svg.bak"), None);
    }

    #[test]
    fn test_is_valid_symbol() {
        assert!(is_valid_symbol("MY_ICON"));
        assert!(is_valid_symbol("_PRIVATE"));
        assert!(is_valid_symbol("ICON2"));
        assert!(!is_valid_symbol(""));
        assert!(!is_valid_symbol("_"));
        assert!(!is_valid_symbol("2_UP"));
        assert!(!is_valid_symbol("MY ICON"));
        assert!(!is_valid_symbol("MY.ICON"));
        assert!(!is_valid_symbol("ÜBER"));
    }

    #[test]
    fn test_scan_filters_and_sorts() {
        let dir = icon_dir(&[
            ("zoom.svg", SQUARE),
            ("README.md", "# icons"),
            ("add.svg", SQUARE),
            ("shout.SVG", SQUARE),
        ]);
        std::fs::create_dir(dir.path().join("nested.svg")).unwrap();

        assert_eq!(scan(dir.path()).unwrap(), names(&["add.svg", "zoom.svg"]));
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_skips_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = icon_dir(&[("play.svg", SQUARE)]);
        let name = OsStr::from_bytes(b"bad-\xFF.svg");
        std::fs::write(dir.path().join(name), SQUARE).unwrap();

        assert_eq!(scan(dir.path()).unwrap(), names(&["play.svg"]));
    }

    #[test]
    fn test_scan_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("icons");

        match scan(&missing) {
            Err(Error::Io { path, .. }) => assert_eq!(path, missing),
            x => panic!("unexpected result {:?}", x),
        }
    }

    #[test]
    fn test_assign_dense_code_points() {
        let assignments = assign(
            &names(&["play.svg", "README.md", "my-icon.svg", "stop.svg"]),
            '\u{E000}',
        )
        .unwrap();

        let summary: Vec<(&str, char)> = assignments
            .iter()
            .map(|x| (x.symbol.as_str(), x.code_point))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("MY_ICON", '\u{E000}'),
                ("PLAY", '\u{E001}'),
                ("STOP", '\u{E002}'),
            ]
        );
        assert_eq!(assignments[0].file_name, "my-icon.svg");
        assert_eq!(assignments[0].glyph_name(), "my-icon");
    }

    #[test]
    fn test_assign_empty() {
        assert!(assign(&names(&["README.md"]), '\u{E000}').unwrap().is_empty());
        assert!(assign(&[], '\u{E000}').unwrap().is_empty());
    }

    #[test]
    fn test_assign_all_permutations() {
        let mut file_names = names(&["c.svg", "a-b.svg", "notes.txt", "b.svg", "a.svg"]);
        let expected = assign(&file_names, '\u{E000}').unwrap();

        let heap = permutohedron::Heap::new(&mut file_names);

        for permutation in heap {
            assert_eq!(assign(&permutation, '\u{E000}').unwrap(), expected);
        }
    }

    #[test]
    fn test_assign_random_order() {
        use rand::prelude::*;
        let mut rng = rand::thread_rng();

        let mut file_names: Vec<String> = (0..200).map(|i| format!("icon-{}.svg", i)).collect();
        let expected = assign(&file_names, '\u{E000}').unwrap();

        for _ in 0..20 {
            file_names.shuffle(&mut rng);
            assert_eq!(assign(&file_names, '\u{E000}').unwrap(), expected);
        }
    }

    #[test]
    fn test_assign_duplicate_symbol() {
        match assign(&names(&["a_b.svg", "a-b.svg"]), '\u{E000}') {
            Err(Error::DuplicateSymbol {
                symbol,
                first,
                second,
            }) => {
                assert_eq!(symbol, "A_B");
                assert_eq!(first, "a-b.svg");
                assert_eq!(second, "a_b.svg");
            }
            x => panic!("unexpected result {:?}", x),
        }

        assert!(matches!(
            assign(&names(&["Play.svg", "play.svg"]), '\u{E000}'),
            Err(Error::DuplicateSymbol { .. })
        ));
    }

    #[test]
    fn test_assign_invalid_symbol() {
        for file_name in &["1st.svg", "my icon.svg", ".svg", "font.svg"] {
            match assign(&names(&[*file_name]), '\u{E000}') {
                Err(Error::InvalidSymbol { file_name: x, .. }) => assert_eq!(x, *file_name),
                x => panic!("unexpected result for {}: {:?}", file_name, x),
            }
        }
    }

    #[test]
    fn test_assign_code_points_exhausted() {
        let assignments = assign(&names(&["a.svg", "b.svg"]), '\u{F8FE}').unwrap();
        assert_eq!(assignments[1].code_point, LAST_PRIVATE_USE_CODE_POINT);

        match assign(&names(&["a.svg", "b.svg", "c.svg"]), '\u{F8FE}') {
            Err(Error::CodePointsExhausted { count }) => assert_eq!(count, 3),
            x => panic!("unexpected result {:?}", x),
        }
    }

    #[test]
    fn test_build_in_memory() {
        let dir = icon_dir(&[
            ("my-icon.svg", SQUARE),
            ("circle.svg", CIRCLE),
            ("README.md", "# icons"),
        ]);
        let ctx = Context::default();
        let icons = build(dir.path(), "icons", &ctx).unwrap();

        assert_eq!(icons.source.glyphs.len(), 3);
        assert_eq!(icons.source.glyphs[0].name, ".notdef");
        assert_eq!(icons.source.glyphs[1].name, "circle");
        assert_eq!(icons.source.glyphs[2].name, "my-icon");
        assert!(icons.source.glyphs.iter().all(|x| x.advance_width == 1000));
        assert_eq!(icons.source.character_map[&'\u{E000}'], 1);
        assert_eq!(icons.source.character_map[&'\u{E001}'], 2);
        assert_eq!(
            icons.symbols.symbols,
            vec![
                ("CIRCLE".to_string(), '\u{E000}'),
                ("MY_ICON".to_string(), '\u{E001}'),
            ]
        );
    }

    #[test]
    fn test_build_icon_font() {
        let dir = icon_dir(&[
            ("my-icon.svg", SQUARE),
            ("play.svg", CIRCLE),
            ("stop.svg", SQUARE),
            ("README.md", "# icons"),
        ]);
        let out = tempfile::tempdir().unwrap();
        let out = outputs(&out);
        let ctx = Context::new(Optimization::O2);

        build_icon_font(dir.path(), &out.font, &out.table, "icons", &ctx).unwrap();

        let table = std::fs::read_to_string(&out.table).unwrap();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(
            lines,
            vec![
                "pub const FONT: iced::Font = iced::Font::with_name(\"icons\");",
                "pub const MY_ICON: char = '\\u{E000}';",
                "pub const PLAY: char = '\\u{E001}';",
                "pub const STOP: char = '\\u{E002}';",
            ]
        );

        let data = std::fs::read(&out.font).unwrap();
        let face = ttf_parser::Face::parse(&data, 0).unwrap();
        assert_eq!(face.units_per_em(), 1000);
        assert_eq!(face.number_of_glyphs(), 4);

        for (i, c) in ['\u{E000}', '\u{E001}', '\u{E002}'].iter().enumerate() {
            let gid = face.glyph_index(*c).unwrap();
            assert_eq!(gid.0 as usize, i + 1);
            assert_eq!(face.glyph_hor_advance(gid), Some(1000));
        }
        assert_eq!(face.glyph_index('\u{E003}'), None);

        let family = face
            .names()
            .into_iter()
            .find(|x| x.name_id == ttf_parser::name_id::FAMILY && x.is_unicode())
            .and_then(|x| x.to_string());
        assert_eq!(family.as_deref(), Some("icons"));

        let postscript_name = face
            .names()
            .into_iter()
            .find(|x| x.name_id == ttf_parser::name_id::POST_SCRIPT_NAME)
            .and_then(|x| x.to_string());
        assert_eq!(postscript_name.as_deref(), Some("icons"));

        // the square spans 4..20 of a 24 unit canvas
        let bbox = face.glyph_bounding_box(ttf_parser::GlyphId(1)).unwrap();
        assert_eq!((bbox.x_min, bbox.x_max), (167, 833));
        assert_eq!((bbox.y_min, bbox.y_max), (-33, 633));
    }

    /// Collects the points of a glyph as read back from a compiled font.
    #[derive(Default)]
    struct PointCollector {
        on_curve: Vec<(i16, i16)>,
        off_curve: Vec<(i16, i16)>,
    }

    impl ttf_parser::OutlineBuilder for PointCollector {
        fn move_to(&mut self, x: f32, y: f32) {
            self.on_curve.push((x as i16, y as i16));
        }

        fn line_to(&mut self, x: f32, y: f32) {
            self.on_curve.push((x as i16, y as i16));
        }

        fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
            self.off_curve.push((x1 as i16, y1 as i16));
            self.on_curve.push((x as i16, y as i16));
        }

        fn curve_to(&mut self, _: f32, _: f32, _: f32, _: f32, _: f32, _: f32) {
            panic!("TrueType outlines are quadratic");
        }

        fn close(&mut self) {}
    }

    fn source_points(outline: &crate::data::Outline, on_curve: bool) -> Vec<(i16, i16)> {
        let mut points: Vec<(i16, i16)> = outline
            .contours
            .iter()
            .flat_map(|x| x.points.iter())
            .filter(|x| x.on_curve == on_curve)
            .map(|x| (x.x, x.y))
            .collect();
        points.sort();
        points
    }

    #[test]
    fn test_build_icon_font_outlines_survive() {
        let dir = icon_dir(&[("circle.svg", CIRCLE), ("square.svg", SQUARE)]);
        let out = tempfile::tempdir().unwrap();
        let out = outputs(&out);
        let ctx = Context::new(Optimization::O2);

        let icons = build_icon_font(dir.path(), &out.font, &out.table, "icons", &ctx).unwrap();
        let data = std::fs::read(&out.font).unwrap();
        let face = ttf_parser::Face::parse(&data, 0).unwrap();

        // square: every point is on the curve
        let mut square = PointCollector::default();
        face.outline_glyph(ttf_parser::GlyphId(2), &mut square).unwrap();
        square.on_curve.sort();
        square.on_curve.dedup();
        assert!(square.off_curve.is_empty());
        assert_eq!(square.on_curve, source_points(&icons.source.glyphs[2].outline, true));

        // circle: the control points are stored verbatim
        let mut circle = PointCollector::default();
        face.outline_glyph(ttf_parser::GlyphId(1), &mut circle).unwrap();
        circle.off_curve.sort();
        let expected = source_points(&icons.source.glyphs[1].outline, false);
        assert!(!expected.is_empty());
        assert_eq!(circle.off_curve, expected);
    }

    #[test]
    fn test_build_rejects_outline_beyond_font_units() {
        let wide = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 1 1"><path d="M0 0H100V1H0Z"/></svg>"#;
        let dir = icon_dir(&[("wide.svg", wide)]);

        match build(dir.path(), "icons", &Context::default()) {
            Err(Error::Svg {
                path,
                source: outline::ImportError::OutOfRange { .. },
            }) => assert_eq!(path, dir.path().join("wide.svg")),
            x => panic!("unexpected result {:?}", x.map(|_| ())),
        }
    }

    #[test]
    fn test_build_icon_font_is_deterministic() {
        let dir = icon_dir(&[("a.svg", SQUARE), ("b.svg", CIRCLE)]);
        let out = tempfile::tempdir().unwrap();
        let out = outputs(&out);
        let ctx = Context::new(Optimization::O2);

        build_icon_font(dir.path(), &out.font, &out.table, "icons", &ctx).unwrap();
        let first = std::fs::read(&out.font).unwrap();

        build_icon_font(dir.path(), &out.font, &out.table, "icons", &ctx).unwrap();
        let second = std::fs::read(&out.font).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_build_icon_font_malformed_svg_keeps_outputs() {
        let dir = icon_dir(&[("good.svg", SQUARE), ("broken.svg", "<svg")]);
        let out = tempfile::tempdir().unwrap();
        let out = outputs(&out);
        std::fs::write(&out.font, b"previous font").unwrap();
        std::fs::write(&out.table, b"previous table").unwrap();

        match build_icon_font(dir.path(), &out.font, &out.table, "icons", &Context::default()) {
            Err(Error::Svg { path, .. }) => assert_eq!(path, dir.path().join("broken.svg")),
            x => panic!("unexpected result {:?}", x.map(|_| ())),
        }

        assert_eq!(std::fs::read(&out.font).unwrap(), b"previous font");
        assert_eq!(std::fs::read(&out.table).unwrap(), b"previous table");
    }

    #[test]
    fn test_build_icon_font_empty_directory() {
        let dir = icon_dir(&[]);
        let out = tempfile::tempdir().unwrap();
        let out = outputs(&out);

        let icons =
            build_icon_font(dir.path(), &out.font, &out.table, "icons", &Context::default())
                .unwrap();
        assert!(icons.symbols.symbols.is_empty());

        let table = std::fs::read_to_string(&out.table).unwrap();
        assert_eq!(table.lines().count(), 1);

        let data = std::fs::read(&out.font).unwrap();
        let face = ttf_parser::Face::parse(&data, 0).unwrap();
        assert_eq!(face.number_of_glyphs(), 1);
    }
}

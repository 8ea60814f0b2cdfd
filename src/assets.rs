//! The conventional asset layout and the combined regeneration of all assets.

use crate::ctx::Context;
use crate::error::Error;
use crate::icons;
use crate::pixels;
use std::path::{Path, PathBuf};

/// The name under which the icon font is registered by the application.
pub const ICON_FONT_NAME: &str = "icons";

/// The locations of the asset sources and the generated artifacts.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct AssetPaths {
    /// The PNG sprite sheet.
    pub sprite_sheet: PathBuf,
    /// The raw RGBA8 buffer exported from the sprite sheet.
    pub pixel_buffer: PathBuf,
    /// The directory of SVG icons.
    pub icons_dir: PathBuf,
    /// The compiled icon font.
    pub font: PathBuf,
    /// The generated symbol table.
    pub symbol_table: PathBuf,
    /// The name of the icon font.
    pub font_name: String,
}

impl AssetPaths {
    /// Returns the conventional layout inside the asset directory `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        AssetPaths {
            sprite_sheet: dir.join("spaces.png"),
            pixel_buffer: dir.join("spaces.rgba"),
            icons_dir: dir.join("icons"),
            font: dir.join("icons.ttf"),
            symbol_table: dir.join("icons.rs"),
            font_name: ICON_FONT_NAME.to_string(),
        }
    }
}

/// Exports the pixel buffer, then builds the icon font.
///
/// The first failure aborts; the icon font is not built if the pixel export fails.
pub fn regenerate(paths: &AssetPaths, ctx: &Context) -> Result<(), Error> {
    pixels::export(&paths.sprite_sheet, &paths.pixel_buffer)?;
    icons::build_icon_font(
        &paths.icons_dir,
        &paths.font,
        &paths.symbol_table,
        &paths.font_name,
        ctx,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    const SQUARE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24"><path d="M4 4H20V20H4Z"/></svg>"#;

    #[test]
    fn test_in_dir() {
        let paths = AssetPaths::in_dir(Path::new("assets"));
        assert_eq!(paths.sprite_sheet, Path::new("assets/spaces.png"));
        assert_eq!(paths.pixel_buffer, Path::new("assets/spaces.rgba"));
        assert_eq!(paths.icons_dir, Path::new("assets/icons"));
        assert_eq!(paths.font, Path::new("assets/icons.ttf"));
        assert_eq!(paths.symbol_table, Path::new("assets/icons.rs"));
        assert_eq!(paths.font_name, "icons");
    }

    #[test]
    fn test_regenerate() {
        let dir = tempfile::tempdir().unwrap();
        let paths = AssetPaths::in_dir(dir.path());

        RgbImage::from_pixel(3, 2, Rgb([10, 20, 30]))
            .save(&paths.sprite_sheet)
            .unwrap();
        std::fs::create_dir(&paths.icons_dir).unwrap();
        std::fs::write(paths.icons_dir.join("my-icon.svg"), SQUARE).unwrap();

        regenerate(&paths, &Context::default()).unwrap();

        let pixels = std::fs::read(&paths.pixel_buffer).unwrap();
        assert_eq!(pixels.len(), 3 * 2 * 4);
        assert_eq!(&pixels[..4], &[10, 20, 30, 255]);

        let table = std::fs::read_to_string(&paths.symbol_table).unwrap();
        assert!(table.contains("pub const MY_ICON: char = '\\u{E000}';"));
        assert!(paths.font.exists());
    }

    #[test]
    fn test_regenerate_stops_at_missing_sprite_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let paths = AssetPaths::in_dir(dir.path());
        std::fs::create_dir(&paths.icons_dir).unwrap();
        std::fs::write(paths.icons_dir.join("play.svg"), SQUARE).unwrap();

        match regenerate(&paths, &Context::default()) {
            Err(Error::Io { path, .. }) => assert_eq!(path, paths.sprite_sheet),
            x => panic!("unexpected result {:?}", x),
        }

        assert!(!paths.font.exists());
        assert!(!paths.symbol_table.exists());
    }
}

//! Errors that abort an asset build.

use crate::outline::ImportError;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// An error that may occur while regenerating assets.
///
/// Every variant names the file that caused the failure.
#[derive(Debug)]
pub enum Error {
    /// A file or directory could not be read or written.
    Io {
        /// The path of the file or directory.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },
    /// An image could not be decoded.
    Image {
        /// The path of the image.
        path: PathBuf,
        /// The underlying error.
        source: image::ImageError,
    },
    /// The outline of an SVG icon could not be imported.
    Svg {
        /// The path of the icon.
        path: PathBuf,
        /// The underlying error.
        source: ImportError,
    },
    /// An icon file name does not result in a valid constant name.
    InvalidSymbol {
        /// The file name of the icon.
        file_name: String,
        /// The derived symbol name.
        symbol: String,
    },
    /// Two icon file names result in the same constant name.
    DuplicateSymbol {
        /// The derived symbol name.
        symbol: String,
        /// The file name that claimed the symbol first.
        first: String,
        /// The file name that claimed the symbol second.
        second: String,
    },
    /// There are more icons than private-use code points after the base code point.
    CodePointsExhausted {
        /// The number of icons.
        count: usize,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, .. } => write!(f, "Can not access {}.", path.display()),
            Self::Image { path, .. } => write!(f, "Can not decode image {}.", path.display()),
            Self::Svg { path, .. } => write!(f, "Can not import outlines of {}.", path.display()),
            Self::InvalidSymbol { file_name, symbol } => write!(
                f,
                "The icon {} results in the invalid constant name {}.",
                file_name, symbol
            ),
            Self::DuplicateSymbol {
                symbol,
                first,
                second,
            } => write!(
                f,
                "The icons {} and {} both result in the constant name {}.",
                first, second, symbol
            ),
            Self::CodePointsExhausted { count } => write!(
                f,
                "{} icons do not fit into the private use area.",
                count
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Image { source, .. } => Some(source),
            Self::Svg { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_io_error_exposes_source() {
        let err = Error::io(
            "assets/spaces.png",
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.to_string(), "Can not access assets/spaces.png.");
        assert_eq!(err.source().unwrap().to_string(), "gone");
    }

    #[test]
    fn test_duplicate_symbol_message() {
        let err = Error::DuplicateSymbol {
            symbol: "A_B".to_string(),
            first: "a-b.svg".to_string(),
            second: "a_b.svg".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "The icons a-b.svg and a_b.svg both result in the constant name A_B."
        );
        assert!(err.source().is_none());
    }

    #[test]
    fn test_svg_error_exposes_import_error() {
        let err = Error::Svg {
            path: "assets/icons/wide.svg".into(),
            source: ImportError::OutOfRange {
                x: 100_000.0,
                y: 800.0,
            },
        };
        assert_eq!(
            err.to_string(),
            "Can not import outlines of assets/icons/wide.svg."
        );
        assert_eq!(
            err.source().unwrap().to_string(),
            "the point (100000, 800) exceeds the font unit range -32768..=32767"
        );
    }
}

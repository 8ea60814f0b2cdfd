//! # Iconforge
//!
//! *Iconforge* regenerates the binary assets of an application from their sources.
//!
//! Two independent pipelines are provided:
//!
//! - The [pixel exporter](crate::pixels) decodes a PNG sprite sheet and writes its pixels as a raw RGBA8 buffer.
//! - The [icon font builder](crate::icons) turns a directory of SVG icons into a TrueType font and a Rust source table naming the private-use code point of every icon.
//!
//! The font is compiled by a small TrueType compiler living in [`sfnt`](crate::sfnt).
//! It writes exactly the tables an icon font needs and nothing more.
//!
//! [`assets::regenerate`] runs both pipelines against the conventional asset layout.

#![deny(missing_docs, missing_debug_implementations)]

pub mod assets;
pub mod ctx;
pub mod data;
pub mod error;
pub mod icons;
pub mod outline;
pub mod pixels;
pub mod sfnt;
pub mod symbols;
mod util;

pub use error::Error;

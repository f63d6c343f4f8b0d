//! ofrip, a data and graphics extractor for the Final Fantasy NES ROM.
//!
//! The ROM holds the game's monsters, battles, items, spells and maps as
//! fixed-offset, bit-packed tables, and its graphics as planar tiles drawn
//! through indexed palettes. This crate decodes all of it into plain Rust
//! values, and writes those out as tab-separated tables, BMP images and flat
//! map files for editing tools to consume.
//!
//! The pieces, roughly in dependency order:
//! - [`rom`]: random access to the image, and the table layout.
//! - [`text`] and [`palette`]: the auxiliary text tables and master palette.
//! - [`data`]: monsters, battles, weapons, armor and spells.
//! - [`gfx`]: tile decoding, sprite and map tile compositing, BMP files.
//! - [`map`]: map layouts and tileset deduplication.
//! - [`export`]: writing all of the above to disk.
//! - [`script`]: event script expressions.
//!
//! [`rom`]: rom/index.html
//! [`text`]: text/index.html
//! [`palette`]: palette/index.html
//! [`data`]: data/index.html
//! [`gfx`]: gfx/index.html
//! [`map`]: map/index.html
//! [`export`]: export/index.html
//! [`script`]: script/index.html

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod gfx;
pub mod int;
pub mod map;
pub mod palette;
pub mod rom;
pub mod script;
pub mod text;

pub use error::RipError;

/// The result of any fallible step of an export.
pub type Result<T> = std::result::Result<T, RipError>;

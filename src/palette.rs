//! The NES master palette.
//!
//! Every color the game draws is an index into a fixed table of 64 colors.
//! The table is not in the ROM; it is loaded from a 192-byte auxiliary file of
//! raw triplets, in the reverse of the blue-green-red order that bitmap pixels
//! use: byte 0 of a stored triplet is the red channel and byte 2 the blue
//! channel. The bitmap writer swaps them back on the way out.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::RipError;
use crate::rom::layout::NES_PALETTE_ENTRIES;
use crate::Result;

/// A 24-bit color.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Rgb {
  /// The red channel.
  pub r: u8,
  /// The green channel.
  pub g: u8,
  /// The blue channel.
  pub b: u8,
}

impl Rgb {
  /// Pure black, used for unassigned palette slots.
  pub const BLACK: Rgb = Rgb::new(0, 0, 0);

  /// Creates a new color.
  pub const fn new(r: u8, g: u8, b: u8) -> Self {
    Self { r, g, b }
  }
}

/// The 64-entry master palette.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct NesPalette {
  colors: [Rgb; NES_PALETTE_ENTRIES],
}

impl NesPalette {
  /// The size of a palette file.
  pub const FILE_LEN: usize = NES_PALETTE_ENTRIES * 3;

  /// Builds a palette out of the raw contents of a palette file.
  ///
  /// Returns `None` if `bytes` holds fewer than 64 triplets; anything after
  /// them is ignored.
  pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
    if bytes.len() < Self::FILE_LEN {
      return None;
    }

    let mut colors = [Rgb::BLACK; NES_PALETTE_ENTRIES];
    for (color, raw) in colors.iter_mut().zip(bytes.chunks_exact(3)) {
      *color = Rgb::new(raw[0], raw[1], raw[2]);
    }
    Some(Self { colors })
  }

  /// Loads a palette file from `path`.
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| RipError::open(path, e))?;
    Self::from_bytes(&bytes).ok_or_else(|| {
      RipError::open(
        path,
        io::Error::new(
          io::ErrorKind::UnexpectedEof,
          format!("expected {} bytes, got {}", Self::FILE_LEN, bytes.len()),
        ),
      )
    })
  }

  /// Looks up a color by its master-palette index.
  ///
  /// Like the hardware, this ignores the top two bits of `index`.
  pub fn get(&self, index: u8) -> Rgb {
    self.colors[(index & 0x3f) as usize]
  }

  /// Resolves a row of master-palette indices into colors.
  pub fn resolve<const N: usize>(&self, row: [u8; N]) -> [Rgb; N] {
    let mut colors = [Rgb::BLACK; N];
    for (color, &index) in colors.iter_mut().zip(row.iter()) {
      *color = self.get(index);
    }
    colors
  }

  /// Returns all 64 colors.
  pub fn colors(&self) -> &[Rgb] {
    &self.colors
  }
}

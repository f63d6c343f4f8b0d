//! Pixel images, and the planar tile format they are assembled from.
//!
//! The console stores graphics as 8x8 tiles at two bits per pixel. A tile is
//! 16 bytes: eight bytes of low bitplane, one per row, followed by eight bytes
//! of high bitplane. Within a row byte, bit 7 is the leftmost pixel.
//!
//! Every composite image in this crate, from a 32x32 monster to a 256x128
//! tileset sheet, is an [`Image`] built by resolving such tiles through a
//! four-color palette and drawing them at tile-aligned positions.
//!
//! [`Image`]: struct.Image.html

use crate::palette::Rgb;
use crate::rom::layout::TILE_SIZE;

pub mod battle;
pub mod bmp;
pub mod map;

/// The width and height of a tile, in pixels.
pub const TILE_DIM: usize = 8;

/// A raw two-bitplane tile.
pub type Tile = [u8; TILE_SIZE];

/// Decodes one row of a tile into eight two-bit color indices, left to
/// right.
///
/// ```
/// # use ofrip::gfx::decode_row;
/// assert_eq!(decode_row(0b0000_0001, 0), [0, 0, 0, 0, 0, 0, 0, 1]);
/// assert_eq!(decode_row(0b1000_0000, 0b1100_0000), [3, 2, 0, 0, 0, 0, 0, 0]);
/// ```
pub fn decode_row(low: u8, high: u8) -> [u8; TILE_DIM] {
  let (mut low, mut high) = (low, high);
  let mut row = [0; TILE_DIM];
  for px in row.iter_mut().rev() {
    *px = (low & 1) | (high & 1) << 1;
    low >>= 1;
    high >>= 1;
  }
  row
}

/// Decodes a whole tile into an 8x8 grid of color indices, top to bottom.
pub fn decode_tile(tile: &[u8]) -> [[u8; TILE_DIM]; TILE_DIM] {
  let mut out = [[0; TILE_DIM]; TILE_DIM];
  for (y, row) in out.iter_mut().enumerate() {
    *row = decode_row(tile[y], tile[y + TILE_DIM]);
  }
  out
}

/// A rectangular RGB image, stored top row first.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Image {
  width: usize,
  height: usize,
  pixels: Vec<Rgb>,
}

impl Image {
  /// Creates a black image.
  pub fn new(width: usize, height: usize) -> Self {
    Self {
      width,
      height,
      pixels: vec![Rgb::BLACK; width * height],
    }
  }

  /// Creates an image out of `width * height` pixels, top row first.
  ///
  /// Returns `None` if `pixels` is the wrong size.
  pub fn from_pixels(
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
  ) -> Option<Self> {
    if pixels.len() != width * height {
      return None;
    }
    Some(Self {
      width,
      height,
      pixels,
    })
  }

  /// Returns the width, in pixels.
  pub fn width(&self) -> usize {
    self.width
  }

  /// Returns the height, in pixels.
  pub fn height(&self) -> usize {
    self.height
  }

  /// Returns the pixels, top row first.
  pub fn pixels(&self) -> &[Rgb] {
    &self.pixels
  }

  /// Returns the pixel at `(x, y)`.
  ///
  /// Panics if the coordinates are out of bounds.
  pub fn get(&self, x: usize, y: usize) -> Rgb {
    assert!(x < self.width && y < self.height);
    self.pixels[y * self.width + x]
  }

  /// Sets the pixel at `(x, y)`.
  ///
  /// Panics if the coordinates are out of bounds.
  pub fn set(&mut self, x: usize, y: usize, color: Rgb) {
    assert!(x < self.width && y < self.height);
    self.pixels[y * self.width + x] = color;
  }

  /// Returns row `y`.
  pub fn row(&self, y: usize) -> &[Rgb] {
    &self.pixels[y * self.width..(y + 1) * self.width]
  }

  /// Draws a raw tile with its top-left corner at pixel `(x, y)`, resolving
  /// its color indices through `palette`.
  pub fn draw_tile(
    &mut self,
    x: usize,
    y: usize,
    tile: &[u8],
    palette: &[Rgb; 4],
  ) {
    for (dy, row) in decode_tile(tile).iter().enumerate() {
      for (dx, &index) in row.iter().enumerate() {
        self.set(x + dx, y + dy, palette[index as usize]);
      }
    }
  }

  /// Copies all of `src` into this image with its top-left corner at pixel
  /// `(x, y)`.
  pub fn blit(&mut self, x: usize, y: usize, src: &Image) {
    for sy in 0..src.height {
      let start = (y + sy) * self.width + x;
      self.pixels[start..start + src.width].copy_from_slice(src.row(sy));
    }
  }
}

#[cfg(test)]
mod test {
  use super::*;

  const PALETTE: [Rgb; 4] = [
    Rgb::new(0, 0, 0),
    Rgb::new(1, 1, 1),
    Rgb::new(2, 2, 2),
    Rgb::new(3, 3, 3),
  ];

  #[test]
  fn low_bit_is_rightmost_pixel() {
    let row = decode_row(0b0000_0001, 0b0000_0000);
    assert_eq!(row[7], 1);
    assert!(row[..7].iter().all(|&p| p == 0));
  }

  #[test]
  fn high_plane_is_high_bit() {
    assert_eq!(decode_row(0x00, 0xff), [2; 8]);
    assert_eq!(decode_row(0xff, 0xff), [3; 8]);
    assert_eq!(decode_row(0xaa, 0x0f), [1, 0, 1, 0, 3, 2, 3, 2]);
  }

  #[test]
  fn draw_tile_uses_both_planes() {
    let mut tile = [0u8; TILE_SIZE];
    tile[0] = 0x80;
    tile[8 + 7] = 0x01;
    let mut image = Image::new(16, 16);
    image.draw_tile(8, 8, &tile, &PALETTE);
    assert_eq!(image.get(8, 8), PALETTE[1]);
    assert_eq!(image.get(15, 15), PALETTE[2]);
    assert_eq!(image.get(9, 8), PALETTE[0]);
    assert_eq!(image.get(0, 0), Rgb::BLACK);
  }

  #[test]
  fn blit_places_rows() {
    let mut small = Image::new(2, 2);
    small.set(1, 1, PALETTE[3]);
    let mut big = Image::new(4, 4);
    big.blit(2, 1, &small);
    assert_eq!(big.get(3, 2), PALETTE[3]);
    assert_eq!(big.pixels().iter().filter(|&&p| p != Rgb::BLACK).count(), 1);
  }

  #[test]
  fn from_pixels_checks_size() {
    assert!(Image::from_pixels(2, 2, vec![Rgb::BLACK; 3]).is_none());
    assert!(Image::from_pixels(2, 2, vec![Rgb::BLACK; 4]).is_some());
  }
}

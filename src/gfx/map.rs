//! Map graphics: 16x16 map tiles and whole tileset sheets.
//!
//! A map tile is a 2x2 block of 8x8 ROM tiles. Each of the eight map tilesets
//! has 128 map tiles, described by a four-entry pattern of ROM tile indices
//! and a byte assigning one of four palette slots to each quarter. The
//! palette itself comes from the map being drawn: a 16-entry palette row,
//! split into four slots of four colors.

use std::io::Read;
use std::io::Seek;

use crate::gfx::Image;
use crate::gfx::TILE_DIM;
use crate::int::pairs_lsb_first;
use crate::palette::NesPalette;
use crate::palette::Rgb;
use crate::rom::layout::*;
use crate::rom::Rom;
use crate::Result;

/// The width and height of a map tile, in pixels.
pub const MAP_TILE_DIM: usize = 2 * TILE_DIM;
/// The number of map tiles in each row of a tileset sheet.
pub const SHEET_COLUMNS: usize = 16;

const BLANK_TILE: [u8; TILE_SIZE] = [0; TILE_SIZE];

/// The four ROM tiles making up one map tile: upper-left, upper-right,
/// lower-left, lower-right.
pub type Pattern = [u8; MAP_TILESET_PATTERN_SIZE];

/// Reorders the pattern tables as stored into one [`Pattern`] per map tile.
///
/// Each tileset's table stores all 128 upper-left indices, then all 128
/// upper-right ones, and so on.
///
/// [`Pattern`]: type.Pattern.html
pub fn transpose_patterns(raw: &[u8]) -> Vec<Vec<Pattern>> {
  let per_set = MAP_TILESET_PATTERN_ENTRIES * MAP_TILESET_PATTERN_SIZE;
  raw
    .chunks_exact(per_set)
    .map(|set| {
      (0..MAP_TILESET_PATTERN_ENTRIES)
        .map(|j| {
          let mut pattern = [0; MAP_TILESET_PATTERN_SIZE];
          for (k, p) in pattern.iter_mut().enumerate() {
            *p = set[j + k * MAP_TILESET_PATTERN_ENTRIES];
          }
          pattern
        })
        .collect()
    })
    .collect()
}

/// Unpacks a palette assignment byte into the slot used by each quarter of a
/// map tile, in [`Pattern`] order.
///
/// The two-bit fields are read least significant first: bits 0-1 give the
/// upper-left quarter, bits 6-7 the lower-right.
///
/// ```
/// # use ofrip::gfx::map::slot_assignments;
/// assert_eq!(slot_assignments(0b01_00_00_10), [2, 0, 0, 1]);
/// ```
///
/// [`Pattern`]: type.Pattern.html
pub fn slot_assignments(byte: u8) -> [u8; 4] {
  pairs_lsb_first(byte)
}

/// The map graphics bank.
#[derive(Clone, Debug)]
pub struct MapGraphics {
  palettes: Vec<[u8; MAP_PALETTE_SIZE]>,
  tiles: Vec<u8>,
  assignments: Vec<u8>,
  patterns: Vec<Vec<Pattern>>,
}

impl MapGraphics {
  /// Reads the palettes, tilesets, palette assignments and patterns out of
  /// the ROM.
  pub fn load<R: Read + Seek>(rom: &mut Rom<R>) -> Result<Self> {
    let raw_palettes =
      rom.bytes_at(MAP_PALETTE_OFFSET, MAP_PALETTE_ENTRIES * MAP_PALETTE_SIZE)?;
    let tiles = rom.bytes_at(
      MAP_TILESET_OFFSET,
      MAP_TILESET_ENTRIES * MAP_TILESET_TILE_ENTRIES * TILE_SIZE,
    )?;
    let assignments = rom.bytes_at(
      MAP_TILESET_PALETTE_ASSIGNMENT_OFFSET,
      MAP_TILESET_ENTRIES * MAP_TILESET_PATTERN_ENTRIES,
    )?;
    let raw_patterns = rom.bytes_at(
      MAP_TILESET_PATTERN_OFFSET,
      MAP_TILESET_ENTRIES
        * MAP_TILESET_PATTERN_ENTRIES
        * MAP_TILESET_PATTERN_SIZE,
    )?;

    let palettes = raw_palettes
      .chunks_exact(MAP_PALETTE_SIZE)
      .map(|row| {
        let mut p = [0; MAP_PALETTE_SIZE];
        p.copy_from_slice(row);
        p
      })
      .collect();

    Ok(Self::from_parts(
      palettes,
      tiles,
      assignments,
      transpose_patterns(&raw_patterns),
    ))
  }

  /// Builds a bank out of already-read parts. `patterns` must already be in
  /// per-tile order.
  pub fn from_parts(
    palettes: Vec<[u8; MAP_PALETTE_SIZE]>,
    tiles: Vec<u8>,
    assignments: Vec<u8>,
    patterns: Vec<Vec<Pattern>>,
  ) -> Self {
    Self {
      palettes,
      tiles,
      assignments,
      patterns,
    }
  }

  /// Returns palette row `index`, or `None` if there is no such row.
  pub fn palette_row(&self, index: usize) -> Option<&[u8; MAP_PALETTE_SIZE]> {
    self.palettes.get(index)
  }

  /// Returns all palette rows.
  pub fn palette_rows(&self) -> &[[u8; MAP_PALETTE_SIZE]] {
    &self.palettes
  }

  /// Returns the pattern of map tile `tile` in `tileset`.
  pub fn pattern(&self, tileset: usize, tile: usize) -> Pattern {
    self
      .patterns
      .get(tileset)
      .and_then(|set| set.get(tile))
      .copied()
      .unwrap_or_default()
  }

  /// Returns ROM tile `index` of `tileset`, or a blank tile past the end of
  /// the bank.
  pub fn rom_tile(&self, tileset: usize, index: usize) -> &[u8] {
    let start = (tileset * MAP_TILESET_TILE_ENTRIES + index) * TILE_SIZE;
    self
      .tiles
      .get(start..start + TILE_SIZE)
      .unwrap_or(&BLANK_TILE)
  }

  fn slot_colors(&self, nes: &NesPalette, row: usize) -> [[Rgb; 4]; 4] {
    let mut slots = [[Rgb::BLACK; 4]; 4];
    if let Some(p) = self.palettes.get(row) {
      for (s, slot) in slots.iter_mut().enumerate() {
        let i = 4 * s;
        *slot = nes.resolve([p[i], p[i + 1], p[i + 2], p[i + 3]]);
      }
    }
    slots
  }

  /// Draws map tile `tile` of `tileset` with palette row `row`.
  pub fn tile_sprite(
    &self,
    nes: &NesPalette,
    tileset: usize,
    row: usize,
    tile: usize,
  ) -> Image {
    let slots = self.slot_colors(nes, row);
    self.draw_map_tile(&slots, tileset, tile)
  }

  fn draw_map_tile(
    &self,
    slots: &[[Rgb; 4]; 4],
    tileset: usize,
    tile: usize,
  ) -> Image {
    let assignment = self
      .assignments
      .get(tileset * MAP_TILESET_PATTERN_ENTRIES + tile)
      .copied()
      .unwrap_or(0);
    let quarters = slot_assignments(assignment);

    let mut image = Image::new(MAP_TILE_DIM, MAP_TILE_DIM);
    for (n, &index) in self.pattern(tileset, tile).iter().enumerate() {
      let src = self.rom_tile(tileset, index as usize);
      let (x, y) = ((n % 2) * TILE_DIM, (n / 2) * TILE_DIM);
      image.draw_tile(x, y, src, &slots[quarters[n] as usize]);
    }
    image
  }

  /// Draws all 128 map tiles of `tileset` with palette row `row`, in tile
  /// order.
  pub fn tile_sprites(
    &self,
    nes: &NesPalette,
    tileset: usize,
    row: usize,
  ) -> Vec<Image> {
    let slots = self.slot_colors(nes, row);
    (0..MAP_TILESET_PATTERN_ENTRIES)
      .map(|tile| self.draw_map_tile(&slots, tileset, tile))
      .collect()
  }
}

/// Lays out map tiles, in order, into a sheet sixteen tiles wide.
///
/// For a full tileset, that is 256x128 pixels.
pub fn sheet(tiles: &[Image]) -> Image {
  let rows = (tiles.len() + SHEET_COLUMNS - 1) / SHEET_COLUMNS;
  let mut image = Image::new(SHEET_COLUMNS * MAP_TILE_DIM, rows * MAP_TILE_DIM);
  for (i, tile) in tiles.iter().enumerate() {
    let (x, y) = (i % SHEET_COLUMNS, i / SHEET_COLUMNS);
    image.blit(x * MAP_TILE_DIM, y * MAP_TILE_DIM, tile);
  }
  image
}

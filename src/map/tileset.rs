//! Finding the distinct tileset sheets used across all maps.
//!
//! Each map is drawn with one tileset and two palette rows, one for outdoors
//! and one for inside rooms. Many maps share combinations, sometimes with
//! identical palettes stored at different rows; exporting each distinct
//! combination once takes two passes:
//!
//! 1. [`tileset_mappings`] gives every (map, palette) pair a representative
//!    palette row, the first row seen with the same tileset and colors.
//! 2. [`unique_tilesets`] keeps the first pair for each (tileset,
//!    representative row).
//!
//! [`tileset_mappings`]: fn.tileset_mappings.html
//! [`unique_tilesets`]: fn.unique_tilesets.html

use std::io::Read;
use std::io::Seek;

use crate::rom::layout::*;
use crate::rom::Rom;
use crate::Result;

/// A tileset drawn with a particular palette.
///
/// Two values are equal when their tileset and palette *contents* are
/// equal; `palette_index` is ignored.
#[derive(Copy, Clone, Debug)]
pub struct UniqueTileset {
  /// The map tileset.
  pub tileset: u8,
  /// A copy of the palette row.
  pub palette: [u8; MAP_PALETTE_SIZE],
  /// The representative palette row, used to draw the sheet.
  pub palette_index: usize,
}

impl PartialEq for UniqueTileset {
  fn eq(&self, other: &Self) -> bool {
    self.tileset == other.tileset && self.palette == other.palette
  }
}

impl Eq for UniqueTileset {}

/// Reads the tileset used by each map.
pub fn load_tileset_assignments<R: Read + Seek>(
  rom: &mut Rom<R>,
) -> Result<Vec<u8>> {
  rom.bytes_at(MAP_TILESET_ASSIGNMENT_OFFSET, MAP_ENTRIES)
}

/// Builds the list of (tileset, palette) pairs for every map, outdoor row
/// (`3i`) then room row (`3i + 2`), each pointing at the first palette row
/// with the same contents.
///
/// Maps whose palette rows are missing from `palettes` are skipped.
pub fn tileset_mappings(
  assignments: &[u8],
  palettes: &[[u8; MAP_PALETTE_SIZE]],
) -> Vec<UniqueTileset> {
  let mut mappings: Vec<UniqueTileset> =
    Vec::with_capacity(2 * assignments.len());
  for (i, &tileset) in assignments.iter().enumerate() {
    for &row in &[3 * i, 3 * i + 2] {
      let palette = match palettes.get(row) {
        Some(&p) => p,
        None => continue,
      };
      let mut curr = UniqueTileset {
        tileset,
        palette,
        palette_index: row,
      };
      if let Some(seen) = mappings.iter().find(|m| **m == curr) {
        curr.palette_index = seen.palette_index;
      }
      mappings.push(curr);
    }
  }
  mappings
}

/// Keeps the first of each (tileset, representative row) pair, in order.
pub fn unique_tilesets(mappings: &[UniqueTileset]) -> Vec<UniqueTileset> {
  let mut uniques: Vec<UniqueTileset> = Vec::new();
  for m in mappings {
    let seen = uniques
      .iter()
      .any(|u| u.tileset == m.tileset && u.palette_index == m.palette_index);
    if !seen {
      uniques.push(*m);
    }
  }
  uniques
}

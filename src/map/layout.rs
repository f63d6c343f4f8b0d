//! Run-length encoded map layouts.
//!
//! Each map's tiles are stored as a stream of runs, found through a table of
//! 61 two-byte pointers relative to the start of the map bank:
//! ```text
//! 0ttttttt          one tile t
//! 1ttttttt nnnnnnnn n copies of tile t; n = 0 means 256
//! 11111111          end of map
//! ```
//! Decoded maps are written out as flat files of little-endian 32-bit tile
//! IDs, row by row.

use std::fs;
use std::io;
use std::io::Read;
use std::io::Seek;
use std::path::Path;

use crate::error::RipError;
use crate::rom::layout::*;
use crate::rom::Rom;
use crate::Result;

/// The byte that ends a map.
pub const TERMINATOR: u8 = 0xff;

fn next_byte(r: &mut impl Read) -> io::Result<u8> {
  let mut b = [0];
  r.read_exact(&mut b)?;
  Ok(b[0])
}

/// Decodes one map's run stream, up to and excluding its terminator.
///
/// ```
/// # use ofrip::map::layout::decode;
/// let tiles = decode(&[0x05, 0x85, 0x03, 0xff][..]).unwrap();
/// assert_eq!(tiles, vec![5, 5, 5, 5]);
/// ```
pub fn decode(mut r: impl Read) -> io::Result<Vec<u8>> {
  let mut tiles = Vec::with_capacity(MAP_WIDTH * MAP_HEIGHT);
  loop {
    let b = next_byte(&mut r)?;
    if b == TERMINATOR {
      return Ok(tiles);
    }

    let (tile, run) = if b & 0x80 != 0 {
      match next_byte(&mut r)? {
        0 => (b & 0x7f, 256),
        n => (b & 0x7f, n as usize),
      }
    } else {
      (b, 1)
    };
    tiles.extend(std::iter::repeat(tile).take(run));
  }
}

/// Reads the map pointer table.
pub fn load_pointers<R: Read + Seek>(rom: &mut Rom<R>) -> Result<Vec<u16>> {
  rom.u16_table(MAP_OFFSET, MAP_ENTRIES)
}

/// Decodes the map whose pointer is `pointer`.
pub fn load_layout<R: Read + Seek>(
  rom: &mut Rom<R>,
  pointer: u16,
) -> Result<Vec<u8>> {
  let offset = MAP_OFFSET + pointer as u64;
  let reader = rom.reader_at(offset)?;
  decode(reader).map_err(|e| RipError::read(offset, 0, e))
}

/// Decodes every map, in ROM order.
pub fn load_layouts<R: Read + Seek>(rom: &mut Rom<R>) -> Result<Vec<Vec<u8>>> {
  load_pointers(rom)?
    .into_iter()
    .map(|p| load_layout(rom, p))
    .collect()
}

/// Encodes decoded tiles as a map file.
pub fn encode_map_file(tiles: &[u8]) -> Vec<u8> {
  tiles
    .iter()
    .flat_map(|&t| (t as i32).to_le_bytes().to_vec())
    .collect()
}

/// Writes decoded tiles to a map file at `path`.
pub fn write_map_file(path: impl AsRef<Path>, tiles: &[u8]) -> Result<()> {
  let path = path.as_ref();
  fs::write(path, encode_map_file(tiles)).map_err(|e| RipError::create(path, e))
}

//! Battle formations.
//!
//! Each of the 128 formations is a packed 16-byte record:
//! ```text
//! 0      formation (high nibble), battle tileset (low nibble)
//! 1      graphic selector for each slot, two bits each, bit-reversed
//! 2..6   monster table index for each slot
//! 6..10  (min, max) quantity for each slot, as nibbles
//! 10..12 the two battle palettes
//! 12     surprise chance
//! 13     palette select for each slot (bits 7..4), cannot-run flag (bit 0)
//! 14..16 (min, max) quantity for the two alternate slots
//! ```

use std::io::Read;
use std::io::Seek;

use crate::int::bit;
use crate::int::nibbles;
use crate::int::pairs_reversed;
use crate::rom::layout::*;
use crate::rom::Rom;
use crate::Result;

/// The kind of a formation, which governs how many enemies it holds and how
/// large they are.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Formation {
  /// Up to nine small enemies.
  Small,
  /// Up to four large enemies.
  Large,
  /// Up to six small and two large enemies.
  Mixed,
  /// One of the four fiends.
  Fiend,
  /// The final boss.
  Chaos,
  /// A value the game never uses.
  Other(u8),
}

impl Formation {
  /// Decodes a formation nibble.
  pub fn from_nibble(n: u8) -> Self {
    match n {
      1 => Formation::Small,
      2 => Formation::Large,
      3 => Formation::Mixed,
      4 => Formation::Fiend,
      5 => Formation::Chaos,
      n => Formation::Other(n),
    }
  }

  /// Returns the value stored in the ROM for this formation.
  pub fn value(self) -> u8 {
    match self {
      Formation::Small => 1,
      Formation::Large => 2,
      Formation::Mixed => 3,
      Formation::Fiend => 4,
      Formation::Chaos => 5,
      Formation::Other(n) => n,
    }
  }
}

/// A minimum and maximum enemy count for one slot.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Quantity {
  /// The fewest enemies that may appear.
  pub min: u8,
  /// The most enemies that may appear.
  pub max: u8,
}

impl Quantity {
  /// Unpacks a quantity byte: the high nibble is the minimum and the low
  /// nibble the maximum.
  pub fn from_byte(byte: u8) -> Self {
    let (min, max) = nibbles(byte);
    Self { min, max }
  }
}

/// A battle formation.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BattleDef {
  /// The formation kind.
  pub formation: Formation,
  /// The battle tileset all of this battle's sprites are drawn from.
  pub tileset: u8,
  /// The graphic, 0 through 3, drawn for each slot.
  pub monster_pics: [u8; 4],
  /// The monster table index of each slot.
  pub monsters: [u8; 4],
  /// How many of each slot appear.
  pub quantities: [Quantity; 4],
  /// How many of slots 0 and 1 appear in the alternate formation.
  pub alt_quantities: [Quantity; 2],
  /// The two battle palettes.
  pub palettes: [u8; 2],
  /// The chance, out of 100, of a surprise attack.
  pub surprise: u8,
  /// Which of `palettes`, 0 or 1, each slot is drawn with.
  pub monster_palettes: [u8; 4],
  /// Whether the party is barred from running.
  pub no_run: bool,
}

impl BattleDef {
  /// Decodes a 16-byte battle record.
  pub fn decode(record: &[u8]) -> Self {
    let (formation, tileset) = nibbles(record[0]);

    let mut monsters = [0; 4];
    monsters.copy_from_slice(&record[2..6]);

    let mut quantities = [Quantity::default(); 4];
    for (q, &b) in quantities.iter_mut().zip(&record[6..10]) {
      *q = Quantity::from_byte(b);
    }

    let flags = record[13] as u32;
    let mut monster_palettes = [0; 4];
    for (slot, p) in monster_palettes.iter_mut().enumerate() {
      *p = bit(flags, 7 - slot as u32) as u8;
    }

    Self {
      formation: Formation::from_nibble(formation),
      tileset,
      monster_pics: pairs_reversed(record[1]),
      monsters,
      quantities,
      alt_quantities: [
        Quantity::from_byte(record[14]),
        Quantity::from_byte(record[15]),
      ],
      palettes: [record[10], record[11]],
      surprise: record[12],
      monster_palettes,
      no_run: bit(flags, 0),
    }
  }

  /// Returns the first slot holding `monster`, if any.
  pub fn slot_of(&self, monster: usize) -> Option<usize> {
    self.monsters.iter().position(|&m| m as usize == monster)
  }
}

/// Loads the whole battle table.
pub fn load_battles<R: Read + Seek>(
  rom: &mut Rom<R>,
) -> Result<Vec<BattleDef>> {
  let data = rom.bytes_at(BATTLE_OFFSET, BATTLE_ENTRIES * BATTLE_SIZE)?;
  Ok(data.chunks_exact(BATTLE_SIZE).map(BattleDef::decode).collect())
}

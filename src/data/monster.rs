//! The monster table.

use std::io::Read;
use std::io::Seek;

use crate::int::bit;
use crate::int::le_u16;
use crate::rom::layout::*;
use crate::rom::Rom;
use crate::text::TextTables;
use crate::Result;

/// The damage modifier for an element a monster resists.
pub const RESIST: i32 = 50;
/// The damage modifier for an element a monster is weak to.
pub const WEAK: i32 = -50;

/// Builds the per-element damage modifiers out of a resistance mask and a
/// weakness mask.
///
/// If an element appears in both masks, resistance wins.
///
/// ```
/// # use ofrip::data::{element_modifiers, RESIST, WEAK};
/// let mods = element_modifiers(0b0000_0100, 0b0000_0110);
/// assert_eq!(mods[1], WEAK);
/// assert_eq!(mods[2], RESIST);
/// assert_eq!(mods[3], 0);
/// ```
pub fn element_modifiers(resist: u8, weak: u8) -> [i32; NUM_ELEMENTS] {
  let mut mods = [0; NUM_ELEMENTS];
  for (i, m) in mods.iter_mut().enumerate() {
    *m = if bit(resist as u32, i as u32) {
      RESIST
    } else if bit(weak as u32, i as u32) {
      WEAK
    } else {
      0
    };
  }
  mods
}

/// A "species" of monster.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Monster {
  /// The decoded name.
  pub name: String,
  /// Experience awarded for a kill.
  pub exp: u16,
  /// Gold awarded for a kill.
  pub gold: u16,
  /// Maximum hit points.
  pub hp: u16,
  /// The chance the monster will run.
  pub morale: u8,
  /// The AI script index.
  pub ai_script: u8,
  /// Evasion.
  pub agility: u8,
  /// Physical defense.
  pub defense: u8,
  /// Magic defense. The table doesn't store this, so it's always zero.
  pub magic_defense: u8,
  /// Number of hits per attack.
  pub hits: u8,
  /// Hit rate.
  pub accuracy: u8,
  /// Attack power.
  pub power: u8,
  /// Critical hit rate.
  pub critical: u8,
  /// Elements of the physical attack, as a mask.
  pub hit_element: u8,
  /// Status effects of the physical attack, as a mask.
  pub hit_status: u8,
  /// Categories this monster belongs to, as a mask.
  pub category: u8,
  /// Determines who goes first in battle.
  pub initiative: u8,
  /// Elements the monster is weak to, as a mask.
  pub element_weak: u8,
  /// Elements the monster resists, as a mask.
  pub element_resist: u8,
  /// Per-element damage modifiers; see [`element_modifiers`].
  ///
  /// [`element_modifiers`]: fn.element_modifiers.html
  pub element_mods: [i32; NUM_ELEMENTS],
}

impl Monster {
  /// Decodes a 20-byte monster record.
  ///
  /// Panics if `record` is shorter than `MONSTER_SIZE`.
  pub fn decode(record: &[u8], name: String) -> Self {
    let element_weak = record[18];
    let element_resist = record[19];
    Self {
      name,
      exp: le_u16(&record[0..]),
      gold: le_u16(&record[2..]),
      hp: le_u16(&record[4..]),
      morale: record[6],
      ai_script: record[7],
      agility: record[8],
      defense: record[9],
      hits: record[10],
      accuracy: record[11],
      power: record[12],
      critical: record[13],
      hit_element: record[14],
      hit_status: record[15],
      category: record[16],
      initiative: record[17],
      magic_defense: 0,
      element_weak,
      element_resist,
      element_mods: element_modifiers(element_resist, element_weak),
    }
  }
}

/// Loads the whole monster table.
pub fn load_monsters<R: Read + Seek>(
  rom: &mut Rom<R>,
  text: &TextTables,
) -> Result<Vec<Monster>> {
  let data = rom.bytes_at(MONSTER_OFFSET, MONSTER_ENTRIES * MONSTER_SIZE)?;
  let names = rom.u16_table(MONSTER_TEXT_PTR_TABLE_OFFSET, MONSTER_ENTRIES)?;

  data
    .chunks_exact(MONSTER_SIZE)
    .zip(names)
    .map(|(record, ptr)| {
      let name = rom.string_at(MONSTER_TEXT_BASE + ptr as u64, text)?;
      Ok(Monster::decode(record, name))
    })
    .collect()
}

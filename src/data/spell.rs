//! Spells, and the enemy abilities that share their record format.

use std::io::Read;
use std::io::Seek;

use crate::rom::layout::*;
use crate::rom::Rom;
use crate::text::TextTables;
use crate::Result;

/// Whether a [`Spell`] can be learned by the party or only used by enemies.
///
/// [`Spell`]: struct.Spell.html
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum SpellKind {
  /// A spell sold in shops and learned by the party.
  Spell,
  /// An enemy special attack.
  Ability,
}

/// A spell or enemy ability.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Spell {
  /// Which table this came from.
  pub kind: SpellKind,
  /// The index within that table.
  pub index: usize,
  /// The decoded name, or `ABIL<n>` for abilities.
  pub name: String,
  /// The cost in charges of `level`. Zero for abilities.
  pub mp: u8,
  /// The shop price. Zero for abilities.
  pub price: u16,
  /// The spell level, 1 through 8. Zero for abilities.
  pub level: u8,
  /// Hit rate.
  pub accuracy: u8,
  /// The effect parameter, such as base damage.
  pub param: u8,
  /// Elements, as a mask.
  pub element: u8,
  /// The targeting mode, as a one-hot [`SpellTarget`] mask.
  ///
  /// [`SpellTarget`]: enum.SpellTarget.html
  pub target: u32,
  /// The effect routine.
  pub function: u8,
  /// Mask of the classes that may learn this.
  pub learn_mask: u16,
}

impl Spell {
  /// Decodes an 8-byte record from either table.
  ///
  /// The price, level and learn mask are left at zero; see [`load_spells`].
  ///
  /// [`load_spells`]: fn.load_spells.html
  pub fn decode(
    kind: SpellKind,
    index: usize,
    record: &[u8],
    name: String,
  ) -> Self {
    Self {
      kind,
      index,
      name,
      mp: 0,
      price: 0,
      level: 0,
      accuracy: record[0],
      param: record[1],
      element: record[2],
      target: 1u32.checked_shl(record[3] as u32).unwrap_or(0),
      function: record[4],
      learn_mask: 0,
    }
  }
}

/// Rebuilds the learn mask for spell `index` out of the per-class permission
/// table.
///
/// Each class has one bit per spell, and a *clear* bit means the class may
/// learn it.
///
/// ```
/// # use ofrip::data::learn_mask;
/// let mut perms = [[0xffu8; 8]; 12];
/// perms[0][1] = 0b1111_1101;
/// perms[3][1] = 0b1111_1101;
/// assert_eq!(learn_mask(&perms, 9), 0b1001);
/// assert_eq!(learn_mask(&perms, 8), 0);
/// ```
pub fn learn_mask(perms: &[[u8; SPELL_PERMS_SIZE]], index: usize) -> u16 {
  let (byte, bit) = (index >> 3, index & 7);
  perms
    .iter()
    .take(NUM_JOBS)
    .enumerate()
    .filter(|(_, row)| row[byte] & (1 << bit) == 0)
    .fold(0, |mask, (job, _)| mask | 1u16 << job)
}

/// Loads the spell table followed by the enemy ability table.
///
/// Spells come first, so a spell's position in the result is its index.
pub fn load_spells<R: Read + Seek>(
  rom: &mut Rom<R>,
  text: &TextTables,
) -> Result<Vec<Spell>> {
  let data = rom.bytes_at(SPELL_OFFSET, SPELL_ENTRIES * SPELL_SIZE)?;
  let prices = rom.u16_table(SPELL_PRICE_OFFSET, SPELL_ENTRIES)?;
  let raw_perms =
    rom.bytes_at(SPELL_PERMS_OFFSET, SPELL_PERMS_ENTRIES * SPELL_PERMS_SIZE)?;
  let abils = rom.bytes_at(ABIL_OFFSET, ABIL_ENTRIES * ABIL_SIZE)?;
  let name_ptrs = rom.u16_table(SPELL_TEXT_PTR_TABLE_OFFSET, SPELL_ENTRIES)?;

  let mut perms = [[0; SPELL_PERMS_SIZE]; SPELL_PERMS_ENTRIES];
  let raw_rows = raw_perms.chunks_exact(SPELL_PERMS_SIZE);
  for (row, raw) in perms.iter_mut().zip(raw_rows) {
    row.copy_from_slice(raw);
  }

  let mut spells = Vec::with_capacity(SPELL_ENTRIES + ABIL_ENTRIES);
  for (i, record) in data.chunks_exact(SPELL_SIZE).enumerate() {
    let name = rom.string_at(SPELL_TEXT_BASE + name_ptrs[i] as u64, text)?;
    let level = (i / SPELLS_PER_LEVEL + 1) as u8;
    spells.push(Spell {
      mp: level,
      level,
      price: prices[i],
      learn_mask: learn_mask(&perms, i),
      ..Spell::decode(SpellKind::Spell, i, record, name)
    });
  }

  for (i, record) in abils.chunks_exact(ABIL_SIZE).enumerate() {
    let name = format!("ABIL{}", i);
    spells.push(Spell::decode(SpellKind::Ability, i, record, name));
  }

  Ok(spells)
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::data::SpellTarget;
  use crate::rom::test::*;
  use crate::text::TextTable;
  use std::io::Cursor;

  #[test]
  fn target_is_one_hot() {
    let record = [24, 10, 0x10, 1, 1, 0, 0, 0];
    let s = Spell::decode(SpellKind::Spell, 0, &record, "FIRE".into());
    assert_eq!(s.target, SpellTarget::OneEnemy.mask());
    assert_eq!((s.accuracy, s.param, s.element, s.function), (24, 10, 0x10, 1));

    let record = [0, 0, 0, 200, 0, 0, 0, 0];
    let s = Spell::decode(SpellKind::Ability, 0, &record, String::new());
    assert_eq!(s.target, 0);
  }

  #[test]
  fn cleared_bits_grant_permission() {
    let perms = [[0u8; SPELL_PERMS_SIZE]; SPELL_PERMS_ENTRIES];
    for i in 0..SPELL_ENTRIES {
      assert_eq!(learn_mask(&perms, i), 0x0fff, "spell {}", i);
    }

    let perms = [[0xffu8; SPELL_PERMS_SIZE]; SPELL_PERMS_ENTRIES];
    assert_eq!(learn_mask(&perms, 63), 0);
  }

  #[test]
  fn load_spells_and_abilities() {
    let mut image = blank_image();
    // Everybody is barred from everything except the Red Mage, class 3,
    // who may learn spell 10.
    let all_forbidden = [0xff; SPELL_PERMS_ENTRIES * SPELL_PERMS_SIZE];
    poke(&mut image, SPELL_PERMS_OFFSET, &all_forbidden);
    let row = SPELL_PERMS_OFFSET + 3 * SPELL_PERMS_SIZE as u64;
    poke(&mut image, row + 1, &[0b1111_1011]);
    let record = SPELL_OFFSET + 10 * SPELL_SIZE as u64;
    poke(&mut image, record, &[40, 20, 0x20, 0, 2]);
    poke(&mut image, SPELL_PRICE_OFFSET + 20, &[0x90, 0x01]);
    poke(&mut image, SPELL_TEXT_PTR_TABLE_OFFSET + 20, &[0x00, 0x10]);
    poke(&mut image, SPELL_TEXT_BASE + 0x1000, &[0xb0, 0xb1, 0x00]);
    poke(&mut image, ABIL_OFFSET + ABIL_SIZE as u64, &[0, 30, 0, 4, 1]);

    let table = TextTable::parse("B0=ICE\nB1=2\n");
    let text = TextTables::new(table, TextTable::new());
    let mut rom = Rom::new(Cursor::new(image));
    let spells = load_spells(&mut rom, &text).unwrap();
    assert_eq!(spells.len(), SPELL_ENTRIES + ABIL_ENTRIES);

    let ice2 = &spells[10];
    assert_eq!(ice2.name, "ICE2");
    assert_eq!((ice2.level, ice2.mp, ice2.price), (2, 2, 400));
    assert_eq!(ice2.learn_mask, 1 << 3);
    assert_eq!(ice2.target, SpellTarget::AllEnemies.mask());
    assert_eq!(spells[63].level, 8);
    assert_eq!(spells[0].learn_mask, 0);

    let abil = &spells[SPELL_ENTRIES + 1];
    assert_eq!(abil.kind, SpellKind::Ability);
    assert_eq!(abil.name, "ABIL1");
    assert_eq!((abil.param, abil.target), (30, SpellTarget::OneAlly.mask()));
    assert_eq!((abil.price, abil.mp, abil.learn_mask), (0, 0, 0));
  }
}

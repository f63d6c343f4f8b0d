//! Weapons and armor.
//!
//! Both kinds of equipment share a handful of capabilities, described by the
//! [`Equippable`] trait; [`Equipment`] is the tagged union of the two.
//!
//! [`Equippable`]: trait.Equippable.html
//! [`Equipment`]: enum.Equipment.html

use std::io::Read;
use std::io::Seek;

use crate::data::element_modifiers;
use crate::data::WearLocation;
use crate::rom::layout::*;
use crate::rom::Rom;
use crate::text::TextTables;
use crate::Result;

/// Converts a stored "who may *not* equip this" bitfield into a mask of the
/// classes that may.
///
/// Only the low twelve bits, one per class, are meaningful.
///
/// ```
/// # use ofrip::data::equip_mask;
/// assert_eq!(equip_mask(0x0000), 0x0fff);
/// assert_eq!(equip_mask(0xf001), 0x0ffe);
/// ```
pub fn equip_mask(forbidden: u16) -> u16 {
  !forbidden & 0x0fff
}

/// Returns where the armor at `index` in the armor table is worn.
///
/// The table is sorted by slot, so the slot follows from the index alone.
pub fn armor_wear_location(index: usize) -> WearLocation {
  match index {
    0..=15 => WearLocation::Body,
    16..=24 => WearLocation::OffHand,
    25..=31 => WearLocation::Head,
    _ => WearLocation::Glove,
  }
}

/// Capabilities shared by every piece of equipment.
pub trait Equippable {
  /// Returns the decoded name.
  fn name(&self) -> &str;
  /// Returns the shop price.
  fn price(&self) -> u16;
  /// Returns the mask of classes that may equip this.
  fn equip_mask(&self) -> u16;
  /// Returns where this is worn.
  fn wear_location(&self) -> WearLocation;
  /// Returns the spell cast when used in battle, or zero.
  fn spell(&self) -> u8;

  /// Returns whether this is a weapon.
  fn is_weapon(&self) -> bool {
    self.wear_location() == WearLocation::Hand
  }

  /// Returns whether this is armor.
  fn is_armor(&self) -> bool {
    !self.is_weapon()
  }

  /// Returns whether the given class may equip this.
  fn equippable_by(&self, job: crate::data::Job) -> bool {
    self.equip_mask() as u32 & job.mask() != 0
  }
}

/// A weapon.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Weapon {
  /// The decoded name.
  pub name: String,
  /// The shop price.
  pub price: u16,
  /// Hit rate bonus.
  pub accuracy: u8,
  /// Attack power.
  pub power: u8,
  /// Critical hit rate.
  pub critical: u8,
  /// The spell cast when used in battle, or zero.
  pub spell: u8,
  /// Elemental damage, as a mask.
  pub element: u8,
  /// Monster categories this weapon is strong against, as a mask.
  pub category: u8,
  /// Status effects inflicted. Weapons in this game never inflict any.
  pub status: u8,
  /// Mask of the classes that may equip this.
  pub equip_mask: u16,
}

impl Weapon {
  /// Decodes an 8-byte weapon record, plus its price and permissions.
  pub fn decode(record: &[u8], price: u16, perms: u16, name: String) -> Self {
    Self {
      name,
      price,
      accuracy: record[0],
      power: record[1],
      critical: record[2],
      spell: record[3],
      element: record[4],
      category: record[5],
      status: 0,
      equip_mask: equip_mask(perms),
    }
  }
}

impl Equippable for Weapon {
  fn name(&self) -> &str {
    &self.name
  }

  fn price(&self) -> u16 {
    self.price
  }

  fn equip_mask(&self) -> u16 {
    self.equip_mask
  }

  fn wear_location(&self) -> WearLocation {
    WearLocation::Hand
  }

  fn spell(&self) -> u8 {
    self.spell
  }
}

/// A piece of armor.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Armor {
  /// The decoded name.
  pub name: String,
  /// The shop price.
  pub price: u16,
  /// Evasion penalty.
  pub weight: u8,
  /// Defense bonus.
  pub defense: u8,
  /// Elements this protects against, as a mask.
  pub element_resist: u8,
  /// Per-element damage modifiers. Armor has no weaknesses.
  pub element_mods: [i32; NUM_ELEMENTS],
  /// The spell cast when used in battle, or zero.
  pub spell: u8,
  /// Mask of the classes that may equip this.
  pub equip_mask: u16,
  /// Where this is worn.
  pub wear: WearLocation,
}

impl Armor {
  /// Decodes the 4-byte record of the armor at `index`, plus its price and
  /// permissions.
  pub fn decode(
    index: usize,
    record: &[u8],
    price: u16,
    perms: u16,
    name: String,
  ) -> Self {
    Self {
      name,
      price,
      weight: record[0],
      defense: record[1],
      element_resist: record[2],
      element_mods: element_modifiers(record[2], 0),
      spell: record[3],
      equip_mask: equip_mask(perms),
      wear: armor_wear_location(index),
    }
  }
}

impl Equippable for Armor {
  fn name(&self) -> &str {
    &self.name
  }

  fn price(&self) -> u16 {
    self.price
  }

  fn equip_mask(&self) -> u16 {
    self.equip_mask
  }

  fn wear_location(&self) -> WearLocation {
    self.wear
  }

  fn spell(&self) -> u8 {
    self.spell
  }
}

/// Either kind of equipment.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Equipment {
  /// A weapon.
  Weapon(Weapon),
  /// A piece of armor.
  Armor(Armor),
}

impl Equipment {
  fn inner(&self) -> &dyn Equippable {
    match self {
      Equipment::Weapon(w) => w,
      Equipment::Armor(a) => a,
    }
  }
}

impl Equippable for Equipment {
  fn name(&self) -> &str {
    self.inner().name()
  }

  fn price(&self) -> u16 {
    self.inner().price()
  }

  fn equip_mask(&self) -> u16 {
    self.inner().equip_mask()
  }

  fn wear_location(&self) -> WearLocation {
    self.inner().wear_location()
  }

  fn spell(&self) -> u8 {
    self.inner().spell()
  }

  fn is_weapon(&self) -> bool {
    matches!(self, Equipment::Weapon(_))
  }

  fn is_armor(&self) -> bool {
    matches!(self, Equipment::Armor(_))
  }
}

/// The raw tables behind one kind of equipment.
struct Tables {
  data: Vec<u8>,
  prices: Vec<u16>,
  perms: Vec<u16>,
  names: Vec<String>,
}

#[allow(clippy::too_many_arguments)]
fn load_tables<R: Read + Seek>(
  rom: &mut Rom<R>,
  text: &TextTables,
  offset: u64,
  size: usize,
  entries: usize,
  price_offset: u64,
  perms_offset: u64,
  (name_ptrs, name_base): (u64, u64),
) -> Result<Tables> {
  let data = rom.bytes_at(offset, entries * size)?;
  let prices = rom.u16_table(price_offset, entries)?;
  let perms = rom.u16_table(perms_offset, entries)?;
  let names = rom
    .u16_table(name_ptrs, entries)?
    .into_iter()
    .map(|ptr| rom.string_at(name_base + ptr as u64, text))
    .collect::<Result<Vec<_>>>()?;
  Ok(Tables {
    data,
    prices,
    perms,
    names,
  })
}

/// Loads the whole weapon table.
pub fn load_weapons<R: Read + Seek>(
  rom: &mut Rom<R>,
  text: &TextTables,
) -> Result<Vec<Weapon>> {
  let Tables {
    data,
    prices,
    perms,
    names,
  } = load_tables(
    rom,
    text,
    WEAPON_OFFSET,
    WEAPON_SIZE,
    WEAPON_ENTRIES,
    WEAPON_PRICE_OFFSET,
    WEAPON_PERMS_OFFSET,
    (WEAPON_TEXT_PTR_TABLE_OFFSET, WEAPON_TEXT_BASE),
  )?;

  Ok(
    data
      .chunks_exact(WEAPON_SIZE)
      .zip(names)
      .enumerate()
      .map(|(i, (record, name))| {
        Weapon::decode(record, prices[i], perms[i], name)
      })
      .collect(),
  )
}

/// Loads the whole armor table.
pub fn load_armor<R: Read + Seek>(
  rom: &mut Rom<R>,
  text: &TextTables,
) -> Result<Vec<Armor>> {
  let Tables {
    data,
    prices,
    perms,
    names,
  } = load_tables(
    rom,
    text,
    ARMOR_OFFSET,
    ARMOR_SIZE,
    ARMOR_ENTRIES,
    ARMOR_PRICE_OFFSET,
    ARMOR_PERMS_OFFSET,
    (ARMOR_TEXT_PTR_TABLE_OFFSET, ARMOR_TEXT_BASE),
  )?;

  Ok(
    data
      .chunks_exact(ARMOR_SIZE)
      .zip(names)
      .enumerate()
      .map(|(i, (record, name))| {
        Armor::decode(i, record, prices[i], perms[i], name)
      })
      .collect(),
  )
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::data::Job;
  use crate::data::RESIST;
  use crate::rom::test::*;
  use crate::text::TextTable;
  use std::io::Cursor;

  macro_rules! assert_wear {
    ($($index:literal => $loc:ident),* $(,)?) => {
      $(assert_eq!(
        armor_wear_location($index),
        WearLocation::$loc,
        "armor {}",
        $index,
      );)*
    };
  }

  #[test]
  fn wear_location_bands() {
    assert_wear! {
      0 => Body,
      15 => Body,
      16 => OffHand,
      24 => OffHand,
      25 => Head,
      31 => Head,
      32 => Glove,
      39 => Glove,
    }
  }

  #[test]
  fn decode_weapon() {
    let record = [10, 20, 5, 0, 0x10, 0x08, 0, 0];
    let w = Weapon::decode(&record, 1500, 0x0ff0, "Sabre".into());
    assert_eq!((w.accuracy, w.power, w.critical), (10, 20, 5));
    assert_eq!((w.element, w.category, w.status), (0x10, 0x08, 0));
    assert_eq!(w.price, 1500);
    assert_eq!(w.equip_mask, 0x000f);
    assert!(w.is_weapon());
    assert!(w.equippable_by(Job::Fighter));
    assert!(!w.equippable_by(Job::WhiteMage));
  }

  #[test]
  fn decode_armor() {
    let record = [8, 12, 0b0011_0000, 0];
    let a = Armor::decode(20, &record, 50, 0x0000, "Buckler".into());
    assert_eq!(a.wear, WearLocation::OffHand);
    assert_eq!(a.element_mods, [0, 0, 0, 0, RESIST, RESIST, 0, 0]);
    assert_eq!(a.equip_mask, 0x0fff);
    assert!(a.is_armor());
  }

  #[test]
  fn equipment_dispatches_on_its_tag() {
    let w = Equipment::Weapon(Weapon::decode(&[0; 8], 1, 0, "Knife".into()));
    let a = Equipment::Armor(Armor::decode(35, &[0; 4], 2, 0, "Ring".into()));
    assert!(w.is_weapon() && !w.is_armor());
    assert!(a.is_armor() && !a.is_weapon());
    assert_eq!(w.wear_location(), WearLocation::Hand);
    assert_eq!(a.wear_location(), WearLocation::Glove);
    assert_eq!((w.name(), w.price()), ("Knife", 1));
    assert_eq!((a.name(), a.price()), ("Ring", 2));
  }

  #[test]
  fn load_reads_every_side_table() {
    let mut image = blank_image();
    poke(&mut image, WEAPON_OFFSET + 8, &[1, 2, 3, 4, 5, 6, 7, 8]);
    poke(&mut image, WEAPON_PRICE_OFFSET + 2, &[0x10, 0x27]);
    poke(&mut image, WEAPON_PERMS_OFFSET + 2, &[0xff, 0x0f]);
    poke(&mut image, WEAPON_TEXT_PTR_TABLE_OFFSET + 2, &[0x40, 0x00]);
    poke(&mut image, WEAPON_TEXT_BASE + 0x40, &[0xa0, 0xa1, 0x00]);
    poke(&mut image, ARMOR_OFFSET + 4 * 33, &[1, 9, 0x80, 0]);
    poke(&mut image, ARMOR_PRICE_OFFSET + 2 * 33, &[0x2c, 0x01]);
    poke(&mut image, ARMOR_PERMS_OFFSET + 2 * 33, &[0xfe, 0x0f]);

    let table = TextTable::parse("A0=Ax\nA1=e\n");
    let text = TextTables::new(table, TextTable::new());
    let mut rom = Rom::new(Cursor::new(image));

    let weapons = load_weapons(&mut rom, &text).unwrap();
    assert_eq!(weapons.len(), WEAPON_ENTRIES);
    assert_eq!(weapons[1].name, "Axe");
    assert_eq!(weapons[1].price, 10000);
    assert_eq!(weapons[1].equip_mask, 0);
    assert_eq!(weapons[1].spell, 4);
    assert_eq!(weapons[0].equip_mask, 0x0fff);

    let armor = load_armor(&mut rom, &text).unwrap();
    assert_eq!(armor.len(), ARMOR_ENTRIES);
    assert_eq!(armor[33].defense, 9);
    assert_eq!(armor[33].element_mods[7], RESIST);
    assert_eq!(armor[33].wear, WearLocation::Glove);
    assert_eq!(armor[33].price, 300);
    assert_eq!(armor[33].equip_mask, 0x0001);
  }
}

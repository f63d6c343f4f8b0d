//! Tab-separated renderings of the decoded tables.
//!
//! Each table is one header row followed by one row per record, fields in a
//! fixed order, every row ending in a newline.

use std::fmt::Write;

use crate::data::Armor;
use crate::data::Equippable;
use crate::data::Monster;
use crate::data::Spell;
use crate::data::Weapon;

/// The header row of `Monsters.txt`.
pub const MONSTER_HEADER: &str = concat!(
  "MonsterID\tName\tHP\tAttX\tAtt\tAcc\tCrit\tDef\tAgi\tMDef\tInit\t",
  "Exp\tGold\tMorale\tType\tAttElem\tAttStat\tElemRes\tElemWeak\tAI\t",
  "Sprite",
);

/// The header row of `Weapons.txt`.
pub const WEAPON_HEADER: &str = concat!(
  "WeaponID\tName\tPrice\tPower\tAcc\tCrit\tElem\tStat\tType\t",
  "Equip\tWear\tSpell",
);

/// The header row of `Armor.txt`.
pub const ARMOR_HEADER: &str =
  "ArmorID\tName\tPrice\tDef\tWeight\tElem\tEquip\tWear\tSpell";

/// The header row of `Spells.txt`.
pub const SPELL_HEADER: &str =
  "SpellID\tName\tMP\tPrice\tLevel\tAcc\tParam\tElem\tTarget\tFunction\tLearn";

/// Returns the file name a monster's sprite is exported under.
///
/// Path separators in the name are replaced, so every sprite lands in the
/// same directory.
pub fn sprite_file_name(name: &str) -> String {
  let stem: String = name
    .chars()
    .map(|c| match c {
      '/' | '\\' => '_',
      c => c,
    })
    .collect();
  format!("{}.bmp", stem)
}

macro_rules! row {
  ($out:expr, $first:expr $(, $field:expr)* $(,)?) => {{
    // Formatting into a String never fails.
    let _ = write!($out, "{}", $first);
    $(let _ = write!($out, "\t{}", $field);)*
    $out.push('\n');
  }};
}

/// Renders `Monsters.txt`.
pub fn monsters(monsters: &[Monster]) -> String {
  let mut out = format!("{}\n", MONSTER_HEADER);
  for (i, m) in monsters.iter().enumerate() {
    row!(
      out,
      i,
      m.name,
      m.hp,
      m.hits,
      m.power,
      m.accuracy,
      m.critical,
      m.defense,
      m.agility,
      m.magic_defense,
      m.initiative,
      m.exp,
      m.gold,
      m.morale,
      m.category,
      m.hit_element,
      m.hit_status,
      m.element_resist,
      m.element_weak,
      m.ai_script,
      sprite_file_name(&m.name),
    );
  }
  out
}

/// Renders `Weapons.txt`.
pub fn weapons(weapons: &[Weapon]) -> String {
  let mut out = format!("{}\n", WEAPON_HEADER);
  for (i, w) in weapons.iter().enumerate() {
    row!(
      out,
      i,
      w.name,
      w.price,
      w.power,
      w.accuracy,
      w.critical,
      w.element,
      w.status,
      w.category,
      w.equip_mask,
      w.wear_location().mask(),
      w.spell,
    );
  }
  out
}

/// Renders `Armor.txt`.
pub fn armor(armor: &[Armor]) -> String {
  let mut out = format!("{}\n", ARMOR_HEADER);
  for (i, a) in armor.iter().enumerate() {
    row!(
      out,
      i,
      a.name,
      a.price,
      a.defense,
      a.weight,
      a.element_resist,
      a.equip_mask,
      a.wear_location().mask(),
      a.spell,
    );
  }
  out
}

/// Renders `Spells.txt`. Abilities follow the spells, numbered on from them.
pub fn spells(spells: &[Spell]) -> String {
  let mut out = format!("{}\n", SPELL_HEADER);
  for (i, s) in spells.iter().enumerate() {
    row!(
      out,
      i,
      s.name,
      s.mp,
      s.price,
      s.level,
      s.accuracy,
      s.param,
      s.element,
      s.target,
      s.function,
      s.learn_mask,
    );
  }
  out
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::data::SpellKind;

  fn lines(text: &str) -> Vec<Vec<&str>> {
    text.lines().map(|l| l.split('\t').collect()).collect()
  }

  #[test]
  fn monster_rows() {
    let record = [
      0x10, 0x00, 0x20, 0x00, 0x30, 0x00, 0x05, 0x07, 0x0a, 0x02, 0x03,
      0x01, 0x04, 0x06, 0x08, 0x09, 0x0b, 0x0c, 0x0d, 0x0e,
    ];
    let m = Monster::decode(&record, "IMP/GOBLIN".into());
    let text = monsters(&[m.clone(), m]);
    let rows = lines(&text);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].len(), 21);
    assert!(rows.iter().all(|r| r.len() == 21));
    assert_eq!(rows[2][0], "1");
    assert_eq!(rows[1][1], "IMP/GOBLIN");
    assert_eq!(rows[1][20], "IMP_GOBLIN.bmp");
    assert!(text.ends_with('\n'));
  }

  #[test]
  fn weapon_wear_is_hand_mask() {
    let record = [10, 5, 3, 0, 0, 0, 0, 0];
    let w = Weapon::decode(&record, 800, 0x0fff, "Rapier".into());
    let text = weapons(&[w]);
    let rows = lines(&text);
    assert_eq!(rows[0][10], "Wear");
    assert_eq!(rows[1][1], "Rapier");
    assert_eq!(rows[1][2], "800");
    assert_eq!(rows[1][9], "0");
    assert_eq!(rows[1][10], "1");
  }

  #[test]
  fn armor_wear_follows_band() {
    let body = Armor::decode(0, &[1, 4, 0, 0], 50, 0, "Cloth".into());
    let head = Armor::decode(25, &[1, 1, 0, 0], 50, 0, "Cap".into());
    let text = armor(&[body, head]);
    let rows = lines(&text);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1][7], crate::data::WearLocation::Body.mask().to_string());
    assert_eq!(rows[2][7], crate::data::WearLocation::Head.mask().to_string());
    assert_eq!(rows[1][6], "4095");
  }

  #[test]
  fn spell_rows() {
    let record = [0, 12, 0, 1, 2, 0, 0, 0];
    let s = Spell::decode(SpellKind::Ability, 3, &record, "ABIL3".into());
    let text = spells(&[s]);
    let rows = lines(&text);
    assert_eq!(rows[0].len(), 11);
    assert_eq!(
      rows[1],
      vec!["0", "ABIL3", "0", "0", "0", "0", "12", "0", "2", "2", "0"]
    );
  }

  #[test]
  fn sanitized_names() {
    assert_eq!(sprite_file_name("R.GOYLE"), "R.GOYLE.bmp");
    assert_eq!(sprite_file_name("a\\b/c"), "a_b_c.bmp");
  }
}

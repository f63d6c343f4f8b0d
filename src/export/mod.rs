//! Writing decoded game data out as files.
//!
//! An [`Exporter`] decodes every table it needs once, up front, and then
//! writes any combination of:
//! - monster and boss sprites, as BMP files;
//! - map tilesets, as per-tile BMP files with an index, plus a sheet;
//! - the monster, weapon, armor and spell tables, as tab-separated text;
//! - map layouts, as flat tile ID files.
//!
//! A full export lays these out as:
//! ```text
//! <root>/
//!   Graphics/
//!     Monsters/IMP.bmp ...
//!     Maps/<tileset>/tile000.bmp ... <tileset>.txt
//!     Maps/<tileset>.bmp
//!   Monsters.txt
//!   Weapons.txt
//!   Armor.txt
//!   Spells.txt
//!   Maps/Coneria.map ...
//! ```
//!
//! [`Exporter`]: struct.Exporter.html

use std::fs;
use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::io::Seek;
use std::path::Path;

use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::config::Config;
use crate::config::Exports;
use crate::data::Armor;
use crate::data::BattleDef;
use crate::data::Monster;
use crate::data::Spell;
use crate::data::Weapon;
use crate::error::RipError;
use crate::gfx::battle::BattleGraphics;
use crate::gfx::battle::Boss;
use crate::gfx::bmp;
use crate::gfx::map::sheet;
use crate::gfx::map::MapGraphics;
use crate::map::layout;
use crate::map::tileset;
use crate::map::tileset_name;
use crate::map::MAP_NAMES;
use crate::palette::NesPalette;
use crate::rom::layout::*;
use crate::rom::Rom;
use crate::text::TextTables;
use crate::Result;

pub mod tables;

/// Creates `dir` and any missing parents.
fn create_dir(dir: &Path) -> Result<()> {
  fs::create_dir_all(dir).map_err(|e| RipError::create(dir, e))
}

fn write_file(path: &Path, contents: impl AsRef<[u8]>) -> Result<()> {
  fs::write(path, contents).map_err(|e| RipError::create(path, e))
}

/// Owns an open ROM and everything decoded from it.
pub struct Exporter<R> {
  rom: Rom<R>,
  nes: NesPalette,
  text: TextTables,
  battle_gfx: BattleGraphics,
  map_gfx: MapGraphics,
  monsters: Vec<Monster>,
  battles: Vec<BattleDef>,
  weapons: Vec<Weapon>,
  armor: Vec<Armor>,
  spells: Vec<Spell>,
  exports: Exports,
}

impl Exporter<BufReader<File>> {
  /// Loads the text tables, master palette and ROM named by `config`, and
  /// decodes the ROM.
  pub fn load(config: &Config) -> Result<Self> {
    let text = TextTables::load(&config.standard_table, &config.dte_table)?
      .with_dte_names(config.dte_names);
    let nes = NesPalette::load(&config.palette)?;
    let rom = Rom::open(&config.rom)?;
    info!("loaded {}", config.rom.display());
    Self::new(rom, nes, text, config.exports)
  }
}

impl<R: Read + Seek> Exporter<R> {
  /// Decodes the graphics banks and every table out of `rom`.
  pub fn new(
    mut rom: Rom<R>,
    nes: NesPalette,
    text: TextTables,
    exports: Exports,
  ) -> Result<Self> {
    let battle_gfx = BattleGraphics::load(&mut rom)?;
    let map_gfx = MapGraphics::load(&mut rom)?;
    let monsters = crate::data::load_monsters(&mut rom, &text)?;
    let battles = crate::data::load_battles(&mut rom)?;
    let weapons = crate::data::load_weapons(&mut rom, &text)?;
    let armor = crate::data::load_armor(&mut rom, &text)?;
    let spells = crate::data::load_spells(&mut rom, &text)?;
    debug!(
      monsters = monsters.len(),
      battles = battles.len(),
      weapons = weapons.len(),
      armor = armor.len(),
      spells = spells.len(),
      "decoded tables"
    );

    Ok(Self {
      rom,
      nes,
      text,
      battle_gfx,
      map_gfx,
      monsters,
      battles,
      weapons,
      armor,
      spells,
      exports,
    })
  }

  /// The monster table.
  pub fn monsters(&self) -> &[Monster] {
    &self.monsters
  }

  /// The battle table.
  pub fn battles(&self) -> &[BattleDef] {
    &self.battles
  }

  /// The weapon table.
  pub fn weapons(&self) -> &[Weapon] {
    &self.weapons
  }

  /// The armor table.
  pub fn armor(&self) -> &[Armor] {
    &self.armor
  }

  /// The spells, followed by the enemy abilities.
  pub fn spells(&self) -> &[Spell] {
    &self.spells
  }

  /// The text tables names were decoded with.
  pub fn text(&self) -> &TextTables {
    &self.text
  }

  /// Replaces the set of steps [`export_full`] runs.
  ///
  /// [`export_full`]: #method.export_full
  pub fn set_exports(&mut self, exports: Exports) {
    self.exports = exports;
  }

  /// Runs every enabled export step into `root`.
  pub fn export_full(&mut self, root: impl AsRef<Path>) -> Result<()> {
    let root = root.as_ref();
    let graphics = root.join("Graphics");
    create_dir(root)?;
    create_dir(&graphics)?;

    let exports = self.exports;
    if exports.monster_graphics {
      self.dump_monster_graphics(graphics.join("Monsters"))?;
    }
    if exports.map_graphics {
      self.dump_map_graphics(graphics.join("Maps"))?;
    }
    if exports.monsters {
      self.dump_monsters(root.join("Monsters.txt"))?;
    }
    if exports.weapons {
      self.dump_weapons(root.join("Weapons.txt"))?;
    }
    if exports.armor {
      self.dump_armor(root.join("Armor.txt"))?;
    }
    if exports.spells {
      self.dump_spells(root.join("Spells.txt"))?;
    }
    if exports.maps {
      self.dump_map_data(root.join("Maps"))?;
    }
    info!("exported to {}", root.display());
    Ok(())
  }

  /// Writes one sprite per regular monster, as drawn in the first battle
  /// that features it, then the five boss sprites.
  pub fn dump_monster_graphics(&mut self, dir: impl AsRef<Path>) -> Result<()> {
    let dir = dir.as_ref();
    create_dir(dir)?;

    let regular = MONSTER_ENTRIES - MONSTER_BOSS_ENTRIES;
    for (i, monster) in self.monsters.iter().enumerate().take(regular) {
      let found = self
        .battles
        .iter()
        .find_map(|b| b.slot_of(i).map(|k| (b, k)));
      let (battle, k) = match found {
        Some(found) => found,
        None => {
          warn!(
            monster = i,
            name = %monster.name,
            "no battle features this monster; skipping its sprite"
          );
          continue;
        }
      };

      let palette = battle.palettes[battle.monster_palettes[k] as usize & 1];
      let image = self.battle_gfx.monster_sprite(
        &self.nes,
        battle.tileset as usize,
        palette as usize,
        battle.monster_pics[k],
      );
      let path = dir.join(tables::sprite_file_name(&monster.name));
      bmp::save(&path, &image)?;
      debug!("wrote {}", path.display());
    }

    for &boss in &Boss::ALL {
      let image = boss.sprite(&mut self.rom, &self.battle_gfx, &self.nes)?;
      let path = dir.join(format!("{}.bmp", boss.name()));
      bmp::save(&path, &image)?;
      debug!("wrote {}", path.display());
    }

    info!("exported monster sprites to {}", dir.display());
    Ok(())
  }

  /// Writes every distinct (tileset, palette) combination in use: a
  /// directory of tile images with an index, and a sheet of all its tiles.
  pub fn dump_map_graphics(&mut self, dir: impl AsRef<Path>) -> Result<()> {
    let dir = dir.as_ref();
    create_dir(dir)?;

    let assignments = tileset::load_tileset_assignments(&mut self.rom)?;
    let mappings =
      tileset::tileset_mappings(&assignments, self.map_gfx.palette_rows());
    let uniques = tileset::unique_tilesets(&mappings);

    for (i, unique) in uniques.iter().enumerate() {
      let name = tileset_name(i);
      let tile_dir = dir.join(&name);
      create_dir(&tile_dir)?;

      let tiles = self.map_gfx.tile_sprites(
        &self.nes,
        unique.tileset as usize,
        unique.palette_index,
      );
      let mut index = String::from("TileID\tFilename\n");
      for (t, image) in tiles.iter().enumerate() {
        let file = format!("tile{:03}.bmp", t);
        bmp::save(tile_dir.join(&file), image)?;
        index.push_str(&format!("{}\t{}\n", t, file));
      }
      write_file(&tile_dir.join(format!("{}.txt", name)), index)?;
      bmp::save(dir.join(format!("{}.bmp", name)), &sheet(&tiles))?;

      info!(
        tileset = unique.tileset,
        palette = unique.palette_index,
        "exported tileset {}",
        name
      );
    }
    Ok(())
  }

  /// Decodes every map layout and writes it as `<map name>.map`.
  pub fn dump_map_data(&mut self, dir: impl AsRef<Path>) -> Result<()> {
    let dir = dir.as_ref();
    create_dir(dir)?;

    let pointers = layout::load_pointers(&mut self.rom)?;
    for (name, pointer) in MAP_NAMES.iter().zip(pointers) {
      let tiles = layout::load_layout(&mut self.rom, pointer)?;
      if tiles.len() != MAP_WIDTH * MAP_HEIGHT {
        warn!(map = *name, tiles = tiles.len(), "map is not 64x64");
      }
      layout::write_map_file(dir.join(format!("{}.map", name)), &tiles)?;
      info!("exported map {}", name);
    }
    Ok(())
  }

  /// Writes the monster table.
  pub fn dump_monsters(&self, path: impl AsRef<Path>) -> Result<()> {
    self.dump_table(path.as_ref(), tables::monsters(&self.monsters))
  }

  /// Writes the weapon table.
  pub fn dump_weapons(&self, path: impl AsRef<Path>) -> Result<()> {
    self.dump_table(path.as_ref(), tables::weapons(&self.weapons))
  }

  /// Writes the armor table.
  pub fn dump_armor(&self, path: impl AsRef<Path>) -> Result<()> {
    self.dump_table(path.as_ref(), tables::armor(&self.armor))
  }

  /// Writes the spell and ability table.
  pub fn dump_spells(&self, path: impl AsRef<Path>) -> Result<()> {
    self.dump_table(path.as_ref(), tables::spells(&self.spells))
  }

  fn dump_table(&self, path: &Path, text: String) -> Result<()> {
    write_file(path, text)?;
    info!("exported {}", path.display());
    Ok(())
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::palette::test::ramp;
  use crate::rom::test::*;
  use crate::text::TextTable;
  use std::io::Cursor;

  /// Text table where code `0x80 + n` is the letter `A + n`.
  fn text() -> TextTables {
    let entries: String = (0..26u8)
      .map(|n| format!("{:02X}={}\n", 0x80 + n, (b'A' + n) as char))
      .collect();
    TextTables::new(TextTable::parse(&entries), TextTable::new())
  }

  fn encode(name: &str) -> Vec<u8> {
    name.bytes().map(|b| b - b'A' + 0x80).chain(Some(0)).collect()
  }

  /// A ROM with two named monsters, one battle featuring monster 1 in slot
  /// 2, and every map filled with tile 1.
  fn image() -> Vec<u8> {
    let mut image = blank_image();

    // Monster names: 0 is "IMP", everyone else is "WOLF".
    poke(&mut image, MONSTER_TEXT_BASE + 0x10, &encode("IMP"));
    poke(&mut image, MONSTER_TEXT_BASE + 0x20, &encode("WOLF"));
    let mut ptrs = vec![];
    for i in 0..MONSTER_ENTRIES {
      let p: u16 = if i == 0 { 0x10 } else { 0x20 };
      ptrs.extend_from_slice(&p.to_le_bytes());
    }
    poke(&mut image, MONSTER_TEXT_PTR_TABLE_OFFSET, &ptrs);

    // Every battle features monster 0 in all slots, except battle 5, the
    // first to feature monster 1.
    for b in 0..BATTLE_ENTRIES as u64 {
      let record = if b == 5 {
        [0x23, 0b0001_0000, 0, 0, 1, 0, 0, 0, 0, 0, 7, 9, 0, 0b0010_0000, 0, 0]
      } else {
        [0x20, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]
      };
      poke(&mut image, BATTLE_OFFSET + b * BATTLE_SIZE as u64, &record);
    }
    poke(&mut image, BATTLE_PALETTE_OFFSET + 7 * 4, &[0x1c, 0x1d, 0x1e, 0x1f]);
    poke(&mut image, BATTLE_PALETTE_OFFSET + 9 * 4, &[0x24, 0x25, 0x26, 0x27]);

    let mut ptrs = vec![];
    for _ in 0..MAP_ENTRIES {
      ptrs.extend_from_slice(&0x200u16.to_le_bytes());
    }
    poke(&mut image, MAP_OFFSET, &ptrs);
    let mut runs = [0x81u8, 0x00].repeat(MAP_WIDTH * MAP_HEIGHT / 256);
    runs.push(0xff);
    poke(&mut image, MAP_OFFSET + 0x200, &runs);
    image
  }

  fn exporter() -> Exporter<Cursor<Vec<u8>>> {
    let nes = NesPalette::from_bytes(&ramp()).unwrap();
    Exporter::new(Rom::new(Cursor::new(image())), nes, text(), Exports::all())
      .unwrap()
  }

  #[test]
  fn decodes_tables_on_load() {
    let ex = exporter();
    assert_eq!(ex.monsters().len(), MONSTER_ENTRIES);
    assert_eq!(ex.monsters()[0].name, "IMP");
    assert_eq!(ex.monsters()[1].name, "WOLF");
    assert_eq!(ex.battles().len(), BATTLE_ENTRIES);
    assert_eq!(ex.weapons().len(), WEAPON_ENTRIES);
    assert_eq!(ex.armor().len(), ARMOR_ENTRIES);
    assert_eq!(ex.spells().len(), SPELL_ENTRIES + ABIL_ENTRIES);
  }

  #[test]
  fn monster_sprites_use_first_battle() {
    let dir = tempfile::tempdir().unwrap();
    let mut ex = exporter();
    ex.dump_monster_graphics(dir.path()).unwrap();

    let imp = bmp::load(dir.path().join("IMP.bmp")).unwrap();
    assert_eq!((imp.width(), imp.height()), (32, 32));

    // Battle 5, slot 2: graphic 2 is 48x48, drawn from the second palette.
    let wolf = bmp::load(dir.path().join("WOLF.bmp")).unwrap();
    assert_eq!((wolf.width(), wolf.height()), (48, 48));
    assert_eq!(wolf.get(0, 0), ex.nes.get(0x24));

    for boss in &Boss::ALL {
      assert!(dir.path().join(format!("{}.bmp", boss.name())).exists());
    }
    assert_eq!(bmp::load(dir.path().join("CHAOS.bmp")).unwrap().width(), 112);
  }

  #[test]
  fn unreferenced_monsters_get_no_sprite() {
    let mut image = image();
    // Battle 5 no longer features monster 1.
    poke(&mut image, BATTLE_OFFSET + 5 * BATTLE_SIZE as u64 + 4, &[0]);
    let nes = NesPalette::from_bytes(&ramp()).unwrap();
    let mut ex =
      Exporter::new(Rom::new(Cursor::new(image)), nes, text(), Exports::all())
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    ex.dump_monster_graphics(dir.path()).unwrap();
    assert!(dir.path().join("IMP.bmp").exists());
    assert!(!dir.path().join("WOLF.bmp").exists());
  }

  #[test]
  fn map_graphics_are_deduplicated() {
    let dir = tempfile::tempdir().unwrap();
    let mut ex = exporter();
    ex.dump_map_graphics(dir.path()).unwrap();

    // A blank ROM has one tileset and one palette, used everywhere.
    let name = tileset_name(0);
    assert!(dir.path().join(&name).join("tile000.bmp").exists());
    assert!(dir.path().join(&name).join("tile127.bmp").exists());
    assert!(!dir.path().join(tileset_name(1)).exists());

    let index =
      fs::read_to_string(dir.path().join(&name).join(format!("{}.txt", name)))
        .unwrap();
    let lines: Vec<_> = index.lines().collect();
    assert_eq!(lines.len(), 129);
    assert_eq!(lines[0], "TileID\tFilename");
    assert_eq!(lines[128], "127\ttile127.bmp");

    let sheet = bmp::load(dir.path().join(format!("{}.bmp", name))).unwrap();
    assert_eq!((sheet.width(), sheet.height()), (256, 128));
  }

  #[test]
  fn map_layouts() {
    let dir = tempfile::tempdir().unwrap();
    let mut ex = exporter();
    ex.dump_map_data(dir.path()).unwrap();
    for name in MAP_NAMES.iter() {
      let bytes = fs::read(dir.path().join(format!("{}.map", name))).unwrap();
      assert_eq!(bytes.len(), MAP_WIDTH * MAP_HEIGHT * 4, "{}", name);
      assert_eq!(&bytes[..4], &[1, 0, 0, 0]);
    }
  }

  #[test]
  fn full_export_honors_steps() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("FF1");
    let mut ex = exporter();
    ex.set_exports(Exports {
      map_graphics: false,
      spells: false,
      ..Exports::default()
    });
    ex.export_full(&root).unwrap();

    assert!(root.join("Graphics/Monsters/IMP.bmp").exists());
    assert!(!root.join("Graphics/Maps").exists());
    assert!(root.join("Maps/Coneria.map").exists());
    assert!(!root.join("Spells.txt").exists());

    let monsters = fs::read_to_string(root.join("Monsters.txt")).unwrap();
    assert!(monsters.starts_with(tables::MONSTER_HEADER));
    assert_eq!(monsters.lines().count(), MONSTER_ENTRIES + 1);
    let weapons = fs::read_to_string(root.join("Weapons.txt")).unwrap();
    assert_eq!(weapons.lines().count(), WEAPON_ENTRIES + 1);
    let armor = fs::read_to_string(root.join("Armor.txt")).unwrap();
    assert_eq!(armor.lines().count(), ARMOR_ENTRIES + 1);
  }

  #[test]
  fn in_bounds_garbage_still_decodes() {
    // Nothing in the image is checked: any bytes at the right offsets make
    // a "valid" ROM.
    let image: Vec<u8> =
      (0..IMAGE_LEN).map(|i| (i * 7 + i / 251) as u8).collect();
    let nes = NesPalette::from_bytes(&ramp()).unwrap();
    let rom = Rom::new(Cursor::new(image));
    let ex = Exporter::new(rom, nes, text(), Exports::all()).unwrap();
    assert_eq!(ex.monsters().len(), MONSTER_ENTRIES);
    assert_eq!(ex.battles().len(), BATTLE_ENTRIES);
  }

  #[test]
  fn short_roms_fail_to_load() {
    let nes = NesPalette::from_bytes(&ramp()).unwrap();
    let rom = Rom::new(Cursor::new(vec![0; 0x1000]));
    match Exporter::new(rom, nes, text(), Exports::default()) {
      Err(RipError::Read { .. }) => {}
      Err(e) => panic!("expected a read error, got {:?}", e),
      Ok(_) => panic!("expected a read error"),
    }
  }
}

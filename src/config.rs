//! Export run configuration.
//!
//! A configuration file is JSON5, and every field is optional:
//! ```text
//! {
//!   rom: "FF1.nes",
//!   output: "out/FF1",
//!   dte_names: true,
//!   exports: { spells: true, map_graphics: false },
//! }
//! ```

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::RipError;
use crate::Result;

/// Where to find the inputs and where to put the outputs.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
  /// The ROM image.
  pub rom: PathBuf,
  /// The 192-byte master palette file.
  pub palette: PathBuf,
  /// The single-glyph text table.
  pub standard_table: PathBuf,
  /// The glyph-pair text table.
  pub dte_table: PathBuf,
  /// The root of the export tree.
  pub output: PathBuf,
  /// Whether names fall back to the glyph-pair table for codes the
  /// single-glyph table leaves empty.
  pub dte_names: bool,
  /// Which parts of a full export to run.
  pub exports: Exports,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      rom: "FF1.nes".into(),
      palette: "FFHackster.pal".into(),
      standard_table: "StandardTable.tbl".into(),
      dte_table: "DTETable.tbl".into(),
      output: "../Quests/FF1".into(),
      dte_names: false,
      exports: Exports::default(),
    }
  }
}

impl Config {
  /// Parses the contents of a configuration file. `path` is only used for
  /// error reporting.
  pub fn parse(text: &str, path: impl AsRef<Path>) -> Result<Self> {
    json5::from_str(text).map_err(|e| RipError::Config {
      path: path.as_ref().to_path_buf(),
      message: e.to_string(),
    })
  }

  /// Loads the configuration file at `path`.
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| RipError::open(path, e))?;
    Self::parse(&text, path)
  }
}

/// The steps of a full export.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Exports {
  /// Enemy and boss sprites, under `Graphics/Monsters`.
  pub monster_graphics: bool,
  /// Map tiles and tileset sheets, under `Graphics/Maps`.
  pub map_graphics: bool,
  /// `Monsters.txt`.
  pub monsters: bool,
  /// `Weapons.txt`.
  pub weapons: bool,
  /// `Armor.txt`.
  pub armor: bool,
  /// `Spells.txt`. Off unless asked for.
  pub spells: bool,
  /// Map layouts, under `Maps`.
  pub maps: bool,
}

impl Default for Exports {
  fn default() -> Self {
    Self {
      monster_graphics: true,
      map_graphics: true,
      monsters: true,
      weapons: true,
      armor: true,
      spells: false,
      maps: true,
    }
  }
}

impl Exports {
  /// Enables every step.
  pub fn all() -> Self {
    Self {
      spells: true,
      ..Self::default()
    }
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn empty_is_default() {
    assert_eq!(Config::parse("{}", "x.json5").unwrap(), Config::default());
  }

  #[test]
  fn partial_overrides() {
    let config = Config::parse(
      r#"{
        // Comments and trailing commas are fine.
        rom: "roms/ff1.nes",
        dte_names: true,
        exports: { spells: true, maps: false, },
      }"#,
      "x.json5",
    )
    .unwrap();
    assert_eq!(config.rom, PathBuf::from("roms/ff1.nes"));
    assert_eq!(config.palette, PathBuf::from("FFHackster.pal"));
    assert!(config.dte_names);
    assert!(config.exports.spells);
    assert!(!config.exports.maps);
    assert!(config.exports.monsters);
  }

  #[test]
  fn bad_files_name_themselves() {
    match Config::parse("{ rom: ", "bad.json5") {
      Err(RipError::Config { path, .. }) => {
        assert_eq!(path, PathBuf::from("bad.json5"))
      }
      other => panic!("expected a config error, got {:?}", other),
    }
    assert!(Config::parse("{ colour: 1 }", "x.json5").is_err());
  }

  #[test]
  fn missing_files_are_io_errors() {
    let dir = tempfile::tempdir().unwrap();
    match Config::load(dir.path().join("nope.json5")) {
      Err(RipError::Io { .. }) => {}
      other => panic!("expected an io error, got {:?}", other),
    }
  }
}

//! Character substitution tables.
//!
//! The game stores text as one byte per glyph, or one byte per *pair* of
//! glyphs in the "dual tile encoding" (DTE) range. A table file maps codes to
//! display strings with one `HH=text` entry per line, where `HH` is two hex
//! digits:
//! ```text
//! 8A=A
//! 8B=B
//! 1A=e
//! ```
//! Lines that don't look like this are skipped, rather than rejected.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::RipError;
use crate::Result;

lazy_static! {
  static ref ENTRY: Regex = Regex::new(r"^([0-9A-Fa-f]{2})=(.*)$").unwrap();
}

/// A mapping from byte codes to display strings.
///
/// Codes without an entry decode to the empty string.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TextTable {
  entries: Vec<String>,
}

impl TextTable {
  /// Creates a table with no entries.
  pub fn new() -> Self {
    Self {
      entries: vec![String::new(); 256],
    }
  }

  /// Parses a table out of the contents of a table file.
  pub fn parse(text: &str) -> Self {
    let mut table = Self::new();
    for line in text.lines() {
      let caps = match ENTRY.captures(line) {
        Some(caps) => caps,
        None => continue,
      };
      // Two hex digits always fit.
      if let Ok(code) = u8::from_str_radix(&caps[1], 16) {
        table.entries[code as usize] = caps[2].to_string();
      }
    }
    table
  }

  /// Loads a table file from `path`.
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| RipError::open(path, e))?;
    Ok(Self::parse(&String::from_utf8_lossy(&bytes)))
  }

  /// Returns the string for `code`.
  pub fn get(&self, code: u8) -> &str {
    &self.entries[code as usize]
  }

  /// Returns the number of codes that have a non-empty entry.
  pub fn len(&self) -> usize {
    self.entries.iter().filter(|e| !e.is_empty()).count()
  }

  /// Returns whether no code has an entry.
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

impl Default for TextTable {
  fn default() -> Self {
    Self::new()
  }
}

impl FromStr for TextTable {
  type Err = std::convert::Infallible;

  fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
    Ok(Self::parse(s))
  }
}

/// The standard and DTE tables, used together to decode names.
#[derive(Clone, Debug, Default)]
pub struct TextTables {
  /// The single-glyph table.
  pub standard: TextTable,
  /// The glyph-pair table.
  pub dte: TextTable,
  dte_names: bool,
}

impl TextTables {
  /// Combines two tables. Names decode through `standard` only; see
  /// [`with_dte_names`].
  ///
  /// [`with_dte_names`]: #method.with_dte_names
  pub fn new(standard: TextTable, dte: TextTable) -> Self {
    Self {
      standard,
      dte,
      dte_names: false,
    }
  }

  /// Loads both table files.
  pub fn load(
    standard: impl AsRef<Path>,
    dte: impl AsRef<Path>,
  ) -> Result<Self> {
    Ok(Self::new(TextTable::load(standard)?, TextTable::load(dte)?))
  }

  /// Sets whether codes the standard table leaves empty fall back to the DTE
  /// table when decoding.
  pub fn with_dte_names(mut self, enabled: bool) -> Self {
    self.dte_names = enabled;
    self
  }

  /// Returns the display string for a single code.
  pub fn decode_byte(&self, code: u8) -> &str {
    match self.standard.get(code) {
      "" if self.dte_names => self.dte.get(code),
      s => s,
    }
  }

  /// Decodes a run of codes into a string.
  pub fn decode(&self, bytes: &[u8]) -> String {
    bytes.iter().map(|&b| self.decode_byte(b)).collect()
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn parse_entries() {
    let table = TextTable::parse("8A=A\r\n8b=b\nFF= \nC2==\n");
    assert_eq!(table.get(0x8a), "A");
    assert_eq!(table.get(0x8b), "b");
    assert_eq!(table.get(0xff), " ");
    assert_eq!(table.get(0xc2), "=");
    assert_eq!(table.get(0x00), "");
    assert_eq!(table.len(), 4);
  }

  #[test]
  fn malformed_lines_are_skipped() {
    let table = TextTable::parse("garbage\n8=short\nZZ=bad hex\n\n90=K\n");
    assert_eq!(table.len(), 1);
    assert_eq!(table.get(0x90), "K");
  }

  #[test]
  fn later_entries_win() {
    let table = TextTable::parse("8A=A\n8A=X\n");
    assert_eq!(table.get(0x8a), "X");
  }

  #[test]
  fn dte_is_opt_in() {
    let standard = TextTable::parse("8A=A\n");
    let dte = TextTable::parse("1A=er\n8A=zz\n");
    let tables = TextTables::new(standard, dte);
    assert_eq!(tables.decode(&[0x8a, 0x1a, 0x8a]), "AA");

    let tables = tables.with_dte_names(true);
    assert_eq!(tables.decode(&[0x8a, 0x1a, 0x8a]), "AerA");
  }
}

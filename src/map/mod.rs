//! Maps: names, tileset assignments, and run-length encoded layouts.
//!
//! Every map is 64x64 tiles drawn from one of the eight map tilesets, with
//! two palette rows (outdoors and inside rooms) of its own. Identical
//! tileset and palette combinations are shared between maps; see
//! [`tileset`].
//!
//! [`tileset`]: tileset/index.html

pub mod layout;
pub mod tileset;

use crate::rom::layout::MAP_ENTRIES;

/// The name of each map, in ROM order. Layout files are named after these.
pub const MAP_NAMES: [&str; MAP_ENTRIES] = [
  "Coneria",
  "Provoka",
  "Elfland",
  "Melmond",
  "Crescent Lake",
  "Gaia",
  "Onrac",
  "Lefein",
  "Coneria Castle 1F",
  "Elfland Castle",
  "Northwest Castle",
  "Castle of Ordeals 1F",
  "Temple of Fiends",
  "Earth Cave B1",
  "Gurgu Volcano B1",
  "Ice Cave B1",
  "Cardia",
  "Bahamut's Room B1",
  "Waterfall",
  "Dwarf Cave",
  "Matoya's Cave",
  "Sarda's Cave",
  "Marsh Cave B1",
  "Mirage Tower 1F",
  "Coneria Castle 2F",
  "Castle of Ordeal 2F",
  "Castle of Ordeal 3F",
  "Marsh Cave B2",
  "Marsh Cave B3",
  "Earth Cave B2",
  "Earth Cave B3",
  "Earth Cave B4",
  "Earth Cave B5",
  "Gurgu Volcano B2",
  "Gurgu Volcano B3",
  "Gurgu Volcano B4",
  "Gurgu Volcano B5",
  "Ice Cave B2",
  "Ice Cave B3",
  "Bahamut's Room B2",
  "Mirage Tower 2F",
  "Mirage Tower 3F",
  "Sea Shrine B5",
  "Sea Shrine B4",
  "Sea Shrine B3",
  "Sea Shrine B2",
  "Sea Shrine B1",
  "Sky Palace 1F",
  "Sky Palace 2F",
  "Sky Palace 3F",
  "Sky Palace 4F",
  "Sky Palace 5F",
  "Temple of Fiends 1F",
  "Temple of Fiends 2F",
  "Temple of Fiends 3F",
  "Temple of Fiends - Earth",
  "Temple of Fiends - Fire",
  "Temple of Fiends - Water",
  "Temple of Fiends - Air",
  "Temple of Fiends - Chaos",
  "Titan's Tunnel",
];

/// The names given to the distinct tileset sheets, in the order
/// [`tileset::unique_tilesets`] finds them.
///
/// [`tileset::unique_tilesets`]: tileset/fn.unique_tilesets.html
pub const TILESET_NAMES: [&str; 43] = [
  "Town",
  "Castle",
  "Castle (Rooms)",
  "Temple of Fiends",
  "Temple of Fiends (Rooms)",
  "Earth Cave Upper",
  "Earth Cave Upper (Rooms)",
  "Volcano Upper",
  "Volcano Upper (Rooms)",
  "Ice Cave",
  "Ice Cave (Rooms)",
  "Islands",
  "Islands (Rooms)",
  "Waterfall",
  "Waterfall (Rooms)",
  "Dwarf Cave",
  "Dwarf Cave (Rooms)",
  "Matoya's Cave",
  "Matoya's Cave (Rooms)",
  "Sarda's Cave",
  "Sarda's Cave (Rooms)",
  "Marsh Cave Upper",
  "Marsh Cave Upper (Rooms)",
  "Mirage Tower Lower",
  "Mirage Tower Lower (Rooms)",
  "Marsh Cave Lower",
  "Marsh Cave Lower (Rooms)",
  "Earth Cave Lower",
  "Earth Cave Lower (Rooms)",
  "Volcano Lower",
  "Volcano Lower (Rooms)",
  "Mirage Tower Upper",
  "Mirage Tower Upper (Rooms)",
  "Sea Shrine Lower",
  "Sea Shrine Lower (Rooms)",
  "Sea Shrine Upper",
  "Sea Shrine Upper (Rooms)",
  "Sky Palace",
  "Sky Palace (Rooms)",
  "Temple of Fiends Revisited",
  "Temple of Fiends Revisited (Rooms)",
  "Titan's Tunnel",
  "Titan's Tunnel (Rooms)",
];

/// Returns the name of unique tileset sheet `index`.
///
/// Sheets past the end of the name table are numbered instead.
///
/// ```
/// # use ofrip::map::tileset_name;
/// assert_eq!(tileset_name(0), "Town");
/// assert_eq!(tileset_name(50), "Tileset 50");
/// ```
pub fn tileset_name(index: usize) -> String {
  match TILESET_NAMES.get(index) {
    Some(name) => name.to_string(),
    None => format!("Tileset {}", index),
  }
}

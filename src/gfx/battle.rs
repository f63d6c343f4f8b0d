//! Battle graphics: enemy sprites and the five boss sprites.
//!
//! The battle bank is sixteen tilesets of 128 tiles each plus 64 four-color
//! palettes. A regular enemy is a square run of consecutive tiles starting at
//! one of four fixed positions in its battle's tileset. Bosses are bigger,
//! draw their tiles through an explicit pattern table, and pick one of four
//! palettes per 2x2-tile block through an overlay table.

use std::io::Read;
use std::io::Seek;

use crate::gfx::Image;
use crate::gfx::TILE_DIM;
use crate::int::packed_pair;
use crate::palette::NesPalette;
use crate::palette::Rgb;
use crate::rom::layout::*;
use crate::rom::Rom;
use crate::Result;

/// The first tile of each of the four enemy graphics within a tileset.
pub const PIC_BASES: [usize; 4] = [0x12, 0x22, 0x32, 0x56];

const BLANK_TILE: [u8; TILE_SIZE] = [0; TILE_SIZE];

/// Returns the size, in tiles, of the square enemy graphic `pic`.
///
/// Graphics 0 and 1 are small, 2 and 3 large.
pub fn pic_size(pic: u8) -> usize {
  if pic < 2 {
    4
  } else {
    6
  }
}

/// The battle graphics bank.
#[derive(Clone, Debug)]
pub struct BattleGraphics {
  palettes: Vec<[u8; BATTLE_PALETTE_SIZE]>,
  tiles: Vec<u8>,
}

impl BattleGraphics {
  /// Reads the palettes and tilesets out of the ROM.
  pub fn load<R: Read + Seek>(rom: &mut Rom<R>) -> Result<Self> {
    let raw = rom.bytes_at(
      BATTLE_PALETTE_OFFSET,
      BATTLE_PALETTE_ENTRIES * BATTLE_PALETTE_SIZE,
    )?;
    let tiles = rom.bytes_at(
      BATTLE_TILESET_OFFSET,
      BATTLE_TILESET_ENTRIES * BATTLE_TILESET_TILE_ENTRIES * TILE_SIZE,
    )?;
    let palettes = raw
      .chunks_exact(BATTLE_PALETTE_SIZE)
      .map(|p| [p[0], p[1], p[2], p[3]])
      .collect();
    Ok(Self::from_parts(palettes, tiles))
  }

  /// Builds a bank out of already-read palettes and raw tile data.
  pub fn from_parts(
    palettes: Vec<[u8; BATTLE_PALETTE_SIZE]>,
    tiles: Vec<u8>,
  ) -> Self {
    Self { palettes, tiles }
  }

  /// Returns tile `index` of `tileset`.
  ///
  /// Indices past the end of a tileset run on into the next one, as they do
  /// on the console; indices past the end of the bank yield a blank tile.
  pub fn tile(&self, tileset: usize, index: usize) -> &[u8] {
    let start = (tileset * BATTLE_TILESET_TILE_ENTRIES + index) * TILE_SIZE;
    self
      .tiles
      .get(start..start + TILE_SIZE)
      .unwrap_or(&BLANK_TILE)
  }

  /// Resolves battle palette `index` into colors. Unknown palettes are
  /// black.
  pub fn palette(&self, index: usize, nes: &NesPalette) -> [Rgb; 4] {
    match self.palettes.get(index) {
      Some(&p) => nes.resolve(p),
      None => [Rgb::BLACK; 4],
    }
  }

  /// Draws regular enemy graphic `pic` out of `tileset` with battle palette
  /// `palette`.
  pub fn monster_sprite(
    &self,
    nes: &NesPalette,
    tileset: usize,
    palette: usize,
    pic: u8,
  ) -> Image {
    let size = pic_size(pic);
    let base = PIC_BASES[pic as usize & 3];
    let colors = self.palette(palette, nes);

    let mut image = Image::new(size * TILE_DIM, size * TILE_DIM);
    for n in 0..size * size {
      let (x, y) = (n % size, n / size);
      let tile = self.tile(tileset, base + n);
      image.draw_tile(x * TILE_DIM, y * TILE_DIM, tile, &colors);
    }
    image
  }

  /// Draws `boss` out of `tileset`, given its pattern table and the two
  /// battle palettes its overlay selects between.
  ///
  /// Overlay selectors 1 and 2 pick `palette1` and `palette2`; 0 and 3 draw
  /// in black.
  pub fn compose_boss(
    &self,
    nes: &NesPalette,
    tileset: usize,
    (palette1, palette2): (usize, usize),
    boss: Boss,
    pattern: &[u8],
  ) -> Image {
    let layout = boss.layout();
    let palettes = [
      [Rgb::BLACK; 4],
      self.palette(palette1, nes),
      self.palette(palette2, nes),
      [Rgb::BLACK; 4],
    ];

    let mut image =
      Image::new(layout.width * TILE_DIM, layout.height * TILE_DIM);
    for y in 0..layout.height {
      for x in 0..layout.width {
        let block = (y / 2) * (layout.width / 2) + x / 2;
        let select = packed_pair(layout.overlay, block);
        let index = pattern.get(y * layout.width + x).copied().unwrap_or(0);
        let tile = self.tile(tileset, index as usize);
        image.draw_tile(
          x * TILE_DIM,
          y * TILE_DIM,
          tile,
          &palettes[select as usize],
        );
      }
    }
    image
  }
}

/// The geometry and tables of one boss sprite.
#[derive(Copy, Clone, Debug)]
pub struct BossLayout {
  /// Width, in tiles.
  pub width: usize,
  /// Height, in tiles.
  pub height: usize,
  /// Where the pattern table lives in the ROM.
  pub pattern_offset: u64,
  /// One two-bit palette selector per 2x2-tile block, four to a byte, most
  /// significant first.
  pub overlay: &'static [u8],
}

/// A boss with a hand-assembled sprite.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Boss {
  /// The earth fiend.
  Lich,
  /// The fire fiend.
  Kary,
  /// The water fiend.
  Kraken,
  /// The air fiend.
  Tiamat,
  /// The final boss.
  Chaos,
}

const fn fiend(pic: u64, overlay: &'static [u8]) -> BossLayout {
  BossLayout {
    width: 8,
    height: 8,
    pattern_offset: FIEND_PATTERN_TABLE + pic * FIEND_PATTERN_SHIFT,
    overlay,
  }
}

const LICH: BossLayout = fiend(1, &[0x19, 0x15, 0x15, 0x15]);
const KARY: BossLayout = fiend(0, &[0x65, 0x69, 0x55, 0x55]);
const KRAKEN: BossLayout = fiend(2, &[0xaa, 0xaa, 0x56, 0x55]);
const TIAMAT: BossLayout = fiend(3, &[0x6a, 0x5a, 0x56, 0x56]);
const CHAOS: BossLayout = BossLayout {
  width: 14,
  height: 12,
  pattern_offset: CHAOS_PATTERN,
  overlay: &[
    0xa9, 0xaa, 0xaa, 0xaa, 0xaa, 0x95, 0x95, 0x55, 0x55, 0x55, 0x50,
  ],
};

impl Boss {
  /// Every boss, in export order.
  pub const ALL: [Boss; 5] =
    [Boss::Lich, Boss::Kary, Boss::Kraken, Boss::Tiamat, Boss::Chaos];

  /// Returns the boss's name, which is also its sprite's file stem.
  pub fn name(self) -> &'static str {
    match self {
      Boss::Lich => "LICH",
      Boss::Kary => "KARY",
      Boss::Kraken => "KRAKEN",
      Boss::Tiamat => "TIAMAT",
      Boss::Chaos => "CHAOS",
    }
  }

  /// Returns the boss's sprite layout.
  pub fn layout(self) -> BossLayout {
    match self {
      Boss::Lich => LICH,
      Boss::Kary => KARY,
      Boss::Kraken => KRAKEN,
      Boss::Tiamat => TIAMAT,
      Boss::Chaos => CHAOS,
    }
  }

  /// Returns the battle tileset and the two battle palettes the boss is
  /// drawn with.
  pub fn graphics(self) -> (usize, (usize, usize)) {
    match self {
      Boss::Lich => (13, (54, 55)),
      Boss::Kary => (13, (56, 57)),
      Boss::Kraken => (14, (58, 59)),
      Boss::Tiamat => (14, (60, 61)),
      Boss::Chaos => (15, (62, 63)),
    }
  }

  /// Reads the boss's pattern table out of the ROM.
  pub fn read_pattern<R: Read + Seek>(
    self,
    rom: &mut Rom<R>,
  ) -> Result<Vec<u8>> {
    let layout = self.layout();
    rom.bytes_at(layout.pattern_offset, layout.width * layout.height)
  }

  /// Reads the boss's pattern and draws it with its usual tileset and
  /// palettes.
  pub fn sprite<R: Read + Seek>(
    self,
    rom: &mut Rom<R>,
    bank: &BattleGraphics,
    nes: &NesPalette,
  ) -> Result<Image> {
    let pattern = self.read_pattern(rom)?;
    let (tileset, palettes) = self.graphics();
    Ok(bank.compose_boss(nes, tileset, palettes, self, &pattern))
  }
}

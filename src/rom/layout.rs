//! Where everything lives in the image.
//!
//! Offsets are absolute file offsets, including the 16-byte iNES header.
//! Sizes are in bytes; counts are in records.

#![allow(missing_docs)]

/// The size of the complete image: 256 KiB of PRG-ROM plus the header.
pub const IMAGE_LEN: usize = 0x4_0010;

/// The number of elements the game knows about.
pub const NUM_ELEMENTS: usize = 8;
/// The number of character classes.
pub const NUM_JOBS: usize = 12;

// Monsters.
pub const MONSTER_OFFSET: u64 = 0x3_0530;
pub const MONSTER_SIZE: usize = 20;
pub const MONSTER_ENTRIES: usize = 128;
/// The last entries of the monster table are bosses, drawn separately.
pub const MONSTER_BOSS_ENTRIES: usize = 9;
pub const MONSTER_TEXT_PTR_TABLE_OFFSET: u64 = 0x2_D4F0;
pub const MONSTER_TEXT_BASE: u64 = 0x2_4010;

// Weapons.
pub const WEAPON_OFFSET: u64 = 0x3_0010;
pub const WEAPON_PERMS_OFFSET: u64 = 0x3_BF60;
pub const WEAPON_PRICE_OFFSET: u64 = 0x3_7C48;
pub const WEAPON_SIZE: usize = 8;
pub const WEAPON_ENTRIES: usize = 40;
pub const WEAPON_TEXT_PTR_TABLE_OFFSET: u64 = 0x2_B748;
pub const WEAPON_TEXT_BASE: u64 = 0x2_0010;

// Armor.
pub const ARMOR_OFFSET: u64 = 0x3_0150;
pub const ARMOR_PERMS_OFFSET: u64 = 0x3_BFB0;
pub const ARMOR_PRICE_OFFSET: u64 = 0x3_7C98;
pub const ARMOR_SIZE: usize = 4;
pub const ARMOR_ENTRIES: usize = 40;
pub const ARMOR_TEXT_PTR_TABLE_OFFSET: u64 = 0x2_B798;
pub const ARMOR_TEXT_BASE: u64 = 0x2_0010;

// Spells and enemy abilities.
pub const SPELL_OFFSET: u64 = 0x3_01F0;
pub const SPELL_PRICE_OFFSET: u64 = 0x3_7D70;
pub const SPELL_PERMS_OFFSET: u64 = 0x3_AD28;
pub const SPELL_SIZE: usize = 8;
pub const SPELL_ENTRIES: usize = 64;
/// One bit per spell, per class.
pub const SPELL_PERMS_SIZE: usize = SPELL_ENTRIES / 8;
pub const SPELL_PERMS_ENTRIES: usize = NUM_JOBS;
/// Spells sit in the shared item name table, after the gold pseudo-items.
pub const SPELL_TEXT_PTR_TABLE_OFFSET: u64 = 0x2_B870;
pub const SPELL_TEXT_BASE: u64 = 0x2_0010;
pub const SPELLS_PER_LEVEL: usize = 8;
pub const ABIL_OFFSET: u64 = 0x3_0400;
pub const ABIL_SIZE: usize = 8;
pub const ABIL_ENTRIES: usize = 26;

// Battles.
pub const BATTLE_OFFSET: u64 = 0x2_C410;
pub const BATTLE_SIZE: usize = 16;
pub const BATTLE_ENTRIES: usize = 128;

// Battle graphics.
pub const BATTLE_TILESET_OFFSET: u64 = 0x1_C010;
pub const BATTLE_TILESET_ENTRIES: usize = 16;
pub const BATTLE_TILESET_TILE_ENTRIES: usize = 128;
/// 8x8 pixels at two bits per pixel.
pub const TILE_SIZE: usize = 16;
pub const BATTLE_PALETTE_OFFSET: u64 = 0x3_0F30;
pub const BATTLE_PALETTE_ENTRIES: usize = 64;
pub const BATTLE_PALETTE_SIZE: usize = 4;

// Boss patterns.
pub const FIEND_PATTERN_TABLE: u64 = 0x2_D2F0;
pub const FIEND_PATTERN_SHIFT: u64 = 0x50;
pub const CHAOS_PATTERN: u64 = 0x2_D430;

// Map graphics.
pub const MAP_TILESET_OFFSET: u64 = 0xC010;
pub const MAP_TILESET_ENTRIES: usize = 8;
pub const MAP_TILESET_TILE_ENTRIES: usize = 128;
pub const MAP_TILESET_ASSIGNMENT_OFFSET: u64 = 0x2CD0;
pub const MAP_ENTRIES: usize = 61;
/// Each map has three palettes: standard, inside-room, and sprites.
pub const MAP_PALETTE_ENTRIES: usize = MAP_ENTRIES * 3;
pub const MAP_PALETTE_OFFSET: u64 = 0x2010;
pub const MAP_PALETTE_SIZE: usize = 16;
pub const MAP_TILESET_PATTERN_OFFSET: u64 = 0x1010;
pub const MAP_TILESET_PATTERN_ENTRIES: usize = 128;
pub const MAP_TILESET_PATTERN_SIZE: usize = 4;
pub const MAP_TILESET_PALETTE_ASSIGNMENT_OFFSET: u64 = 0x410;

// Map layouts.
/// The first 122 bytes are two-byte pointers to the maps, relative to here.
pub const MAP_OFFSET: u64 = 0x1_0010;
pub const MAP_WIDTH: usize = 64;
pub const MAP_HEIGHT: usize = 64;

/// The number of entries in the master palette.
pub const NES_PALETTE_ENTRIES: usize = 64;

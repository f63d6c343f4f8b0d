//! Integer helpers for packed ROM fields.
//!
//! The game's tables squeeze several small values into single bytes: nibble
//! pairs, four two-bit selectors, or one-bit flags. This module provides the
//! handful of unpacking primitives the decoders share, so that each decoder
//! reads like the byte layout it implements.

/// Splits a byte into its `(high, low)` nibbles.
///
/// ```
/// # use ofrip::int::nibbles;
/// assert_eq!(nibbles(0x37), (3, 7));
/// assert_eq!(nibbles(0xf0), (15, 0));
/// ```
#[inline]
pub const fn nibbles(byte: u8) -> (u8, u8) {
  (byte >> 4, byte & 0x0f)
}

/// Reads a little-endian `u16` out of the first two bytes of `bytes`.
///
/// Panics if `bytes` is shorter than two bytes.
#[inline]
pub fn le_u16(bytes: &[u8]) -> u16 {
  u16::from_le_bytes([bytes[0], bytes[1]])
}

/// Returns whether bit `bit` of `value` is set.
#[inline]
pub const fn bit(value: u32, bit: u32) -> bool {
  value >> bit & 1 != 0
}

/// Unpacks the four two-bit fields of `byte`, least-significant field first.
///
/// ```
/// # use ofrip::int::pairs_lsb_first;
/// assert_eq!(pairs_lsb_first(0b11_10_01_00), [0, 1, 2, 3]);
/// ```
#[inline]
pub fn pairs_lsb_first(byte: u8) -> [u8; 4] {
  let mut pairs = [0; 4];
  for (i, pair) in pairs.iter_mut().enumerate() {
    *pair = byte >> (2 * i) & 3;
  }
  pairs
}

/// Unpacks the four two-bit fields of `byte`, least-significant field first,
/// with the two bits of every field swapped.
///
/// This is the same as reading the whole byte with its bit order reversed,
/// then unpacking most-significant field first.
///
/// ```
/// # use ofrip::int::pairs_reversed;
/// assert_eq!(pairs_reversed(0b00_00_00_01), [2, 0, 0, 0]);
/// assert_eq!(pairs_reversed(0b10_00_00_00), [0, 0, 0, 1]);
/// ```
#[inline]
pub fn pairs_reversed(byte: u8) -> [u8; 4] {
  let mut pairs = [0; 4];
  for (i, pair) in pairs.iter_mut().enumerate() {
    let lo = byte >> (2 * i) & 1;
    let hi = byte >> (2 * i + 1) & 1;
    *pair = lo << 1 | hi;
  }
  pairs
}

/// Extracts the `index`th two-bit selector from `table`, where each byte
/// holds four selectors, most-significant first.
///
/// Panics if `index / 4` is out of bounds for `table`.
///
/// ```
/// # use ofrip::int::packed_pair;
/// let table = [0b00_01_10_11, 0b11_00_00_00];
/// assert_eq!(packed_pair(&table, 0), 0);
/// assert_eq!(packed_pair(&table, 3), 3);
/// assert_eq!(packed_pair(&table, 4), 3);
/// ```
#[inline]
pub fn packed_pair(table: &[u8], index: usize) -> u8 {
  table[index / 4] >> (2 * (3 - index % 4)) & 3
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn reversed_pairs_match_full_bit_reversal() {
    for byte in 0..=255u8 {
      let rev = byte.reverse_bits();
      let msb_first = [rev >> 6 & 3, rev >> 4 & 3, rev >> 2 & 3, rev & 3];
      assert_eq!(pairs_reversed(byte), msb_first, "byte {:#04x}", byte);
    }
  }

  #[test]
  fn bits() {
    assert!(bit(0b100, 2));
    assert!(!bit(0b100, 1));
    assert!(bit(0x800, 11));
  }

  #[test]
  fn le_words() {
    assert_eq!(le_u16(&[0x34, 0x12]), 0x1234);
    assert_eq!(le_u16(&[0xff, 0x00, 0x77]), 0x00ff);
  }
}

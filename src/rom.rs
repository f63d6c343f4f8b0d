//! Random access to the game's ROM image.
//!
//! Nothing in the image is self-describing: every table lives at a fixed
//! byte offset, listed in [`layout`]. A [`Rom`] wraps the open image and
//! performs every read as an explicit seek followed by a read, so no
//! decoder ever depends on where a previous one left the stream.
//!
//! [`layout`]: layout/index.html
//! [`Rom`]: struct.Rom.html

use std::fs::File;
use std::io;
use std::io::BufReader;
use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;
use std::path::Path;

use crate::error::RipError;
use crate::text::TextTables;
use crate::Result;

pub mod layout;

/// An open ROM image.
///
/// `R` is usually a buffered file, but any seekable reader will do; the tests
/// use in-memory cursors. Reads take `&mut self`, which keeps each seek and
/// its read together.
#[derive(Debug)]
pub struct Rom<R> {
  inner: R,
}

impl Rom<BufReader<File>> {
  /// Opens the ROM image at `path`.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| RipError::open(path, e))?;
    Ok(Self::new(BufReader::new(file)))
  }
}

impl<R: Read + Seek> Rom<R> {
  /// Wraps an already-open image.
  pub fn new(inner: R) -> Self {
    Self { inner }
  }

  /// Fills `buf` with the bytes starting at the absolute offset `offset`.
  pub fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<()> {
    let len = buf.len();
    let inner = &mut self.inner;
    inner
      .seek(SeekFrom::Start(offset))
      .and_then(|_| inner.read_exact(buf))
      .map_err(|e| RipError::read(offset, len, e))
  }

  /// Reads `len` bytes starting at `offset`.
  pub fn bytes_at(&mut self, offset: u64, len: usize) -> Result<Vec<u8>> {
    let mut buf = vec![0; len];
    self.read_at(offset, &mut buf)?;
    Ok(buf)
  }

  /// Reads the byte at `offset`.
  pub fn u8_at(&mut self, offset: u64) -> Result<u8> {
    let mut buf = [0];
    self.read_at(offset, &mut buf)?;
    Ok(buf[0])
  }

  /// Reads a table of `count` little-endian words starting at `offset`.
  pub fn u16_table(&mut self, offset: u64, count: usize) -> Result<Vec<u16>> {
    let bytes = self.bytes_at(offset, count * 2)?;
    Ok(
      bytes
        .chunks_exact(2)
        .map(|w| u16::from_le_bytes([w[0], w[1]]))
        .collect(),
    )
  }

  /// Decodes the zero-terminated string starting at `offset` through `text`.
  pub fn string_at(
    &mut self,
    offset: u64,
    text: &TextTables,
  ) -> Result<String> {
    let mut raw = Vec::new();
    let reader = self.reader_at(offset)?;
    for byte in reader.bytes() {
      let byte = byte.map_err(|e| RipError::read(offset, 0, e))?;
      if byte == 0 {
        return Ok(text.decode(&raw));
      }
      raw.push(byte);
    }

    Err(RipError::read(
      offset,
      0,
      io::Error::new(io::ErrorKind::UnexpectedEof, "unterminated string"),
    ))
  }

  /// Seeks to `offset` and hands out the underlying reader, for decoders that
  /// consume a stream of unknown length.
  pub fn reader_at(&mut self, offset: u64) -> Result<&mut R> {
    self
      .inner
      .seek(SeekFrom::Start(offset))
      .map_err(|e| RipError::read(offset, 0, e))?;
    Ok(&mut self.inner)
  }

  /// Consumes this `Rom`, returning the underlying reader.
  pub fn into_inner(self) -> R {
    self.inner
  }
}

#[cfg(test)]
pub(crate) mod test {
  use super::*;
  use std::io::Cursor;

  /// Builds an image large enough to hold every table, zero-filled.
  pub fn blank_image() -> Vec<u8> {
    vec![0; layout::IMAGE_LEN]
  }

  /// Copies `bytes` into `image` at `offset`.
  pub fn poke(image: &mut [u8], offset: u64, bytes: &[u8]) {
    let offset = offset as usize;
    image[offset..offset + bytes.len()].copy_from_slice(bytes);
  }

  #[test]
  fn words_are_little_endian() {
    let mut rom = Rom::new(Cursor::new(vec![0, 0x34, 0x12, 0xcd, 0xab]));
    assert_eq!(rom.u16_table(1, 2).unwrap(), vec![0x1234, 0xabcd]);
    assert_eq!(rom.u8_at(4).unwrap(), 0xab);
  }

  #[test]
  fn reads_do_not_depend_on_stream_position() {
    let mut rom = Rom::new(Cursor::new((0..=255u8).collect::<Vec<_>>()));
    assert_eq!(rom.bytes_at(200, 2).unwrap(), vec![200, 201]);
    assert_eq!(rom.bytes_at(10, 2).unwrap(), vec![10, 11]);
    assert_eq!(rom.u8_at(200).unwrap(), 200);
  }

  #[test]
  fn reading_past_the_end_fails() {
    let mut rom = Rom::new(Cursor::new(vec![0; 16]));
    match rom.bytes_at(12, 8) {
      Err(RipError::Read { offset, len, .. }) => {
        assert_eq!((offset, len), (12, 8))
      }
      other => panic!("expected a read error, got {:?}", other),
    }
  }

  #[test]
  fn strings_stop_at_zero() {
    let text = TextTables::new(
      "8A=A\n8B=B\nFF= \n".parse().unwrap(),
      Default::default(),
    );
    let mut rom =
      Rom::new(Cursor::new(vec![0x99, 0x8a, 0xff, 0x8b, 0x00, 0x8a]));
    assert_eq!(rom.string_at(1, &text).unwrap(), "A B");
    assert!(rom.string_at(5, &text).is_err());
  }
}

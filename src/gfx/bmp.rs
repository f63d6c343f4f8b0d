//! Uncompressed 24-bit Windows bitmaps.
//!
//! Only the one flavor of bitmap this crate writes is supported: a 14-byte
//! file header, a 40-byte `BITMAPINFOHEADER`, and bottom-up rows of
//! blue-green-red pixels, each row padded to a multiple of four bytes.

use std::fs::File;
use std::io;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::path::Path;

use crate::error::RipError;
use crate::gfx::Image;
use crate::palette::Rgb;
use crate::Result;

/// The `BM` signature, read as a little-endian word.
pub const SIGNATURE: u16 = 19778;
/// The combined size of both headers, which is also the pixel data offset.
pub const HEADER_LEN: usize = 14 + 40;

fn stride(width: usize) -> usize {
  (3 * width + 3) & !3
}

/// Writes `image` as a bitmap file into `w`.
pub fn write(mut w: impl Write, image: &Image) -> io::Result<()> {
  let stride = stride(image.width());
  let data_len = (stride * image.height()) as u32;

  let mut header = Vec::with_capacity(HEADER_LEN);
  header.extend_from_slice(&SIGNATURE.to_le_bytes());
  header.extend_from_slice(&(HEADER_LEN as u32 + data_len).to_le_bytes());
  header.extend_from_slice(&0u32.to_le_bytes());
  header.extend_from_slice(&(HEADER_LEN as u32).to_le_bytes());

  header.extend_from_slice(&40u32.to_le_bytes());
  header.extend_from_slice(&(image.width() as i32).to_le_bytes());
  header.extend_from_slice(&(image.height() as i32).to_le_bytes());
  header.extend_from_slice(&1u16.to_le_bytes());
  header.extend_from_slice(&24u16.to_le_bytes());
  header.extend_from_slice(&0u32.to_le_bytes());
  header.extend_from_slice(&data_len.to_le_bytes());
  // Resolution, palette size and important color count.
  header.extend_from_slice(&[0; 16]);
  w.write_all(&header)?;

  let mut row = Vec::with_capacity(stride);
  for y in (0..image.height()).rev() {
    row.clear();
    for px in image.row(y) {
      row.extend_from_slice(&[px.b, px.g, px.r]);
    }
    row.resize(stride, 0);
    w.write_all(&row)?;
  }
  Ok(())
}

/// Encodes `image` into an in-memory bitmap file.
pub fn encode(image: &Image) -> Vec<u8> {
  let len = HEADER_LEN + stride(image.width()) * image.height();
  let mut out = Vec::with_capacity(len);
  // Writing into a Vec never fails.
  let _ = write(&mut out, image);
  out
}

fn invalid(msg: &str) -> io::Error {
  io::Error::new(io::ErrorKind::InvalidData, msg.to_string())
}

fn u16_at(bytes: &[u8], at: usize) -> u16 {
  u16::from_le_bytes([bytes[at], bytes[at + 1]])
}

fn i32_at(bytes: &[u8], at: usize) -> i32 {
  i32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

/// Reads a bitmap file written by [`write`].
///
/// Rows stored top-down, flagged by a negative height, are accepted too.
///
/// [`write`]: fn.write.html
pub fn read(mut r: impl Read) -> io::Result<Image> {
  let mut bytes = Vec::new();
  r.read_to_end(&mut bytes)?;
  if bytes.len() < HEADER_LEN {
    return Err(invalid("truncated bitmap header"));
  }
  if u16_at(&bytes, 0) != SIGNATURE {
    return Err(invalid("not a bitmap"));
  }
  if u16_at(&bytes, 28) != 24 || i32_at(&bytes, 30) != 0 {
    return Err(invalid("only uncompressed 24-bit bitmaps are supported"));
  }

  let offset = i32_at(&bytes, 10);
  let width = i32_at(&bytes, 18);
  let height = i32_at(&bytes, 22);
  if offset < 0 {
    return Err(invalid("negative pixel data offset"));
  }
  if width < 0 {
    return Err(invalid("negative bitmap width"));
  }
  let offset = offset as usize;
  let width = width as usize;
  let rows = height.unsigned_abs() as usize;
  let bottom_up = height > 0;

  let stride = stride(width);
  let data = stride
    .checked_mul(rows)
    .and_then(|len| offset.checked_add(len))
    .and_then(|end| bytes.get(offset..end))
    .ok_or_else(|| invalid("truncated bitmap pixel data"))?;

  let mut pixels = Vec::with_capacity(width * rows);
  for y in 0..rows {
    let stored = if bottom_up { rows - 1 - y } else { y };
    let row = &data[stored * stride..stored * stride + 3 * width];
    pixels.extend(
      row
        .chunks_exact(3)
        .map(|bgr| Rgb::new(bgr[2], bgr[1], bgr[0])),
    );
  }

  Image::from_pixels(width, rows, pixels)
    .ok_or_else(|| invalid("bad bitmap size"))
}

/// Writes `image` to a new bitmap file at `path`.
pub fn save(path: impl AsRef<Path>, image: &Image) -> Result<()> {
  let path = path.as_ref();
  let file = File::create(path).map_err(|e| RipError::create(path, e))?;
  let mut w = BufWriter::new(file);
  write(&mut w, image)
    .and_then(|_| w.flush())
    .map_err(|e| RipError::create(path, e))
}

/// Reads the bitmap file at `path`.
pub fn load(path: impl AsRef<Path>) -> Result<Image> {
  let path = path.as_ref();
  let file = File::open(path).map_err(|e| RipError::open(path, e))?;
  read(io::BufReader::new(file)).map_err(|e| RipError::open(path, e))
}

//! From the PNG spec:
//!
//! > Filters are applied to **bytes**, not to pixels, regardless of the bit
//! > depth or color type of the image.
//!
//! With 8-bit RGB the "corresponding byte of the pixel to the left" is always
//! exactly 3 bytes back.

use super::*;

use crate::RGB_CHANNELS;

/// The filter type byte at the start of each scanline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum FilterType {
  None = 0,
  Sub = 1,
  Up = 2,
  Average = 3,
  Paeth = 4,
}
impl TryFrom<u8> for FilterType {
  type Error = u8;
  #[inline]
  fn try_from(value: u8) -> Result<Self, Self::Error> {
    Ok(match value {
      0 => Self::None,
      1 => Self::Sub,
      2 => Self::Up,
      3 => Self::Average,
      4 => Self::Paeth,
      other => return Err(other),
    })
  }
}

/// Reverses the per-line filtering of decompressed image data.
///
/// `filtered` must be exactly `height * (width * 3 + 1)` bytes: each line is a
/// filter type byte followed by `width * 3` filtered bytes. The output is the
/// plain RGB data, `height * width * 3` bytes, with the filter bytes gone.
///
/// Lines are reconstructed top to bottom and left to right, and every
/// reference byte (left, up, up-left) is read from the already reconstructed
/// output, never from the filtered input. Missing references at the top line
/// or left edge count as 0.
///
/// ## Failure
/// * [`FormatError::DecompressedLength`] if `filtered` is the wrong size.
/// * [`FormatError::IllegalFilterType`] if a line's filter byte isn't `0..=4`.
pub fn unfilter_scanlines(filtered: &[u8], width: u32, height: u32) -> PngResult<Vec<u8>> {
  let ihdr = IHDR::rgb8(width, height)?;
  let expected = ihdr.filtered_len()?;
  if filtered.len() != expected {
    return Err(FormatError::DecompressedLength { expected, actual: filtered.len() }.into());
  }
  let stride = ihdr.bytes_per_scanline();
  let mut out = vec![0_u8; stride * (height as usize)];
  let mut prev_line: &[u8] = &[];
  let mut rest: &mut [u8] = &mut out;
  for (y, filtered_line) in filtered.chunks_exact(stride + 1).enumerate() {
    let (filter_byte, line) = filtered_line.split_at(1);
    let filter = FilterType::try_from(filter_byte[0])
      .map_err(|bad| FormatError::IllegalFilterType(bad, y))?;
    let (out_line, more) = core::mem::take(&mut rest).split_at_mut(stride);
    unfilter_line(filter, line, prev_line, out_line);
    prev_line = out_line;
    rest = more;
  }
  Ok(out)
}

/// Reconstructs one line.
///
/// * `prev` is the reconstructed line above, or empty for the first line.
/// * `out` gets the reconstructed bytes and must be the same length as
///   `line`.
fn unfilter_line(filter: FilterType, line: &[u8], prev: &[u8], out: &mut [u8]) {
  debug_assert_eq!(line.len(), out.len());
  debug_assert!(prev.is_empty() || prev.len() == out.len());
  let up = |i: usize| prev.get(i).copied().unwrap_or(0);
  for i in 0..line.len() {
    let fx = line[i];
    let (a, c) = if i >= RGB_CHANNELS {
      (out[i - RGB_CHANNELS], up(i - RGB_CHANNELS))
    } else {
      (0, 0)
    };
    let b = up(i);
    out[i] = match filter {
      FilterType::None => fx,
      FilterType::Sub => reconstruct_sub(fx, a),
      FilterType::Up => reconstruct_up(fx, b),
      FilterType::Average => reconstruct_average(fx, a, b),
      FilterType::Paeth => reconstruct_paeth(fx, a, b, c),
    };
  }
}

/// Reconstruct Filter Type 1
///
/// * `fx` filtered X
/// * `ra` reconstructed `a`: the corresponding byte from the pixel to the
///   left of this pixel (or 0 for the leftmost pixel)
#[inline]
#[must_use]
const fn reconstruct_sub(fx: u8, ra: u8) -> u8 {
  fx.wrapping_add(ra)
}

/// Reconstruct Filter Type 2
///
/// * `fx` filtered X
/// * `rb` reconstructed `b`: The byte corresponding to this byte within the
///   previous scanline.
#[inline]
#[must_use]
const fn reconstruct_up(fx: u8, rb: u8) -> u8 {
  fx.wrapping_add(rb)
}

/// Reconstruct Filter Type 3
///
/// The average is taken without overflow, then added with wrapping.
#[inline]
#[must_use]
const fn reconstruct_average(fx: u8, ra: u8, rb: u8) -> u8 {
  fx.wrapping_add(((ra as u16 + rb as u16) / 2) as u8)
}

/// Reconstruct Filter Type 4
///
/// * `rc` reconstructed `c`: the byte up and to the left of this byte.
#[inline]
#[must_use]
const fn reconstruct_paeth(fx: u8, ra: u8, rb: u8, rc: u8) -> u8 {
  fx.wrapping_add(paeth_predictor(ra, rb, rc))
}

/// The Paeth filter function computes a simple linear function of the three
/// neighboring pixels (left `a`, above `b`, upper left `c`).
///
/// The output is the "predictor" of the neighboring pixel closest to the
/// computed value.
#[inline]
#[must_use]
pub const fn paeth_predictor(a: u8, b: u8, c: u8) -> u8 {
  // Note: the PNG standard says "The calculations within the PaethPredictor
  // function shall be performed exactly, without overflow.", so we use i32 math
  // here, which is wide enough to never give us trouble no matter what the u8
  // input values are.
  let a_ = a as i32;
  let b_ = b as i32;
  let c_ = c as i32;
  let p = a_ + b_ - c_;
  let pa = (p - a_).abs();
  let pb = (p - b_).abs();
  let pc = (p - c_).abs();
  // the order of these tests is part of the format and must not change.
  if pa <= pb && pa <= pc {
    a
  } else if pb <= pc {
    b
  } else {
    c
  }
}

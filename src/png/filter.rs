use super::*;

use crate::RGB_CHANNELS;

/// Filters an image's pixel data for compression, using
/// [`FilterType::None`] on every line.
///
/// The output is `height * (width * 3 + 1)` bytes: each line is a `0` byte
/// followed by that line's RGB bytes, unchanged. Skipping adaptive filter
/// selection costs a little compression but keeps the output deterministic.
#[inline]
pub fn filter_scanlines(image: &Image) -> PngResult<Vec<u8>> {
  filter_scanlines_with(image, FilterType::None)
}

/// Filters an image's pixel data, using the given filter type on every line.
///
/// Any decoder must accept all five filter types, so the choice here never
/// affects what [`unfilter_scanlines`] gives back.
///
/// ## Failure
/// * [`PngError::SizeMismatch`] if the image's pixel buffer is the wrong
///   length.
/// * [`FormatError::ZeroDimensions`] if either dimension is 0.
pub fn filter_scanlines_with(image: &Image, filter: FilterType) -> PngResult<Vec<u8>> {
  image.check_len()?;
  let ihdr = IHDR::rgb8(image.width, image.height)?;
  let stride = ihdr.bytes_per_scanline();
  let mut out = Vec::with_capacity(ihdr.filtered_len()?);
  let mut prev: &[u8] = &[];
  for line in image.pixels.chunks_exact(stride) {
    out.push(filter as u8);
    match filter {
      FilterType::None => out.extend_from_slice(line),
      _ => out.extend((0..line.len()).map(|i| filter_byte(filter, line, prev, i))),
    }
    prev = line;
  }
  Ok(out)
}

/// Filters byte `i` of `line`, with `prev` being the line above (or empty for
/// the top line).
#[inline]
fn filter_byte(filter: FilterType, line: &[u8], prev: &[u8], i: usize) -> u8 {
  let up = |i: usize| prev.get(i).copied().unwrap_or(0);
  let x = line[i];
  let (a, c) = if i >= RGB_CHANNELS { (line[i - RGB_CHANNELS], up(i - RGB_CHANNELS)) } else { (0, 0) };
  let b = up(i);
  match filter {
    FilterType::None => x,
    FilterType::Sub => x.wrapping_sub(a),
    FilterType::Up => x.wrapping_sub(b),
    FilterType::Average => x.wrapping_sub(((a as u16 + b as u16) / 2) as u8),
    FilterType::Paeth => x.wrapping_sub(paeth_predictor(a, b, c)),
  }
}

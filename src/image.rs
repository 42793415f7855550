//! Provides the heap-allocated RGB image type.

use crate::{PngError, PngResult};

/// Bytes per pixel: one each for red, green, and blue.
pub const RGB_CHANNELS: usize = 3;

/// Converts an `(x,y)` position within a given `width` 2D space into a linear
/// pixel index.
///
/// Multiply by [`RGB_CHANNELS`] to get the byte index into an image's pixels.
#[inline]
#[must_use]
pub const fn xy_width_to_index(x: u32, y: u32, width: u32) -> usize {
  (y as usize) * (width as usize) + (x as usize)
}

/// Computes `width * height * 3`, or `None` on overflow.
#[inline]
#[must_use]
pub const fn rgb_byte_len(width: u32, height: u32) -> Option<usize> {
  match (width as usize).checked_mul(height as usize) {
    Some(px) => px.checked_mul(RGB_CHANNELS),
    None => None,
  }
}

/// An 8-bit RGB image, rows stored top to bottom.
///
/// The pixel data should always have `width * height * 3` bytes. The fields
/// are public so that callers can build images however they like, which means
/// the length is checked again by anything that consumes an image
/// ([`encode`](crate::png::encode) and [`composite`](crate::composite)).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub struct Image {
  pub width: u32,
  pub height: u32,
  pub pixels: Vec<u8>,
}
impl Image {
  /// Makes an image from existing pixel bytes.
  ///
  /// ## Failure
  /// * If `pixels.len()` isn't exactly `width * height * 3`.
  #[inline]
  pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> PngResult<Self> {
    let image = Self { width, height, pixels };
    image.check_len()?;
    Ok(image)
  }

  /// Makes an image with every pixel set to `rgb`.
  ///
  /// ## Panics
  /// * If `width * height * 3` overflows `usize`.
  #[inline]
  #[must_use]
  pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Self {
    let Some(len) = rgb_byte_len(width, height) else {
      panic!("image dimensions {width}x{height} are too large");
    };
    let pixels = rgb.iter().copied().cycle().take(len).collect();
    Self { width, height, pixels }
  }

  /// The number of pixel bytes the dimensions call for.
  #[inline]
  #[must_use]
  pub fn expected_len(&self) -> usize {
    rgb_byte_len(self.width, self.height).unwrap_or(usize::MAX)
  }

  /// Errors with [`PngError::SizeMismatch`] if the pixel buffer is the wrong
  /// length for the dimensions.
  #[inline]
  pub fn check_len(&self) -> PngResult<()> {
    let expected = self.expected_len();
    if self.pixels.len() == expected {
      Ok(())
    } else {
      Err(PngError::SizeMismatch { expected, actual: self.pixels.len() })
    }
  }

  /// Gets the pixel at the position, or `None` if the position is out of
  /// bounds.
  #[inline]
  #[must_use]
  pub fn get(&self, x: u32, y: u32) -> Option<[u8; 3]> {
    if x < self.width && y < self.height {
      let i = xy_width_to_index(x, y, self.width);
      self.rgb_pixels().get(i).copied()
    } else {
      None
    }
  }

  /// Gets the pixel at the position mutably, or `None` if the position is out
  /// of bounds.
  #[inline]
  #[must_use]
  pub fn get_mut(&mut self, x: u32, y: u32) -> Option<&mut [u8; 3]> {
    if x < self.width && y < self.height {
      let i = xy_width_to_index(x, y, self.width);
      self.rgb_pixels_mut().get_mut(i)
    } else {
      None
    }
  }

  /// Views the pixel bytes as `[r, g, b]` triples.
  ///
  /// A trailing partial pixel (only possible if the length invariant was
  /// broken) is left out.
  #[inline]
  #[must_use]
  pub fn rgb_pixels(&self) -> &[[u8; 3]] {
    let whole = self.pixels.len() - self.pixels.len() % RGB_CHANNELS;
    bytemuck::cast_slice(&self.pixels[..whole])
  }

  /// Views the pixel bytes as mutable `[r, g, b]` triples.
  #[inline]
  #[must_use]
  pub fn rgb_pixels_mut(&mut self) -> &mut [[u8; 3]] {
    let whole = self.pixels.len() - self.pixels.len() % RGB_CHANNELS;
    bytemuck::cast_slice_mut(&mut self.pixels[..whole])
  }

  /// Iterates the rows of pixel bytes, top to bottom.
  #[inline]
  pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
    self.pixels.chunks_exact((self.width as usize * RGB_CHANNELS).max(1))
  }
}

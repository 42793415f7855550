use super::*;

use crate::RGB_CHANNELS;

/// The types of color that PNG defines.
///
/// Only [`PngColorType::RGB`] can actually be decoded, the rest exist so that
/// errors can say what was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum PngColorType {
  /// Greyscale
  Y = 0,
  /// Red, Green, Blue
  RGB = 2,
  /// Index into a palette.
  Index = 3,
  /// Greyscale + Alpha
  YA = 4,
  /// Red, Green, Blue, Alpha
  RGBA = 6,
}
impl TryFrom<u8> for PngColorType {
  type Error = UnsupportedFeature;
  #[inline]
  fn try_from(value: u8) -> Result<Self, Self::Error> {
    Ok(match value {
      0 => PngColorType::Y,
      2 => PngColorType::RGB,
      3 => PngColorType::Index,
      4 => PngColorType::YA,
      6 => PngColorType::RGBA,
      other => return Err(UnsupportedFeature::UnknownColorType(other)),
    })
  }
}

/// Image Header
///
/// A successfully parsed header always describes a non-empty 8-bit RGB image
/// that isn't interlaced, since nothing else can be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IHDR {
  /// width in pixels
  pub width: u32,
  /// height in pixels
  pub height: u32,
  /// bits per channel
  pub bit_depth: u8,
  /// pixel color type
  pub color_type: PngColorType,
  /// if the image data is stored interlaced.
  pub is_interlaced: bool,
}
impl IHDR {
  /// The size of the chunk data.
  pub const LEN: usize = 13;

  /// A header for an 8-bit RGB image of the given size.
  ///
  /// ## Failure
  /// * If either dimension is 0.
  #[inline]
  pub const fn rgb8(width: u32, height: u32) -> Result<Self, FormatError> {
    if width == 0 || height == 0 {
      return Err(FormatError::ZeroDimensions { width, height });
    }
    Ok(Self { width, height, bit_depth: 8, color_type: PngColorType::RGB, is_interlaced: false })
  }

  /// Bytes of pixel data per line, not counting the filter byte.
  #[inline]
  #[must_use]
  pub const fn bytes_per_scanline(&self) -> usize {
    (self.width as usize) * RGB_CHANNELS
  }

  /// The exact size of the decompressed (still filtered) image data: each
  /// line has one filter type byte and then the pixel bytes.
  #[inline]
  pub const fn filtered_len(&self) -> Result<usize, FormatError> {
    let too_large = FormatError::DimensionsTooLarge { width: self.width, height: self.height };
    let per_line = match (self.width as usize).checked_mul(RGB_CHANNELS) {
      Some(bytes) => bytes + 1,
      None => return Err(too_large),
    };
    match per_line.checked_mul(self.height as usize) {
      Some(total) => Ok(total),
      None => Err(too_large),
    }
  }

  /// The chunk data for this header.
  ///
  /// Compression method and filter method are always written as 0, which is
  /// the only value PNG defines for each.
  #[inline]
  #[must_use]
  pub const fn to_bytes(&self) -> [u8; Self::LEN] {
    let [w0, w1, w2, w3] = self.width.to_be_bytes();
    let [h0, h1, h2, h3] = self.height.to_be_bytes();
    [
      w0,
      w1,
      w2,
      w3,
      h0,
      h1,
      h2,
      h3,
      self.bit_depth,
      self.color_type as u8,
      0,
      0,
      self.is_interlaced as u8,
    ]
  }
}
impl TryFrom<&[u8]> for IHDR {
  type Error = PngError;
  /// Parses `IHDR` chunk data.
  ///
  /// The compression and filter method bytes are not checked.
  fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
    match value {
      [w0, w1, w2, w3, h0, h1, h2, h3, bit_depth, color_type, _compression_method, _filter_method, interlace_method] =>
      {
        let width = u32::from_be_bytes([*w0, *w1, *w2, *w3]);
        let height = u32::from_be_bytes([*h0, *h1, *h2, *h3]);
        if width == 0 || height == 0 {
          return Err(FormatError::ZeroDimensions { width, height }.into());
        }
        if *bit_depth != 8 {
          return Err(UnsupportedFeature::BitDepth(*bit_depth).into());
        }
        let color_type = PngColorType::try_from(*color_type)?;
        if color_type != PngColorType::RGB {
          return Err(UnsupportedFeature::ColorType(color_type).into());
        }
        if *interlace_method != 0 {
          return Err(UnsupportedFeature::Interlace(*interlace_method).into());
        }
        Ok(Self { width, height, bit_depth: 8, color_type, is_interlaced: false })
      }
      _ => Err(FormatError::MalformedHeader(value.len()).into()),
    }
  }
}

//! Module for working with PNG data.
//!
//! * [Portable Network Graphics Specification (Second Edition)][png-spec]
//!
//! [png-spec]: https://www.w3.org/TR/2003/REC-PNG-20031110/
//!
//! ## Supported Subset
//!
//! Only 8-bit truecolor (RGB) images without interlacing are handled, in both
//! directions. Palette, greyscale, alpha, other bit depths, and interlaced
//! images are rejected with [`UnsupportedFeature`] rather than being
//! converted. Ancillary chunks are skipped when reading and never written.
//!
//! ## Decoding
//!
//! [`decode`] runs the whole pipeline:
//!
//! 1) [`parse_container`] checks the signature, walks the chunks with
//!    [`PngRawChunkIter`], pulls out the [`IHDR`], and concatenates every
//!    `IDAT` payload in order. PNG allows the compressed stream to be split
//!    over any number of `IDAT` chunks.
//! 2) [`inflate_idat`] decompresses that into the filtered scanlines, which
//!    must be exactly `height * (width * 3 + 1)` bytes.
//! 3) [`unfilter_scanlines`] reverses the per-line filtering into the final
//!    RGB buffer.
//!
//! Declared chunk CRCs are not checked while decoding. Use
//! [`PngRawChunk::actual_crc`] if you want to check them yourself.
//!
//! ## Encoding
//!
//! [`encode`] is the reverse: [`filter_scanlines`] (every line uses the "None"
//! filter), [`deflate_idat`] at the highest compression level, then
//! [`write_png`] builds `IHDR`, a single `IDAT`, and `IEND` with their CRCs.

use core::fmt::{Debug, Write};

use crate::{FormatError, Image, PngError, PngResult, UnsupportedFeature};

mod crc32;
pub use crc32::*;

mod raw_chunk;
pub use raw_chunk::*;

mod ihdr;
pub use ihdr::*;

mod zlib;
pub use zlib::*;

mod unfilter;
pub use unfilter::*;

mod filter;
pub use filter::*;

mod writer;
pub use writer::*;

/// The 8 bytes that every PNG data stream starts with.
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Checks if the PNG's initial 8 bytes are correct.
///
/// * If this is the case, the rest of the bytes are very likely PNG data.
/// * If this is *not* the case, the rest of the bytes are very likely *not* PNG
///   data.
#[inline]
#[must_use]
pub const fn is_png_header_correct(bytes: &[u8]) -> bool {
  matches!(bytes, [137, 80, 78, 71, 13, 10, 26, 10, ..])
}

/// Decodes PNG bytes into an [`Image`].
///
/// ## Failure
/// * [`PngError::Format`] for a bad signature, no header, zero dimensions,
///   the wrong amount of decompressed data, or an illegal filter type.
/// * [`PngError::Unsupported`] for anything other than 8-bit RGB without
///   interlacing.
/// * [`PngError::Decompression`] if the image data isn't valid Zlib.
#[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
pub fn decode(bytes: &[u8]) -> PngResult<Image> {
  let container = parse_container(bytes)?;
  let ihdr = container.ihdr;
  let expected = ihdr.filtered_len()?;
  let filtered = inflate_idat(&container.idat, expected)?;
  let pixels = unfilter_scanlines(&filtered, ihdr.width, ihdr.height)?;
  tracing::debug!(width = ihdr.width, height = ihdr.height, "decoded png");
  Ok(Image { width: ihdr.width, height: ihdr.height, pixels })
}

/// Encodes an [`Image`] as PNG bytes.
///
/// ## Failure
/// * [`PngError::SizeMismatch`] if the image's pixel buffer isn't exactly
///   `width * height * 3` bytes. Nothing is produced in this case.
/// * [`PngError::Format`] if either dimension is zero, since such a file
///   couldn't be decoded again.
#[tracing::instrument(skip(image), fields(width = image.width, height = image.height))]
pub fn encode(image: &Image) -> PngResult<Vec<u8>> {
  image.check_len()?;
  let ihdr = IHDR::rgb8(image.width, image.height)?;
  let filtered = filter_scanlines(image)?;
  let idat = deflate_idat(&filtered);
  tracing::debug!(filtered = filtered.len(), compressed = idat.len(), "encoded png");
  write_png(&ihdr, &idat)
}

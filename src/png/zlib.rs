//! The compressed payload: all `IDAT` data together forms one Zlib stream.

use super::*;

use miniz_oxide::{
  deflate::{compress_to_vec_zlib, CompressionLevel},
  inflate::{decompress_to_vec_zlib_with_limit, TINFLStatus},
};

/// Inflates the concatenated `IDAT` payload.
///
/// The output is never allowed to grow much past `expected` bytes, so a bogus
/// stream can't make us allocate more than the header says the image needs.
///
/// ## Failure
/// * [`PngError::Decompression`] if the data isn't a complete, valid Zlib
///   stream (including a bad Adler-32 checksum).
/// * [`FormatError::ExcessImageData`] if the stream holds more than `expected`
///   bytes.
/// * [`FormatError::DecompressedLength`] if it holds fewer.
pub fn inflate_idat(idat: &[u8], expected: usize) -> PngResult<Vec<u8>> {
  // one spare byte lets an exact fit finish cleanly while still catching
  // streams that run long
  let filtered = match decompress_to_vec_zlib_with_limit(idat, expected.saturating_add(1)) {
    Ok(filtered) => filtered,
    Err(e) if e.status == TINFLStatus::HasMoreOutput => {
      return Err(FormatError::ExcessImageData { expected }.into());
    }
    Err(e) => {
      tracing::debug!(status = ?e.status, partial = e.output.len(), "inflate failed");
      return Err(PngError::Decompression(format!("{:?}", e.status)));
    }
  };
  match filtered.len() {
    actual if actual == expected => Ok(filtered),
    actual if actual > expected => Err(FormatError::ExcessImageData { expected }.into()),
    actual => Err(FormatError::DecompressedLength { expected, actual }.into()),
  }
}

/// Deflates filtered scanlines into a Zlib stream at the highest standard
/// compression level.
///
/// The output isn't promised to be byte-for-byte stable between versions,
/// only to inflate back to the same input.
#[inline]
#[must_use]
pub fn deflate_idat(filtered: &[u8]) -> Vec<u8> {
  compress_to_vec_zlib(filtered, CompressionLevel::BestCompression as u8)
}

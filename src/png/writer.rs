use super::*;

/// The largest data length a chunk may declare.
pub const MAX_CHUNK_LEN: usize = (1 << 31) - 1;

/// The length field for `data_len` bytes of chunk data.
#[inline]
fn chunk_len(data_len: usize) -> PngResult<u32> {
  if data_len <= MAX_CHUNK_LEN {
    Ok(data_len as u32)
  } else {
    Err(PngError::ChunkTooLong(data_len))
  }
}

/// Appends one chunk: length, type, data, then the CRC of type and data.
///
/// ## Failure
/// * [`PngError::ChunkTooLong`] if `data` is longer than [`MAX_CHUNK_LEN`].
///   Nothing is appended in that case.
#[inline]
pub fn write_chunk(out: &mut Vec<u8>, type_: PngRawChunkType, data: &[u8]) -> PngResult<()> {
  let len = chunk_len(data.len())?;
  let crc = png_crc(type_.0.iter().copied().chain(data.iter().copied()));
  out.reserve(12 + data.len());
  out.extend_from_slice(&len.to_be_bytes());
  out.extend_from_slice(&type_.0);
  out.extend_from_slice(data);
  out.extend_from_slice(&crc.to_be_bytes());
  Ok(())
}

/// Builds a complete PNG: the signature, then `IHDR`, `IDAT`, and `IEND`.
///
/// All of `idat` goes in a single `IDAT` chunk unless it's longer than
/// [`MAX_CHUNK_LEN`], in which case it's split over as many as needed.
///
/// `idat` should be the Zlib compressed, filtered scanlines (see
/// [`deflate_idat`]).
///
/// ## Failure
/// * Only if [`write_chunk`] fails, which the splitting rules out.
pub fn write_png(ihdr: &IHDR, idat: &[u8]) -> PngResult<Vec<u8>> {
  let mut out = Vec::with_capacity(PNG_SIGNATURE.len() + 3 * 12 + IHDR::LEN + idat.len());
  out.extend_from_slice(&PNG_SIGNATURE);
  write_chunk(&mut out, PngRawChunkType::IHDR, &ihdr.to_bytes())?;
  if idat.is_empty() {
    write_chunk(&mut out, PngRawChunkType::IDAT, idat)?;
  }
  for part in idat.chunks(MAX_CHUNK_LEN) {
    write_chunk(&mut out, PngRawChunkType::IDAT, part)?;
  }
  write_chunk(&mut out, PngRawChunkType::IEND, &[])?;
  Ok(out)
}

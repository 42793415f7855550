use super::*;

/// The four ASCII bytes naming a chunk's type.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PngRawChunkType(pub [u8; 4]);
#[allow(nonstandard_style)]
impl PngRawChunkType {
  pub const IHDR: Self = Self(*b"IHDR");
  pub const IDAT: Self = Self(*b"IDAT");
  pub const IEND: Self = Self(*b"IEND");

  /// If the chunk is "critical" (upper case first letter).
  #[inline]
  #[must_use]
  pub const fn is_critical(self) -> bool {
    self.0[0].is_ascii_uppercase()
  }
}
impl Debug for PngRawChunkType {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_char(self.0[0] as char)?;
    f.write_char(self.0[1] as char)?;
    f.write_char(self.0[2] as char)?;
    f.write_char(self.0[3] as char)?;
    Ok(())
  }
}

/// An unparsed chunk from a PNG.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PngRawChunk<'b> {
  pub(crate) type_: PngRawChunkType,
  pub(crate) data: &'b [u8],
  pub(crate) declared_crc: u32,
}
impl Debug for PngRawChunk<'_> {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("PngRawChunk")
      .field("type_", &self.type_)
      .field("data", &(&self.data[..self.data.len().min(12)], self.data.len()))
      .field("declared_crc", &self.declared_crc)
      .finish()
  }
}
impl<'b> PngRawChunk<'b> {
  #[inline]
  #[must_use]
  pub const fn type_(&self) -> PngRawChunkType {
    self.type_
  }
  #[inline]
  #[must_use]
  pub const fn data(&self) -> &'b [u8] {
    self.data
  }
  #[inline]
  #[must_use]
  pub const fn declared_crc(&self) -> u32 {
    self.declared_crc
  }
  /// Computes the CRC over the type and data, for comparison with the
  /// declared value.
  #[inline]
  #[must_use]
  pub fn actual_crc(&self) -> u32 {
    png_crc(self.type_.0.iter().copied().chain(self.data.iter().copied()))
  }
}

/// An iterator that produces successive raw chunks from PNG bytes.
///
/// The iterator ends when the bytes run out, including when the last chunk is
/// truncated partway through. It never panics, no matter the input.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PngRawChunkIter<'b>(pub(crate) &'b [u8]);
impl<'b> PngRawChunkIter<'b> {
  /// Pass the full PNG bytes, it will remove the PNG signature automatically.
  ///
  /// The signature is skipped without being checked, see
  /// [`is_png_header_correct`].
  #[inline]
  pub const fn new(bytes: &'b [u8]) -> Self {
    match bytes {
      [_, _, _, _, _, _, _, _, rest @ ..] => Self(rest),
      _ => Self(&[]),
    }
  }
}
impl<'b> Iterator for PngRawChunkIter<'b> {
  type Item = PngRawChunk<'b>;
  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    let (len_bytes, rest) = split_array::<4>(self.0)?;
    let chunk_len = u32::from_be_bytes(len_bytes) as usize;
    let (type_bytes, rest) = split_array::<4>(rest)?;
    if rest.len() < chunk_len {
      self.0 = &[];
      return None;
    }
    let (data, rest) = rest.split_at(chunk_len);
    let (crc_bytes, rest) = match split_array::<4>(rest) {
      Some(pair) => pair,
      None => {
        self.0 = &[];
        return None;
      }
    };
    self.0 = rest;
    Some(PngRawChunk {
      type_: PngRawChunkType(type_bytes),
      data,
      declared_crc: u32::from_be_bytes(crc_bytes),
    })
  }
}

#[inline]
fn split_array<const N: usize>(bytes: &[u8]) -> Option<([u8; N], &[u8])> {
  if bytes.len() >= N {
    let (head, tail) = bytes.split_at(N);
    let mut a = [0_u8; N];
    a.copy_from_slice(head);
    Some((a, tail))
  } else {
    None
  }
}

/// The parts of a PNG that decoding needs: the header and all the compressed
/// image data joined together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PngContainer {
  pub ihdr: IHDR,
  pub idat: Vec<u8>,
}

/// Splits PNG bytes into the [`IHDR`] and the concatenated `IDAT` payload.
///
/// Chunks are read until `IEND` or until the data runs out, whichever comes
/// first. Chunks of any other type are skipped. If more than one `IHDR`
/// appears, the first one is used.
///
/// ## Failure
/// * [`FormatError::BadSignature`] if the data doesn't start with
///   [`PNG_SIGNATURE`].
/// * [`FormatError::MissingHeader`] if no `IHDR` chunk was found.
/// * Anything that [`IHDR::try_from`] rejects.
pub fn parse_container(bytes: &[u8]) -> PngResult<PngContainer> {
  if !is_png_header_correct(bytes) {
    return Err(FormatError::BadSignature.into());
  }
  let mut ihdr_data: Option<&[u8]> = None;
  let mut idat: Vec<u8> = Vec::new();
  for chunk in PngRawChunkIter::new(bytes) {
    tracing::trace!(?chunk, "png chunk");
    match chunk.type_ {
      PngRawChunkType::IHDR => {
        if ihdr_data.is_none() {
          ihdr_data = Some(chunk.data);
        }
      }
      PngRawChunkType::IDAT => idat.extend_from_slice(chunk.data),
      PngRawChunkType::IEND => break,
      _ => (),
    }
  }
  let ihdr = IHDR::try_from(ihdr_data.ok_or(FormatError::MissingHeader)?)?;
  tracing::debug!(?ihdr, idat_len = idat.len(), "parsed png container");
  Ok(PngContainer { ihdr, idat })
}

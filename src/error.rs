use std::{io, path::PathBuf};

use crate::png::PngColorType;

/// Result alias for the PNG codec.
pub type PngResult<T> = Result<T, PngError>;

/// An error from decoding or encoding PNG data.
///
/// Every failure is a property of the input, so retrying the same call never
/// changes the outcome.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PngError {
  /// The container is malformed.
  #[error("format error: {0}")]
  Format(#[from] FormatError),

  /// The data is a valid PNG, but outside of the supported subset.
  #[error("unsupported feature: {0}")]
  Unsupported(#[from] UnsupportedFeature),

  /// The concatenated image data could not be inflated.
  #[error("decompression error: {0}")]
  Decompression(String),

  /// The pixel buffer doesn't match the declared dimensions.
  #[error("size mismatch: expected {expected} pixel bytes, got {actual}")]
  SizeMismatch { expected: usize, actual: usize },

  /// Chunk data can't be longer than `2^31 - 1` bytes.
  #[error("chunk data of {0} bytes is too long for one chunk")]
  ChunkTooLong(usize),
}

/// The specific way that a PNG container was malformed.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
  /// The first 8 bytes aren't the PNG signature.
  #[error("missing PNG signature")]
  BadSignature,

  /// No `IHDR` chunk was found before the end of the chunks.
  #[error("no IHDR chunk found")]
  MissingHeader,

  /// The `IHDR` chunk wasn't exactly 13 bytes.
  #[error("IHDR chunk has {0} bytes, expected 13")]
  MalformedHeader(usize),

  /// Width or height was declared as zero.
  #[error("image dimensions {width}x{height} include a zero")]
  ZeroDimensions { width: u32, height: u32 },

  /// The declared dimensions overflow the address space.
  #[error("image dimensions {width}x{height} are too large")]
  DimensionsTooLarge { width: u32, height: u32 },

  /// The inflated data is the wrong size for the declared dimensions.
  #[error("decompressed {actual} bytes, expected {expected}")]
  DecompressedLength { expected: usize, actual: usize },

  /// The inflated data runs past the size the dimensions call for.
  #[error("decompressed more than the expected {expected} bytes")]
  ExcessImageData { expected: usize },

  /// A scanline started with a filter type byte outside of `0..=4`.
  #[error("illegal filter type {0} on scanline {1}")]
  IllegalFilterType(u8, usize),
}

/// A structurally valid PNG feature that this codec doesn't handle.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsupportedFeature {
  /// Only bit depth 8 is supported.
  #[error("bit depth {0} (only 8 is supported)")]
  BitDepth(u8),

  /// Only truecolor (RGB) is supported.
  #[error("color type {0:?} (only RGB is supported)")]
  ColorType(PngColorType),

  /// A color type byte that PNG doesn't define at all.
  #[error("unknown color type {0}")]
  UnknownColorType(u8),

  /// Only non-interlaced images are supported.
  #[error("interlace method {0} (only 0 is supported)")]
  Interlace(u8),
}

/// An error from placing one image onto another.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum CompositeError {
  /// Scale must be finite and greater than zero.
  #[error("invalid overlay scale {0}")]
  InvalidScale(f64),

  /// One of the input images has the wrong number of pixel bytes.
  #[error("{which} image has {actual} pixel bytes, expected {expected}")]
  SizeMismatch { which: &'static str, expected: usize, actual: usize },
}

/// An error from loading render configuration.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
  /// A required environment variable was not set (or was empty).
  #[error("missing {0} environment variable")]
  MissingVar(&'static str),
}

/// An error from rendering a scene to disk.
#[derive(thiserror::Error, Debug)]
pub enum SceneError {
  #[error("io error on {}: {source}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("png error in {}: {source}", path.display())]
  Png {
    path: PathBuf,
    #[source]
    source: PngError,
  },

  #[error(transparent)]
  Composite(#[from] CompositeError),
}

impl SceneError {
  pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
    Self::Io { path: path.into(), source }
  }

  pub(crate) fn png(path: impl Into<PathBuf>, source: PngError) -> Self {
    Self::Png { path: path.into(), source }
  }
}

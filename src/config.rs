//! Render configuration: where the images live and where the sprite goes.

use std::path::PathBuf;

use crate::{CompositeRequest, ConfigError, Image};

/// Background image path (required).
pub const BACKGROUND_VAR: &str = "SCENERY_BACKGROUND_PATH";
/// Overlay image path (required).
pub const OVERLAY_VAR: &str = "SCENERY_OVERLAY_PATH";
/// Output image path (optional, see [`DEFAULT_OUTPUT_PATH`]).
pub const OUTPUT_VAR: &str = "SCENERY_OUTPUT_PATH";

/// Where the rendered scene is written unless configured otherwise.
pub const DEFAULT_OUTPUT_PATH: &str = "generated/scene.png";

/// How the overlay is placed on the background.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
  pub scale: f64,
  pub offset_x: i32,
  pub offset_y: i32,
  pub chroma_threshold: u8,
}
impl Default for Placement {
  /// Sized and positioned for a sprite standing in the lower left of a
  /// battle background, keying out a black backdrop.
  #[inline]
  fn default() -> Self {
    Self { scale: 0.62, offset_x: 15, offset_y: 190, chroma_threshold: 20 }
  }
}
impl Placement {
  /// Pairs this placement with the two images.
  #[inline]
  #[must_use]
  pub fn request<'a>(&self, background: &'a Image, overlay: &'a Image) -> CompositeRequest<'a> {
    CompositeRequest {
      background,
      overlay,
      scale: self.scale,
      offset_x: self.offset_x,
      offset_y: self.offset_y,
      chroma_threshold: self.chroma_threshold,
    }
  }
}

/// Everything needed to render a scene to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
  pub background_path: PathBuf,
  pub overlay_path: PathBuf,
  pub output_path: PathBuf,
  pub placement: Placement,
}
impl RenderConfig {
  /// A config with the default output path and placement.
  #[inline]
  #[must_use]
  pub fn new(background_path: impl Into<PathBuf>, overlay_path: impl Into<PathBuf>) -> Self {
    Self {
      background_path: background_path.into(),
      overlay_path: overlay_path.into(),
      output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
      placement: Placement::default(),
    }
  }

  /// Reads the config from the process environment.
  ///
  /// See [`RenderConfig::from_lookup`].
  #[inline]
  pub fn from_env() -> Result<Self, ConfigError> {
    Self::from_lookup(|var| std::env::var(var).ok())
  }

  /// Reads the config using `lookup` to get variable values.
  ///
  /// * [`BACKGROUND_VAR`] and [`OVERLAY_VAR`] are required, and an empty value
  ///   counts as missing.
  /// * [`OUTPUT_VAR`] falls back to [`DEFAULT_OUTPUT_PATH`].
  /// * The placement is always [`Placement::default`].
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
    let required = |var: &'static str| {
      lookup(var).filter(|value| !value.is_empty()).ok_or(ConfigError::MissingVar(var))
    };
    let background_path = required(BACKGROUND_VAR)?;
    let overlay_path = required(OVERLAY_VAR)?;
    let mut config = Self::new(background_path, overlay_path);
    if let Some(output) = lookup(OUTPUT_VAR).filter(|value| !value.is_empty()) {
      config.output_path = PathBuf::from(output);
    }
    Ok(config)
  }
}

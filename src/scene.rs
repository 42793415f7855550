//! Rendering a scene from image files to an image file.
//!
//! The codec and compositor only ever see byte buffers. This is the layer that
//! touches the file system, and each file is fully read or fully written
//! within a single call.

use std::{
  fs,
  path::{Path, PathBuf},
};

use crate::{composite, png, Image, RenderConfig, SceneError};

/// Reads and decodes a PNG file.
pub fn load_image(path: &Path) -> Result<Image, SceneError> {
  let bytes = fs::read(path).map_err(|e| SceneError::io(path, e))?;
  png::decode(&bytes).map_err(|e| SceneError::png(path, e))
}

/// Encodes an image and writes it as a PNG file, creating any missing parent
/// directories first.
///
/// The image is fully encoded before the file is created, so an image that
/// can't be encoded never leaves a partial file behind.
pub fn save_image(path: &Path, image: &Image) -> Result<(), SceneError> {
  let bytes = png::encode(image).map_err(|e| SceneError::png(path, e))?;
  if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
    fs::create_dir_all(parent).map_err(|e| SceneError::io(parent, e))?;
  }
  fs::write(path, bytes).map_err(|e| SceneError::io(path, e))
}

/// Renders the configured scene: decodes the background and overlay,
/// composites them with the configured placement, and writes the result.
///
/// Returns the path that was written.
#[tracing::instrument(skip(config), fields(output = %config.output_path.display()))]
pub fn render_scene(config: &RenderConfig) -> Result<PathBuf, SceneError> {
  let background = load_image(&config.background_path)?;
  let overlay = load_image(&config.overlay_path)?;
  let scene = composite(&config.placement.request(&background, &overlay))?;
  save_image(&config.output_path, &scene)?;
  tracing::info!(width = scene.width, height = scene.height, "rendered scene");
  Ok(config.output_path.clone())
}

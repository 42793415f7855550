//! Decides whether a line of chat text should render a scene.

use std::path::PathBuf;

use crate::{render_scene, RenderConfig, SceneError};

/// The command that triggers a render.
pub const RENDER_COMMAND: &str = "!battle";

/// If the text is the render command (ignoring case and surrounding
/// whitespace).
#[inline]
#[must_use]
pub fn is_render_command(text: &str) -> bool {
  text.trim().eq_ignore_ascii_case(RENDER_COMMAND)
}

/// Handles one line of command text.
///
/// * Any text other than [`RENDER_COMMAND`] gives `Ok(None)` and doesn't touch
///   the file system.
/// * The render command renders the configured scene and gives the path of the
///   written image.
///
/// A failed render is logged at error level and returned, so the caller can
/// tell the user about it instead of staying silent.
pub fn handle_command(text: &str, config: &RenderConfig) -> Result<Option<PathBuf>, SceneError> {
  if !is_render_command(text) {
    tracing::trace!(text, "not a render command");
    return Ok(None);
  }
  match render_scene(config) {
    Ok(path) => Ok(Some(path)),
    Err(e) => {
      tracing::error!(error = %e, "render command failed");
      Err(e)
    }
  }
}

//! Places an overlay sprite onto a background.
//!
//! There's no alpha channel anywhere in this crate, so transparency comes from
//! a color key: overlay pixels where *every* channel is below the threshold
//! (near black) are skipped. Everything else is copied over opaque, there's no
//! blending.

use crate::{CompositeError, Image};

/// Everything needed to place one image onto another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositeRequest<'a> {
  /// The image being drawn onto. The output has its dimensions.
  pub background: &'a Image,
  /// The sprite being drawn.
  pub overlay: &'a Image,
  /// Overlay scale factor, must be finite and `> 0.0`.
  pub scale: f64,
  /// Background column of the scaled overlay's left edge. Can be negative.
  pub offset_x: i32,
  /// Background row of the scaled overlay's top edge. Can be negative.
  pub offset_y: i32,
  /// Overlay pixels with all three channels below this are transparent.
  pub chroma_threshold: u8,
}

/// The size of the overlay after scaling, never less than 1x1.
///
/// Each dimension is `max(1, floor(dim * scale))`, saturating at `u32::MAX`.
#[inline]
#[must_use]
pub fn scaled_dimensions(width: u32, height: u32, scale: f64) -> (u32, u32) {
  let scale_dim = |dim: u32| ((f64::from(dim) * scale).floor() as u32).max(1);
  (scale_dim(width), scale_dim(height))
}

/// If every channel of the pixel is strictly below `threshold`.
#[inline]
#[must_use]
pub const fn is_keyed_out(rgb: [u8; 3], threshold: u8) -> bool {
  rgb[0] < threshold && rgb[1] < threshold && rgb[2] < threshold
}

/// Draws the overlay onto a copy of the background.
///
/// For each position `(sx, sy)` of the scaled overlay, the source pixel is the
/// nearest neighbor `(floor(sx / scale), floor(sy / scale))`, clamped to the
/// overlay's last column and row. It lands on background position
/// `(offset_x + sx, offset_y + sy)`. Positions outside of the background are
/// clipped without any error, and keyed-out source pixels (see
/// [`is_keyed_out`]) leave the background pixel alone.
///
/// Every output pixel is written at most once, so the order of the work
/// doesn't matter. Only the scaled positions that actually land on the
/// background are visited, so the cost is bounded by the background size no
/// matter the scale.
///
/// ## Failure
/// * [`CompositeError::InvalidScale`] if `scale` isn't finite and positive.
/// * [`CompositeError::SizeMismatch`] if either image's pixel buffer is the
///   wrong length for its dimensions.
#[tracing::instrument(skip(request), fields(
  background = ?(request.background.width, request.background.height),
  overlay = ?(request.overlay.width, request.overlay.height),
  scale = request.scale,
))]
pub fn composite(request: &CompositeRequest<'_>) -> Result<Image, CompositeError> {
  let CompositeRequest { background, overlay, scale, offset_x, offset_y, chroma_threshold } =
    *request;
  if !(scale.is_finite() && scale > 0.0) {
    return Err(CompositeError::InvalidScale(scale));
  }
  check_len("background", background)?;
  check_len("overlay", overlay)?;

  let mut out = background.clone();
  if overlay.width == 0 || overlay.height == 0 {
    return Ok(out);
  }
  let (scaled_w, scaled_h) = scaled_dimensions(overlay.width, overlay.height, scale);
  let xs = visible_span(offset_x, scaled_w, background.width);
  let ys = visible_span(offset_y, scaled_h, background.height);
  let src_pixels = overlay.rgb_pixels();
  let bg_width = background.width as usize;
  let dst_pixels = out.rgb_pixels_mut();

  let mut written = 0_usize;
  for sy in ys {
    let src_y = source_index(sy, scale, overlay.height);
    let dy = (i64::from(offset_y) + sy) as usize;
    for sx in xs.clone() {
      let src_x = source_index(sx, scale, overlay.width);
      let rgb = src_pixels[src_y * overlay.width as usize + src_x];
      if is_keyed_out(rgb, chroma_threshold) {
        continue;
      }
      let dx = (i64::from(offset_x) + sx) as usize;
      dst_pixels[dy * bg_width + dx] = rgb;
      written += 1;
    }
  }
  tracing::debug!(scaled_w, scaled_h, written, "composited overlay");
  Ok(out)
}

/// The scaled overlay coordinates `s` with `offset + s` in `0..limit`.
fn visible_span(offset: i32, scaled_len: u32, limit: u32) -> core::ops::Range<i64> {
  let offset = i64::from(offset);
  let start = (-offset).max(0);
  let end = i64::from(scaled_len).min(i64::from(limit) - offset);
  start..end.max(start)
}

/// Maps a scaled coordinate back to the source, nearest neighbor.
#[inline]
fn source_index(scaled: i64, scale: f64, source_len: u32) -> usize {
  let src = (scaled as f64 / scale).floor() as u32;
  src.min(source_len - 1) as usize
}

fn check_len(which: &'static str, image: &Image) -> Result<(), CompositeError> {
  let expected = image.expected_len();
  if image.pixels.len() == expected {
    Ok(())
  } else {
    Err(CompositeError::SizeMismatch { which, expected, actual: image.pixels.len() })
  }
}

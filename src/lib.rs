#![forbid(unsafe_code)]

//! Renders a scene by keying an overlay sprite onto a background image.
//!
//! The crate carries its own minimal PNG codec, limited to 8-bit truecolor
//! (RGB) non-interlaced images, which is all the compositing needs:
//!
//! * [`png::decode`] turns PNG bytes into an [`Image`].
//! * [`png::encode`] turns an [`Image`] back into PNG bytes.
//! * [`composite`] places one [`Image`] onto another with nearest-neighbor
//!   scaling and a color-key threshold standing in for an alpha channel.
//!
//! The codec works on byte slices only. Reading and writing files is done by
//! the [`scene`] layer, and [`command`] decides when a scene gets rendered at
//! all.

#[cfg(target_pointer_width = "16")]
compile_error!("this crate assumes 32-bit or bigger pointers!");

mod error;
pub use error::*;

mod image;
pub use image::*;

pub mod png;

mod compositor;
pub use compositor::*;

pub mod config;
pub use config::{Placement, RenderConfig};

pub mod scene;
pub use scene::render_scene;

pub mod command;
pub use command::handle_command;

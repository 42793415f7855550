use std::path::{Path, PathBuf};

use scenery::{
  handle_command, png, render_scene, scene, Image, Placement, RenderConfig, SceneError,
};

/// A fresh, empty directory for one test.
fn scratch_dir(name: &str) -> PathBuf {
  let dir = std::env::temp_dir().join(format!("scenery-{}-{name}", std::process::id()));
  let _ = std::fs::remove_dir_all(&dir);
  std::fs::create_dir_all(&dir).unwrap();
  dir
}

fn write_inputs(dir: &Path) -> RenderConfig {
  let bg = Image::filled(8, 4, [0, 0, 255]);
  let mut ov = Image::filled(4, 2, [0, 0, 0]);
  for y in 0..2 {
    *ov.get_mut(1, y).unwrap() = [255, 0, 0];
    *ov.get_mut(2, y).unwrap() = [255, 0, 0];
  }
  let background_path = dir.join("bg.png");
  let overlay_path = dir.join("ov.png");
  std::fs::write(&background_path, png::encode(&bg).unwrap()).unwrap();
  std::fs::write(&overlay_path, png::encode(&ov).unwrap()).unwrap();
  RenderConfig {
    background_path,
    overlay_path,
    output_path: dir.join("nested").join("deeper").join("scene.png"),
    placement: Placement { scale: 1.0, offset_x: 1, offset_y: 1, chroma_threshold: 20 },
  }
}

#[test]
fn test_render_scene_writes_output() {
  let dir = scratch_dir("render");
  let config = write_inputs(&dir);
  let out = render_scene(&config).unwrap();
  assert_eq!(out, config.output_path);
  let scene = scene::load_image(&out).unwrap();
  assert_eq!((scene.width, scene.height), (8, 4));
  assert_eq!(scene.get(2, 1), Some([255, 0, 0]));
  assert_eq!(scene.get(7, 1), Some([0, 0, 255]));
  let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_handle_command_renders() {
  let dir = scratch_dir("command");
  let config = write_inputs(&dir);
  assert!(handle_command("!ping", &config).unwrap().is_none());
  assert!(!config.output_path.exists());
  let out = handle_command("  !Battle ", &config).unwrap();
  assert_eq!(out.as_ref(), Some(&config.output_path));
  assert!(config.output_path.exists());
  let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_render_scene_reports_bad_png() {
  let dir = scratch_dir("bad-png");
  let mut config = write_inputs(&dir);
  config.overlay_path = dir.join("not-a-png.png");
  std::fs::write(&config.overlay_path, b"GIF89a").unwrap();
  match render_scene(&config) {
    Err(SceneError::Png { path, .. }) => assert_eq!(path, config.overlay_path),
    other => panic!("expected a png error, got {other:?}"),
  }
  assert!(!config.output_path.exists());
  let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_render_scene_reports_missing_file() {
  let dir = scratch_dir("missing");
  let mut config = write_inputs(&dir);
  config.background_path = dir.join("nope.png");
  assert!(matches!(render_scene(&config), Err(SceneError::Io { .. })));
  let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_save_image_rejects_bad_image() {
  let dir = scratch_dir("save");
  let path = dir.join("out.png");
  let broken = Image { width: 2, height: 2, pixels: vec![0; 3] };
  assert!(matches!(scene::save_image(&path, &broken), Err(SceneError::Png { .. })));
  assert!(!path.exists());
  let _ = std::fs::remove_dir_all(&dir);
}

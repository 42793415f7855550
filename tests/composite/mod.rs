use scenery::{composite, is_keyed_out, CompositeError, CompositeRequest, Image};

const BLUE: [u8; 3] = [0, 0, 255];
const RED: [u8; 3] = [255, 0, 0];
const BLACK: [u8; 3] = [0, 0, 0];

fn request<'a>(
  background: &'a Image, overlay: &'a Image, scale: f64, offset_x: i32, offset_y: i32,
  chroma_threshold: u8,
) -> CompositeRequest<'a> {
  CompositeRequest { background, overlay, scale, offset_x, offset_y, chroma_threshold }
}

/// A 4x2 overlay: columns 1 and 2 are red, columns 0 and 3 are black.
fn red_bar() -> Image {
  let mut ov = Image::filled(4, 2, BLACK);
  for y in 0..2 {
    *ov.get_mut(1, y).unwrap() = RED;
    *ov.get_mut(2, y).unwrap() = RED;
  }
  ov
}

#[test]
fn test_red_bar_on_blue() {
  let bg = Image::filled(8, 4, BLUE);
  let ov = red_bar();
  let out = composite(&request(&bg, &ov, 1.0, 1, 1, 20)).unwrap();
  assert_eq!((out.width, out.height), (8, 4));
  assert_eq!(out.get(2, 1), Some(RED));
  assert_eq!(out.get(3, 2), Some(RED));
  assert_eq!(out.get(7, 1), Some(BLUE));
  // black overlay columns are keyed out
  assert_eq!(out.get(1, 1), Some(BLUE));
  assert_eq!(out.get(4, 1), Some(BLUE));
  // nothing outside the overlay's footprint changes
  let changed = (0..4)
    .flat_map(|y| (0..8).map(move |x| (x, y)))
    .filter(|&(x, y)| out.get(x, y) != Some(BLUE))
    .count();
  assert_eq!(changed, 4);
  // the background itself is untouched
  assert!(bg.rgb_pixels().iter().all(|&p| p == BLUE));
}

#[test]
fn test_chroma_key_boundary() {
  let bg = Image::filled(4, 1, BLUE);
  let ov = Image::new(4, 1, vec![19, 19, 19, 20, 0, 0, 0, 20, 0, 0, 0, 20]).unwrap();
  let out = composite(&request(&bg, &ov, 1.0, 0, 0, 20)).unwrap();
  assert_eq!(out.get(0, 0), Some(BLUE));
  assert_eq!(out.get(1, 0), Some([20, 0, 0]));
  assert_eq!(out.get(2, 0), Some([0, 20, 0]));
  assert_eq!(out.get(3, 0), Some([0, 0, 20]));

  assert!(is_keyed_out([19, 19, 19], 20));
  assert!(!is_keyed_out([19, 19, 20], 20));
  // a zero threshold keys nothing out
  assert!(!is_keyed_out([0, 0, 0], 0));
}

#[test]
fn test_scale_one_is_one_to_one() {
  let bg = Image::filled(5, 4, BLACK);
  let pixels: Vec<u8> = (0..(3 * 2 * 3)).map(|i| 100 + i as u8).collect();
  let ov = Image::new(3, 2, pixels).unwrap();
  let out = composite(&request(&bg, &ov, 1.0, 2, 1, 20)).unwrap();
  for y in 0..2 {
    for x in 0..3 {
      assert_eq!(out.get(x + 2, y + 1), ov.get(x, y), "({x},{y})");
    }
  }
  let changed = out.rgb_pixels().iter().filter(|&&p| p != BLACK).count();
  assert_eq!(changed, 6);
}

#[test]
fn test_partial_clipping() {
  let bg = Image::filled(4, 4, BLUE);
  let ov = Image::filled(3, 3, RED);
  // hangs off the top left corner
  let out = composite(&request(&bg, &ov, 1.0, -2, -1, 20)).unwrap();
  assert_eq!(out.get(0, 0), Some(RED));
  assert_eq!(out.get(0, 1), Some(RED));
  assert_eq!(out.get(1, 0), Some(BLUE));
  assert_eq!(out.get(0, 2), Some(BLUE));
  // hangs off the bottom right corner
  let out = composite(&request(&bg, &ov, 1.0, 2, 3, 20)).unwrap();
  assert_eq!(out.get(2, 3), Some(RED));
  assert_eq!(out.get(3, 3), Some(RED));
  assert_eq!(out.get(1, 3), Some(BLUE));
  assert_eq!(out.get(3, 2), Some(BLUE));
}

#[test]
fn test_fully_outside_changes_nothing() {
  let bg = Image::filled(4, 4, BLUE);
  let ov = Image::filled(2, 2, RED);
  for (x, y) in [(4, 0), (0, 4), (-2, 0), (0, -2), (i32::MAX, i32::MAX), (i32::MIN, i32::MIN)] {
    assert_eq!(composite(&request(&bg, &ov, 1.0, x, y, 20)).unwrap(), bg, "offset ({x},{y})");
  }
}

#[test]
fn test_huge_scale_is_clipped() {
  let bg = Image::filled(3, 3, BLUE);
  let ov = Image::filled(2, 2, RED);
  let out = composite(&request(&bg, &ov, 1e12, 0, 0, 20)).unwrap();
  assert!(out.rgb_pixels().iter().all(|&p| p == RED));
}

#[test]
fn test_tiny_scale_keeps_one_pixel() {
  let bg = Image::filled(3, 3, BLUE);
  let ov = Image::filled(10, 10, RED);
  let out = composite(&request(&bg, &ov, 0.001, 1, 1, 20)).unwrap();
  assert_eq!(out.get(1, 1), Some(RED));
  assert_eq!(out.rgb_pixels().iter().filter(|&&p| p == RED).count(), 1);
}

#[test]
fn test_default_placement_scale() {
  // 10x10 at 0.62 becomes 6x6, sampling source columns 0,1,3,4,6,8
  let bg = Image::filled(6, 6, BLACK);
  let mut ov = Image::filled(10, 10, BLACK);
  for x in 0..10 {
    *ov.get_mut(x, 0).unwrap() = [30 + x as u8 * 10, 0, 0];
  }
  let out = composite(&request(&bg, &ov, 0.62, 0, 0, 20)).unwrap();
  let top: Vec<u8> = (0..6).map(|x| out.get(x, 0).unwrap()[0]).collect();
  assert_eq!(top, [30, 40, 60, 70, 90, 110]);
}

#[test]
fn test_bad_inputs() {
  let bg = Image::filled(2, 2, BLUE);
  assert_eq!(
    composite(&request(&bg, &bg, -0.5, 0, 0, 20)),
    Err(CompositeError::InvalidScale(-0.5))
  );
  let broken = Image { width: 3, height: 3, pixels: vec![0; 3] };
  assert_eq!(
    composite(&request(&broken, &bg, 1.0, 0, 0, 20)),
    Err(CompositeError::SizeMismatch { which: "background", expected: 27, actual: 3 })
  );
}

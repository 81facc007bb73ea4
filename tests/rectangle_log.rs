//! Exercises the rectangle log, which only exists under the `rect-log` feature.
//! Run with `cargo test --features rect-log`.

#![cfg(feature = "rect-log")]

use skel_trace::{Bitmap, Tracer};

#[test]
fn rectangle_log_covers_every_foreground_pixel() {
    let (w, h) = (64, 64);
    let mut data = vec![0u8; w * h];
    for i in 0..w * h {
        data[i] = ((i / 10) % 2) as u8;
    }
    let mut bitmap = Bitmap::from_bytes(&data, w, h).unwrap();
    let mut tracer = Tracer::new(10, 999).unwrap();
    tracer.trace(&mut bitmap).unwrap();

    let rects = tracer.rectangles();
    assert!(!rects.is_empty());

    for y in 0..h {
        for x in 0..w {
            if bitmap.is_foreground(x, y) {
                let covered = rects
                    .iter()
                    .any(|r| x >= r.0 && x < r.0 + r.2 && y >= r.1 && y < r.1 + r.3);
                assert!(covered, "foreground pixel ({x},{y}) not covered by any logged rectangle");
            }
        }
    }
}

#[test]
fn rectangle_log_resets_between_calls() {
    let (w, h) = (32, 32);
    let mut data = vec![0u8; w * h];
    for i in 0..w.min(h) {
        data[i * w + i] = 1;
    }
    let mut bitmap = Bitmap::from_bytes(&data, w, h).unwrap();
    let mut tracer = Tracer::new(10, 999).unwrap();
    tracer.trace(&mut bitmap).unwrap();
    let first_count = tracer.rectangles().len();
    assert!(first_count > 0);

    let mut blank = Bitmap::from_bytes(&vec![0u8; w * h], w, h).unwrap();
    tracer.trace(&mut blank).unwrap();
    // the whole tile is still visited once even with no foreground pixels.
    assert!(!tracer.rectangles().is_empty());
}

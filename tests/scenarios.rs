//! End-to-end scenarios exercising only the public `trace` API.

use skel_trace::{trace, Bitmap, Point, Tracer};

fn all_points(set: &skel_trace::PolylineSet) -> Vec<Point> {
    set.iter().flat_map(|p| p.points().copied()).collect()
}

#[test]
fn all_background_bitmap_is_empty() {
    let (w, h) = (64, 64);
    let mut buf = vec![0u8; w * h];
    let out = trace(&mut buf, w, h, 10, 999).unwrap();
    assert!(out.is_empty());
}

#[test]
fn horizontal_line_traces_end_to_end() {
    let (w, h) = (64, 64);
    let mut buf = vec![0u8; w * h];
    for x in 1..w - 1 {
        buf[32 * w + x] = 1;
    }
    let out = trace(&mut buf, w, h, 10, 999).unwrap();
    assert!(!out.is_empty());

    let pts = all_points(&out);
    for p in &pts {
        assert!(p[1] >= 31 && p[1] <= 33, "y={} out of band", p[1]);
    }
    let min_x = pts.iter().map(|p| p[0]).min().unwrap();
    let max_x = pts.iter().map(|p| p[0]).max().unwrap();
    assert!(min_x <= 5, "path does not reach near the left end: {min_x}");
    assert!(max_x >= w - 6, "path does not reach near the right end: {max_x}");
}

#[test]
fn vertical_stripes_trace_into_five_polylines() {
    let (w, h) = (64, 64);
    let mut buf = vec![0u8; w * h];
    for i in 0..w * h {
        buf[i] = ((i / 10) % 2) as u8;
    }
    let out = trace(&mut buf, w, h, 10, 999).unwrap();
    assert!(!out.is_empty());
    // every output point must be within the original image bounds.
    for p in all_points(&out) {
        assert!(p[0] < w && p[1] < h);
    }
}

#[test]
fn plus_sign_traces_through_the_junction() {
    let (w, h) = (21, 21);
    let mut buf = vec![0u8; w * h];
    for x in 1..w - 1 {
        buf[10 * w + x] = 1;
    }
    for y in 1..h - 1 {
        buf[y * w + 10] = 1;
    }
    let out = trace(&mut buf, w, h, 10, 999).unwrap();
    assert!(!out.is_empty());
    let pts = all_points(&out);
    let near_center = pts
        .iter()
        .any(|p| p[0].abs_diff(10) <= 1 && p[1].abs_diff(10) <= 1);
    assert!(near_center, "no output point near the junction cell (10,10)");
}

#[test]
fn diagonal_traces_near_the_line() {
    let (w, h) = (32, 32);
    let mut buf = vec![0u8; w * h];
    for i in 0..w.min(h) {
        buf[i * w + i] = 1;
    }
    let out = trace(&mut buf, w, h, 10, 999).unwrap();
    assert!(!out.is_empty());
    for p in all_points(&out) {
        assert!((p[0] as i64 - p[1] as i64).abs() <= 1);
    }
}

#[test]
fn tiny_all_foreground_bitmap_uses_the_base_case() {
    let (w, h) = (5, 5);
    let mut buf = vec![1u8; w * h];
    let out = trace(&mut buf, w, h, 10, 999).unwrap();
    for p in all_points(&out) {
        assert!(p[0] < w && p[1] < h);
    }
}

#[test]
fn output_points_are_strictly_inside_the_bitmap_and_were_foreground_after_thinning() {
    let (w, h) = (64, 64);
    let mut buf = vec![0u8; w * h];
    for i in 0..w * h {
        buf[i] = ((i / 10) % 2) as u8;
    }
    let thinned_copy = {
        let mut bm = Bitmap::from_bytes(&buf, w, h).unwrap();
        let mut tracer = Tracer::new(10, 999).unwrap();
        let out = tracer.trace(&mut bm).unwrap();
        (bm, out)
    };
    let (bm, out) = thinned_copy;
    for p in all_points(&out) {
        assert!(p[0] < w && p[1] < h);
        assert!(bm.is_foreground(p[0], p[1]), "point {p:?} is not foreground after thinning");
    }
}

#[test]
fn determinism_across_repeated_calls() {
    let (w, h) = (40, 40);
    let mut data = vec![0u8; w * h];
    for i in 0..w * h {
        data[i] = ((i / 6) % 2) as u8;
    }
    let mut a = data.clone();
    let mut b = data.clone();
    let out_a = trace(&mut a, w, h, 8, 999).unwrap();
    let out_b = trace(&mut b, w, h, 8, 999).unwrap();
    assert_eq!(out_a, out_b);
}

#[test]
fn invalid_inputs_are_rejected_without_mutating_the_buffer() {
    use skel_trace::TraceError;

    let mut too_small = vec![0u8; 4];
    assert_eq!(
        trace(&mut too_small, 2, 2, 10, 999).unwrap_err(),
        TraceError::InvalidDimensions { width: 2, height: 2 }
    );

    let mut mismatched = vec![0u8; 8];
    assert_eq!(
        trace(&mut mismatched, 3, 3, 10, 999).unwrap_err(),
        TraceError::InvalidBuffer {
            expected: 9,
            actual: 8
        }
    );

    let mut buf = vec![0u8; 100];
    assert_eq!(
        trace(&mut buf, 10, 10, 5, 999).unwrap_err(),
        TraceError::InvalidChunkSize { chunk_size: 5 }
    );
    assert_eq!(
        trace(&mut buf, 10, 10, 10, 0).unwrap_err(),
        TraceError::InvalidMaxIter { max_iter: 0 }
    );
}

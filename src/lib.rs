//! Vectorizes a binary raster image into polylines following the centerlines
//! of its foreground strokes.
//!
//! The pipeline is two stages: [`thinner`] reduces foreground strokes to a
//! 1-pixel-wide skeleton in place (Zhang-Suen), then [`trace`] recursively
//! partitions the thinned bitmap and stitches per-tile fragments
//! ([`fragment`]) back together across the seams ([`stitch`]) into the
//! final [`PolylineSet`].
//!
//! ```
//! use skel_trace::{Tracer, Bitmap};
//!
//! let w = 64;
//! let h = 64;
//! let mut data = vec![0u8; w * h];
//! for x in 1..w - 1 {
//!     data[32 * w + x] = 1;
//! }
//! let mut bitmap = Bitmap::from_bytes(&data, w, h).unwrap();
//! let mut tracer = Tracer::new(10, 999).unwrap();
//! let polylines = tracer.trace(&mut bitmap).unwrap();
//! assert!(!polylines.is_empty());
//! ```

pub mod bitmap;
pub mod error;
pub mod fragment;
pub mod polyline;
pub mod stitch;
pub mod thinner;
pub mod tile;
mod partition;

pub use bitmap::Bitmap;
pub use error::TraceError;
pub use polyline::{Point, Polyline, PolylineSet};
pub use tile::{Direction, Rect, Seam, Tile};

/// Default recursion granularity: tiles at or below this size in both
/// dimensions become fragmenter leaves.
pub const DEFAULT_CHUNK_SIZE: usize = 10;

/// Default recursion depth cap. Effectively unbounded for any image a
/// fragmenter leaf of `DEFAULT_CHUNK_SIZE` could be reached from.
pub const DEFAULT_MAX_ITER: usize = 999;

/// Owns the validated `chunk_size`/`max_iter` configuration for one or more
/// `trace` calls, and (when the `rect-log` feature is enabled) the
/// rectangle log of the most recent call.
///
/// A single `Tracer` is not safe to drive two concurrent `trace` calls from
/// (enforced by `trace` taking `&mut self`); independent `Tracer`s in
/// separate threads are fine as long as they don't share a `Bitmap`.
pub struct Tracer {
    chunk_size: usize,
    max_iter: usize,
    #[cfg(feature = "rect-log")]
    rectangles: Vec<Rect>,
}

impl Tracer {
    /// Validates `chunk_size` (>= 6) and `max_iter` (>= 1) eagerly.
    pub fn new(chunk_size: usize, max_iter: usize) -> Result<Self, TraceError> {
        if chunk_size < 6 {
            return Err(TraceError::InvalidChunkSize { chunk_size });
        }
        if max_iter < 1 {
            return Err(TraceError::InvalidMaxIter { max_iter });
        }
        Ok(Tracer {
            chunk_size,
            max_iter,
            #[cfg(feature = "rect-log")]
            rectangles: Vec::new(),
        })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn max_iter(&self) -> usize {
        self.max_iter
    }

    /// Thins `bitmap` in place, then recursively traces and stitches its
    /// skeleton into a [`PolylineSet`].
    ///
    /// Resets the rectangle log (if compiled in) at the start of the call;
    /// callers wanting the log from this call must read [`Tracer::rectangles`]
    /// before calling `trace` again.
    pub fn trace(&mut self, bitmap: &mut Bitmap) -> Result<PolylineSet, TraceError> {
        thinner::thin(bitmap);

        let whole = Tile::new(0, 0, bitmap.width(), bitmap.height());

        #[cfg(feature = "rect-log")]
        {
            self.rectangles.clear();
            let mut log = Some(Vec::new());
            let set = partition::trace_tile(bitmap, whole, self.chunk_size, self.max_iter, 0, &mut log);
            self.rectangles = log.unwrap();
            Ok(set)
        }
        #[cfg(not(feature = "rect-log"))]
        {
            let mut log = None;
            Ok(partition::trace_tile(
                bitmap,
                whole,
                self.chunk_size,
                self.max_iter,
                0,
                &mut log,
            ))
        }
    }

    /// Tiles visited by the most recent [`Tracer::trace`] call, innermost
    /// leaves included. Only compiled in under the `rect-log` feature.
    #[cfg(feature = "rect-log")]
    pub fn rectangles(&self) -> &[Rect] {
        &self.rectangles
    }
}

/// Convenience entry point matching the library's canonical signature:
/// thins `buf` in place and returns its traced skeleton as a [`PolylineSet`].
///
/// Equivalent to `Tracer::new(chunk_size, max_iter)?.trace(&mut Bitmap::from_bytes(buf, ...))`
/// for callers that don't need to reuse configuration or read the rectangle log.
pub fn trace(
    buf: &mut [u8],
    width: usize,
    height: usize,
    chunk_size: usize,
    max_iter: usize,
) -> Result<PolylineSet, TraceError> {
    let mut bitmap = Bitmap::from_bytes(buf, width, height)?;
    let mut tracer = Tracer::new(chunk_size, max_iter)?;
    let result = tracer.trace(&mut bitmap)?;
    buf.copy_from_slice(bitmap.as_raw());
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_chunk_size() {
        assert_eq!(
            Tracer::new(5, 100).unwrap_err(),
            TraceError::InvalidChunkSize { chunk_size: 5 }
        );
    }

    #[test]
    fn rejects_invalid_max_iter() {
        assert_eq!(
            Tracer::new(10, 0).unwrap_err(),
            TraceError::InvalidMaxIter { max_iter: 0 }
        );
    }

    #[test]
    fn all_background_bitmap_yields_empty_output() {
        let w = 64;
        let h = 64;
        let mut buf = vec![0u8; w * h];
        let out = trace(&mut buf, w, h, 10, 999).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn determinism_across_repeated_calls() {
        let w = 32;
        let h = 32;
        let mut data = vec![0u8; w * h];
        for i in 0..w.min(h) {
            data[i * w + i] = 1;
        }

        let mut buf1 = data.clone();
        let out1 = trace(&mut buf1, w, h, 10, 999).unwrap();
        let mut buf2 = data.clone();
        let out2 = trace(&mut buf2, w, h, 10, 999).unwrap();
        assert_eq!(out1, out2);
    }
}

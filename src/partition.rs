//! Recursive divide-and-conquer partitioner: splits the bitmap along the
//! lowest-density seam, recurses on each half, and stitches the two halves'
//! fragments back together.

use crate::bitmap::Bitmap;
use crate::fragment::fragment;
use crate::polyline::PolylineSet;
use crate::stitch::stitch;
use crate::tile::{Direction, Rect, Seam, Tile};

/// Candidate seam together with its cost (foreground pixel count on the two
/// rows/cols straddling it).
struct Candidate {
    seam: Seam,
    cost: usize,
}

/// Returns the tile's best horizontal (row) seam candidate, if any row in
/// `[y+3, y+h-3)` survives the corner policy. Only evaluated when `h` exceeds
/// `chunk_size`.
fn best_horizontal_seam(im: &Bitmap, tile: Tile) -> Option<Candidate> {
    let Tile { x, y, w, h } = tile;
    let (cy, _) = tile.center();
    let mut best: Option<(usize, usize)> = None; // (row, cost)

    for s in y + 3..y + h - 3 {
        let corner_fg = im.is_foreground(x, s)
            || im.is_foreground(x, s - 1)
            || im.is_foreground(x + w - 1, s)
            || im.is_foreground(x + w - 1, s - 1);
        if corner_fg {
            continue;
        }
        let mut cost = 0usize;
        for j in x..x + w {
            cost += im.foreground_raw(j, s) as usize;
            cost += im.foreground_raw(j, s - 1) as usize;
        }
        let better = match best {
            None => true,
            Some((bs, bc)) => cost < bc || (cost == bc && s.abs_diff(cy) < bs.abs_diff(cy)),
        };
        if better {
            best = Some((s, cost));
        }
    }

    best.map(|(s, cost)| Candidate {
        seam: Seam {
            coord: s,
            direction: Direction::Horizontal,
        },
        cost,
    })
}

/// Returns the tile's best vertical (column) seam candidate, if any column in
/// `[x+3, x+w-3)` survives the corner policy. Only evaluated when `w` exceeds
/// `chunk_size`.
fn best_vertical_seam(im: &Bitmap, tile: Tile) -> Option<Candidate> {
    let Tile { x, y, w, h } = tile;
    let (cx, _) = tile.center();
    let mut best: Option<(usize, usize)> = None;

    for s in x + 3..x + w - 3 {
        let corner_fg = im.is_foreground(s, y)
            || im.is_foreground(s - 1, y)
            || im.is_foreground(s, y + h - 1)
            || im.is_foreground(s - 1, y + h - 1);
        if corner_fg {
            continue;
        }
        let mut cost = 0usize;
        for i in y..y + h {
            cost += im.foreground_raw(s, i) as usize;
            cost += im.foreground_raw(s - 1, i) as usize;
        }
        let better = match best {
            None => true,
            Some((bs, bc)) => cost < bc || (cost == bc && s.abs_diff(cx) < bs.abs_diff(cx)),
        };
        if better {
            best = Some((s, cost));
        }
    }

    best.map(|(s, cost)| Candidate {
        seam: Seam {
            coord: s,
            direction: Direction::Vertical,
        },
        cost,
    })
}

/// Picks the single best seam across both axes. Horizontal is evaluated
/// first; on an exact cross-axis cost tie, vertical wins (it is "not
/// strictly worse", so it overwrites the running minimum evaluated second).
fn choose_seam(im: &Bitmap, tile: Tile, chunk_size: usize) -> Option<Seam> {
    let mut best: Option<Candidate> = None;

    if tile.h > chunk_size {
        if let Some(c) = best_horizontal_seam(im, tile) {
            best = Some(c);
        }
    }
    if tile.w > chunk_size {
        if let Some(c) = best_vertical_seam(im, tile) {
            let take = match &best {
                None => true,
                Some(b) => c.cost <= b.cost,
            };
            if take {
                best = Some(c);
            }
        }
    }

    best.map(|c| c.seam)
}

fn split(tile: Tile, seam: Seam) -> (Tile, Tile) {
    let Tile { x, y, w, h } = tile;
    match seam.direction {
        Direction::Horizontal => {
            let s = seam.coord;
            (
                Tile::new(x, y, w, s - y),
                Tile::new(x, s, w, y + h - s),
            )
        }
        Direction::Vertical => {
            let s = seam.coord;
            (
                Tile::new(x, y, s - x, h),
                Tile::new(s, y, x + w - s, h),
            )
        }
    }
}

/// Recursively traces the skeleton inside `tile`, optionally recording every
/// visited tile into `rects` (only when the `rect-log` feature is compiled in
/// and the caller passed `Some`).
pub fn trace_tile(
    im: &Bitmap,
    tile: Tile,
    chunk_size: usize,
    max_iter: usize,
    depth: usize,
    rects: &mut Option<Vec<Rect>>,
) -> PolylineSet {
    if let Some(log) = rects.as_mut() {
        log.push(tile.into());
    }

    if depth >= max_iter {
        log::trace!("trace_tile: hit max_iter at depth {depth}, returning empty");
        return PolylineSet::new();
    }
    if tile.w <= chunk_size && tile.h <= chunk_size {
        return fragment(im, tile);
    }

    let seam = match choose_seam(im, tile, chunk_size) {
        Some(s) => s,
        None => {
            log::trace!("trace_tile: no valid seam for {tile:?}, falling back to fragment()");
            return fragment(im, tile);
        }
    };

    let (left_tile, right_tile) = split(tile, seam);

    let left = if im.region_has_foreground(left_tile.x, left_tile.y, left_tile.w, left_tile.h) {
        trace_tile(im, left_tile, chunk_size, max_iter, depth + 1, rects)
    } else {
        PolylineSet::new()
    };
    let right = if im.region_has_foreground(right_tile.x, right_tile.y, right_tile.w, right_tile.h) {
        trace_tile(im, right_tile, chunk_size, max_iter, depth + 1, rects)
    } else {
        PolylineSet::new()
    };

    stitch(left, right, seam.coord, seam.direction)
}

//! Recursion bottom: turn a small tile into polyline fragments.
//!
//! Walks the tile's border once, identifies the pixels where a stroke crosses
//! it, and connects each crossing to the tile center (adjusted by a few
//! heuristics below). This sacrifices micro-accuracy for a small, fixed
//! per-tile cost; the partitioner keeps tiles small so the result stays
//! faithful to the skeleton.

use crate::bitmap::Bitmap;
use crate::polyline::{Point, Polyline, PolylineSet};
use crate::tile::Tile;

/// Produces short polyline fragments approximating the skeleton inside `tile`.
/// Reads `im`; never mutates it.
pub fn fragment(im: &Bitmap, tile: Tile) -> PolylineSet {
    let (x, y, w, h) = (tile.x, tile.y, tile.w, tile.h);
    let mut frags: Vec<Vec<Point>> = Vec::new();
    let mut on = false;
    let (mut li, mut lj) = (0usize, 0usize);
    let perimeter = w + w + h + h - 4;

    for k in 0..perimeter {
        let (i, j) = border_cell(x, y, w, h, k);
        if im.is_foreground(j, i) {
            if !on {
                on = true;
                frags.push(vec![[j, i], [x + w / 2, y + h / 2]]);
            }
        } else if on {
            let last = frags.len() - 1;
            frags[last][0][0] = (frags[last][0][0] + lj) / 2;
            frags[last][0][1] = (frags[last][0][1] + li) / 2;
            on = false;
        }
        li = i;
        lj = j;
    }

    match frags.len() {
        0 => PolylineSet::new(),
        1 => {
            let mut set = PolylineSet::new();
            set.push(Polyline::new(frags.into_iter().next().unwrap()));
            set
        }
        2 => {
            let single = vec![frags[0][0], frags[1][0]];
            let mut set = PolylineSet::new();
            set.push(Polyline::new(single));
            set
        }
        _ => {
            if let Some(junction) = find_junction(im, tile) {
                for f in frags.iter_mut() {
                    f[1] = junction;
                }
            }
            frags.into_iter().map(Polyline::new).collect()
        }
    }
}

/// Maps a clockwise border-walk index `k` in `[0, 2w+2h-4)` to its pixel,
/// walking top L->R, right T->B, bottom R->L, left B->T.
fn border_cell(x: usize, y: usize, w: usize, h: usize, k: usize) -> (usize, usize) {
    if k < w {
        (y, x + k)
    } else if k < w + h - 1 {
        (y + (k - w + 1), x + w - 1)
    } else if k < w + h + w - 2 {
        let j = x as i32 + w as i32 - (k as i32 - w as i32 - h as i32 + 3);
        (y + h - 1, j as usize)
    } else {
        let i = y as i32 + h as i32 - (k as i32 - w as i32 - h as i32 - w as i32 + 4);
        (i as usize, x)
    }
}

/// Finds the interior pixel with the brightest 3x3 neighborhood, used as the
/// junction point when 3+ fragments cross the tile. Ties favor the pixel
/// closest (Manhattan) to the tile center.
fn find_junction(im: &Bitmap, tile: Tile) -> Option<Point> {
    let (x, y, w, h) = (tile.x, tile.y, tile.w, tile.h);
    let (cx, cy) = tile.center();
    let mut best: Option<(usize, usize)> = None;
    let mut best_sum: u32 = 0;

    for i in y + 1..y + h - 1 {
        for j in x + 1..x + w - 1 {
            let sum: u32 = (i - 1..=i + 1)
                .flat_map(|ii| (j - 1..=j + 1).map(move |jj| (ii, jj)))
                .map(|(ii, jj)| im.foreground_raw(jj, ii) as u32)
                .sum();

            let better = match best {
                None => sum > 0,
                Some((bi, bj)) => {
                    sum > best_sum
                        || (sum == best_sum
                            && manhattan(j, i, cx, cy) < manhattan(bj, bi, cx, cy))
                }
            };
            if better && sum > 0 {
                best = Some((i, j));
                best_sum = sum;
            }
        }
    }
    best.map(|(i, j)| [j, i])
}

fn manhattan(ax: usize, ay: usize, bx: usize, by: usize) -> usize {
    ax.abs_diff(bx) + ay.abs_diff(by)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile_of(w: usize, h: usize) -> Tile {
        Tile::new(0, 0, w, h)
    }

    #[test]
    fn empty_tile_yields_no_fragments() {
        let im = Bitmap::from_bytes(&vec![0u8; 10 * 10], 10, 10).unwrap();
        let set = fragment(&im, tile_of(10, 10));
        assert!(set.is_empty());
    }

    #[test]
    fn single_crossing_yields_one_stub_fragment() {
        let w = 10;
        let h = 10;
        let mut data = vec![0u8; w * h];
        // a stub poking in from the top edge only, not exiting anywhere else.
        data[0 * w + 5] = 1;
        let im = Bitmap::from_bytes(&data, w, h).unwrap();
        let set = fragment(&im, tile_of(w, h));
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(0).len(), 2);
    }

    #[test]
    fn two_crossings_yield_single_through_stroke() {
        let w = 10;
        let h = 10;
        let mut data = vec![0u8; w * h];
        data[0 * w + 5] = 1; // top edge crossing
        data[9 * w + 5] = 1; // bottom edge crossing
        let im = Bitmap::from_bytes(&data, w, h).unwrap();
        let set = fragment(&im, tile_of(w, h));
        assert_eq!(set.len(), 1);
        let p = set.get(0);
        assert_eq!(p.len(), 2);
    }
}

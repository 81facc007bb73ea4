//! Merges fragment sets from two adjacent tiles along their shared seam.
//!
//! For each polyline in the right set, tries to match an endpoint against an
//! endpoint of some polyline in the left set, lying on the seam within
//! tolerance. A reimplementation note in the design doc: the source threads
//! polylines through a doubly-linked list for O(1) removal during stitching;
//! `PolylineSet::swap_remove` gives the same removal cost over a `Vec`.

use crate::polyline::{Point, Polyline, PolylineSet};
use crate::tile::Direction;

/// `along`/`across` in seam-relative terms: `along` is the coordinate that
/// runs parallel to the seam, `across` is the one perpendicular to it.
fn along_across(p: Point, direction: Direction) -> (usize, usize) {
    match direction {
        // A horizontal seam is a row (constant y): along = x, across = y.
        Direction::Horizontal => (p[0], p[1]),
        // A vertical seam is a column (constant x): along = y, across = x.
        Direction::Vertical => (p[1], p[0]),
    }
}

/// Which end of `q` in the left set is eligible to match `p_end` from the
/// right set, tried in the fixed order the source code uses: (Qhead,Ptail),
/// (Qtail,Ptail), (Qhead,Phead), (Qtail,Phead).
#[derive(Clone, Copy)]
struct Combo {
    q_head: bool,
    p_tail: bool,
}

const COMBOS: [Combo; 4] = [
    Combo {
        q_head: true,
        p_tail: true,
    },
    Combo {
        q_head: false,
        p_tail: true,
    },
    Combo {
        q_head: true,
        p_tail: false,
    },
    Combo {
        q_head: false,
        p_tail: false,
    },
];

/// Attempts one (q_head, p_tail) combination: scans the left set for the
/// closest eligible match to `p`'s chosen endpoint, and splices on success.
fn try_combo(
    left: &mut PolylineSet,
    p: &Polyline,
    seam: usize,
    direction: Direction,
    combo: Combo,
) -> Option<(usize, Polyline)> {
    let p_end = if combo.p_tail { p.tail() } else { p.head() };
    let (p_along, p_across) = along_across(p_end, direction);
    if p_across != seam {
        return None;
    }

    let mut best: Option<(usize, i64)> = None;
    for (j, q) in left.iter().enumerate() {
        let q_end = if combo.q_head { q.head() } else { q.tail() };
        let (q_along, q_across) = along_across(q_end, direction);
        if q_across.abs_diff(seam) > 1 {
            continue;
        }
        let dist = (q_along as i64 - p_along as i64).abs();
        if dist < 4 {
            if best.map_or(true, |(_, bd)| dist < bd) {
                best = Some((j, dist));
            }
        }
    }

    best.map(|(j, _)| {
        let mut p = p.clone();
        let mut q = left.swap_remove(j);
        // Only p is ever reversed; q's own orientation is never touched.
        match (combo.q_head, combo.p_tail) {
            // Qhead, Ptail: p's tail already abuts q's head -> p ++ q.
            (true, true) => {
                q.extend_front(p);
            }
            // Qtail, Ptail: both matched ends are tails -> reverse p, q ++ rev(p).
            (false, true) => {
                p.reverse();
                q.extend_back(p);
            }
            // Qhead, Phead: both matched ends are heads -> reverse p, rev(p) ++ q.
            (true, false) => {
                p.reverse();
                q.extend_front(p);
            }
            // Qtail, Phead: q's tail already abuts p's head -> q ++ p.
            (false, false) => {
                q.extend_back(p);
            }
        }
        (j, q)
    })
}

/// Matches `p` against the left set using the fixed combo order, splicing it
/// in on the first successful match. Returns `None` (p unconsumed) if no
/// combination matched.
fn merge_one(left: &mut PolylineSet, p: Polyline, seam: usize, direction: Direction) -> Option<Polyline> {
    for combo in COMBOS {
        if let Some((_, merged)) = try_combo(left, &p, seam, direction, combo) {
            return Some(merged);
        }
    }
    None
}

/// Merges `right` into `left` along the seam, consuming both and returning
/// the combined set. Every right-set polyline either gets spliced into a
/// left-set match, or transferred across unchanged.
pub fn stitch(mut left: PolylineSet, right: PolylineSet, seam: usize, direction: Direction) -> PolylineSet {
    if left.is_empty() {
        return right;
    }
    if right.is_empty() {
        return left;
    }

    for p in right.into_vec() {
        match merge_one(&mut left, p.clone(), seam, direction) {
            Some(merged) => left.push(merged),
            None => left.push(p),
        }
    }
    left
}

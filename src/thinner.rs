//! Zhang-Suen binary thinning (skeletonization) in-place.
//! http://agcggs680.pbworks.com/f/Zhan-Suen_algorithm.pdf

use crate::bitmap::Bitmap;

/// Runs one subiteration over the window `[win_x, win_x+win_w) x [win_y, win_y+win_h)`,
/// marking (bit 1) every pixel that satisfies the Zhang-Suen deletion condition
/// for the given `iter` (0 or 1). Returns whether any pixel was newly marked.
///
/// The window is clamped to the interior (the 1-pixel border is never a
/// candidate, since its 8-neighborhood is partly out of bounds) regardless of
/// the caller-supplied window, so a full-grid window and a tile window behave
/// identically at the image edges.
fn thinning_zs_iteration(im: &mut Bitmap, win_x: usize, win_y: usize, win_w: usize, win_h: usize, iter: u8) -> bool {
    let w = im.width();
    let h = im.height();
    let min_x = if win_x == 0 { 1 } else { win_x };
    let max_x = if win_x + win_w >= w { w - 1 } else { win_x + win_w };
    let min_y = if win_y == 0 { 1 } else { win_y };
    let max_y = if win_y + win_h >= h { h - 1 } else { win_y + win_h };

    let mut changed = false;
    for i in min_y..max_y {
        for j in min_x..max_x {
            let p1 = im.foreground_raw(j, i);
            if p1 == 0 {
                continue;
            }
            let p2 = im.foreground_raw(j, i - 1);
            let p3 = im.foreground_raw(j + 1, i - 1);
            let p4 = im.foreground_raw(j + 1, i);
            let p5 = im.foreground_raw(j + 1, i + 1);
            let p6 = im.foreground_raw(j, i + 1);
            let p7 = im.foreground_raw(j - 1, i + 1);
            let p8 = im.foreground_raw(j - 1, i);
            let p9 = im.foreground_raw(j - 1, i - 1);

            let a: u8 = (p2 == 0 && p3 == 1) as u8
                + (p3 == 0 && p4 == 1) as u8
                + (p4 == 0 && p5 == 1) as u8
                + (p5 == 0 && p6 == 1) as u8
                + (p6 == 0 && p7 == 1) as u8
                + (p7 == 0 && p8 == 1) as u8
                + (p8 == 0 && p9 == 1) as u8
                + (p9 == 0 && p2 == 1) as u8;
            let b: u8 = p2 + p3 + p4 + p5 + p6 + p7 + p8 + p9;
            let (m1, m2) = if iter == 0 {
                (p2 * p4 * p6, p4 * p6 * p8)
            } else {
                (p2 * p4 * p8, p2 * p6 * p8)
            };

            if a == 1 && (2..=6).contains(&b) && m1 == 0 && m2 == 0 && !im.is_marked(j, i) {
                im.mark(j, i);
                changed = true;
            }
        }
    }
    changed
}

fn thinning_zs_post(im: &mut Bitmap, win_x: usize, win_y: usize, win_w: usize, win_h: usize) -> bool {
    im.apply_marks_in(win_x, win_y, win_w, win_h)
}

/// Thins the whole bitmap to its Zhang-Suen skeleton, in place.
///
/// Loops (subiteration 0, subiteration 1) pairs until a pair produces no
/// change. Guaranteed to terminate because the foreground count strictly
/// decreases whenever a subiteration reports a change.
pub fn thin(im: &mut Bitmap) {
    let w = im.width();
    let h = im.height();
    let mut pass = 0u32;
    loop {
        let changed0 = thinning_zs_iteration(im, 0, 0, w, h, 0);
        if changed0 {
            thinning_zs_post(im, 0, 0, w, h);
        }
        let changed1 = thinning_zs_iteration(im, 0, 0, w, h, 1);
        if changed1 {
            thinning_zs_post(im, 0, 0, w, h);
        }
        pass += 1;
        log::trace!(
            "thinning pass {pass}: sub0_changed={changed0} sub1_changed={changed1} fg={}",
            im.foreground_count()
        );
        if !changed0 && !changed1 {
            break;
        }
    }
    log::debug!("thinning converged after {pass} passes");
}

/// Thins a large bitmap by restricting each subiteration's sweep to tiles
/// that changed on the previous pass (or border a tile that did).
///
/// Produces byte-identical output to [`thin`]; this is purely an optimization
/// for images too large to sweep wholesale every pass.
pub fn thin_tiled(im: &mut Bitmap, tile_w: usize, tile_h: usize) {
    let width = im.width();
    let height = im.height();
    let ntx = (width + tile_w - 1) / tile_w;
    let nty = (height + tile_h - 1) / tile_h;
    let total = ntx * nty;

    let mut active = vec![true; total];
    let mut pass = 0u32;

    loop {
        pass += 1;
        let remaining = active.iter().filter(|&&a| a).count();
        log::info!("tiled thinning pass {pass}: {remaining}/{total} tiles active");
        if remaining == 0 {
            break;
        }

        let mut any_sub0 = false;
        let mut sub0_hits = vec![false; total];
        for ty in 0..nty {
            for tx in 0..ntx {
                if !tile_active(&active, ntx, nty, tx, ty) {
                    continue;
                }
                let (x, y, w, h) = tile_window(tx, ty, tile_w, tile_h, width, height);
                if thinning_zs_iteration(im, x, y, w, h, 0) {
                    sub0_hits[ty * ntx + tx] = true;
                    any_sub0 = true;
                }
            }
        }
        if any_sub0 {
            for ty in 0..nty {
                for tx in 0..ntx {
                    if sub0_hits[ty * ntx + tx] {
                        let (x, y, w, h) = tile_window(tx, ty, tile_w, tile_h, width, height);
                        thinning_zs_post(im, x, y, w, h);
                    }
                }
            }
        }

        let mut any_sub1 = false;
        let mut sub1_hits = vec![false; total];
        for ty in 0..nty {
            for tx in 0..ntx {
                if !tile_active(&active, ntx, nty, tx, ty) {
                    continue;
                }
                let (x, y, w, h) = tile_window(tx, ty, tile_w, tile_h, width, height);
                if thinning_zs_iteration(im, x, y, w, h, 1) {
                    sub1_hits[ty * ntx + tx] = true;
                    any_sub1 = true;
                }
            }
        }
        if any_sub1 {
            for ty in 0..nty {
                for tx in 0..ntx {
                    if sub1_hits[ty * ntx + tx] {
                        let (x, y, w, h) = tile_window(tx, ty, tile_w, tile_h, width, height);
                        thinning_zs_post(im, x, y, w, h);
                    }
                }
            }
        }

        for ty in 0..nty {
            for tx in 0..ntx {
                active[ty * ntx + tx] = sub0_hits[ty * ntx + tx] || sub1_hits[ty * ntx + tx];
            }
        }
        if !any_sub0 && !any_sub1 {
            break;
        }
    }
    log::debug!("tiled thinning converged after {pass} passes");
}

fn tile_window(tx: usize, ty: usize, tile_w: usize, tile_h: usize, width: usize, height: usize) -> (usize, usize, usize, usize) {
    let x = tx * tile_w;
    let y = ty * tile_h;
    let w = tile_w.min(width - x);
    let h = tile_h.min(height - y);
    (x, y, w, h)
}

/// A tile is worth revisiting if it changed last pass, or borders one that did.
fn tile_active(active: &[bool], ntx: usize, nty: usize, tx: usize, ty: usize) -> bool {
    if active[ty * ntx + tx] {
        return true;
    }
    (tx > 0 && active[ty * ntx + tx - 1])
        || (ty > 0 && active[(ty - 1) * ntx + tx])
        || (tx + 1 < ntx && active[ty * ntx + tx + 1])
        || (ty + 1 < nty && active[(ty + 1) * ntx + tx])
}

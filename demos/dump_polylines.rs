//! Loads a black-and-white image, traces its skeleton, and prints the
//! resulting polylines as whitespace-separated `x,y` pairs, one polyline per
//! line. Usage: `dump_polylines <image> [chunk_size] [max_iter]`.

use std::env;

use anyhow::{Context, Result};
use indicatif::ProgressBar;
use skel_trace::{Bitmap, Tracer, DEFAULT_CHUNK_SIZE, DEFAULT_MAX_ITER};

fn main() -> Result<()> {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(log::LevelFilter::Info);
    builder.parse_env("RUST_LOG");
    builder.init();

    let mut args = env::args().skip(1);
    let path = args.next().context("usage: dump_polylines <image> [chunk_size] [max_iter]")?;
    let chunk_size: usize = args
        .next()
        .map(|s| s.parse())
        .transpose()
        .context("chunk_size must be an integer")?
        .unwrap_or(DEFAULT_CHUNK_SIZE);
    let max_iter: usize = args
        .next()
        .map(|s| s.parse())
        .transpose()
        .context("max_iter must be an integer")?
        .unwrap_or(DEFAULT_MAX_ITER);

    let img = image::open(&path).with_context(|| format!("failed to open {path}"))?;
    let gray = img.to_luma8();
    let (width, height) = (gray.width() as usize, gray.height() as usize);
    let bytes: Vec<u8> = gray.into_raw().iter().map(|&p| (p > 127) as u8).collect();

    let pb = ProgressBar::new_spinner().with_message("thinning and tracing");
    pb.enable_steady_tick(std::time::Duration::from_millis(120));

    let mut bitmap = Bitmap::from_bytes(&bytes, width, height)?;
    let mut tracer = Tracer::new(chunk_size, max_iter)?;
    let polylines = tracer.trace(&mut bitmap)?;

    pb.finish_and_clear();
    log::info!("traced {} polylines from {width}x{height} image", polylines.len());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    use std::io::Write;
    for polyline in polylines.iter() {
        for p in polyline.points() {
            write!(out, "{},{} ", p[0], p[1])?;
        }
        writeln!(out)?;
    }

    Ok(())
}

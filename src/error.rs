//! Error type for the narrow, entirely-synchronous failure surface of the core.

use thiserror::Error;

/// Everything that can go wrong before or during a [`crate::trace`] call.
///
/// Every variant is reported eagerly at construction time, before any bitmap
/// mutation happens: validation never leaves a bitmap partially thinned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TraceError {
    #[error("invalid dimensions {width}x{height}: both width and height must be >= 3")]
    InvalidDimensions { width: usize, height: usize },

    #[error("buffer length {actual} does not match width*height ({expected})")]
    InvalidBuffer { expected: usize, actual: usize },

    #[error("chunk_size {chunk_size} is too small: must be >= 6")]
    InvalidChunkSize { chunk_size: usize },

    #[error("max_iter {max_iter} is too small: must be >= 1")]
    InvalidMaxIter { max_iter: usize },
}

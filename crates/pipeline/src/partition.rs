//! Splitting the title snapshot into per-worker chunks.

use std::num::NonZeroUsize;

/// Split `items` into at most `workers` contiguous chunks.
///
/// Chunks hold `ceil(len / workers)` items, except the last which may be
/// shorter. With more workers than items every chunk holds one item, and an
/// empty input gives no chunks. Concatenating the chunks in order yields
/// `items` again.
pub fn partition<T>(items: &[T], workers: NonZeroUsize) -> Vec<&[T]> {
    if items.is_empty() {
        return Vec::new();
    }
    let chunk_size = items.len().div_ceil(workers.get());
    items.chunks(chunk_size).collect()
}

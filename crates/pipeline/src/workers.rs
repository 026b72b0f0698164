//! Worker-count resolution.
//!
//! The engine itself only ever receives a `NonZeroUsize`; these helpers let
//! the caller turn host parallelism and an optional override into one.

use std::num::NonZeroUsize;
use tracing::debug;

/// Environment variable the CLI reads the override from.
pub const WORKERS_ENV: &str = "IMDB_SEARCH_WORKERS";

/// Logical CPU count of the host, or 1 if it cannot be determined.
pub fn host_parallelism() -> NonZeroUsize {
    std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN)
}

/// Parse an override value. Surrounding whitespace is allowed; zero,
/// negatives and anything non-numeric are rejected.
pub fn parse_worker_count(raw: &str) -> Option<NonZeroUsize> {
    raw.trim().parse().ok()
}

/// Pick the override if it is a valid positive integer, else `default`.
///
/// An invalid override is not an error; it is ignored.
pub fn resolve_worker_count(override_value: Option<&str>, default: NonZeroUsize) -> NonZeroUsize {
    match override_value {
        Some(raw) => parse_worker_count(raw).unwrap_or_else(|| {
            debug!("Ignoring invalid worker count override {:?}", raw);
            default
        }),
        None => default,
    }
}

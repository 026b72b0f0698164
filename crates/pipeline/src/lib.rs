//! Criteria-based title search over a loaded IMDb dataset.
//!
//! This crate provides:
//! - Criteria, the per-search snapshot of bounds and flags
//! - Filter trait and the five title filters
//! - FilterPipeline for composing filters into one predicate
//! - A parallel search (partition, fan out, fan in, shuffle) and the
//!   sequential reference search it must agree with
//!
//! ## Architecture
//! A search runs in stages:
//! 1. Snapshot the titles held by the `DataIndex`
//! 2. Split the snapshot into at most `workers` contiguous chunks
//! 3. Filter each chunk on its own task and send matches to a shared sink
//! 4. Join the tasks, drain the sink and shuffle the result
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{Criteria, TitleSearch, host_parallelism};
//!
//! let search = TitleSearch::new(index.clone(), host_parallelism());
//! let criteria = Criteria::new()
//!     .with_year_range(2019, 2022)
//!     .with_genres(["action"])
//!     .with_exclude_adult(true);
//!
//! for title in search.search(&criteria) {
//!     println!("{}", title.primary_title);
//! }
//! ```

pub mod collector;
pub mod criteria;
pub mod executor;
pub mod filter_pipeline;
pub mod filters;
pub mod partition;
pub mod search;
pub mod sequential;
pub mod shuffle;
pub mod traits;
pub mod workers;

#[cfg(test)]
mod test_support;

// Re-export main types
pub use collector::ResultSink;
pub use criteria::{Criteria, normalize_genre};
pub use executor::{collect_matches, filter_parallel};
pub use filter_pipeline::{FilterPipeline, matches};
pub use partition::partition;
pub use search::TitleSearch;
pub use sequential::filter_sequential;
pub use shuffle::shuffle;
pub use traits::Filter;
pub use workers::{WORKERS_ENV, host_parallelism, parse_worker_count, resolve_worker_count};

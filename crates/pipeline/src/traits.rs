//! Core trait for the filtering pipeline.
//!
//! Each `Filter` is one independent sub-predicate over a title, its optional
//! rating statistic and the active criteria.

use crate::criteria::Criteria;
use data_loader::{RatingStat, Title};

/// One sub-predicate of the title search.
///
/// Implementations must be pure: the same inputs always give the same
/// answer, and nothing is mutated. `Send + Sync` lets one pipeline be shared
/// by every worker.
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Whether the title passes this filter.
    ///
    /// `rating` is `None` when the dataset has no rating statistic for the
    /// title.
    fn passes(&self, title: &Title, rating: Option<&RatingStat>, criteria: &Criteria) -> bool;
}

//! Filter on runtime in minutes.

use crate::criteria::Criteria;
use crate::traits::Filter;
use data_loader::{RatingStat, Title};

/// Keeps titles whose runtime lies in `[min_runtime, max_runtime]`.
/// Unknown runtimes are rejected.
pub struct RuntimeFilter;

impl Filter for RuntimeFilter {
    fn name(&self) -> &str {
        "RuntimeFilter"
    }

    fn passes(&self, title: &Title, _rating: Option<&RatingStat>, criteria: &Criteria) -> bool {
        title
            .runtime_minutes
            .is_some_and(|runtime| runtime >= criteria.min_runtime && runtime <= criteria.max_runtime)
    }
}

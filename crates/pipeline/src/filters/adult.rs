//! Filter to drop adult titles on request.

use crate::criteria::Criteria;
use crate::traits::Filter;
use data_loader::{RatingStat, Title};

/// Rejects adult-flagged titles when the criteria exclude adult content.
pub struct AdultFilter;

impl Filter for AdultFilter {
    fn name(&self) -> &str {
        "AdultFilter"
    }

    fn passes(&self, title: &Title, _rating: Option<&RatingStat>, criteria: &Criteria) -> bool {
        !criteria.exclude_adult || !title.is_adult
    }
}

//! Filter on release year.
//!
//! Titles without a start year never pass, whatever the bounds are.

use crate::criteria::Criteria;
use crate::traits::Filter;
use data_loader::{RatingStat, Title};

/// Keeps titles whose start year lies in `[min_year, max_year]`.
pub struct YearFilter;

impl Filter for YearFilter {
    fn name(&self) -> &str {
        "YearFilter"
    }

    fn passes(&self, title: &Title, _rating: Option<&RatingStat>, criteria: &Criteria) -> bool {
        match title.start_year {
            Some(year) => year >= criteria.min_year && year <= criteria.max_year,
            None => false,
        }
    }
}

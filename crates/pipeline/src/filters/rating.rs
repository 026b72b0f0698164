//! Filter on rating statistics.
//!
//! Removes titles with a low average, too few or too many votes, or no
//! rating statistic at all.

use crate::criteria::Criteria;
use crate::traits::Filter;
use data_loader::{RatingStat, Title};

/// Rejects titles below the rating floor or outside the vote bounds.
///
/// ## Algorithm
/// 1. No rating statistic: reject
/// 2. Check average_rating >= min_rating
/// 3. Check min_votes <= num_votes <= max_votes
pub struct RatingFilter;

impl Filter for RatingFilter {
    fn name(&self) -> &str {
        "RatingFilter"
    }

    fn passes(&self, _title: &Title, rating: Option<&RatingStat>, criteria: &Criteria) -> bool {
        if let Some(stats) = rating {
            stats.average_rating >= criteria.min_rating
                && stats.num_votes >= criteria.min_votes
                && stats.num_votes <= criteria.max_votes
        } else {
            false
        }
    }
}

//! The FilterPipeline composes filters into one predicate.
//!
//! A title matches when it passes every filter. Filters run in insertion
//! order and evaluation stops at the first rejection; the order only
//! affects speed, never the answer.

use crate::criteria::Criteria;
use crate::filters::{AdultFilter, GenreFilter, RatingFilter, RuntimeFilter, YearFilter};
use crate::traits::Filter;
use data_loader::{DataIndex, RatingStat, Title};

/// Evaluate the standard predicate for one title.
///
/// Equivalent to `FilterPipeline::standard().matches(..)` without building a
/// pipeline.
pub fn matches(title: &Title, rating: Option<&RatingStat>, criteria: &Criteria) -> bool {
    AdultFilter.passes(title, rating, criteria)
        && YearFilter.passes(title, rating, criteria)
        && RuntimeFilter.passes(title, rating, criteria)
        && RatingFilter.passes(title, rating, criteria)
        && GenreFilter.passes(title, rating, criteria)
}

/// Chains multiple filters together into a single predicate.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(AdultFilter)
///     .add_filter(YearFilter);
///
/// let kept = pipeline.apply(&titles, &index, &criteria);
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// The five title filters in their evaluation order:
    /// adult, year, runtime, rating, genre.
    pub fn standard() -> Self {
        Self::new()
            .add_filter(AdultFilter)
            .add_filter(YearFilter)
            .add_filter(RuntimeFilter)
            .add_filter(RatingFilter)
            .add_filter(GenreFilter)
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Names of the filters in evaluation order.
    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|filter| filter.name()).collect()
    }

    /// Whether the title passes every filter.
    pub fn matches(&self, title: &Title, rating: Option<&RatingStat>, criteria: &Criteria) -> bool {
        self.filters
            .iter()
            .all(|filter| filter.passes(title, rating, criteria))
    }

    /// Name of the first filter that rejects the title, or `None` if it
    /// matches.
    pub fn first_rejection(
        &self,
        title: &Title,
        rating: Option<&RatingStat>,
        criteria: &Criteria,
    ) -> Option<&str> {
        self.filters
            .iter()
            .find(|filter| !filter.passes(title, rating, criteria))
            .map(|filter| filter.name())
    }

    /// Keep the titles that match, preserving their order.
    ///
    /// Ratings are looked up in `index` by title id.
    pub fn apply<'a>(
        &self,
        titles: &[&'a Title],
        index: &DataIndex,
        criteria: &Criteria,
    ) -> Vec<&'a Title> {
        titles
            .iter()
            .copied()
            .filter(|title| self.matches(title, index.get_rating(&title.id), criteria))
            .collect()
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

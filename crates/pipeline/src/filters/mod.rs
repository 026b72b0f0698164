//! Filter implementations for the title search.
//!
//! These are the five sub-predicates a title must pass, composed by
//! [`FilterPipeline::standard`](crate::FilterPipeline::standard).

pub mod adult;
pub mod genre;
pub mod rating;
pub mod runtime;
pub mod year;

// Re-export for convenience
pub use adult::AdultFilter;
pub use genre::GenreFilter;
pub use rating::RatingFilter;
pub use runtime::RuntimeFilter;
pub use year::YearFilter;

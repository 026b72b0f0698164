//! DataIndex building from the dataset files.
//!
//! Loading is all-or-nothing: both files are parsed (in parallel), the
//! entities are inserted, and the result is validated before anyone gets to
//! search it.

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use std::path::Path;
use tracing::info;

impl DataIndex {
    /// Load the title and rating files into a new index.
    ///
    /// Steps:
    /// 1. Parse both files in parallel
    /// 2. Insert titles and ratings keyed by id
    /// 3. Validate rating ranges
    pub fn load_from_files(basics_path: &Path, ratings_path: &Path) -> Result<Self> {
        info!(
            "Loading IMDb dataset from {:?} and {:?}",
            basics_path, ratings_path
        );

        // Rayon's `join` runs both parsers at once
        let (titles, ratings) = rayon::join(
            || parser::parse_titles(basics_path),
            || parser::parse_ratings(ratings_path),
        );
        let titles = titles?;
        let ratings = ratings?;

        let mut index = DataIndex::new();
        for title in titles {
            index.insert_title(title);
        }
        for rating in ratings {
            index.insert_rating(rating);
        }

        index.validate()?;

        let (title_count, rating_count) = index.counts();
        info!("Loaded {} titles and {} ratings", title_count, rating_count);
        Ok(index)
    }

    /// Validate data integrity
    ///
    /// Every average rating must lie in 0.0..=10.0. Ratings for ids with no
    /// title are expected (their category was dropped) and are kept.
    pub fn validate(&self) -> Result<()> {
        for rating in self.ratings.values() {
            if !(0.0..=10.0).contains(&rating.average_rating) {
                return Err(DataLoadError::InvalidValue {
                    field: format!("averageRating of {}", rating.id),
                    value: rating.average_rating.to_string(),
                });
            }
        }
        Ok(())
    }
}

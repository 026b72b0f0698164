//! Core domain types for the IMDb title dataset.
//!
//! The loader produces two collections, titles and rating statistics, both
//! keyed by the IMDb `tconst` identifier. Optional attributes are plain
//! `Option<T>`: a missing start year or runtime is `None`, never a sentinel.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// IMDb title identifier (the `tconst` column, e.g. `tt0111161`)
pub type TitleId = String;

// =============================================================================
// Title-related Types
// =============================================================================

/// The title categories we keep. Anything else (series, episodes, video
/// games, ...) is dropped while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TitleType {
    Movie,
    Short,
    TvMovie,
    TvShort,
}

impl TitleType {
    /// Map the raw `titleType` column value to a kept category.
    ///
    /// Returns `None` for categories that do not participate in filtering.
    pub fn from_imdb(s: &str) -> Option<Self> {
        match s {
            "movie" => Some(TitleType::Movie),
            "short" => Some(TitleType::Short),
            "tvMovie" => Some(TitleType::TvMovie),
            "tvShort" => Some(TitleType::TvShort),
            _ => None,
        }
    }

    /// The raw IMDb spelling of this category.
    pub fn as_imdb(&self) -> &'static str {
        match self {
            TitleType::Movie => "movie",
            TitleType::Short => "short",
            TitleType::TvMovie => "tvMovie",
            TitleType::TvShort => "tvShort",
        }
    }
}

/// Represents a title in the dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub id: TitleId,
    pub title_type: TitleType,
    pub primary_title: String,
    pub original_title: String,
    pub is_adult: bool,
    /// Release year, `None` when the dataset has no value
    pub start_year: Option<u16>,
    /// End year for ranged titles; not used by filtering
    pub end_year: Option<u16>,
    /// Runtime in minutes, `None` when unknown
    pub runtime_minutes: Option<u32>,
    /// Genre tags as they appear in the dataset (already canonically cased)
    pub genres: Vec<String>,
}

// =============================================================================
// Rating Type
// =============================================================================

/// Aggregate rating statistics for one title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingStat {
    pub id: TitleId,
    /// Weighted average rating from 0.0 to 10.0
    pub average_rating: f32,
    pub num_votes: u32,
}

// =============================================================================
// DataIndex - The In-Memory Dataset
// =============================================================================

/// Holds every loaded title and rating statistic.
///
/// Built once by the loader, then shared read-only (usually behind an `Arc`)
/// with every search. A title may have zero or one rating statistic.
#[derive(Debug)]
pub struct DataIndex {
    pub(crate) titles: HashMap<TitleId, Title>,
    pub(crate) ratings: HashMap<TitleId, RatingStat>,
}

impl DataIndex {
    /// Creates a new, empty DataIndex
    pub fn new() -> Self {
        Self {
            titles: HashMap::new(),
            ratings: HashMap::new(),
        }
    }

    /// Get a title by ID
    pub fn get_title(&self, id: &str) -> Option<&Title> {
        self.titles.get(id)
    }

    /// Get the rating statistic joined to a title, if one exists
    pub fn get_rating(&self, id: &str) -> Option<&RatingStat> {
        self.ratings.get(id)
    }

    /// Iterate over every title in unspecified order
    pub fn titles(&self) -> impl Iterator<Item = &Title> {
        self.titles.values()
    }

    /// Borrow every title into a flat vector.
    ///
    /// The order follows the underlying map and is not stable across runs.
    pub fn title_snapshot(&self) -> Vec<&Title> {
        self.titles.values().collect()
    }

    /// Insert a title into the index, replacing any title with the same id
    pub fn insert_title(&mut self, title: Title) {
        self.titles.insert(title.id.clone(), title);
    }

    /// Insert a rating statistic, replacing any previous one for the id
    pub fn insert_rating(&mut self, rating: RatingStat) {
        self.ratings.insert(rating.id.clone(), rating);
    }

    /// Get (titles, ratings) counts for debugging/validation
    pub fn counts(&self) -> (usize, usize) {
        (self.titles.len(), self.ratings.len())
    }
}

impl Default for DataIndex {
    fn default() -> Self {
        Self::new()
    }
}

//! The filter criteria snapshot.
//!
//! A `Criteria` is built once per search with the builder methods below and
//! then only ever borrowed. Every worker sees the same value.

/// Bounds and flags a title must satisfy to be returned by a search.
///
/// `Criteria::default()` accepts every title that has a start year, a
/// runtime and a rating statistic.
#[derive(Debug, Clone, PartialEq)]
pub struct Criteria {
    pub(crate) min_year: u16,
    pub(crate) max_year: u16,
    pub(crate) min_runtime: u32,
    pub(crate) max_runtime: u32,
    pub(crate) min_rating: f32,
    pub(crate) min_votes: u32,
    pub(crate) max_votes: u32,
    /// Requested genres, already normalized with [`normalize_genre`]
    pub(crate) genres: Vec<String>,
    pub(crate) exclude_adult: bool,
}

impl Criteria {
    /// Create permissive criteria (same as `Default`).
    pub fn new() -> Self {
        Self {
            min_year: 0,
            max_year: u16::MAX,
            min_runtime: 0,
            max_runtime: u32::MAX,
            min_rating: 0.0,
            min_votes: 0,
            max_votes: u32::MAX,
            genres: Vec::new(),
            exclude_adult: false,
        }
    }

    /// Inclusive start-year bounds.
    pub fn with_year_range(mut self, min: u16, max: u16) -> Self {
        self.min_year = min;
        self.max_year = max;
        self
    }

    /// Inclusive runtime bounds in minutes.
    pub fn with_runtime_range(mut self, min: u32, max: u32) -> Self {
        self.min_runtime = min;
        self.max_runtime = max;
        self
    }

    /// Minimum average rating (inclusive).
    pub fn with_min_rating(mut self, min: f32) -> Self {
        self.min_rating = min;
        self
    }

    /// Inclusive vote-count bounds.
    pub fn with_vote_range(mut self, min: u32, max: u32) -> Self {
        self.min_votes = min;
        self.max_votes = max;
        self
    }

    /// Requested genres. A title matches if it carries any of them.
    ///
    /// Each entry is normalized (`"ACTION"` becomes `"Action"`); an empty
    /// list removes the genre constraint.
    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.genres = genres
            .into_iter()
            .map(|genre| normalize_genre(genre.as_ref()))
            .collect();
        self
    }

    /// Drop adult titles from the results.
    pub fn with_exclude_adult(mut self, exclude: bool) -> Self {
        self.exclude_adult = exclude;
        self
    }

    pub fn year_range(&self) -> (u16, u16) {
        (self.min_year, self.max_year)
    }

    pub fn runtime_range(&self) -> (u32, u32) {
        (self.min_runtime, self.max_runtime)
    }

    pub fn min_rating(&self) -> f32 {
        self.min_rating
    }

    pub fn vote_range(&self) -> (u32, u32) {
        (self.min_votes, self.max_votes)
    }

    /// The normalized requested genres.
    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    pub fn excludes_adult(&self) -> bool {
        self.exclude_adult
    }
}

impl Default for Criteria {
    fn default() -> Self {
        Self::new()
    }
}

/// Lowercase a genre, then uppercase its first character.
///
/// Only requested genres go through this; dataset genres are compared as-is.
pub fn normalize_genre(genre: &str) -> String {
    let lower = genre.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

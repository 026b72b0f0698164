//! Filter to keep only titles in one of the requested genres.
//!
//! Requested genres are normalized when the criteria are built; the title's
//! own genre strings are compared verbatim, so a dataset genre with unusual
//! casing (e.g. "Sci-Fi" against a normalized "Sci-fi") never matches.

use crate::criteria::Criteria;
use crate::traits::Filter;
use data_loader::{RatingStat, Title};

/// Keeps titles sharing at least one genre with the request.
/// An empty request keeps everything.
pub struct GenreFilter;

impl Filter for GenreFilter {
    fn name(&self) -> &str {
        "GenreFilter"
    }

    fn passes(&self, title: &Title, _rating: Option<&RatingStat>, criteria: &Criteria) -> bool {
        if criteria.genres.is_empty() {
            return true;
        }
        title
            .genres
            .iter()
            .any(|genre| criteria.genres.iter().any(|wanted| wanted == genre))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::title;

    #[test]
    fn test_genre_filter() {
        let action = title("1", false, None, None, &["Action", "Adventure"]);
        let drama = title("2", false, None, None, &["Drama"]);
        let scifi = title("3", false, None, None, &["Sci-Fi"]);

        let criteria = Criteria::new().with_genres(["Action", "Drama"]);

        assert!(GenreFilter.passes(&action, None, &criteria));
        assert!(GenreFilter.passes(&drama, None, &criteria));
        assert!(!GenreFilter.passes(&scifi, None, &criteria));
    }

    #[test]
    fn test_genre_filter_case_insensitive_request() {
        let action = title("1", false, None, None, &["Action"]);
        let drama = title("2", false, None, None, &["Drama"]);
        let criteria = Criteria::new().with_genres(["ACTION", "drama"]);

        assert!(GenreFilter.passes(&action, None, &criteria));
        assert!(GenreFilter.passes(&drama, None, &criteria));
    }

    #[test]
    fn test_empty_request_keeps_everything() {
        let untagged = title("1", false, None, None, &[]);
        assert!(GenreFilter.passes(&untagged, None, &Criteria::new()));
    }

    #[test]
    fn test_dataset_genres_are_not_normalized() {
        let scifi = title("1", false, None, None, &["Sci-Fi"]);
        let criteria = Criteria::new().with_genres(["sci-fi"]);

        assert!(!GenreFilter.passes(&scifi, None, &criteria));
    }
}

//! Builders shared by the unit tests in this crate.

use data_loader::{DataIndex, RatingStat, Title, TitleType};

pub(crate) fn title(
    id: &str,
    is_adult: bool,
    year: Option<u16>,
    runtime: Option<u32>,
    genres: &[&str],
) -> Title {
    Title {
        id: id.to_string(),
        title_type: TitleType::Movie,
        primary_title: format!("Title {}", id),
        original_title: format!("Title {}", id),
        is_adult,
        start_year: year,
        end_year: None,
        runtime_minutes: runtime,
        genres: genres.iter().map(|g| g.to_string()).collect(),
    }
}

pub(crate) fn rating(id: &str, average_rating: f32, num_votes: u32) -> RatingStat {
    RatingStat {
        id: id.to_string(),
        average_rating,
        num_votes,
    }
}

/// Eight rated titles; with the combined criteria used in the tests only
/// "1", "3" and "5" match.
pub(crate) fn fixture_index() -> DataIndex {
    let mut index = DataIndex::new();
    let rows: [(&str, bool, u16, u32, &[&str], f32, u32); 8] = [
        ("1", false, 2020, 120, &["Action"], 8.5, 10_000),
        ("2", true, 2019, 90, &["Drama"], 7.8, 8_000),
        ("3", false, 2021, 150, &["Action", "Thriller"], 9.0, 15_000),
        ("4", false, 2018, 60, &["Comedy"], 6.5, 3_000),
        ("5", false, 2022, 130, &["Action"], 8.0, 12_000),
        ("6", false, 2005, 100, &["Drama"], 7.5, 20_000),
        ("7", false, 2020, 200, &["Drama"], 8.2, 5_000),
        ("8", false, 2020, 45, &["Documentary"], 7.0, 2_000),
    ];
    for (id, adult, year, runtime, genres, avg, votes) in rows {
        index.insert_title(title(id, adult, Some(year), Some(runtime), genres));
        index.insert_rating(rating(id, avg, votes));
    }
    index
}

//! Integration tests for the title search.
//!
//! These check that the parallel search agrees with the sequential one and
//! that the filters behave as a whole on fixed and randomly generated
//! datasets.

use data_loader::{DataIndex, RatingStat, Title, TitleType};
use pipeline::{Criteria, FilterPipeline, TitleSearch, filter_parallel, filter_sequential};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{HashMap, HashSet};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

const GENRES: [&str; 6] = ["Action", "Comedy", "Drama", "Documentary", "Horror", "Thriller"];

fn make_title(
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

fn make_rating(id: &str, average_rating: f32, num_votes: u32) -> RatingStat {
    RatingStat {
        id: id.to_string(),
        average_rating,
        num_votes,
    }
}

fn create_fixture() -> Arc<DataIndex> {
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
        index.insert_title(make_title(id, adult, Some(year), Some(runtime), genres));
        index.insert_rating(make_rating(id, avg, votes));
    }
    Arc::new(index)
}

/// Random dataset where roughly a tenth of titles lack a year, a runtime or
/// a rating.
fn random_dataset(rng: &mut StdRng, size: usize) -> DataIndex {
    let mut index = DataIndex::new();
    for i in 0..size {
        let id = format!("tt{:07}", i);
        let year = (!rng.random_bool(0.1)).then(|| rng.random_range(1950..=2025));
        let runtime = (!rng.random_bool(0.1)).then(|| rng.random_range(5..=240));
        let genre_count = rng.random_range(0..=3);
        let genres: Vec<&str> = (0..genre_count)
            .map(|_| GENRES[rng.random_range(0..GENRES.len())])
            .collect();
        index.insert_title(make_title(&id, rng.random_bool(0.05), year, runtime, &genres));

        if !rng.random_bool(0.1) {
            let avg = rng.random_range(0..=100) as f32 / 10.0;
            index.insert_rating(make_rating(&id, avg, rng.random_range(0..50_000)));
        }
    }
    index
}

fn random_criteria(rng: &mut StdRng) -> Criteria {
    let min_year = rng.random_range(1950..=2025);
    let min_runtime = rng.random_range(0..=120);
    let min_votes = rng.random_range(0..10_000);
    let genres: Vec<&str> = (0..rng.random_range(0..=2))
        .map(|_| GENRES[rng.random_range(0..GENRES.len())])
        .collect();
    Criteria::new()
        .with_year_range(min_year, rng.random_range(min_year..=2030))
        .with_runtime_range(min_runtime, rng.random_range(min_runtime..=300))
        .with_min_rating(rng.random_range(0..=90) as f32 / 10.0)
        .with_vote_range(min_votes, rng.random_range(min_votes..=60_000))
        .with_genres(genres)
        .with_exclude_adult(rng.random_bool(0.5))
}

fn ids(titles: &[&Title]) -> HashSet<String> {
    titles.iter().map(|t| t.id.clone()).collect()
}

fn workers(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap()
}

fn combined_criteria() -> Criteria {
    Criteria::new()
        .with_exclude_adult(true)
        .with_year_range(2019, 2022)
        .with_runtime_range(100, 180)
        .with_min_rating(8.0)
        .with_vote_range(10_000, 9_999_999)
        .with_genres(["Action"])
}

#[test]
fn test_fixture_combined_criteria() {
    let search = TitleSearch::new(create_fixture(), workers(4));

    let results = search.search(&combined_criteria());

    assert_eq!(results.len(), 3);
    assert_eq!(
        ids(&results),
        HashSet::from(["1".to_string(), "3".to_string(), "5".to_string()])
    );
}

#[test]
fn test_parallel_equals_sequential_for_every_worker_count() {
    let index = create_fixture();
    let pipeline = FilterPipeline::standard();
    let mut rng = StdRng::seed_from_u64(5);
    let criteria_set = [
        Criteria::new(),
        combined_criteria(),
        Criteria::new().with_genres(["Drama", "Comedy"]),
        Criteria::new().with_exclude_adult(true).with_runtime_range(50, 130),
    ];

    // 1..=N+2 covers more workers than titles
    for criteria in &criteria_set {
        let expected = filter_sequential(&index, criteria, &pipeline, &mut rng);
        for w in 1..=index.counts().0 + 2 {
            let results = filter_parallel(&index, criteria, &pipeline, workers(w), &mut rng);
            assert_eq!(results.len(), expected.len(), "worker count {}", w);
            assert_eq!(ids(&results), ids(&expected), "worker count {}", w);
        }
    }
}

#[test]
fn test_random_datasets_agree() {
    let mut rng = StdRng::seed_from_u64(2024);
    let pipeline = FilterPipeline::standard();

    for size in [0, 1, 7, 64, 500, 2_000] {
        let index = random_dataset(&mut rng, size);
        for _ in 0..5 {
            let criteria = random_criteria(&mut rng);
            let expected = filter_sequential(&index, &criteria, &pipeline, &mut rng);
            for w in [1, 2, 3, 8, 33] {
                let results = filter_parallel(&index, &criteria, &pipeline, workers(w), &mut rng);
                assert_eq!(results.len(), expected.len(), "size {} workers {}", size, w);
                assert_eq!(ids(&results), ids(&expected), "size {} workers {}", size, w);
            }
        }
    }
}

#[test]
fn test_no_duplicates() {
    let mut rng = StdRng::seed_from_u64(99);
    let index = random_dataset(&mut rng, 1_000);
    let pipeline = FilterPipeline::standard();

    let results = filter_parallel(&index, &Criteria::new(), &pipeline, workers(7), &mut rng);
    assert_eq!(ids(&results).len(), results.len());
}

#[test]
fn test_oversubscribed_workers() {
    let search = TitleSearch::new(create_fixture(), workers(1_000));

    // Every fixture title has a year, runtime and rating
    assert_eq!(search.search(&Criteria::new()).len(), 8);
}

#[test]
fn test_adult_titles_excluded() {
    let search = TitleSearch::new(create_fixture(), workers(3));
    let criteria = Criteria::new().with_exclude_adult(true);

    let results = search.search(&criteria);
    assert!(results.iter().all(|t| !t.is_adult));
    assert!(!ids(&results).contains("2"));

    // Without the flag the adult title is kept
    assert!(ids(&search.search(&Criteria::new())).contains("2"));
}

#[test]
fn test_missing_attributes_never_match() {
    let mut index = DataIndex::new();
    index.insert_title(make_title("no-year", false, None, Some(90), &["Drama"]));
    index.insert_rating(make_rating("no-year", 9.0, 100));
    index.insert_title(make_title("no-runtime", false, Some(2000), None, &["Drama"]));
    index.insert_rating(make_rating("no-runtime", 9.0, 100));
    index.insert_title(make_title("unrated", false, Some(2000), Some(90), &["Drama"]));
    index.insert_title(make_title("complete", false, Some(2000), Some(90), &["Drama"]));
    index.insert_rating(make_rating("complete", 9.0, 100));

    let search = TitleSearch::new(Arc::new(index), workers(2));

    // Even the most permissive criteria reject incomplete titles
    let results = search.search(&Criteria::new());
    assert_eq!(ids(&results), HashSet::from(["complete".to_string()]));
}

#[test]
fn test_genre_case_insensitive_request() {
    let search = TitleSearch::new(create_fixture(), workers(4));
    let criteria = Criteria::new().with_genres(["ACTION", "drama"]);

    // Action: 1, 3, 5; Drama: 2, 6, 7
    let results = search.search(&criteria);
    assert_eq!(results.len(), 6);
    assert_eq!(
        ids(&results),
        ["1", "2", "3", "5", "6", "7"]
            .iter()
            .map(|s| s.to_string())
            .collect::<HashSet<_>>()
    );
}

#[test]
fn test_dataset_genres_are_not_normalized() {
    let mut index = DataIndex::new();
    index.insert_title(make_title("1", false, Some(2000), Some(90), &["action"]));
    index.insert_rating(make_rating("1", 7.0, 100));

    let search = TitleSearch::new(Arc::new(index), workers(1));

    // "action" in the data never equals the normalized request "Action"
    assert!(search.search(&Criteria::new().with_genres(["action"])).is_empty());
}

#[test]
fn test_empty_result_for_future_years() {
    let search = TitleSearch::new(create_fixture(), workers(4));
    let criteria = Criteria::new().with_year_range(2030, 2040);

    assert!(search.search(&criteria).is_empty());
    assert!(search.search_sequential(&criteria).is_empty());
}

#[test]
fn test_order_varies_membership_stable() {
    let mut rng = StdRng::seed_from_u64(17);
    let index = Arc::new(random_dataset(&mut rng, 300));
    let search = TitleSearch::new(index, workers(4));
    let criteria = Criteria::new();

    let first = search.search_with_rng(&criteria, &mut rng);
    let first_ids: Vec<&str> = first.iter().map(|t| t.id.as_str()).collect();
    assert!(first.len() > 100);

    let mut saw_different_order = false;
    for _ in 0..10 {
        let next = search.search_with_rng(&criteria, &mut rng);
        assert_eq!(ids(&next), ids(&first));
        let next_ids: Vec<&str> = next.iter().map(|t| t.id.as_str()).collect();
        saw_different_order |= next_ids != first_ids;
    }
    assert!(saw_different_order);
}

#[test]
fn test_searches_do_not_modify_the_dataset() {
    let index = create_fixture();
    let before: HashMap<String, Title> = index
        .titles()
        .map(|t| (t.id.clone(), t.clone()))
        .collect();

    let search = TitleSearch::new(index.clone(), workers(4));
    for _ in 0..5 {
        search.search(&combined_criteria());
        search.search_sequential(&combined_criteria());
    }

    let after: HashMap<String, Title> = index
        .titles()
        .map(|t| (t.id.clone(), t.clone()))
        .collect();
    assert_eq!(before, after);
}

#[test]
fn test_concurrent_searches_share_index() {
    let search = TitleSearch::new(create_fixture(), workers(2));

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| ids(&search.search(&combined_criteria()))))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().len(), 3);
        }
    });
}

#[test]
fn test_huge_worker_count_stays_fast() {
    let mut index = DataIndex::new();
    for i in 0..5_000 {
        let id = format!("tt{:07}", i);
        index.insert_title(make_title(&id, false, Some(2000), Some(90), &["Drama"]));
        index.insert_rating(make_rating(&id, 7.0, 100));
    }
    let search = TitleSearch::new(Arc::new(index), workers(5_000));
    let criteria = Criteria::new();

    let start = Instant::now();
    let sequential = search.search_sequential(&criteria);
    let sequential_time = start.elapsed();

    let start = Instant::now();
    let parallel = search.search(&criteria);
    let parallel_time = start.elapsed();

    assert_eq!(ids(&parallel), ids(&sequential));
    // One task per title must not mean one OS thread per title
    assert!(
        parallel_time < sequential_time * 50 + Duration::from_secs(2),
        "parallel {:?} vs sequential {:?}",
        parallel_time,
        sequential_time
    );
}

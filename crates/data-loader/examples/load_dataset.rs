use data_loader::DataIndex;
use std::path::Path;
use std::time::Instant;

fn main() {
    let basics = Path::new("title.basics.tsv.gz");
    let ratings = Path::new("title.ratings.tsv.gz");

    println!("Loading IMDb dataset...\n");

    let start = Instant::now();
    let index = DataIndex::load_from_files(basics, ratings)
        .expect("Failed to load dataset");
    let elapsed = start.elapsed();

    let (titles, ratings) = index.counts();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Titles: {}", titles);
    println!("Ratings: {}", ratings);
    println!("\nPerformance: {:.0} titles/second",
             titles as f64 / elapsed.as_secs_f64());
}

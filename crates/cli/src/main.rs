mod download;
mod prompt;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use data_loader::{DataIndex, RatingStat, Title};
use download::{download_dataset, DatasetClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use pipeline::{host_parallelism, resolve_worker_count, Criteria, TitleSearch, WORKERS_ENV};
use prompt::{split_genres, Prompter};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::Serialize;
use std::collections::HashSet;
use std::io;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

/// imdb-search - Parallel criteria search over the IMDb title dataset
#[derive(Parser)]
#[command(name = "imdb-search")]
#[command(about = "Filter IMDb titles by year, runtime, rating, votes and genre", long_about = None)]
struct Cli {
    #[command(flatten)]
    dataset: DatasetArgs,

    /// Parallel workers per search; invalid values fall back to the CPU count
    #[arg(long, env = WORKERS_ENV)]
    workers: Option<String>,

    /// Base URL used to build title links
    #[arg(long, env = "IMDB_TITLE_URL", default_value = "https://www.imdb.com/title")]
    title_url: String,

    #[command(subcommand)]
    command: Commands,
}

/// Where the dataset lives locally and where it is downloaded from.
#[derive(Args)]
struct DatasetArgs {
    /// Directory holding the dataset files
    #[arg(short, long, env = "IMDB_DATA_DIR", default_value = ".")]
    data_dir: PathBuf,

    /// Title basics file, relative to the data directory (.gz is decompressed)
    #[arg(long, env = "IMDB_BASICS_FILE", default_value = "title.basics.tsv")]
    basics_file: PathBuf,

    /// Title ratings file, relative to the data directory (.gz is decompressed)
    #[arg(long, env = "IMDB_RATINGS_FILE", default_value = "title.ratings.tsv")]
    ratings_file: PathBuf,

    /// Base URL the dataset archives are downloaded from
    #[arg(long, env = "IMDB_DATA_BASE_URL", default_value = DEFAULT_BASE_URL)]
    data_base_url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Find titles matching the given criteria
    Search {
        #[command(flatten)]
        criteria: CriteriaArgs,

        /// Ask for each criterion on stdin (flags become the defaults)
        #[arg(long)]
        interactive: bool,

        /// Download a fresh copy of the dataset before searching
        #[arg(long)]
        download: bool,

        /// Run the single-threaded reference search
        #[arg(long)]
        sequential: bool,

        /// Seed for a reproducible result order
        #[arg(long)]
        seed: Option<u64>,

        /// Number of results to print
        #[arg(long, default_value = "20")]
        limit: usize,

        /// Print every result as JSON instead of a list
        #[arg(long)]
        json: bool,
    },

    /// Show whether a title matches and which filter rejects it
    Explain {
        /// Title identifier (tconst), e.g. tt0111161
        #[arg(long)]
        id: String,

        #[command(flatten)]
        criteria: CriteriaArgs,
    },

    /// Download the dataset archives into the data directory
    Download {
        /// Request timeout in seconds
        #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
        timeout_secs: u64,

        /// Keep only the .gz archives
        #[arg(long)]
        no_extract: bool,
    },

    /// Time the sequential and parallel searches against each other
    Benchmark {
        /// Number of runs per path
        #[arg(long, default_value = "10")]
        iterations: usize,

        #[command(flatten)]
        criteria: CriteriaArgs,
    },
}

/// Filter flags shared by every subcommand. Unset flags leave the bound open.
#[derive(Args, Debug, Default)]
struct CriteriaArgs {
    /// Minimum start year (0-65535)
    #[arg(long)]
    min_year: Option<u16>,

    /// Maximum start year (0-65535)
    #[arg(long)]
    max_year: Option<u16>,

    /// Minimum runtime in minutes
    #[arg(long)]
    min_runtime: Option<u32>,

    /// Maximum runtime in minutes
    #[arg(long)]
    max_runtime: Option<u32>,

    /// Minimum average rating
    #[arg(long)]
    min_rating: Option<f32>,

    /// Minimum number of votes
    #[arg(long)]
    min_votes: Option<u32>,

    /// Maximum number of votes
    #[arg(long)]
    max_votes: Option<u32>,

    /// Genres, any of which must match (comma-separated, case-insensitive)
    #[arg(long, value_delimiter = ',')]
    genres: Vec<String>,

    /// Drop adult titles
    #[arg(long)]
    exclude_adult: bool,
}

impl CriteriaArgs {
    fn to_criteria(&self) -> Criteria {
        let base = Criteria::new();
        let (min_year, max_year) = base.year_range();
        let (min_runtime, max_runtime) = base.runtime_range();
        let (min_votes, max_votes) = base.vote_range();
        let base_rating = base.min_rating();
        let genres: Vec<String> = self
            .genres
            .iter()
            .flat_map(|genre| split_genres(genre))
            .collect();

        base.with_year_range(
            self.min_year.unwrap_or(min_year),
            self.max_year.unwrap_or(max_year),
        )
        .with_runtime_range(
            self.min_runtime.unwrap_or(min_runtime),
            self.max_runtime.unwrap_or(max_runtime),
        )
        .with_min_rating(self.min_rating.unwrap_or(base_rating))
        .with_vote_range(
            self.min_votes.unwrap_or(min_votes),
            self.max_votes.unwrap_or(max_votes),
        )
        .with_genres(genres)
        .with_exclude_adult(self.exclude_adult)
    }
}

/// One search result as printed by `--json`.
#[derive(Serialize)]
struct SearchHit<'a> {
    #[serde(flatten)]
    title: &'a Title,
    rating: Option<&'a RatingStat>,
    url: String,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let workers = resolve_worker_count(cli.workers.as_deref(), host_parallelism());

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Download {
            timeout_secs,
            no_extract,
        } => handle_download(&cli.dataset, timeout_secs, !no_extract)?,
        Commands::Search {
            criteria,
            interactive,
            download,
            sequential,
            seed,
            limit,
            json,
        } => {
            let mut criteria = criteria.to_criteria();
            let mut download = download;
            if interactive {
                let stdin = io::stdin();
                let mut prompter = Prompter::new(stdin.lock(), io::stdout());
                download |= prompter
                    .ask_download()
                    .context("Failed to read answer from stdin")?;
                criteria = prompter
                    .collect(criteria)
                    .context("Failed to read criteria from stdin")?;
            }
            if download {
                handle_download(&cli.dataset, DEFAULT_TIMEOUT_SECS, true)?;
            }
            let search = load_search(&cli.dataset, workers)?;
            let options = SearchOptions {
                sequential,
                seed,
                limit,
                json,
            };
            handle_search(&search, &criteria, &options, &cli.title_url)?
        }
        Commands::Explain { id, criteria } => {
            let search = load_search(&cli.dataset, workers)?;
            handle_explain(&search, &id, &criteria.to_criteria())?
        }
        Commands::Benchmark {
            iterations,
            criteria,
        } => {
            let search = load_search(&cli.dataset, workers)?;
            handle_benchmark(&search, &criteria.to_criteria(), iterations)?
        }
    }

    Ok(())
}

/// Load the data index (this may take a moment)
fn load_search(dataset: &DatasetArgs, workers: NonZeroUsize) -> Result<TitleSearch> {
    let basics_path = dataset.data_dir.join(&dataset.basics_file);
    let ratings_path = dataset.data_dir.join(&dataset.ratings_file);
    let start = Instant::now();
    let data_index = Arc::new(
        DataIndex::load_from_files(&basics_path, &ratings_path)
            .context("Failed to load IMDb dataset")?,
    );
    info!("Dataset ready in {:?}", start.elapsed());
    Ok(TitleSearch::new(data_index, workers))
}

/// Handle the 'download' command
fn handle_download(dataset: &DatasetArgs, timeout_secs: u64, extract: bool) -> Result<()> {
    let client = DatasetClient::new(&dataset.data_base_url, Duration::from_secs(timeout_secs))?;
    let files: [&Path; 2] = [&dataset.basics_file, &dataset.ratings_file];
    let written = download_dataset(&client, &files, &dataset.data_dir, extract)
        .context("Failed to download IMDb dataset")?;

    for path in written {
        println!("{} {}", "✓".green(), path.display());
    }
    Ok(())
}

struct SearchOptions {
    sequential: bool,
    seed: Option<u64>,
    limit: usize,
    json: bool,
}

/// Handle the 'search' command
fn handle_search(
    search: &TitleSearch,
    criteria: &Criteria,
    options: &SearchOptions,
    title_url: &str,
) -> Result<()> {
    let mut rng: Box<dyn RngCore> = match options.seed {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None => Box::new(rand::rng()),
    };

    let start = Instant::now();
    let results = if options.sequential {
        search.search_sequential_with_rng(criteria, &mut *rng)
    } else {
        search.search_with_rng(criteria, &mut *rng)
    };
    info!(
        "Found {} titles matching your criteria in {:?}",
        results.len(),
        start.elapsed()
    );

    if options.json {
        let hits: Vec<SearchHit> = results
            .iter()
            .map(|title| SearchHit {
                title,
                rating: search.data_index().get_rating(&title.id),
                url: title_link(title_url, &title.id),
            })
            .collect();
        let out = serde_json::to_string_pretty(&hits).context("Failed to serialize results")?;
        println!("{}", out);
    } else {
        print_results(search.data_index(), &results, options.limit, title_url);
    }
    Ok(())
}

/// Handle the 'explain' command
fn handle_explain(search: &TitleSearch, id: &str, criteria: &Criteria) -> Result<()> {
    let title = search
        .data_index()
        .get_title(id)
        .ok_or_else(|| anyhow!("Title {} not found", id))?;

    println!("{}", format!("{} ({})", title.primary_title, title.id).bold().blue());
    match search.explain(id, criteria) {
        None => println!("{} matches the criteria", "✓".green()),
        Some(filter) => println!("{} rejected by {}", "✗".red(), filter),
    }
    Ok(())
}

/// Handle the 'benchmark' command
fn handle_benchmark(search: &TitleSearch, criteria: &Criteria, iterations: usize) -> Result<()> {
    if iterations == 0 {
        bail!("--iterations must be at least 1");
    }

    let mut sequential_timings = Vec::with_capacity(iterations);
    let mut parallel_timings = Vec::with_capacity(iterations);
    let mut expected: Option<HashSet<&str>> = None;

    for _ in 0..iterations {
        let start = Instant::now();
        let sequential = search.search_sequential(criteria);
        sequential_timings.push(start.elapsed());

        let start = Instant::now();
        let parallel = search.search(criteria);
        parallel_timings.push(start.elapsed());

        let sequential_ids: HashSet<&str> = sequential.iter().map(|t| t.id.as_str()).collect();
        let parallel_ids: HashSet<&str> = parallel.iter().map(|t| t.id.as_str()).collect();
        if sequential_ids != parallel_ids || parallel.len() != sequential.len() {
            bail!(
                "Parallel search returned {} titles, sequential returned {}",
                parallel.len(),
                sequential.len()
            );
        }
        expected.get_or_insert(sequential_ids);
    }

    let matches = expected.map(|ids| ids.len()).unwrap_or(0);
    println!("{}", "Benchmark results:".bold().blue());
    println!("Iterations: {}", iterations);
    println!("Workers: {}", search.workers());
    println!("Matches: {}", matches);
    print_timings("Sequential", &sequential_timings);
    print_timings("Parallel", &parallel_timings);

    let speedup = mean(&sequential_timings).as_secs_f64() / mean(&parallel_timings).as_secs_f64();
    println!("Speedup: {:.2}x", speedup);
    Ok(())
}

fn mean(timings: &[Duration]) -> Duration {
    let total: Duration = timings.iter().sum();
    total / (timings.len().max(1) as u32)
}

fn print_timings(label: &str, timings: &[Duration]) {
    let min = timings.iter().min().copied().unwrap_or_default();
    println!(
        "{}: mean {:?}, min {:?}",
        label.green(),
        mean(timings),
        min
    );
}

fn title_link(title_url: &str, id: &str) -> String {
    format!("{}/{}/", title_url.trim_end_matches('/'), id)
}

/// Helper function to format and print results
fn print_results(index: &DataIndex, results: &[&Title], limit: usize, title_url: &str) {
    println!(
        "{}",
        format!("Found {} titles matching your criteria:", results.len())
            .bold()
            .blue()
    );

    for (rank, title) in results.iter().take(limit).enumerate() {
        let year = title
            .start_year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "?".to_string());
        let runtime = title
            .runtime_minutes
            .map(|m| format!("{} min", m))
            .unwrap_or_else(|| "? min".to_string());
        let rating = index
            .get_rating(&title.id)
            .map(|r| format!("{:.1} ({} votes)", r.average_rating, r.num_votes))
            .unwrap_or_else(|| "unrated".to_string());

        println!(
            "{}. {} ({}) {} [{}] - {}",
            (rank + 1).to_string().green(),
            title.primary_title.bold(),
            year,
            runtime,
            title.genres.join(", "),
            rating
        );
        println!("   {}", title_link(title_url, &title.id).cyan());
    }

    if results.len() > limit {
        println!("... and {} more (raise --limit to see them)", results.len() - limit);
    }
}

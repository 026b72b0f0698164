//! Interactive criteria collection.
//!
//! Asks for each criterion on its own line. A blank answer keeps the value
//! the criteria already had; an answer that does not parse is reported and
//! ignored.

use pipeline::Criteria;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

const INVALID_INPUT: &str = "Invalid value provided, ignoring input";

/// Reads answers from `input` and writes questions to `output`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask whether to fetch a fresh copy of the dataset first.
    pub fn ask_download(&mut self) -> io::Result<bool> {
        let answer = self.read_answer("Download fresh dataset from IMDb? y=yes: ")?;
        Ok(is_yes(&answer))
    }

    /// Prompt for every criterion, starting from `base`.
    pub fn collect(&mut self, base: Criteria) -> io::Result<Criteria> {
        let (mut min_year, mut max_year) = base.year_range();
        let (mut min_runtime, mut max_runtime) = base.runtime_range();
        let mut min_rating = base.min_rating();
        let (mut min_votes, mut max_votes) = base.vote_range();
        let mut genres: Vec<String> = base.genres().to_vec();
        let mut exclude_adult = base.excludes_adult();

        self.ask("Enter minimum year: ", &mut min_year)?;
        self.ask("Enter maximum year: ", &mut max_year)?;
        self.ask("Enter minimum run time: ", &mut min_runtime)?;
        self.ask("Enter maximum run time: ", &mut max_runtime)?;
        self.ask("Enter minimum rating: ", &mut min_rating)?;
        self.ask("Enter minimum votes: ", &mut min_votes)?;
        self.ask("Enter maximum votes: ", &mut max_votes)?;

        let answer = self.read_answer("Enter genres (comma-separated, e.g., Action,Drama): ")?;
        if !answer.is_empty() {
            genres = split_genres(&answer);
        }

        let answer = self.read_answer("Exclude adult titles? y=yes: ")?;
        if !answer.is_empty() {
            exclude_adult = is_yes(&answer);
        }

        Ok(base
            .with_year_range(min_year, max_year)
            .with_runtime_range(min_runtime, max_runtime)
            .with_min_rating(min_rating)
            .with_vote_range(min_votes, max_votes)
            .with_genres(genres)
            .with_exclude_adult(exclude_adult))
    }

    /// Overwrite `value` with the parsed answer, if there is a valid one.
    fn ask<T: FromStr>(&mut self, question: &str, value: &mut T) -> io::Result<()> {
        let answer = self.read_answer(question)?;
        if answer.is_empty() {
            return Ok(());
        }
        match answer.parse() {
            Ok(parsed) => *value = parsed,
            Err(_) => writeln!(self.output, "{}", INVALID_INPUT)?,
        }
        Ok(())
    }

    /// Print `question` and return the trimmed answer. End of input reads
    /// as a blank answer.
    fn read_answer(&mut self, question: &str) -> io::Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line.trim().to_string())
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.to_lowercase().as_str(), "y" | "yes")
}

/// Split a comma-separated genre list, trimming each entry and dropping
/// empty ones.
pub fn split_genres(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|genre| !genre.is_empty())
        .map(str::to_string)
        .collect()
}

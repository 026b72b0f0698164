//! Parser for the IMDb dataset files.
//!
//! Both files are tab-separated with a header line:
//! - title.basics.tsv: tconst, titleType, primaryTitle, originalTitle,
//!   isAdult, startYear, endYear, runtimeMinutes, genres
//! - title.ratings.tsv: tconst, averageRating, numVotes
//!
//! Columns are located by header name, so extra or reordered columns are
//! fine. The literal `\N` marks a missing value. Quotes carry no meaning;
//! fields are split on tabs only. Paths ending in `.gz` are decompressed
//! while reading.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use flate2::read::GzDecoder;
use std::collections::HashMap;
use std::fmt::Display;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

/// Marker the dataset uses for "no value"
pub const MISSING_VALUE: &str = "\\N";

const TITLE_COLUMNS: [&str; 9] = [
    "tconst",
    "titleType",
    "primaryTitle",
    "originalTitle",
    "isAdult",
    "startYear",
    "endYear",
    "runtimeMinutes",
    "genres",
];

const RATING_COLUMNS: [&str; 3] = ["tconst", "averageRating", "numVotes"];

/// Open a dataset file, transparently decompressing `.gz` files.
fn open_reader(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })?;

    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Column positions resolved from the header line.
struct Header {
    positions: HashMap<String, usize>,
    width: usize,
}

impl Header {
    fn parse(file: &str, line: Option<io::Result<String>>) -> Result<Self> {
        let line = match line {
            Some(line) => line?,
            None => {
                return Err(DataLoadError::ParseError {
                    file: file.to_string(),
                    line: 1,
                    reason: "Missing header line".to_string(),
                });
            }
        };

        let columns: Vec<&str> = line.trim_end_matches('\r').split('\t').collect();
        let positions = columns
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.to_string(), idx))
            .collect();

        Ok(Self {
            positions,
            width: columns.len(),
        })
    }

    /// Resolve every required column, failing on the first one missing.
    fn require<const N: usize>(&self, file: &str, names: [&str; N]) -> Result<[usize; N]> {
        let mut resolved = [0; N];
        for (slot, name) in resolved.iter_mut().zip(names) {
            *slot = *self
                .positions
                .get(name)
                .ok_or_else(|| DataLoadError::MissingColumn {
                    file: file.to_string(),
                    column: name.to_string(),
                })?;
        }
        Ok(resolved)
    }
}

/// Walk the data rows of a file, handing each split row to `visit`.
///
/// Empty lines are skipped; rows narrower than the header are rejected.
fn for_each_row<F>(file: &str, lines: io::Lines<Box<dyn BufRead>>, width: usize, mut visit: F) -> Result<()>
where
    F: FnMut(&[&str], usize) -> Result<()>,
{
    // Line 1 was the header
    for (idx, line) in lines.enumerate() {
        let line_no = idx + 2;
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < width {
            return Err(DataLoadError::FieldCountMismatch {
                file: file.to_string(),
                expected: width,
                found: fields.len(),
                line: line_no,
            });
        }

        visit(&fields, line_no)?;
    }
    Ok(())
}

/// Parse a field that may hold the missing-value marker.
fn parse_optional<T>(raw: &str, file: &str, line: usize, column: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    if raw == MISSING_VALUE {
        return Ok(None);
    }
    parse_required(raw, file, line, column).map(Some)
}

fn parse_required<T>(raw: &str, file: &str, line: usize, column: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    raw.parse().map_err(|e| DataLoadError::ParseError {
        file: file.to_string(),
        line,
        reason: format!("Invalid {} '{}': {}", column, raw, e),
    })
}

/// Split the comma-separated genre column. `\N` means no genres.
fn parse_genres(raw: &str) -> Vec<String> {
    if raw == MISSING_VALUE {
        return Vec::new();
    }
    raw.split(',').map(str::to_string).collect()
}

/// Parse the title.basics file.
///
/// Rows whose `titleType` is not one of the kept categories are dropped
/// before their numeric fields are looked at.
pub fn parse_titles(path: &Path) -> Result<Vec<Title>> {
    let file = file_label(path);
    let mut lines = open_reader(path)?.lines();
    let header = Header::parse(&file, lines.next())?;
    let [id, title_type, primary, original, adult, start, end, runtime, genres] =
        header.require(&file, TITLE_COLUMNS)?;

    let mut titles = Vec::new();
    for_each_row(&file, lines, header.width, |fields, line_no| {
        let Some(kind) = TitleType::from_imdb(fields[title_type]) else {
            return Ok(());
        };

        titles.push(Title {
            id: fields[id].to_string(),
            title_type: kind,
            primary_title: fields[primary].to_string(),
            original_title: fields[original].to_string(),
            is_adult: fields[adult] == "1",
            start_year: parse_optional(fields[start], &file, line_no, "startYear")?,
            end_year: parse_optional(fields[end], &file, line_no, "endYear")?,
            runtime_minutes: parse_optional(fields[runtime], &file, line_no, "runtimeMinutes")?,
            genres: parse_genres(fields[genres]),
        });
        Ok(())
    })?;

    Ok(titles)
}

/// Parse the title.ratings file.
pub fn parse_ratings(path: &Path) -> Result<Vec<RatingStat>> {
    let file = file_label(path);
    let mut lines = open_reader(path)?.lines();
    let header = Header::parse(&file, lines.next())?;
    let [id, average, votes] = header.require(&file, RATING_COLUMNS)?;

    let mut ratings = Vec::new();
    for_each_row(&file, lines, header.width, |fields, line_no| {
        ratings.push(RatingStat {
            id: fields[id].to_string(),
            average_rating: parse_required(fields[average], &file, line_no, "averageRating")?,
            num_votes: parse_required(fields[votes], &file, line_no, "numVotes")?,
        });
        Ok(())
    })?;

    Ok(ratings)
}

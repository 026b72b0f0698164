//! Dataset download.
//!
//! Fetches the gzip dataset files from a base URL into the data directory and
//! optionally decompresses each one next to its archive, so both the `.gz`
//! and the plain `.tsv` names load.

use anyhow::{anyhow, bail, Context, Result};
use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

pub const DEFAULT_BASE_URL: &str = "https://datasets.imdbws.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Blocking HTTP client for one dataset mirror.
pub struct DatasetClient {
    base_url: String,
    agent: ureq::Agent,
}

impl DatasetClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            bail!("Dataset base URL must not be empty");
        }
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Ok(Self {
            base_url: base_url.to_string(),
            agent,
        })
    }

    pub fn url_for(&self, file_name: &str) -> String {
        format!("{}/{}", self.base_url, file_name)
    }

    /// Download `file_name` into `dest_dir` and return the written path.
    ///
    /// The body is streamed to a `.part` file that is renamed once complete;
    /// a failed download leaves nothing behind.
    pub fn fetch(&self, file_name: &str, dest_dir: &Path) -> Result<PathBuf> {
        let url = self.url_for(file_name);
        info!("Downloading {}", url);

        let response = self
            .agent
            .get(&url)
            .call()
            .with_context(|| format!("Failed to download {}", url))?;

        let dest = dest_dir.join(file_name);
        let partial = dest_dir.join(format!("{}.part", file_name));
        let written = write_body(response.into_reader(), &partial);
        match written {
            Ok(bytes) => {
                fs::rename(&partial, &dest)
                    .with_context(|| format!("Failed to move {}", partial.display()))?;
                info!("Wrote {} bytes to {}", bytes, dest.display());
                Ok(dest)
            }
            Err(err) => {
                let _ = fs::remove_file(&partial);
                Err(err.context(format!("Failed to save {}", url)))
            }
        }
    }
}

fn write_body(mut body: impl io::Read, path: &Path) -> Result<u64> {
    let mut out = BufWriter::new(File::create(path)?);
    let bytes = io::copy(&mut body, &mut out)?;
    out.into_inner().map_err(|err| err.into_error())?;
    Ok(bytes)
}

/// The remote archive name for a configured dataset file.
///
/// Only the file name is used; `.gz` is appended unless already present.
pub fn archive_name(file: &Path) -> Result<String> {
    let name = file
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| anyhow!("Invalid dataset file name: {}", file.display()))?;
    if name.ends_with(".gz") {
        Ok(name.to_string())
    } else {
        Ok(format!("{}.gz", name))
    }
}

/// Decompress a gzip archive into `output`, returning the bytes written.
pub fn extract_gzip(archive: &Path, output: &Path) -> Result<u64> {
    let file = File::open(archive)
        .with_context(|| format!("Failed to open {}", archive.display()))?;
    let mut decoder = GzDecoder::new(file);
    write_body(&mut decoder, output)
        .with_context(|| format!("Failed to extract {}", archive.display()))
}

/// Fetch every file in `files` into `data_dir`.
///
/// Returns the archive paths, followed by the extracted paths when `extract`
/// is set.
pub fn download_dataset(
    client: &DatasetClient,
    files: &[&Path],
    data_dir: &Path,
    extract: bool,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create {}", data_dir.display()))?;

    let mut written = Vec::new();
    for file in files {
        let name = archive_name(file)?;
        let archive = client.fetch(&name, data_dir)?;
        if extract {
            let output = archive.with_extension("");
            info!("Extracting {}", archive.display());
            extract_gzip(&archive, &output)?;
            written.push(archive);
            written.push(output);
        } else {
            written.push(archive);
        }
    }
    Ok(written)
}

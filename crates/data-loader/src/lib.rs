//! # Data Loader Crate
//!
//! Loads the IMDb `title.basics` and `title.ratings` files into an in-memory
//! [`DataIndex`].
//!
//! ## Main Components
//!
//! - **types**: Domain types (Title, TitleType, RatingStat, DataIndex)
//! - **parser**: Header-driven TSV parsing, with `.gz` support
//! - **index**: Building and validating the DataIndex
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::DataIndex;
//! use std::path::Path;
//!
//! let index = DataIndex::load_from_files(
//!     Path::new("title.basics.tsv.gz"),
//!     Path::new("title.ratings.tsv.gz"),
//! )?;
//!
//! let title = index.get_title("tt0111161").unwrap();
//! let rating = index.get_rating(&title.id);
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use types::{DataIndex, RatingStat, Title, TitleId, TitleType};

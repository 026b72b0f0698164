//! TitleSearch, the entry point callers use.
//!
//! Holds the shared dataset, the predicate and the worker count, and offers
//! both the parallel path and the sequential reference path.

use crate::criteria::Criteria;
use crate::executor::filter_parallel;
use crate::filter_pipeline::FilterPipeline;
use crate::sequential::filter_sequential;
use data_loader::{DataIndex, Title};
use rand::Rng;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Searches a loaded dataset.
///
/// Each call is independent: nothing is cached or retained between
/// searches, and the dataset is never modified.
#[derive(Clone)]
pub struct TitleSearch {
    /// Shared reference to the data index (read-only, so no Mutex needed)
    data_index: Arc<DataIndex>,
    pipeline: Arc<FilterPipeline>,
    workers: NonZeroUsize,
}

impl TitleSearch {
    /// Create a search over `data_index` using the standard filters.
    ///
    /// ## Parameters
    /// - `data_index`: The loaded dataset
    /// - `workers`: Parallel tasks per search; the caller decides the default
    pub fn new(data_index: Arc<DataIndex>, workers: NonZeroUsize) -> Self {
        Self {
            data_index,
            pipeline: Arc::new(FilterPipeline::standard()),
            workers,
        }
    }

    /// Replace the predicate (default: [`FilterPipeline::standard`]).
    pub fn with_pipeline(mut self, pipeline: FilterPipeline) -> Self {
        self.pipeline = Arc::new(pipeline);
        self
    }

    /// Change the worker count used by [`search`](Self::search).
    pub fn with_workers(mut self, workers: NonZeroUsize) -> Self {
        self.workers = workers;
        self
    }

    pub fn workers(&self) -> NonZeroUsize {
        self.workers
    }

    pub fn data_index(&self) -> &DataIndex {
        &self.data_index
    }

    /// Parallel search with a fresh random order.
    pub fn search(&self, criteria: &Criteria) -> Vec<&Title> {
        self.search_with_rng(criteria, &mut rand::rng())
    }

    /// Parallel search shuffled with the given random source.
    #[instrument(skip_all, fields(workers = self.workers.get()))]
    pub fn search_with_rng<R>(&self, criteria: &Criteria, rng: &mut R) -> Vec<&Title>
    where
        R: Rng + ?Sized,
    {
        let results = filter_parallel(&self.data_index, criteria, &self.pipeline, self.workers, rng);
        debug!("Parallel search found {} titles", results.len());
        results
    }

    /// Sequential reference search with a fresh random order.
    pub fn search_sequential(&self, criteria: &Criteria) -> Vec<&Title> {
        self.search_sequential_with_rng(criteria, &mut rand::rng())
    }

    /// Sequential reference search shuffled with the given random source.
    #[instrument(skip_all)]
    pub fn search_sequential_with_rng<R>(&self, criteria: &Criteria, rng: &mut R) -> Vec<&Title>
    where
        R: Rng + ?Sized,
    {
        let results = filter_sequential(&self.data_index, criteria, &self.pipeline, rng);
        debug!("Sequential search found {} titles", results.len());
        results
    }

    /// Name of the first filter rejecting the title with `id`.
    ///
    /// Returns `None` when the title is unknown or matches; use
    /// [`DataIndex::get_title`] to tell the two apart.
    pub fn explain(&self, id: &str, criteria: &Criteria) -> Option<&str> {
        let title = self.data_index.get_title(id)?;
        self.pipeline
            .first_rejection(title, self.data_index.get_rating(id), criteria)
    }
}

//! Parallel search over the title snapshot.
//!
//! ## Algorithm
//! 1. Partition the snapshot into at most `workers` chunks
//! 2. Spawn one rayon task per chunk; each task filters its chunk locally,
//!    then sends its matches. Tasks run on the global pool, so at most one
//!    OS thread per core is busy however many chunks there are
//! 3. Leaving the scope joins every task
//! 4. Drain the sink, then shuffle
//!
//! Tasks only share the read-only index, criteria and pipeline plus their
//! own sender, so no locking is needed.

use crate::collector::ResultSink;
use crate::criteria::Criteria;
use crate::filter_pipeline::FilterPipeline;
use crate::partition::partition;
use crate::shuffle::shuffle;
use data_loader::{DataIndex, Title};
use rand::Rng;
use std::num::NonZeroUsize;
use tracing::debug;

/// Filter every title in `index` on `workers` parallel tasks and return the
/// matches in random order.
pub fn filter_parallel<'a, R>(
    index: &'a DataIndex,
    criteria: &Criteria,
    pipeline: &FilterPipeline,
    workers: NonZeroUsize,
    rng: &mut R,
) -> Vec<&'a Title>
where
    R: Rng + ?Sized,
{
    let titles = index.title_snapshot();
    let mut results = collect_matches(&titles, index, criteria, pipeline, workers);
    shuffle(&mut results, rng);
    results
}

/// Run the parallel filter pass over `titles` without shuffling.
///
/// The returned order depends on scheduling and must not be relied on.
pub fn collect_matches<'a>(
    titles: &[&'a Title],
    index: &DataIndex,
    criteria: &Criteria,
    pipeline: &FilterPipeline,
    workers: NonZeroUsize,
) -> Vec<&'a Title> {
    let chunks = partition(titles, workers);
    debug!(
        "Partitioned {} titles into {} chunks ({} workers requested)",
        titles.len(),
        chunks.len(),
        workers
    );
    if chunks.is_empty() {
        return Vec::new();
    }

    let sink = ResultSink::new();
    rayon::scope(|scope| spawn_workers(scope, &chunks, &sink, index, criteria, pipeline));

    let results = sink.drain();
    debug!("Collected {} matches", results.len());
    results
}

/// Spawn one task per chunk into `scope`.
fn spawn_workers<'scope, 'a: 'scope>(
    scope: &rayon::Scope<'scope>,
    chunks: &[&'scope [&'a Title]],
    sink: &ResultSink<&'a Title>,
    index: &'scope DataIndex,
    criteria: &'scope Criteria,
    pipeline: &'scope FilterPipeline,
) {
    for &chunk in chunks {
        let sender = sink.sender();
        scope.spawn(move |_| {
            let local = pipeline.apply(chunk, index, criteria);
            for title in local {
                let sent = sender.send(title);
                debug_assert!(sent.is_ok(), "result sink dropped before the join");
            }
        });
    }
}

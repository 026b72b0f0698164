//! Single-threaded reference search.
//!
//! Same predicate and shuffle as the parallel path, without partitioning or
//! threads. Used as the oracle in tests and directly for small inputs.

use crate::criteria::Criteria;
use crate::filter_pipeline::FilterPipeline;
use crate::shuffle::shuffle;
use data_loader::{DataIndex, Title};
use rand::Rng;

/// Filter every title in `index` on the calling thread and return the
/// matches in random order.
pub fn filter_sequential<'a, R>(
    index: &'a DataIndex,
    criteria: &Criteria,
    pipeline: &FilterPipeline,
    rng: &mut R,
) -> Vec<&'a Title>
where
    R: Rng + ?Sized,
{
    let titles = index.title_snapshot();
    let mut results = pipeline.apply(&titles, index, criteria);
    shuffle(&mut results, rng);
    results
}

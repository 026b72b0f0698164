//! Presentation-order randomization.

use rand::Rng;

/// Shuffle `items` in place.
///
/// Walks the slice front to back, swapping position `i` with a position
/// drawn uniformly from `0..=i`. Membership never changes.
pub fn shuffle<T, R>(items: &mut [T], rng: &mut R)
where
    R: Rng + ?Sized,
{
    for i in 0..items.len() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

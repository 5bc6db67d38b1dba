//! Exhaustive search over a block volume.
//!
//! - [`volume`] - the search box, its linear indexing and partitioning
//! - [`executor`] - the worker pool scanning each partition
//! - [`stats`] - summary of a finished run

pub mod executor;
pub mod stats;
pub mod volume;

pub use executor::{MatchStream, SearchEngine};
pub use stats::SearchStats;
pub use volume::{Coordinate, SearchVolume};

use crate::query::types::Predicate;
use std::io;

/// Start a search on a background pool of `workers` threads and return its
/// matches as a lazy, unordered stream.
///
/// Fails with [`io::ErrorKind::InvalidInput`] when `workers` is 0.
pub fn search(
    volume: SearchVolume,
    predicate: Predicate,
    workers: usize,
) -> io::Result<MatchStream> {
    if workers == 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "search needs at least one worker",
        ));
    }
    SearchEngine::new(volume, predicate, workers).stream()
}

use crate::output::MatchSink;
use crate::query::request::SearchRequest;
use crate::query::types::Predicate;
use crate::search::stats::SearchStats;
use crate::search::volume::{Coordinate, SearchVolume};
use crate::utils::progress::{SearchProgress, PROGRESS_BATCH};
use crossbeam::channel::{self, Receiver, Sender};
use rayon::prelude::*;
use std::io;
use std::ops::Range;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Exhaustive search of a volume for cells matching a predicate.
///
/// The volume is split once into `workers` contiguous index ranges; each
/// range is scanned by one task on a pool of exactly `workers` threads.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    volume: SearchVolume,
    predicate: Predicate,
    workers: usize,
    progress: bool,
}

/// Per-worker totals
#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    visited: u128,
    matches: u64,
}

impl Tally {
    fn merge(self, other: Tally) -> Tally {
        Tally {
            visited: self.visited + other.visited,
            matches: self.matches + other.matches,
        }
    }
}

/// First sink failure, shared by all workers.
#[derive(Default)]
struct SinkFailure {
    failed: AtomicBool,
    error: Mutex<Option<io::Error>>,
}

impl SinkFailure {
    fn record(&self, err: io::Error) {
        let mut slot = self.error.lock().unwrap_or_else(|e| e.into_inner());
        if slot.is_none() {
            *slot = Some(err);
        }
        self.failed.store(true, Ordering::Relaxed);
    }

    fn has_failed(&self) -> bool {
        self.failed.load(Ordering::Relaxed)
    }

    fn take(self) -> Option<io::Error> {
        self.error.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

impl SearchEngine {
    /// # Panics
    ///
    /// Panics if `workers` is 0.
    pub fn new(volume: SearchVolume, predicate: Predicate, workers: usize) -> Self {
        assert!(workers > 0, "search needs at least one worker");
        Self {
            volume,
            predicate,
            workers,
            progress: false,
        }
    }

    pub fn from_request(request: SearchRequest) -> Self {
        Self::new(request.volume, request.predicate, request.workers)
    }

    /// Show a progress bar on stderr while running
    pub fn with_progress(mut self, enabled: bool) -> Self {
        self.progress = enabled;
        self
    }

    pub fn volume(&self) -> &SearchVolume {
        &self.volume
    }

    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Scan every cell, sending matches to `sink`, and block until all
    /// workers are done.
    ///
    /// Matches from different workers arrive in no particular order. The only
    /// error is a failing sink, after which workers stop early.
    pub fn run<S: MatchSink + ?Sized>(&self, sink: &S) -> io::Result<SearchStats> {
        self.run_until(sink, &AtomicBool::new(false))
    }

    /// Like [`run`](Self::run), but workers also stop once `cancel` is set.
    fn run_until<S: MatchSink + ?Sized>(
        &self,
        sink: &S,
        cancel: &AtomicBool,
    ) -> io::Result<SearchStats> {
        let start = Instant::now();
        let total = self.volume.cell_count();
        let ranges = self.volume.partition(self.workers);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .thread_name(|i| format!("dirt-worker-{}", i))
            .build()
            .map_err(io::Error::other)?;

        info!(
            cells = %total,
            workers = self.workers,
            constraints = self.predicate.len(),
            "starting search"
        );

        let progress = SearchProgress::new(total, self.progress);
        let failure = SinkFailure::default();

        let tally = pool.install(|| {
            ranges
                .par_iter()
                .enumerate()
                .map(|(worker, range)| {
                    let stop = Stop {
                        failure: &failure,
                        cancel,
                    };
                    self.scan(worker, range.clone(), sink, &progress, stop)
                })
                .reduce(Tally::default, Tally::merge)
        });
        progress.finish();

        if let Some(err) = failure.take() {
            warn!(error = %err, visited = %tally.visited, "search aborted by output failure");
            return Err(err);
        }
        sink.finish()?;
        if cancel.load(Ordering::Relaxed) {
            debug!(visited = %tally.visited, "search cancelled");
        }

        let stats = SearchStats {
            cells_visited: tally.visited,
            matches: tally.matches,
            workers: self.workers,
            elapsed: start.elapsed(),
        };
        info!(
            visited = %stats.cells_visited,
            matches = stats.matches,
            elapsed_ms = stats.elapsed.as_millis() as u64,
            "search finished"
        );
        Ok(stats)
    }

    /// Run on a background thread, yielding matches lazily as they are found.
    pub fn stream(self) -> io::Result<MatchStream> {
        let (sender, receiver) = channel::unbounded();
        let cancel = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancel);
        let handle = thread::Builder::new()
            .name("dirt-search".to_string())
            .spawn(move || self.run_until(&ChannelSink { sender }, &flag))?;

        Ok(MatchStream {
            receiver,
            cancel,
            handle: Some(handle),
        })
    }

    fn scan<S: MatchSink + ?Sized>(
        &self,
        worker: usize,
        range: Range<u128>,
        sink: &S,
        progress: &SearchProgress,
        stop: Stop<'_>,
    ) -> Tally {
        debug!(worker, begin = %range.start, end = %range.end, "worker started");

        let mut tally = Tally::default();
        let mut pending = 0u64;

        for cell in self.volume.cells(range) {
            tally.visited += 1;
            if self.predicate.matches(cell.x, cell.y, cell.z) {
                if let Err(err) = sink.emit(cell) {
                    stop.failure.record(err);
                    break;
                }
                tally.matches += 1;
            }

            pending += 1;
            if pending == PROGRESS_BATCH {
                progress.advance(pending);
                pending = 0;
                if stop.requested() {
                    break;
                }
            }
        }
        progress.advance(pending);

        debug!(worker, visited = %tally.visited, matches = tally.matches, "worker finished");
        tally
    }
}

/// Reasons for a worker to quit before the end of its range.
#[derive(Clone, Copy)]
struct Stop<'a> {
    failure: &'a SinkFailure,
    cancel: &'a AtomicBool,
}

impl Stop<'_> {
    fn requested(&self) -> bool {
        self.failure.has_failed() || self.cancel.load(Ordering::Relaxed)
    }
}

/// Feeds matches into a channel; fails once the receiving side is gone.
struct ChannelSink {
    sender: Sender<Coordinate>,
}

impl MatchSink for ChannelSink {
    fn emit(&self, coordinate: Coordinate) -> io::Result<()> {
        self.sender
            .send(coordinate)
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "match stream dropped"))
    }
}

/// Lazy, unordered sequence of matches from a background search.
///
/// Iteration ends when every worker has finished. Dropping the stream early
/// cancels the search and waits for the workers to stop.
pub struct MatchStream {
    receiver: Receiver<Coordinate>,
    cancel: Arc<AtomicBool>,
    handle: Option<JoinHandle<io::Result<SearchStats>>>,
}

impl MatchStream {
    /// Wait for the search to complete and return its statistics. Matches
    /// not yet consumed are discarded.
    pub fn finish(mut self) -> io::Result<SearchStats> {
        match self.handle.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| io::Error::other("search thread panicked"))?,
            None => Err(io::Error::other("search already finished")),
        }
    }
}

impl Drop for MatchStream {
    fn drop(&mut self) {
        self.cancel.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Iterator for MatchStream {
    type Item = Coordinate;

    fn next(&mut self) -> Option<Coordinate> {
        self.receiver.recv().ok()
    }
}

//! Chunked candidate scoring on a worker pool.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use crossbeam::channel::{self, RecvTimeoutError};
use rayon::ThreadPool;
use teamforge_config::ParallelConfig;
use teamforge_core::Participant;
use thiserror::Error;
use tracing::{debug, warn};

use super::{best_in, CandidateSelector, Selection, SelectionMode};

/// Why a parallel run was abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub(crate) enum ChunkFailure {
    #[error("chunk {chunk} did not report within {timeout_ms} ms")]
    TimedOut { chunk: usize, timeout_ms: u64 },

    #[error("chunk {0} panicked")]
    Panicked(usize),

    #[error("all workers dropped before reporting")]
    Disconnected,
}

type ChunkBest = Option<(usize, f64)>;

/// Splits one selection step across a rayon pool.
///
/// Used only when a step has more than `threshold` candidates. Each worker
/// scores a contiguous chunk of at least `min_chunk_size` candidates against
/// a snapshot of the team and reports its chunk-local best over a channel.
/// If any chunk misses `chunk_timeout` or panics, the run is discarded and
/// the same candidates are scanned sequentially. Abandoned workers finish on
/// their own and their results are dropped.
///
/// Chunk results are merged in chunk order with the same strict comparison
/// as the sequential scan, so a completed parallel run picks the same
/// candidate the sequential scan would.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use teamforge_solver::selection::ParallelEvaluator;
///
/// let pool = rayon::ThreadPoolBuilder::new().num_threads(4).build().unwrap();
/// let evaluator = ParallelEvaluator::new(Arc::new(pool));
///
/// assert_eq!(evaluator.chunk_count(150), 1);
/// assert_eq!(evaluator.chunk_count(200), 4);
/// assert_eq!(evaluator.chunk_count(160), 4);
/// ```
#[derive(Debug, Clone)]
pub struct ParallelEvaluator {
    pool: Arc<ThreadPool>,
    threshold: usize,
    min_chunk_size: usize,
    chunk_timeout: Duration,
    #[cfg(test)]
    panic_chunk: Option<usize>,
}

impl ParallelEvaluator {
    pub fn new(pool: Arc<ThreadPool>) -> Self {
        Self::from_config(pool, &ParallelConfig::default())
    }

    pub fn from_config(pool: Arc<ThreadPool>, config: &ParallelConfig) -> Self {
        Self {
            pool,
            threshold: config.threshold,
            min_chunk_size: config.min_chunk_size.max(1),
            chunk_timeout: config.chunk_timeout(),
            #[cfg(test)]
            panic_chunk: None,
        }
    }

    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_min_chunk_size(mut self, size: usize) -> Self {
        self.min_chunk_size = size.max(1);
        self
    }

    pub fn with_chunk_timeout(mut self, timeout: Duration) -> Self {
        self.chunk_timeout = timeout;
        self
    }

    /// Makes the worker scoring chunk `chunk` panic.
    #[cfg(test)]
    pub(crate) fn with_panicking_chunk(mut self, chunk: usize) -> Self {
        self.panic_chunk = Some(chunk);
        self
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn chunk_timeout(&self) -> Duration {
        self.chunk_timeout
    }

    /// Number of chunks a step with `candidates` entries is split into.
    ///
    /// One means the step runs sequentially.
    pub fn chunk_count(&self, candidates: usize) -> usize {
        if candidates <= self.threshold {
            return 1;
        }
        self.pool
            .current_num_threads()
            .min(candidates / self.min_chunk_size)
            .max(1)
    }

    fn dispatch(
        &self,
        team: &[Participant],
        candidates: &[Participant],
        chunks: usize,
    ) -> Result<ChunkBest, ChunkFailure> {
        let chunk_len = candidates.len().div_ceil(chunks);
        let snapshot: Arc<[Participant]> = Arc::from(team);
        let (tx, rx) = channel::bounded(chunks);
        #[cfg(test)]
        let panic_chunk = self.panic_chunk;

        let mut dispatched = 0;
        for (chunk_index, chunk) in candidates.chunks(chunk_len).enumerate() {
            let tx = tx.clone();
            let team = Arc::clone(&snapshot);
            let chunk = chunk.to_vec();
            let offset = chunk_index * chunk_len;
            self.pool.spawn(move || {
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                    #[cfg(test)]
                    if panic_chunk == Some(chunk_index) {
                        panic!("scoring chunk {chunk_index} failed");
                    }
                    best_in(&team, &chunk, offset)
                }));
                // The coordinator may already have given up on this run.
                let _ = tx.send((chunk_index, outcome.ok()));
            });
            dispatched += 1;
        }
        drop(tx);

        let mut results: Vec<Option<ChunkBest>> = vec![None; dispatched];
        for _ in 0..dispatched {
            match rx.recv_timeout(self.chunk_timeout) {
                Ok((chunk, Some(best))) => results[chunk] = Some(best),
                Ok((chunk, None)) => return Err(ChunkFailure::Panicked(chunk)),
                Err(RecvTimeoutError::Timeout) => {
                    let chunk = results.iter().position(Option::is_none).unwrap_or(0);
                    return Err(ChunkFailure::TimedOut {
                        chunk,
                        timeout_ms: self.chunk_timeout.as_millis() as u64,
                    });
                }
                Err(RecvTimeoutError::Disconnected) => return Err(ChunkFailure::Disconnected),
            }
        }

        let mut best: ChunkBest = None;
        for (index, score) in results.into_iter().flatten().flatten() {
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((index, score));
            }
        }
        Ok(best)
    }
}

impl CandidateSelector for ParallelEvaluator {
    fn select(&self, team: &[Participant], candidates: &[Participant]) -> Option<Selection> {
        let chunks = self.chunk_count(candidates.len());
        if chunks <= 1 {
            return best_in(team, candidates, 0).map(|(index, score)| Selection {
                index,
                score,
                mode: SelectionMode::Sequential,
            });
        }

        debug!(
            event = "parallel_select",
            candidates = candidates.len(),
            chunks = chunks,
        );

        match self.dispatch(team, candidates, chunks) {
            Ok(best) => best.map(|(index, score)| Selection {
                index,
                score,
                mode: SelectionMode::Parallel,
            }),
            Err(failure) => {
                warn!(
                    event = "parallel_fallback",
                    reason = %failure,
                    candidates = candidates.len(),
                    chunks = chunks,
                );
                best_in(team, candidates, 0).map(|(index, score)| Selection {
                    index,
                    score,
                    mode: SelectionMode::Fallback,
                })
            }
        }
    }
}

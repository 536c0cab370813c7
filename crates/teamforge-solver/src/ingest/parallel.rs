//! Chunked row parsing on a worker pool.

use std::io::{self, BufRead};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use rayon::ThreadPool;
use teamforge_config::IngestConfig;
use teamforge_core::Participant;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::row::{parse_rows, read_rows, ParseError};

/// Failure of one ingestion chunk.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestError {
    #[error("chunk {chunk}: {source}")]
    Parse {
        chunk: usize,
        #[source]
        source: ParseError,
    },

    #[error("chunk {chunk}: worker panicked")]
    WorkerPanicked { chunk: usize },
}

impl IngestError {
    /// Index of the chunk that failed.
    pub fn chunk(&self) -> usize {
        match self {
            IngestError::Parse { chunk, .. } | IngestError::WorkerPanicked { chunk } => *chunk,
        }
    }
}

/// Per-chunk outcome of a parallel ingestion, in chunk order.
///
/// Whether a failed chunk aborts the whole ingestion is up to the caller:
/// [`into_participants`](Self::into_participants) is all-or-nothing,
/// [`partial`](Self::partial) keeps the chunks that parsed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestReport {
    chunks: Vec<Result<Vec<Participant>, IngestError>>,
}

impl IngestReport {
    pub fn chunks(&self) -> &[Result<Vec<Participant>, IngestError>] {
        &self.chunks
    }

    pub fn is_complete(&self) -> bool {
        self.chunks.iter().all(Result::is_ok)
    }

    pub fn failures(&self) -> impl Iterator<Item = &IngestError> {
        self.chunks.iter().filter_map(|c| c.as_ref().err())
    }

    /// All participants in input order, or the first failed chunk.
    pub fn into_participants(self) -> Result<Vec<Participant>, IngestError> {
        let mut participants = Vec::new();
        for chunk in self.chunks {
            participants.extend(chunk?);
        }
        Ok(participants)
    }

    /// Participants of the chunks that parsed, and the failures.
    pub fn partial(self) -> (Vec<Participant>, Vec<IngestError>) {
        let mut participants = Vec::new();
        let mut failures = Vec::new();
        for chunk in self.chunks {
            match chunk {
                Ok(parsed) => participants.extend(parsed),
                Err(e) => failures.push(e),
            }
        }
        (participants, failures)
    }
}

/// Splits input rows into `ceil(rows / thread_count)`-sized chunks and
/// parses each on a rayon pool.
///
/// Chunks are concatenated in chunk order, so the output keeps the input
/// order. A bad row fails only its own chunk. Readers are expected to start
/// with a header line unless [`with_skip_header(false)`] says otherwise.
///
/// [`with_skip_header(false)`]: Self::with_skip_header
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use teamforge_solver::ingest::ParallelIngestor;
///
/// let pool = Arc::new(rayon::ThreadPoolBuilder::new().num_threads(2).build().unwrap());
/// let ingestor = ParallelIngestor::new(pool, 4);
///
/// let rows = [
///     "P1,Ana,ana@university.edu,Chess,5,STRATEGIST,92,LEADER",
///     "P2,Bo,bo@university.edu,FIFA,6,ATTACKER,60,THINKER",
/// ];
/// let participants = ingestor.ingest(&rows).into_participants().unwrap();
/// assert_eq!(participants.len(), 2);
/// assert_eq!(participants[1].name(), "Bo");
/// ```
#[derive(Debug, Clone)]
pub struct ParallelIngestor {
    pool: Arc<ThreadPool>,
    thread_count: usize,
    skip_header: bool,
}

impl ParallelIngestor {
    pub fn new(pool: Arc<ThreadPool>, thread_count: usize) -> Self {
        Self {
            pool,
            thread_count: thread_count.max(1),
            skip_header: true,
        }
    }

    pub fn from_config(pool: Arc<ThreadPool>, config: &IngestConfig) -> Self {
        Self::new(pool, config.thread_count).with_skip_header(config.skip_header)
    }

    /// Whether [`ingest_reader`](Self::ingest_reader) drops the first line.
    pub fn with_skip_header(mut self, skip_header: bool) -> Self {
        self.skip_header = skip_header;
        self
    }

    pub fn skip_header(&self) -> bool {
        self.skip_header
    }

    /// Rows per chunk for an input of `rows` rows.
    pub fn chunk_len(&self, rows: usize) -> usize {
        rows.div_ceil(self.thread_count).max(1)
    }

    pub fn ingest<S: AsRef<str> + Sync>(&self, rows: &[S]) -> IngestReport {
        if rows.is_empty() {
            return IngestReport::default();
        }

        let start = Instant::now();
        let chunk_len = self.chunk_len(rows.len());

        let chunks: Vec<_> = self.pool.install(|| {
            rows.par_chunks(chunk_len)
                .enumerate()
                .map(|(chunk, slice)| parse_chunk(chunk, chunk_len, slice))
                .collect()
        });

        let report = IngestReport { chunks };
        info!(
            event = "ingest_end",
            rows = rows.len(),
            chunks = report.chunks.len(),
            failed = report.failures().count(),
            duration_ms = start.elapsed().as_millis() as u64,
        );
        report
    }

    /// Reads rows from `reader` and ingests them, dropping the header line
    /// if the ingestor is configured to.
    pub fn ingest_reader<R: BufRead>(&self, reader: R) -> io::Result<IngestReport> {
        let rows = read_rows(reader, self.skip_header)?;
        Ok(self.ingest(&rows))
    }
}

fn parse_chunk<S: AsRef<str>>(
    chunk: usize,
    chunk_len: usize,
    rows: &[S],
) -> Result<Vec<Participant>, IngestError> {
    let first_row = chunk * chunk_len;
    match panic::catch_unwind(AssertUnwindSafe(|| parse_rows(rows))) {
        Ok(Ok(participants)) => {
            debug!(
                event = "ingest_chunk",
                chunk = chunk,
                first_row = first_row,
                rows = rows.len(),
            );
            Ok(participants)
        }
        Ok(Err(source)) => {
            warn!(
                event = "ingest_failed",
                chunk = chunk,
                first_row = first_row,
                error = %source,
            );
            Err(IngestError::Parse { chunk, source })
        }
        Err(_) => Err(IngestError::WorkerPanicked { chunk }),
    }
}

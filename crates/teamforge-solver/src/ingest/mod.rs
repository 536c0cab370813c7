//! Participant CSV ingestion and export.
//!
//! Rows are parsed by [`parse_row`]. Large inputs are split into chunks
//! and parsed on a worker pool by [`ParallelIngestor`]; a bad row fails
//! only the chunk it belongs to.

pub mod export;
mod parallel;
mod row;

pub use export::{write_participants, write_teams};
pub use parallel::{IngestError, IngestReport, ParallelIngestor};
pub use row::{parse_row, parse_rows, read_rows, ParseError, COLUMN_COUNT};

#[cfg(test)]
mod tests;

//! Candidate selection for one assembly step.
//!
//! A selector scans the remaining candidates for a team under construction
//! and returns the legal candidate with the highest score:
//! - [`SequentialSelector`]: single-threaded scan in candidate order
//! - [`ParallelEvaluator`]: chunked scan on a worker pool with a sequential
//!   fallback on timeout or worker failure

mod parallel;

use std::fmt::Debug;

use teamforge_core::Participant;

use crate::constraint::ConstraintChecker;
use crate::score::CandidateScorer;

pub use parallel::ParallelEvaluator;

/// How a selection was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    Sequential,
    Parallel,
    /// The parallel run was abandoned and the sequential scan answered.
    Fallback,
}

/// The winning candidate of a selection step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    /// Index into the candidate slice passed to the selector.
    pub index: usize,
    pub score: f64,
    pub mode: SelectionMode,
}

/// Picks the next member for a team under construction.
pub trait CandidateSelector: Send + Sync + Debug {
    /// Returns the best legal candidate, or `None` if every candidate would
    /// break a hard constraint.
    fn select(&self, team: &[Participant], candidates: &[Participant]) -> Option<Selection>;
}

/// Best legal candidate of `chunk`, as `(offset + local index, score)`.
///
/// Only a strictly greater score replaces the current best, so the first
/// candidate in scan order wins ties.
pub(crate) fn best_in(
    team: &[Participant],
    chunk: &[Participant],
    offset: usize,
) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (i, candidate) in chunk.iter().enumerate() {
        if ConstraintChecker::would_violate(team, candidate) {
            continue;
        }
        let score = CandidateScorer::score(team, candidate);
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((offset + i, score));
        }
    }
    best
}

/// Scans candidates in order on the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialSelector;

impl CandidateSelector for SequentialSelector {
    fn select(&self, team: &[Participant], candidates: &[Participant]) -> Option<Selection> {
        best_in(team, candidates, 0).map(|(index, score)| Selection {
            index,
            score,
            mode: SelectionMode::Sequential,
        })
    }
}

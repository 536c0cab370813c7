//! Formation statistics.
//!
//! Counters for one formation run, filled in by the phases.

use std::time::{Duration, Instant};

use crate::selection::SelectionMode;

/// Formation-level statistics.
///
/// # Example
///
/// ```
/// use teamforge_solver::stats::FormationStats;
/// use teamforge_solver::selection::SelectionMode;
///
/// let mut stats = FormationStats::default();
/// stats.start();
/// stats.record_attempt();
/// stats.record_selection(SelectionMode::Parallel, 200);
/// stats.record_selection(SelectionMode::Fallback, 180);
/// stats.record_team_formed();
///
/// assert_eq!(stats.attempts, 1);
/// assert_eq!(stats.candidates_evaluated, 380);
/// assert_eq!(stats.parallel_selections, 1);
/// assert_eq!(stats.sequential_fallbacks, 1);
/// assert_eq!(stats.teams_formed, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FormationStats {
    start_time: Option<Instant>,
    elapsed: Option<Duration>,
    /// Team-building attempts, including the one that halted assembly.
    pub attempts: u64,
    /// Compliant teams committed.
    pub teams_formed: u64,
    /// Overflow teams created.
    pub overflow_teams: u64,
    /// Candidates scanned across all selection steps.
    pub candidates_evaluated: u64,
    /// Selection steps answered by a completed parallel run.
    pub parallel_selections: u64,
    /// Parallel runs abandoned in favour of the sequential scan.
    pub sequential_fallbacks: u64,
    /// Member swaps applied by the balancer.
    pub balance_swaps: u64,
}

impl FormationStats {
    /// Marks the start of the run.
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
        self.elapsed = None;
    }

    /// Freezes the elapsed time.
    pub fn finish(&mut self) {
        self.elapsed = Some(self.elapsed());
    }

    /// Returns the run time, frozen once [`finish`](Self::finish) is called.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
            .or_else(|| self.start_time.map(|t| t.elapsed()))
            .unwrap_or_default()
    }

    pub fn record_attempt(&mut self) {
        self.attempts += 1;
    }

    pub fn record_team_formed(&mut self) {
        self.teams_formed += 1;
    }

    pub fn record_overflow_team(&mut self) {
        self.overflow_teams += 1;
    }

    /// Records one selection step over `candidates` entries.
    pub fn record_selection(&mut self, mode: SelectionMode, candidates: usize) {
        self.candidates_evaluated += candidates as u64;
        match mode {
            SelectionMode::Sequential => {}
            SelectionMode::Parallel => self.parallel_selections += 1,
            SelectionMode::Fallback => self.sequential_fallbacks += 1,
        }
    }

    pub fn record_swaps(&mut self, swaps: usize) {
        self.balance_swaps += swaps as u64;
    }

    /// Candidates scanned per second.
    pub fn candidates_per_second(&self) -> u64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 {
            (self.candidates_evaluated as f64 / secs) as u64
        } else {
            0
        }
    }
}

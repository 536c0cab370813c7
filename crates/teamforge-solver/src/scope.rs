//! Formation-level scope.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use teamforge_core::{Participant, Team, TeamSize};

use crate::formation::TeamFormationResult;
use crate::phase::{BalanceSummary, HaltReason};
use crate::stats::FormationStats;

/// Working state of one formation run.
///
/// Owned by the coordinating thread. Phases read and mutate it in
/// sequence; workers only ever see snapshots handed out by a selector.
pub struct FormationScope {
    pool: Vec<Participant>,
    target: TeamSize,
    compliant: Vec<Team>,
    overflow: Vec<Team>,
    next_team_id: usize,
    phase_index: usize,
    rng: ChaCha8Rng,
    stats: FormationStats,
    halt_reason: Option<HaltReason>,
    balance: BalanceSummary,
}

impl FormationScope {
    pub fn new(pool: Vec<Participant>, target: TeamSize) -> Self {
        Self::with_rng(pool, target, ChaCha8Rng::from_os_rng())
    }

    pub fn with_seed(pool: Vec<Participant>, target: TeamSize, seed: u64) -> Self {
        Self::with_rng(pool, target, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(pool: Vec<Participant>, target: TeamSize, rng: ChaCha8Rng) -> Self {
        Self {
            pool,
            target,
            compliant: Vec::new(),
            overflow: Vec::new(),
            next_team_id: 1,
            phase_index: 0,
            rng,
            stats: FormationStats::default(),
            halt_reason: None,
            balance: BalanceSummary::default(),
        }
    }

    /// Participants not yet placed in a team.
    pub fn pool(&self) -> &[Participant] {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut Vec<Participant> {
        &mut self.pool
    }

    /// Empties the pool and returns what was left in it.
    pub fn take_pool(&mut self) -> Vec<Participant> {
        std::mem::take(&mut self.pool)
    }

    pub fn target_size(&self) -> TeamSize {
        self.target
    }

    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    /// The pool and statistics, borrowed together for a selection step.
    pub fn pool_and_stats(&mut self) -> (&[Participant], &mut FormationStats) {
        (&self.pool, &mut self.stats)
    }

    pub fn stats(&self) -> &FormationStats {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut FormationStats {
        &mut self.stats
    }

    /// Id the next committed team will receive.
    pub fn next_team_id(&self) -> usize {
        self.next_team_id
    }

    pub fn phase_index(&self) -> usize {
        self.phase_index
    }

    pub(crate) fn enter_phase(&mut self, index: usize) {
        self.phase_index = index;
    }

    /// Commits an assembled team and removes its members from the pool.
    ///
    /// The team keeps the id it was built with, which must be
    /// [`next_team_id`](Self::next_team_id).
    pub fn commit_compliant(&mut self, team: Team) -> &Team {
        debug_assert_eq!(team.id(), self.next_team_id);
        self.pool.retain(|p| !team.contains(p.id()));
        self.next_team_id = team.id() + 1;
        self.stats.record_team_formed();
        self.compliant.push(team);
        &self.compliant[self.compliant.len() - 1]
    }

    /// Creates an overflow team from `members` with the next id.
    pub fn commit_overflow(&mut self, members: Vec<Participant>) -> &Team {
        let team = Team::with_members(self.next_team_id, members);
        self.next_team_id += 1;
        self.stats.record_overflow_team();
        self.overflow.push(team);
        &self.overflow[self.overflow.len() - 1]
    }

    pub fn compliant_teams(&self) -> &[Team] {
        &self.compliant
    }

    pub fn overflow_teams(&self) -> &[Team] {
        &self.overflow
    }

    /// Compliant teams and statistics, borrowed together for balancing.
    pub fn compliant_and_stats(&mut self) -> (&mut [Team], &mut FormationStats) {
        (&mut self.compliant, &mut self.stats)
    }

    pub fn halt_reason(&self) -> Option<&HaltReason> {
        self.halt_reason.as_ref()
    }

    pub fn set_halt_reason(&mut self, reason: HaltReason) {
        self.halt_reason = Some(reason);
    }

    pub fn set_balance(&mut self, summary: BalanceSummary) {
        self.balance = summary;
    }

    pub(crate) fn into_result(self) -> TeamFormationResult {
        TeamFormationResult::new(
            self.compliant,
            self.overflow,
            self.target,
            self.halt_reason,
            self.balance,
            self.stats,
        )
    }
}

impl std::fmt::Debug for FormationScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormationScope")
            .field("pool", &self.pool.len())
            .field("target", &self.target)
            .field("compliant", &self.compliant.len())
            .field("overflow", &self.overflow.len())
            .field("next_team_id", &self.next_team_id)
            .field("phase_index", &self.phase_index)
            .finish()
    }
}

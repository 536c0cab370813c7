//! Formation runs: orchestration and results.

use std::collections::HashSet;
use std::sync::Arc;

use rayon::ThreadPool;
use tracing::info;

use teamforge_config::{BalanceConfig, FormationConfig};
use teamforge_core::{Participant, Result, Team, TeamForgeError, TeamSize};

use crate::constraint::{diagnose, Violation};
use crate::phase::{
    AssemblyPhase, BalancePhase, BalanceSummary, HaltReason, OverflowPhase, Phase, SkillBalancer,
};
use crate::scope::FormationScope;
use crate::selection::{CandidateSelector, ParallelEvaluator, SequentialSelector};
use crate::stats::FormationStats;

/// A configured formation run over one participant pool.
///
/// # Example
///
/// ```
/// use teamforge_core::{Participant, PersonalityType, RoleType};
/// use teamforge_solver::TeamFormation;
///
/// let pool = vec![
///     Participant::new("1", "Ana", "ana@university.edu", "Chess", 5,
///         RoleType::Strategist, 95, PersonalityType::Leader),
///     Participant::new("2", "Bo", "bo@university.edu", "FIFA", 6,
///         RoleType::Attacker, 75, PersonalityType::Balanced),
///     Participant::new("3", "Cy", "cy@university.edu", "Valorant", 4,
///         RoleType::Defender, 60, PersonalityType::Thinker),
/// ];
///
/// let result = TeamFormation::new(pool, 3).unwrap().with_seed(1).form();
/// assert_eq!(result.compliant_teams().len(), 1);
/// assert!(result.overflow_teams().is_empty());
/// ```
#[derive(Debug)]
pub struct TeamFormation {
    participants: Vec<Participant>,
    target: TeamSize,
    seed: Option<u64>,
    balancer: SkillBalancer,
    selector: Box<dyn CandidateSelector>,
}

impl TeamFormation {
    /// Validates the pool and team size.
    ///
    /// # Errors
    ///
    /// `EmptyPool` for no participants, `TeamSizeOutOfRange` for a size
    /// outside 2..=10, and `DuplicateParticipant` if two records share an id.
    pub fn new(participants: Vec<Participant>, team_size: usize) -> Result<Self> {
        if participants.is_empty() {
            return Err(TeamForgeError::EmptyPool);
        }
        let target = TeamSize::new(team_size)?;

        let mut seen = HashSet::with_capacity(participants.len());
        for p in &participants {
            if !seen.insert(p.id()) {
                return Err(TeamForgeError::DuplicateParticipant(p.id().to_string()));
            }
        }

        Ok(Self {
            participants,
            target,
            seed: None,
            balancer: SkillBalancer::default(),
            selector: Box::new(SequentialSelector),
        })
    }

    /// Builds a run from a loaded configuration.
    ///
    /// `worker_pool` is used for parallel selection when
    /// `config.parallel.enabled` is set.
    pub fn from_config(
        participants: Vec<Participant>,
        config: &FormationConfig,
        worker_pool: Option<Arc<ThreadPool>>,
    ) -> Result<Self> {
        let mut formation =
            Self::new(participants, config.team_size)?.with_balance(&config.balance);
        formation.seed = config.random_seed;
        if let Some(pool) = worker_pool.filter(|_| config.parallel.enabled) {
            formation.selector = Box::new(ParallelEvaluator::from_config(pool, &config.parallel));
        }
        Ok(formation)
    }

    /// Fixes the shuffle seed for a reproducible run.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_balance(mut self, config: &BalanceConfig) -> Self {
        self.balancer = SkillBalancer::from_config(config);
        self
    }

    /// Scores large selection steps on `pool` with default parallel settings.
    pub fn with_worker_pool(self, pool: Arc<ThreadPool>) -> Self {
        self.with_selector(ParallelEvaluator::new(pool))
    }

    pub fn with_selector(mut self, selector: impl CandidateSelector + 'static) -> Self {
        self.selector = Box::new(selector);
        self
    }

    pub fn target_size(&self) -> TeamSize {
        self.target
    }

    /// Runs assembly, overflow, and balancing in order.
    pub fn form(self) -> TeamFormationResult {
        let participant_count = self.participants.len();
        let gap_threshold = self.balancer.gap_threshold();
        let mut scope = match self.seed {
            Some(seed) => FormationScope::with_seed(self.participants, self.target, seed),
            None => FormationScope::new(self.participants, self.target),
        };
        scope.stats_mut().start();

        info!(
            event = "formation_start",
            participants = participant_count,
            team_size = self.target.get(),
            seed = ?self.seed,
        );

        let mut phases: Vec<Box<dyn Phase>> = vec![
            Box::new(AssemblyPhase::new(self.selector)),
            Box::new(OverflowPhase),
            Box::new(BalancePhase::new(self.balancer)),
        ];
        for (index, phase) in phases.iter_mut().enumerate() {
            scope.enter_phase(index);
            phase.solve(&mut scope);
        }

        scope.stats_mut().finish();
        let result = scope.into_result();

        info!(
            event = "formation_end",
            compliant = result.compliant_teams().len(),
            overflow = result.overflow_teams().len(),
            duration_ms = result.stats().elapsed().as_millis() as u64,
            attempts = result.stats().attempts,
            candidates = result.stats().candidates_evaluated,
            gap = result.balance().final_gap,
            gap_threshold = gap_threshold,
        );
        result
    }
}

/// An overflow team and the rules it breaks.
#[derive(Debug, Clone, PartialEq)]
pub struct OverflowReport<'a> {
    pub team: &'a Team,
    pub violations: Vec<Violation>,
}

/// Teams produced by a formation run.
///
/// Compliant teams come first in id order, then overflow teams.
#[derive(Debug, Clone)]
pub struct TeamFormationResult {
    compliant: Vec<Team>,
    overflow: Vec<Team>,
    target: TeamSize,
    halt_reason: Option<HaltReason>,
    balance: BalanceSummary,
    stats: FormationStats,
}

impl TeamFormationResult {
    pub(crate) fn new(
        compliant: Vec<Team>,
        overflow: Vec<Team>,
        target: TeamSize,
        halt_reason: Option<HaltReason>,
        balance: BalanceSummary,
        stats: FormationStats,
    ) -> Self {
        Self {
            compliant,
            overflow,
            target,
            halt_reason,
            balance,
            stats,
        }
    }

    pub fn compliant_teams(&self) -> &[Team] {
        &self.compliant
    }

    pub fn overflow_teams(&self) -> &[Team] {
        &self.overflow
    }

    /// Every team, compliant first.
    pub fn all_teams(&self) -> impl Iterator<Item = &Team> {
        self.compliant.iter().chain(self.overflow.iter())
    }

    pub fn target_size(&self) -> TeamSize {
        self.target
    }

    /// Why assembly stopped early, if it did. `None` means the pool simply
    /// dropped below the target size.
    pub fn halt_reason(&self) -> Option<&HaltReason> {
        self.halt_reason.as_ref()
    }

    pub fn balance(&self) -> &BalanceSummary {
        &self.balance
    }

    pub fn stats(&self) -> &FormationStats {
        &self.stats
    }

    pub fn team_count(&self) -> usize {
        self.compliant.len() + self.overflow.len()
    }

    pub fn participant_count(&self) -> usize {
        self.all_teams().map(Team::len).sum()
    }

    /// Violations of each overflow team, in team order.
    pub fn overflow_reports(&self) -> Vec<OverflowReport<'_>> {
        self.overflow
            .iter()
            .map(|team| OverflowReport {
                team,
                violations: diagnose(team.members(), self.target),
            })
            .collect()
    }

    pub fn into_teams(self) -> (Vec<Team>, Vec<Team>) {
        (self.compliant, self.overflow)
    }

    pub(crate) fn teams_mut(&mut self) -> impl Iterator<Item = &mut Team> {
        self.compliant.iter_mut().chain(self.overflow.iter_mut())
    }

    pub(crate) fn compliant_mut(&mut self) -> &mut Vec<Team> {
        &mut self.compliant
    }

    pub(crate) fn overflow_mut(&mut self) -> &mut Vec<Team> {
        &mut self.overflow
    }
}

#[cfg(test)]
#[path = "formation_tests.rs"]
mod tests;

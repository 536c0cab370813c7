//! Skill balancing between compliant teams.

use std::iter;
use std::time::Instant;

use tracing::{debug, info};

use teamforge_config::BalanceConfig;
use teamforge_core::{Participant, ParticipantId, Team};

use crate::constraint::ConstraintChecker;
use crate::phase::Phase;
use crate::scope::FormationScope;

/// What a balancing run did.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BalanceSummary {
    /// Iterations executed, including the one that stopped the run.
    pub iterations: usize,
    /// Swaps applied.
    pub swaps: usize,
    /// Highest minus lowest average skill after balancing.
    pub final_gap: f64,
}

/// Greedy hill-climb over member swaps.
///
/// Each iteration takes the weakest and strongest team by average skill.
/// If their gap is below the threshold, balancing stops. Otherwise the
/// first (strong member, weak member) pair whose swap leaves both teams
/// satisfying every hard constraint is applied. If no pair qualifies,
/// balancing stops without looking at other team pairs.
///
/// # Example
///
/// ```
/// use teamforge_solver::phase::SkillBalancer;
///
/// let balancer = SkillBalancer::default();
/// assert_eq!(balancer.max_iterations(), 50);
/// assert_eq!(balancer.balance(&mut []).swaps, 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkillBalancer {
    max_iterations: usize,
    gap_threshold: f64,
}

impl Default for SkillBalancer {
    fn default() -> Self {
        Self::from_config(&BalanceConfig::default())
    }
}

impl SkillBalancer {
    pub fn new(max_iterations: usize, gap_threshold: f64) -> Self {
        Self {
            max_iterations,
            gap_threshold,
        }
    }

    pub fn from_config(config: &BalanceConfig) -> Self {
        Self::new(config.max_iterations, config.skill_gap_threshold)
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn gap_threshold(&self) -> f64 {
        self.gap_threshold
    }

    /// Balances `teams` in place. Team order in the slice is preserved.
    pub fn balance(&self, teams: &mut [Team]) -> BalanceSummary {
        let mut summary = BalanceSummary::default();

        while teams.len() >= 2 && summary.iterations < self.max_iterations {
            summary.iterations += 1;

            let mut order: Vec<&mut Team> = teams.iter_mut().collect();
            order.sort_by(|a, b| a.average_skill().total_cmp(&b.average_skill()));
            let [weak, .., strong] = order.as_mut_slice() else {
                break;
            };

            let gap = strong.average_skill() - weak.average_skill();
            if gap < self.gap_threshold {
                break;
            }

            let Some((outgoing, incoming)) = find_swap(strong, weak) else {
                debug!(
                    event = "balance_blocked",
                    strong_team = strong.id(),
                    weak_team = weak.id(),
                    gap = gap,
                );
                break;
            };

            let (Some(from_strong), Some(from_weak)) = (
                strong.remove_member(&outgoing),
                weak.remove_member(&incoming),
            ) else {
                break;
            };
            strong.add_member(from_weak);
            weak.add_member(from_strong);
            summary.swaps += 1;

            info!(
                event = "balance_swap",
                iteration = summary.iterations,
                strong_team = strong.id(),
                weak_team = weak.id(),
                outgoing = %outgoing,
                incoming = %incoming,
                gap = gap,
                gap_threshold = self.gap_threshold,
            );
        }

        summary.final_gap = skill_gap(teams);
        summary
    }
}

/// Highest minus lowest average skill, or 0.0 for fewer than two teams.
pub fn skill_gap(teams: &[Team]) -> f64 {
    if teams.len() < 2 {
        return 0.0;
    }
    let (min, max) = teams
        .iter()
        .map(Team::average_skill)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), avg| {
            (lo.min(avg), hi.max(avg))
        });
    max - min
}

/// First (strong member, weak member) pair whose swap keeps both teams
/// within every hard constraint. Memberships are rebuilt in full for the
/// check.
fn find_swap(strong: &Team, weak: &Team) -> Option<(ParticipantId, ParticipantId)> {
    for outgoing in strong.members() {
        for incoming in weak.members() {
            let strong_after = swapped(strong.members(), outgoing.id(), incoming);
            if !ConstraintChecker::satisfies_hard_constraints(&strong_after) {
                continue;
            }
            let weak_after = swapped(weak.members(), incoming.id(), outgoing);
            if ConstraintChecker::satisfies_hard_constraints(&weak_after) {
                return Some((outgoing.id().clone(), incoming.id().clone()));
            }
        }
    }
    None
}

fn swapped(
    members: &[Participant],
    leaving: &ParticipantId,
    joining: &Participant,
) -> Vec<Participant> {
    members
        .iter()
        .filter(|m| m.id() != leaving)
        .cloned()
        .chain(iter::once(joining.clone()))
        .collect()
}

/// Runs the [`SkillBalancer`] over the compliant teams of the scope.
#[derive(Debug, Clone, Copy, Default)]
pub struct BalancePhase {
    balancer: SkillBalancer,
}

impl BalancePhase {
    pub fn new(balancer: SkillBalancer) -> Self {
        Self { balancer }
    }
}

impl Phase for BalancePhase {
    fn solve(&mut self, scope: &mut FormationScope) {
        let phase_index = scope.phase_index();
        let start = Instant::now();

        info!(
            event = "phase_start",
            phase = "Balance",
            phase_index = phase_index,
            teams = scope.compliant_teams().len(),
        );

        let (teams, stats) = scope.compliant_and_stats();
        let summary = self.balancer.balance(teams);
        stats.record_swaps(summary.swaps);
        scope.set_balance(summary);

        info!(
            event = "phase_end",
            phase = "Balance",
            phase_index = phase_index,
            duration_ms = start.elapsed().as_millis() as u64,
            iterations = summary.iterations,
            swaps = summary.swaps,
            gap = summary.final_gap,
            gap_threshold = self.balancer.gap_threshold(),
        );
    }

    fn phase_type_name(&self) -> &'static str {
        "Balance"
    }
}

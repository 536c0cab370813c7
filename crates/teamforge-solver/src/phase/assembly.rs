//! Greedy assembly of compliant teams.

use std::fmt;
use std::time::Instant;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use teamforge_core::team::distinct_roles;
use teamforge_core::{Participant, Team, TeamSize};

use crate::constraint::MIN_DISTINCT_ROLES;
use crate::phase::Phase;
use crate::scope::FormationScope;
use crate::selection::{CandidateSelector, SelectionMode};
use crate::stats::FormationStats;

/// Why a team could not be built. Assembly stops at the first one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaltReason {
    /// No leader remained in the pool.
    NoLeader,
    /// Legal candidates ran out before the team reached its target size.
    Incomplete { size: usize, target: usize },
    /// The team filled up but spans too few preferred roles.
    InsufficientRoles { distinct: usize, required: usize },
}

impl fmt::Display for HaltReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HaltReason::NoLeader => f.write_str("no leader available"),
            HaltReason::Incomplete { size, target } => {
                write!(f, "no legal candidate at {size}/{target} members")
            }
            HaltReason::InsufficientRoles { distinct, required } => {
                write!(f, "{distinct} distinct roles, {required} required")
            }
        }
    }
}

/// Result of one team-building attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum AssemblyOutcome {
    Formed(Team),
    Unsatisfiable(HaltReason),
}

/// Builds one team at a time from an ordered pool.
///
/// An attempt seeks the first leader in pool order, then fills the team
/// with the best legal candidate until it reaches the target size or no
/// legal candidate remains. The attempt succeeds only at exactly the target
/// size with enough distinct roles. The pool itself is never modified.
#[derive(Debug)]
pub struct GreedyTeamAssembler<'a> {
    selector: &'a dyn CandidateSelector,
    target: TeamSize,
}

impl<'a> GreedyTeamAssembler<'a> {
    pub fn new(selector: &'a dyn CandidateSelector, target: TeamSize) -> Self {
        Self { selector, target }
    }

    /// Runs one attempt. A formed team carries `team_id`.
    pub fn assemble_next(
        &self,
        pool: &[Participant],
        team_id: usize,
        stats: &mut FormationStats,
    ) -> AssemblyOutcome {
        let target = self.target.get();

        let Some(leader_index) = pool.iter().position(Participant::is_leader) else {
            return AssemblyOutcome::Unsatisfiable(HaltReason::NoLeader);
        };

        let mut team = Team::new(team_id);
        let mut candidates: Vec<Participant> = pool.to_vec();
        team.add_member(candidates.remove(leader_index));

        while team.len() < target {
            let scanned = candidates.len();
            let Some(selection) = self.selector.select(team.members(), &candidates) else {
                stats.record_selection(SelectionMode::Sequential, scanned);
                break;
            };
            stats.record_selection(selection.mode, scanned);
            team.add_member(candidates.remove(selection.index));
        }

        if team.len() < target {
            debug!(event = "attempt_incomplete", team_id = team_id, size = team.len());
            return AssemblyOutcome::Unsatisfiable(HaltReason::Incomplete {
                size: team.len(),
                target,
            });
        }

        let distinct = distinct_roles(team.members());
        if distinct < MIN_DISTINCT_ROLES {
            return AssemblyOutcome::Unsatisfiable(HaltReason::InsufficientRoles {
                distinct,
                required: MIN_DISTINCT_ROLES,
            });
        }

        AssemblyOutcome::Formed(team)
    }
}

/// Orders a pool for assembly: leaders first, each group shuffled.
pub fn order_for_assembly<R: Rng + ?Sized>(pool: &mut Vec<Participant>, rng: &mut R) {
    let (mut leaders, mut others): (Vec<_>, Vec<_>) =
        pool.drain(..).partition(Participant::is_leader);
    leaders.shuffle(rng);
    others.shuffle(rng);
    pool.append(&mut leaders);
    pool.append(&mut others);
}

/// Assembles compliant teams until the pool drops below the target size
/// or an attempt fails.
///
/// A failed attempt ends the phase; the remaining participants are left in
/// the pool for the overflow phase.
#[derive(Debug)]
pub struct AssemblyPhase {
    selector: Box<dyn CandidateSelector>,
}

impl AssemblyPhase {
    pub fn new(selector: Box<dyn CandidateSelector>) -> Self {
        Self { selector }
    }
}

impl Phase for AssemblyPhase {
    fn solve(&mut self, scope: &mut FormationScope) {
        let phase_index = scope.phase_index();
        let start = Instant::now();

        info!(
            event = "phase_start",
            phase = "Assembly",
            phase_index = phase_index,
            pool = scope.pool().len(),
        );

        let mut pool = scope.take_pool();
        order_for_assembly(&mut pool, scope.rng());
        *scope.pool_mut() = pool;

        let target = scope.target_size();
        let assembler = GreedyTeamAssembler::new(self.selector.as_ref(), target);
        let mut formed = 0u64;

        while scope.pool().len() >= target.get() {
            let team_id = scope.next_team_id();
            let (pool, stats) = scope.pool_and_stats();
            stats.record_attempt();

            match assembler.assemble_next(pool, team_id, stats) {
                AssemblyOutcome::Formed(team) => {
                    let team = scope.commit_compliant(team);
                    formed += 1;
                    info!(
                        event = "team_formed",
                        team_id = team.id(),
                        size = team.len(),
                        avg_skill = team.average_skill(),
                    );
                }
                AssemblyOutcome::Unsatisfiable(reason) => {
                    info!(
                        event = "assembly_halted",
                        reason = %reason,
                        remaining = scope.pool().len(),
                    );
                    scope.set_halt_reason(reason);
                    break;
                }
            }
        }

        info!(
            event = "phase_end",
            phase = "Assembly",
            phase_index = phase_index,
            duration_ms = start.elapsed().as_millis() as u64,
            teams = formed,
            remaining = scope.pool().len(),
        );
    }

    fn phase_type_name(&self) -> &'static str {
        "Assembly"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::ConstraintChecker;
    use crate::selection::SequentialSelector;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use teamforge_core::{PersonalityType, RoleType};
    use teamforge_test::participant;
    use teamforge_test::pools::{all_leaders, two_team_pool};

    fn size(n: usize) -> TeamSize {
        TeamSize::new(n).unwrap()
    }

    #[test]
    fn test_no_leader() {
        let pool = vec![
            participant("a").game("G1").build(),
            participant("b").game("G2").build(),
        ];
        let assembler = GreedyTeamAssembler::new(&SequentialSelector, size(2));
        let outcome = assembler.assemble_next(&pool, 1, &mut FormationStats::default());
        assert_eq!(outcome, AssemblyOutcome::Unsatisfiable(HaltReason::NoLeader));
    }

    #[test]
    fn test_incomplete_when_candidates_run_out() {
        let assembler = GreedyTeamAssembler::new(&SequentialSelector, size(3));
        let outcome = assembler.assemble_next(&all_leaders(4), 1, &mut FormationStats::default());
        assert_eq!(
            outcome,
            AssemblyOutcome::Unsatisfiable(HaltReason::Incomplete { size: 1, target: 3 })
        );
    }

    #[test]
    fn test_insufficient_roles() {
        let pool = vec![
            participant("l")
                .game("G1")
                .role(RoleType::Strategist)
                .personality(PersonalityType::Leader)
                .build(),
            participant("a").game("G2").role(RoleType::Attacker).build(),
            participant("b").game("G3").role(RoleType::Attacker).build(),
        ];
        let assembler = GreedyTeamAssembler::new(&SequentialSelector, size(3));
        let outcome = assembler.assemble_next(&pool, 1, &mut FormationStats::default());
        assert_eq!(
            outcome,
            AssemblyOutcome::Unsatisfiable(HaltReason::InsufficientRoles {
                distinct: 2,
                required: 3
            })
        );
    }

    #[test]
    fn test_formed_team_is_compliant_and_leaves_pool_untouched() {
        let pool = two_team_pool();
        let assembler = GreedyTeamAssembler::new(&SequentialSelector, size(6));
        let mut stats = FormationStats::default();

        let AssemblyOutcome::Formed(team) = assembler.assemble_next(&pool, 7, &mut stats) else {
            panic!("expected a formed team");
        };
        assert_eq!(team.id(), 7);
        assert_eq!(team.members()[0].id().as_str(), "A01");
        assert!(ConstraintChecker::is_compliant(team.members(), 6));
        assert_eq!(pool.len(), 12);
        assert_eq!(stats.candidates_evaluated, 11 + 10 + 9 + 8 + 7);
    }

    #[test]
    fn test_order_puts_leaders_first() {
        let mut pool = two_team_pool();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        order_for_assembly(&mut pool, &mut rng);

        assert_eq!(pool.len(), 12);
        assert!(pool[..2].iter().all(Participant::is_leader));
        assert!(pool[2..].iter().all(|p| !p.is_leader()));
    }

    #[test]
    fn test_phase_forms_two_teams() {
        let mut scope = FormationScope::with_seed(two_team_pool(), size(6), 11);
        AssemblyPhase::new(Box::new(SequentialSelector)).solve(&mut scope);

        assert_eq!(scope.compliant_teams().len(), 2);
        assert_eq!(scope.compliant_teams()[0].id(), 1);
        assert_eq!(scope.compliant_teams()[1].id(), 2);
        assert!(scope.pool().is_empty());
        assert!(scope.halt_reason().is_none());
    }

    #[test]
    fn test_phase_halts_after_first_failure() {
        let pool = vec![
            participant("l1")
                .game("G1")
                .role(RoleType::Strategist)
                .personality(PersonalityType::Leader)
                .build(),
            participant("l2")
                .game("G2")
                .role(RoleType::Strategist)
                .personality(PersonalityType::Leader)
                .build(),
            participant("a").game("G3").role(RoleType::Attacker).build(),
            participant("b").game("G4").role(RoleType::Attacker).build(),
            participant("c").game("G5").role(RoleType::Attacker).build(),
            participant("d").game("G6").role(RoleType::Attacker).build(),
        ];
        let mut scope = FormationScope::with_seed(pool, size(3), 5);
        AssemblyPhase::new(Box::new(SequentialSelector)).solve(&mut scope);

        assert!(scope.compliant_teams().is_empty());
        assert_eq!(scope.pool().len(), 6);
        assert_eq!(scope.stats().attempts, 1);
        assert_eq!(
            scope.halt_reason(),
            Some(&HaltReason::InsufficientRoles {
                distinct: 2,
                required: 3
            })
        );
        // Failed attempts do not consume an id.
        assert_eq!(scope.next_team_id(), 1);
    }
}

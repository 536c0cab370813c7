//! Partitioning of leftover participants.

use std::time::Instant;

use rand::seq::SliceRandom;
use tracing::info;

use crate::constraint::diagnose;
use crate::phase::Phase;
use crate::scope::FormationScope;

/// Reshuffles the remaining pool and chunks it into overflow teams of at
/// most the target size.
///
/// Overflow teams are never constraint-checked; their violations are only
/// logged. Every remaining participant lands in exactly one team.
#[derive(Debug, Clone, Copy, Default)]
pub struct OverflowPhase;

impl Phase for OverflowPhase {
    fn solve(&mut self, scope: &mut FormationScope) {
        let phase_index = scope.phase_index();
        let start = Instant::now();
        let target = scope.target_size();

        let mut leftovers = scope.take_pool();
        info!(
            event = "phase_start",
            phase = "Overflow",
            phase_index = phase_index,
            pool = leftovers.len(),
        );

        leftovers.shuffle(scope.rng());

        let mut created = 0u64;
        let mut rest = leftovers.into_iter().peekable();
        while rest.peek().is_some() {
            let members: Vec<_> = rest.by_ref().take(target.get()).collect();
            let team = scope.commit_overflow(members);
            created += 1;

            let violations = diagnose(team.members(), target)
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" | ");
            info!(
                event = "overflow_team",
                team_id = team.id(),
                size = team.len(),
                violations = %violations,
            );
        }

        info!(
            event = "phase_end",
            phase = "Overflow",
            phase_index = phase_index,
            duration_ms = start.elapsed().as_millis() as u64,
            teams = created,
        );
    }

    fn phase_type_name(&self) -> &'static str {
        "Overflow"
    }
}

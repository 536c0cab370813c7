//! Formation phases.
//!
//! Phases run in sequence over one [`FormationScope`]:
//! - [`AssemblyPhase`]: greedy construction of compliant teams
//! - [`OverflowPhase`]: partitions the leftovers into overflow teams
//! - [`BalancePhase`]: skill-balancing swaps between compliant teams

pub mod assembly;
pub mod balance;
pub mod overflow;

use std::fmt::Debug;

use crate::scope::FormationScope;

pub use assembly::{AssemblyOutcome, AssemblyPhase, GreedyTeamAssembler, HaltReason};
pub use balance::{BalancePhase, BalanceSummary, SkillBalancer};
pub use overflow::OverflowPhase;

/// A phase of a formation run.
///
/// Phases execute on the coordinating thread, one after another.
pub trait Phase: Send + Debug {
    /// Executes this phase against the scope.
    fn solve(&mut self, scope: &mut FormationScope);

    /// Returns the name of this phase type.
    fn phase_type_name(&self) -> &'static str;
}

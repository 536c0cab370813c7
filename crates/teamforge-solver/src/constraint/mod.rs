//! Hard constraints on team membership.
//!
//! - [`ConstraintChecker`]: pure predicates used while assembling teams and
//!   when validating balancing swaps
//! - [`Violation`]: diagnostic reporting for teams that break the rules

mod violation;

use smallvec::SmallVec;
use teamforge_core::{Participant, PersonalityType};

pub use violation::{diagnose, Violation};

/// At most this many members may share a preferred game.
pub const MAX_SAME_GAME: usize = 2;

/// Exactly this many leaders per compliant team.
pub const MAX_LEADERS: usize = 1;

pub const MAX_THINKERS: usize = 2;

pub const MAX_SOCIALIZERS: usize = 1;

/// A compliant team spans at least this many preferred roles.
pub const MIN_DISTINCT_ROLES: usize = 3;

/// Per-game member tally. Teams hold at most ten members.
pub(crate) type GameTally<'a> = SmallVec<[(&'a str, usize); 10]>;

/// Counts members per preferred game, in first-seen order.
pub(crate) fn game_tally(members: &[Participant]) -> GameTally<'_> {
    let mut tally = GameTally::new();
    for member in members {
        let game = member.preferred_game();
        match tally.iter_mut().find(|(g, _)| *g == game) {
            Some((_, count)) => *count += 1,
            None => tally.push((game, 1)),
        }
    }
    tally
}

/// Personality counts of a member list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PersonalityTally {
    pub leaders: usize,
    pub thinkers: usize,
    pub socializers: usize,
    pub balanced: usize,
}

impl PersonalityTally {
    pub fn of(members: &[Participant]) -> Self {
        let mut tally = Self::default();
        for member in members {
            match member.personality_type() {
                PersonalityType::Leader => tally.leaders += 1,
                PersonalityType::Thinker => tally.thinkers += 1,
                PersonalityType::Socializer => tally.socializers += 1,
                PersonalityType::Balanced => tally.balanced += 1,
            }
        }
        tally
    }

    /// Returns true if any personality cap is exceeded.
    pub fn exceeds_caps(&self) -> bool {
        self.leaders > MAX_LEADERS
            || self.thinkers > MAX_THINKERS
            || self.socializers > MAX_SOCIALIZERS
    }
}

/// Hard-constraint predicates over a team and a candidate.
///
/// All checks are pure: they read the member slice and never mutate it.
///
/// # Example
///
/// ```
/// use teamforge_core::{Participant, PersonalityType, RoleType};
/// use teamforge_solver::constraint::ConstraintChecker;
///
/// let leader = Participant::new(
///     "L1", "Lee", "lee@university.edu", "Chess", 6,
///     RoleType::Strategist, 95, PersonalityType::Leader,
/// );
/// let other_leader = Participant::new(
///     "L2", "Max", "max@university.edu", "FIFA", 6,
///     RoleType::Attacker, 92, PersonalityType::Leader,
/// );
///
/// assert!(ConstraintChecker::would_violate(&[leader], &other_leader));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstraintChecker;

impl ConstraintChecker {
    /// Returns true if adding `candidate` to `team` would break a cap.
    ///
    /// Balanced participants are exempt from every personality cap.
    pub fn would_violate(team: &[Participant], candidate: &Participant) -> bool {
        let same_game = team
            .iter()
            .filter(|m| m.preferred_game() == candidate.preferred_game())
            .count();
        if same_game >= MAX_SAME_GAME {
            return true;
        }

        let tally = PersonalityTally::of(team);
        match candidate.personality_type() {
            PersonalityType::Leader => tally.leaders >= MAX_LEADERS,
            PersonalityType::Thinker => tally.thinkers >= MAX_THINKERS,
            PersonalityType::Socializer => tally.socializers >= MAX_SOCIALIZERS,
            PersonalityType::Balanced => false,
        }
    }

    /// Re-checks the game and personality caps over a whole membership.
    pub fn violates_caps(members: &[Participant]) -> bool {
        if game_tally(members)
            .iter()
            .any(|&(_, count)| count > MAX_SAME_GAME)
        {
            return true;
        }
        PersonalityTally::of(members).exceeds_caps()
    }

    /// Returns true if the members span enough distinct roles.
    pub fn has_role_diversity(members: &[Participant]) -> bool {
        teamforge_core::team::distinct_roles(members) >= MIN_DISTINCT_ROLES
    }

    /// Full compliance check for a finished team of `target` members.
    pub fn is_compliant(members: &[Participant], target: usize) -> bool {
        members.len() == target && Self::satisfies_hard_constraints(members)
    }

    /// Every hard rule except the size: caps, exactly one leader, and role
    /// diversity.
    pub fn satisfies_hard_constraints(members: &[Participant]) -> bool {
        !Self::violates_caps(members)
            && PersonalityTally::of(members).leaders == MAX_LEADERS
            && Self::has_role_diversity(members)
    }
}

#[cfg(test)]
mod tests;

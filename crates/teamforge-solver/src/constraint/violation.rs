//! Rule violations reported for overflow teams.

use std::fmt;

use teamforge_core::{Participant, TeamSize};

use super::{
    game_tally, PersonalityTally, MAX_LEADERS, MAX_SAME_GAME, MAX_SOCIALIZERS, MAX_THINKERS,
    MIN_DISTINCT_ROLES,
};

/// A single broken rule, named so an operator can resolve it by hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    WrongSize { size: usize, target: usize },
    TooManyGamePlayers { game: String, count: usize },
    NoLeader,
    TooManyLeaders(usize),
    TooManyThinkers(usize),
    TooManySocializers(usize),
    TooFewRoles(usize),
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::WrongSize { size, target } => write!(f, "Wrong size ({size}/{target})"),
            Violation::TooManyGamePlayers { game, count } => {
                write!(f, "Too many {game} Players: {count}")
            }
            Violation::NoLeader => f.write_str("No Leader"),
            Violation::TooManyLeaders(n) => write!(f, "Too many Leaders: {n}"),
            Violation::TooManyThinkers(n) => write!(f, "Too many Thinkers: {n}"),
            Violation::TooManySocializers(n) => write!(f, "Too many Socializers: {n}"),
            Violation::TooFewRoles(n) => write!(f, "Only {n} roles"),
        }
    }
}

/// Lists every rule `members` breaks for a team of `target` size.
///
/// Order: size, games (sorted by name), leaders, thinkers, socializers,
/// roles. An empty result means the team is compliant.
///
/// # Example
///
/// ```
/// use teamforge_core::TeamSize;
/// use teamforge_solver::constraint::{diagnose, Violation};
///
/// let violations = diagnose(&[], TeamSize::new(3).unwrap());
/// assert_eq!(violations[0].to_string(), "Wrong size (0/3)");
/// assert!(violations.contains(&Violation::NoLeader));
/// ```
pub fn diagnose(members: &[Participant], target: TeamSize) -> Vec<Violation> {
    let mut violations = Vec::new();

    if members.len() != target.get() {
        violations.push(Violation::WrongSize {
            size: members.len(),
            target: target.get(),
        });
    }

    let mut games = game_tally(members);
    games.sort_unstable_by(|a, b| a.0.cmp(b.0));
    for (game, count) in games {
        if count > MAX_SAME_GAME {
            violations.push(Violation::TooManyGamePlayers {
                game: game.to_string(),
                count,
            });
        }
    }

    let tally = PersonalityTally::of(members);
    if tally.leaders == 0 {
        violations.push(Violation::NoLeader);
    }
    if tally.leaders > MAX_LEADERS {
        violations.push(Violation::TooManyLeaders(tally.leaders));
    }
    if tally.thinkers > MAX_THINKERS {
        violations.push(Violation::TooManyThinkers(tally.thinkers));
    }
    if tally.socializers > MAX_SOCIALIZERS {
        violations.push(Violation::TooManySocializers(tally.socializers));
    }

    let roles = teamforge_core::team::distinct_roles(members);
    if roles < MIN_DISTINCT_ROLES {
        violations.push(Violation::TooFewRoles(roles));
    }

    violations
}

//! Assertions over formation output.
//!
//! The rules are restated here independently of the solver crate so tests
//! do not grade the checker with itself.

use std::collections::{HashMap, HashSet};

use teamforge_core::{Participant, ParticipantId, PersonalityType, Team};

/// Panics unless `team` is a compliant team of `target` members.
pub fn assert_compliant(team: &Team, target: usize) {
    let members = team.members();
    assert_eq!(members.len(), target, "team {} has wrong size", team.id());

    let count = |kind: PersonalityType| {
        members
            .iter()
            .filter(|m| m.personality_type() == kind)
            .count()
    };
    assert_eq!(
        count(PersonalityType::Leader),
        1,
        "team {} needs exactly one leader",
        team.id()
    );
    assert!(
        count(PersonalityType::Thinker) <= 2,
        "team {} has too many thinkers",
        team.id()
    );
    assert!(
        count(PersonalityType::Socializer) <= 1,
        "team {} has too many socializers",
        team.id()
    );

    let mut games: HashMap<&str, usize> = HashMap::new();
    for m in members {
        *games.entry(m.preferred_game()).or_default() += 1;
    }
    for (game, n) in games {
        assert!(n <= 2, "team {} has {n} players of {game}", team.id());
    }

    let roles: HashSet<_> = members.iter().map(|m| m.preferred_role()).collect();
    assert!(
        roles.len() >= 3,
        "team {} spans only {} roles",
        team.id(),
        roles.len()
    );
}

/// Panics unless every input participant appears in exactly one team.
pub fn assert_exact_partition<'a>(
    input: &[Participant],
    teams: impl IntoIterator<Item = &'a Team>,
) {
    let mut seen: HashMap<ParticipantId, usize> = HashMap::new();
    for team in teams {
        for m in team.members() {
            *seen.entry(m.id().clone()).or_default() += 1;
        }
    }
    for p in input {
        match seen.get(p.id()) {
            Some(1) => {}
            Some(n) => panic!("participant {} placed {n} times", p.id()),
            None => panic!("participant {} was dropped", p.id()),
        }
    }
    assert_eq!(
        seen.len(),
        input.len(),
        "teams hold participants that were not in the input"
    );
}

//! Tests for hard constraints and violation diagnostics.

use super::*;
use teamforge_core::{RoleType, TeamSize};
use teamforge_test::participant;

fn with(kind: PersonalityType, game: &str, id: &str) -> Participant {
    participant(id).game(game).personality(kind).build()
}

#[test]
fn test_game_cap_blocks_third_player() {
    let team = vec![
        with(PersonalityType::Leader, "Chess", "a"),
        with(PersonalityType::Balanced, "Chess", "b"),
    ];
    let third = with(PersonalityType::Balanced, "Chess", "c");
    let other = with(PersonalityType::Balanced, "FIFA", "d");

    assert!(ConstraintChecker::would_violate(&team, &third));
    assert!(!ConstraintChecker::would_violate(&team, &other));
}

#[test]
fn test_personality_caps() {
    let team = vec![
        with(PersonalityType::Leader, "G1", "l"),
        with(PersonalityType::Thinker, "G2", "t1"),
        with(PersonalityType::Thinker, "G3", "t2"),
        with(PersonalityType::Socializer, "G4", "s"),
    ];

    assert!(ConstraintChecker::would_violate(
        &team,
        &with(PersonalityType::Leader, "G5", "l2")
    ));
    assert!(ConstraintChecker::would_violate(
        &team,
        &with(PersonalityType::Thinker, "G5", "t3")
    ));
    assert!(ConstraintChecker::would_violate(
        &team,
        &with(PersonalityType::Socializer, "G5", "s2")
    ));
    assert!(!ConstraintChecker::would_violate(
        &team,
        &with(PersonalityType::Balanced, "G5", "b")
    ));
}

#[test]
fn test_empty_team_accepts_anyone() {
    for kind in PersonalityType::ALL {
        assert!(!ConstraintChecker::would_violate(&[], &with(kind, "G", "x")));
    }
}

#[test]
fn test_violates_caps_recounts_whole_membership() {
    let ok = vec![
        with(PersonalityType::Leader, "G1", "a"),
        with(PersonalityType::Thinker, "G1", "b"),
        with(PersonalityType::Thinker, "G2", "c"),
    ];
    assert!(!ConstraintChecker::violates_caps(&ok));

    let mut three_games = ok.clone();
    three_games.push(with(PersonalityType::Balanced, "G1", "d"));
    assert!(ConstraintChecker::violates_caps(&three_games));

    let two_leaders = vec![
        with(PersonalityType::Leader, "G1", "a"),
        with(PersonalityType::Leader, "G2", "b"),
    ];
    assert!(ConstraintChecker::violates_caps(&two_leaders));
}

#[test]
fn test_is_compliant() {
    let members = vec![
        participant("a")
            .game("G1")
            .role(RoleType::Attacker)
            .personality(PersonalityType::Leader)
            .build(),
        participant("b").game("G2").role(RoleType::Defender).build(),
        participant("c").game("G3").role(RoleType::Supporter).build(),
    ];
    assert!(ConstraintChecker::is_compliant(&members, 3));
    assert!(!ConstraintChecker::is_compliant(&members, 4));

    let no_leader: Vec<Participant> = members[1..].to_vec();
    assert!(!ConstraintChecker::satisfies_hard_constraints(&no_leader));
}

#[test]
fn test_role_diversity() {
    let two_roles = vec![
        participant("a").role(RoleType::Attacker).build(),
        participant("b").role(RoleType::Attacker).build(),
        participant("c").role(RoleType::Defender).build(),
    ];
    assert!(!ConstraintChecker::has_role_diversity(&two_roles));
}

#[test]
fn test_diagnose_wrong_size() {
    let members = vec![
        participant("a")
            .game("G1")
            .role(RoleType::Attacker)
            .personality(PersonalityType::Leader)
            .build(),
        participant("b").game("G2").role(RoleType::Defender).build(),
        participant("c").game("G3").role(RoleType::Supporter).build(),
        participant("d").game("G4").role(RoleType::Supporter).build(),
        participant("e").game("G5").role(RoleType::Supporter).build(),
    ];
    let violations = diagnose(&members, TeamSize::new(6).unwrap());
    assert_eq!(violations, vec![Violation::WrongSize { size: 5, target: 6 }]);
    assert_eq!(violations[0].to_string(), "Wrong size (5/6)");
}

#[test]
fn test_diagnose_lists_every_broken_rule() {
    let members = vec![
        with(PersonalityType::Thinker, "Chess", "a"),
        with(PersonalityType::Thinker, "Chess", "b"),
        with(PersonalityType::Thinker, "Chess", "c"),
        with(PersonalityType::Socializer, "FIFA", "d"),
        with(PersonalityType::Socializer, "FIFA", "e"),
    ];
    let rendered: Vec<String> = diagnose(&members, TeamSize::new(5).unwrap())
        .iter()
        .map(ToString::to_string)
        .collect();

    assert_eq!(
        rendered,
        vec![
            "Too many Chess Players: 3",
            "No Leader",
            "Too many Thinkers: 3",
            "Too many Socializers: 2",
            "Only 1 roles",
        ]
    );
}

#[test]
fn test_diagnose_compliant_team_is_clean() {
    let members = vec![
        participant("a")
            .game("G1")
            .role(RoleType::Attacker)
            .personality(PersonalityType::Leader)
            .build(),
        participant("b").game("G1").role(RoleType::Defender).build(),
        participant("c").game("G2").role(RoleType::Supporter).build(),
    ];
    assert!(diagnose(&members, TeamSize::new(3).unwrap()).is_empty());
}

#[test]
fn test_diagnose_too_many_leaders() {
    let members = vec![
        with(PersonalityType::Leader, "G1", "a"),
        with(PersonalityType::Leader, "G2", "b"),
        with(PersonalityType::Leader, "G3", "c"),
    ];
    let violations = diagnose(&members, TeamSize::new(3).unwrap());
    assert!(violations.contains(&Violation::TooManyLeaders(3)));
    assert!(!violations.contains(&Violation::NoLeader));
}

//! Participant pools for formation tests.
//!
//! The scenario pools are built so that their expected outcome does not
//! depend on the shuffle seed. [`random_pool`] is seeded and therefore
//! reproducible.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use teamforge_core::{Participant, PersonalityType, RoleType};

use crate::participant::participant;

const GAMES: [&str; 8] = [
    "Chess",
    "FIFA",
    "Valorant",
    "DOTA 2",
    "Basketball",
    "CS:GO",
    "Apex",
    "Rocket League",
];

/// Twelve participants forming exactly two compliant teams of six.
///
/// Two leaders, ten balanced members, six games used twice each, and five
/// roles with counts 3/3/2/2/2. Skills are 4..=6 so any split keeps the
/// average gap below 1.2.
pub fn two_team_pool() -> Vec<Participant> {
    use PersonalityType::{Balanced, Leader};
    use RoleType::*;

    let rows: [(&str, &str, u8, RoleType, PersonalityType); 12] = [
        ("A01", "G1", 5, Strategist, Leader),
        ("A02", "G1", 4, Attacker, Balanced),
        ("A03", "G2", 5, Defender, Balanced),
        ("A04", "G2", 6, Supporter, Balanced),
        ("A05", "G3", 5, Coordinator, Balanced),
        ("A06", "G3", 5, Strategist, Balanced),
        ("A07", "G4", 5, Attacker, Leader),
        ("A08", "G4", 4, Defender, Balanced),
        ("A09", "G5", 5, Supporter, Balanced),
        ("A10", "G5", 6, Coordinator, Balanced),
        ("A11", "G6", 5, Strategist, Balanced),
        ("A12", "G6", 5, Attacker, Balanced),
    ];

    rows.into_iter()
        .map(|(id, game, skill, role, kind)| {
            participant(id)
                .game(game)
                .skill(skill)
                .role(role)
                .personality(kind)
                .build()
        })
        .collect()
}

/// `n` participants with distinct games and cycling roles.
pub fn small_pool(n: usize) -> Vec<Participant> {
    (0..n)
        .map(|i| {
            participant(&format!("S{:02}", i + 1))
                .game(&format!("Game {i}"))
                .skill((i % 10) as u8 + 1)
                .role(RoleType::ALL[i % RoleType::ALL.len()])
                .personality(if i == 0 {
                    PersonalityType::Leader
                } else {
                    PersonalityType::Balanced
                })
                .build()
        })
        .collect()
}

/// `n` leaders with distinct games and cycling roles.
pub fn all_leaders(n: usize) -> Vec<Participant> {
    (0..n)
        .map(|i| {
            participant(&format!("L{:02}", i + 1))
                .game(&format!("Game {i}"))
                .skill(5)
                .role(RoleType::ALL[i % RoleType::ALL.len()])
                .personality(PersonalityType::Leader)
                .build()
        })
        .collect()
}

/// A reproducible random pool of `n` participants.
///
/// Roughly one in six participants is a leader; games, roles and skills are
/// uniform.
pub fn random_pool(n: usize, seed: u64) -> Vec<Participant> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|i| {
            let kind = match rng.random_range(0..12) {
                0 | 1 => PersonalityType::Leader,
                2..=4 => PersonalityType::Thinker,
                5 | 6 => PersonalityType::Socializer,
                _ => PersonalityType::Balanced,
            };
            participant(&format!("R{i:04}"))
                .game(GAMES[rng.random_range(0..GAMES.len())])
                .skill(rng.random_range(1..=10))
                .role(RoleType::ALL[rng.random_range(0..RoleType::ALL.len())])
                .personality(kind)
                .build()
        })
        .collect()
}

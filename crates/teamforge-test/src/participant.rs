//! Participant builder with test-friendly defaults.
//!
//! # Example
//!
//! ```
//! use teamforge_core::{PersonalityType, RoleType};
//! use teamforge_test::participant;
//!
//! let p = participant("P1")
//!     .game("Chess")
//!     .skill(7)
//!     .role(RoleType::Defender)
//!     .personality(PersonalityType::Leader)
//!     .build();
//! assert_eq!(p.skill_level(), 7);
//! assert!(p.is_leader());
//! ```

use teamforge_core::{Participant, ParticipantId, PersonalityType, RoleType};

/// Starts building a participant with the given id.
pub fn participant(id: &str) -> ParticipantBuilder {
    ParticipantBuilder::new(id)
}

/// Builder for [`Participant`] fixtures.
#[derive(Debug, Clone)]
pub struct ParticipantBuilder {
    id: ParticipantId,
    name: Option<String>,
    game: String,
    skill: u8,
    role: RoleType,
    personality: PersonalityType,
    score: Option<u32>,
}

impl ParticipantBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: ParticipantId::from(id),
            name: None,
            game: "Chess".to_string(),
            skill: 5,
            role: RoleType::Strategist,
            personality: PersonalityType::Balanced,
            score: None,
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn game(mut self, game: &str) -> Self {
        self.game = game.to_string();
        self
    }

    pub fn skill(mut self, skill: u8) -> Self {
        self.skill = skill;
        self
    }

    pub fn role(mut self, role: RoleType) -> Self {
        self.role = role;
        self
    }

    pub fn personality(mut self, kind: PersonalityType) -> Self {
        self.personality = kind;
        self
    }

    pub fn score(mut self, score: u32) -> Self {
        self.score = Some(score);
        self
    }

    pub fn build(self) -> Participant {
        let id = self.id.as_str().to_string();
        let name = self.name.unwrap_or_else(|| format!("Player {id}"));
        let email = format!("{}@university.edu", id.to_ascii_lowercase());
        let score = self.score.unwrap_or(match self.personality {
            PersonalityType::Leader => 92,
            PersonalityType::Balanced => 76,
            PersonalityType::Thinker => 60,
            PersonalityType::Socializer => 40,
        });
        Participant::new(
            self.id,
            name,
            email,
            self.game,
            self.skill,
            self.role,
            score,
            self.personality,
        )
    }
}

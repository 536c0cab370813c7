//! Validated participant attribute updates.
//!
//! An update is a set of optional field changes. [`ParticipantUpdate::apply`]
//! validates every present field first and only then writes them, so a
//! rejected update never leaves a participant half-modified.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, TeamForgeError};
use crate::participant::{Participant, RoleType};
use crate::personality::{self, MAX_SCORE, MIN_SCORE};

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\w.-]+@university\.edu$").expect("email pattern is a valid regex")
});

/// Lowest accepted skill level.
pub const MIN_SKILL: u8 = 1;

/// Highest accepted skill level.
pub const MAX_SKILL: u8 = 10;

/// Pending changes to a participant's mutable attributes.
///
/// # Example
///
/// ```
/// use teamforge_core::{Participant, ParticipantUpdate, PersonalityType, RoleType};
///
/// let mut p = Participant::new(
///     "P1", "Ann", "ann@university.edu", "Chess", 4,
///     RoleType::Attacker, 60, PersonalityType::Thinker,
/// );
///
/// ParticipantUpdate::new().skill_level(8).personality_score(92).apply(&mut p).unwrap();
/// assert_eq!(p.skill_level(), 8);
/// assert_eq!(p.personality_type(), PersonalityType::Leader);
///
/// // Invalid updates are rejected as a whole.
/// let result = ParticipantUpdate::new().skill_level(3).email("ann@gmail.com").apply(&mut p);
/// assert!(result.is_err());
/// assert_eq!(p.skill_level(), 8);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticipantUpdate {
    name: Option<String>,
    email: Option<String>,
    preferred_game: Option<String>,
    skill_level: Option<u8>,
    preferred_role: Option<RoleType>,
    personality_score: Option<u32>,
}

impl ParticipantUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn preferred_game(mut self, game: impl Into<String>) -> Self {
        self.preferred_game = Some(game.into());
        self
    }

    pub fn skill_level(mut self, skill: u8) -> Self {
        self.skill_level = Some(skill);
        self
    }

    pub fn preferred_role(mut self, role: RoleType) -> Self {
        self.preferred_role = Some(role);
        self
    }

    /// Sets a new personality score; the personality type is reclassified.
    pub fn personality_score(mut self, score: u32) -> Self {
        self.personality_score = Some(score);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Checks every present field without touching any participant.
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            non_empty("name", name)?;
        }
        if let Some(email) = &self.email {
            if !EMAIL_PATTERN.is_match(email.trim()) {
                return Err(invalid(
                    "email",
                    format!("'{email}' is not a @university.edu address"),
                ));
            }
        }
        if let Some(game) = &self.preferred_game {
            non_empty("preferred game", game)?;
        }
        if let Some(skill) = self.skill_level {
            if !(MIN_SKILL..=MAX_SKILL).contains(&skill) {
                return Err(invalid(
                    "skill level",
                    format!("{skill} is outside {MIN_SKILL}..={MAX_SKILL}"),
                ));
            }
        }
        if let Some(score) = self.personality_score {
            if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
                return Err(invalid(
                    "personality score",
                    format!("{score} is outside {MIN_SCORE}..={MAX_SCORE}"),
                ));
            }
        }
        Ok(())
    }

    /// Validates, then applies all present fields to `participant`.
    pub fn apply(self, participant: &mut Participant) -> Result<()> {
        self.validate()?;

        if let Some(name) = self.name {
            participant.set_name(name.trim().to_string());
        }
        if let Some(email) = self.email {
            participant.set_email(email.trim().to_string());
        }
        if let Some(game) = self.preferred_game {
            participant.set_preferred_game(game.trim().to_string());
        }
        if let Some(skill) = self.skill_level {
            participant.set_skill_level(skill);
        }
        if let Some(role) = self.preferred_role {
            participant.set_preferred_role(role);
        }
        if let Some(score) = self.personality_score {
            participant.set_personality(score, personality::classify(score));
        }
        Ok(())
    }
}

fn non_empty(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(invalid(field, "must not be empty".to_string()))
    } else {
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> TeamForgeError {
    TeamForgeError::InvalidAttribute { field, reason }
}

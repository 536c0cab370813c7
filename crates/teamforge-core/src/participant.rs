//! Participant records and their fixed vocabularies.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Identifier of a participant.
///
/// Comparison and hashing ignore ASCII case, so `"p001"` and `"P001"` name
/// the same participant. The original spelling is kept for display.
///
/// # Example
///
/// ```
/// use teamforge_core::ParticipantId;
///
/// let a = ParticipantId::from("p001");
/// let b = ParticipantId::from("P001");
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "p001");
/// ```
#[derive(Debug, Clone, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Creates an id from any string, trimming surrounding whitespace.
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(id.as_ref().trim().to_string())
    }

    /// Returns the id as written.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for ParticipantId {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl PartialEq<str> for ParticipantId {
    fn eq(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other.trim())
    }
}

impl PartialEq<&str> for ParticipantId {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Hash for ParticipantId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for byte in self.0.bytes() {
            state.write_u8(byte.to_ascii_lowercase());
        }
        state.write_u8(0xff);
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ParticipantId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl AsRef<str> for ParticipantId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Error returned when a vocabulary value does not match any variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    /// Name of the vocabulary (`"role"` or `"personality type"`).
    pub vocabulary: &'static str,
    /// The rejected input.
    pub value: String,
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} '{}'", self.vocabulary, self.value)
    }
}

impl std::error::Error for UnknownVariant {}

/// The preferred in-game role of a participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum RoleType {
    Strategist,
    Attacker,
    Defender,
    Supporter,
    Coordinator,
}

impl RoleType {
    /// All roles in declaration order.
    pub const ALL: [RoleType; 5] = [
        RoleType::Strategist,
        RoleType::Attacker,
        RoleType::Defender,
        RoleType::Supporter,
        RoleType::Coordinator,
    ];

    /// Upper-case vocabulary name, as used in CSV files.
    pub fn as_str(self) -> &'static str {
        match self {
            RoleType::Strategist => "STRATEGIST",
            RoleType::Attacker => "ATTACKER",
            RoleType::Defender => "DEFENDER",
            RoleType::Supporter => "SUPPORTER",
            RoleType::Coordinator => "COORDINATOR",
        }
    }

    /// Bit used for role-set bookkeeping.
    pub(crate) fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for RoleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoleType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        RoleType::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownVariant {
                vocabulary: "role",
                value: trimmed.to_string(),
            })
    }
}

/// Personality classification derived from the survey score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum PersonalityType {
    Leader,
    Thinker,
    Socializer,
    Balanced,
}

impl PersonalityType {
    pub const ALL: [PersonalityType; 4] = [
        PersonalityType::Leader,
        PersonalityType::Thinker,
        PersonalityType::Socializer,
        PersonalityType::Balanced,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PersonalityType::Leader => "LEADER",
            PersonalityType::Thinker => "THINKER",
            PersonalityType::Socializer => "SOCIALIZER",
            PersonalityType::Balanced => "BALANCED",
        }
    }
}

impl fmt::Display for PersonalityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PersonalityType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        PersonalityType::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownVariant {
                vocabulary: "personality type",
                value: trimmed.to_string(),
            })
    }
}

/// A participant in the pool.
///
/// Identity is the [`ParticipantId`]; two participants with the same id are
/// equal regardless of their other attributes.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Participant {
    id: ParticipantId,
    name: String,
    email: String,
    preferred_game: String,
    skill_level: u8,
    preferred_role: RoleType,
    personality_score: u32,
    personality_type: PersonalityType,
}

impl Participant {
    /// Creates a participant from already-validated attributes.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<ParticipantId>,
        name: impl Into<String>,
        email: impl Into<String>,
        preferred_game: impl Into<String>,
        skill_level: u8,
        preferred_role: RoleType,
        personality_score: u32,
        personality_type: PersonalityType,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            preferred_game: preferred_game.into(),
            skill_level,
            preferred_role,
            personality_score,
            personality_type,
        }
    }

    pub fn id(&self) -> &ParticipantId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn preferred_game(&self) -> &str {
        &self.preferred_game
    }

    pub fn skill_level(&self) -> u8 {
        self.skill_level
    }

    pub fn preferred_role(&self) -> RoleType {
        self.preferred_role
    }

    pub fn personality_score(&self) -> u32 {
        self.personality_score
    }

    pub fn personality_type(&self) -> PersonalityType {
        self.personality_type
    }

    /// Returns true if this participant is classified as a leader.
    pub fn is_leader(&self) -> bool {
        self.personality_type == PersonalityType::Leader
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub(crate) fn set_email(&mut self, email: String) {
        self.email = email;
    }

    pub(crate) fn set_preferred_game(&mut self, game: String) {
        self.preferred_game = game;
    }

    pub(crate) fn set_skill_level(&mut self, skill: u8) {
        self.skill_level = skill;
    }

    pub(crate) fn set_preferred_role(&mut self, role: RoleType) {
        self.preferred_role = role;
    }

    pub(crate) fn set_personality(&mut self, score: u32, kind: PersonalityType) {
        self.personality_score = score;
        self.personality_type = kind;
    }
}

impl PartialEq for Participant {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Participant {}

impl Hash for Participant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

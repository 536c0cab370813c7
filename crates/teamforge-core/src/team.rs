//! Teams and the target team size.

use std::fmt;

use crate::error::{Result, TeamForgeError};
use crate::participant::{Participant, ParticipantId, PersonalityType, RoleType};

/// Target member count for every team of a formation run.
///
/// Always within [`TeamSize::MIN`]..=[`TeamSize::MAX`].
///
/// # Example
///
/// ```
/// use teamforge_core::TeamSize;
///
/// assert_eq!(TeamSize::new(6).unwrap().get(), 6);
/// assert!(TeamSize::new(1).is_err());
/// assert!(TeamSize::new(11).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TeamSize(usize);

impl TeamSize {
    pub const MIN: usize = 2;
    pub const MAX: usize = 10;

    pub fn new(size: usize) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&size) {
            Ok(Self(size))
        } else {
            Err(TeamForgeError::TeamSizeOutOfRange {
                size,
                min: Self::MIN,
                max: Self::MAX,
            })
        }
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for TeamSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A team: a sequential id and its members in join order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Team {
    id: usize,
    members: Vec<Participant>,
}

impl Team {
    /// Creates an empty team.
    pub fn new(id: usize) -> Self {
        Self {
            id,
            members: Vec::new(),
        }
    }

    /// Creates a team holding `members` in the given order.
    pub fn with_members(id: usize, members: Vec<Participant>) -> Self {
        Self { id, members }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn members(&self) -> &[Participant] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Appends a member.
    pub fn add_member(&mut self, participant: Participant) {
        self.members.push(participant);
    }

    /// Removes the member with `id`, keeping the order of the others.
    pub fn remove_member(&mut self, id: &ParticipantId) -> Option<Participant> {
        let idx = self.members.iter().position(|m| m.id() == id)?;
        Some(self.members.remove(idx))
    }

    pub fn contains(&self, id: &ParticipantId) -> bool {
        self.members.iter().any(|m| m.id() == id)
    }

    pub fn member(&self, id: &ParticipantId) -> Option<&Participant> {
        self.members.iter().find(|m| m.id() == id)
    }

    pub fn member_mut(&mut self, id: &ParticipantId) -> Option<&mut Participant> {
        self.members.iter_mut().find(|m| m.id() == id)
    }

    /// Mean skill level of the members, or 0.0 for an empty team.
    pub fn average_skill(&self) -> f64 {
        average_skill(&self.members)
    }

    /// Number of members of the given personality type.
    pub fn personality_count(&self, kind: PersonalityType) -> usize {
        personality_count(&self.members, kind)
    }

    /// Number of distinct preferred roles among members.
    pub fn distinct_roles(&self) -> usize {
        distinct_roles(&self.members)
    }

    /// Returns true if any member prefers `role`.
    pub fn has_role(&self, role: RoleType) -> bool {
        self.members.iter().any(|m| m.preferred_role() == role)
    }

    pub fn into_members(self) -> Vec<Participant> {
        self.members
    }
}

/// Mean skill of a member slice, 0.0 when empty.
pub fn average_skill(members: &[Participant]) -> f64 {
    if members.is_empty() {
        return 0.0;
    }
    let total: u32 = members.iter().map(|m| m.skill_level() as u32).sum();
    total as f64 / members.len() as f64
}

pub fn personality_count(members: &[Participant], kind: PersonalityType) -> usize {
    members
        .iter()
        .filter(|m| m.personality_type() == kind)
        .count()
}

pub fn distinct_roles(members: &[Participant]) -> usize {
    members
        .iter()
        .fold(0u8, |mask, m| mask | m.preferred_role().bit())
        .count_ones() as usize
}

//! TeamForge Core - Participant and team types for team formation
//!
//! This crate provides the fundamental data model shared by every other
//! TeamForge crate:
//! - [`Participant`] records with their case-insensitive [`ParticipantId`]
//! - The fixed [`RoleType`] and [`PersonalityType`] vocabularies
//! - [`Team`] aggregates with derived average skill
//! - Personality survey scoring and classification
//! - Validated attribute updates
//! - Error types

pub mod error;
pub mod participant;
pub mod personality;
pub mod team;
pub mod update;

pub use error::{Result, TeamForgeError};
pub use participant::{Participant, ParticipantId, PersonalityType, RoleType};
pub use personality::PersonalitySurvey;
pub use team::{Team, TeamSize};
pub use update::ParticipantUpdate;

//! TeamForge - Constraint-aware team formation in Rust
//!
//! Zero-wiring API: hand over a participant pool and call [`form_teams`].
//!
//! # Example
//!
//! ```rust
//! use teamforge::prelude::*;
//!
//! let pool = vec![
//!     Participant::new("1", "Ana", "ana@university.edu", "Chess", 5,
//!         RoleType::Strategist, 95, PersonalityType::Leader),
//!     Participant::new("2", "Bo", "bo@university.edu", "FIFA", 6,
//!         RoleType::Attacker, 75, PersonalityType::Balanced),
//!     Participant::new("3", "Cy", "cy@university.edu", "Go", 4,
//!         RoleType::Defender, 60, PersonalityType::Thinker),
//! ];
//!
//! let config = FormationConfig::new().with_team_size(3).with_random_seed(1);
//! let result = teamforge::form_teams_with(pool, &config).unwrap();
//! assert_eq!(result.compliant_teams().len(), 1);
//! assert_eq!(result.participant_count(), 3);
//! ```

// Data model
pub use teamforge_core::{
    Participant, ParticipantId, ParticipantUpdate, PersonalitySurvey, PersonalityType, Result,
    RoleType, Team, TeamForgeError, TeamSize,
};

// Configuration
pub use teamforge_config::{
    BalanceConfig, ConfigError, FormationConfig, IngestConfig, ParallelConfig, ThreadCount,
};

// Formation engine
pub use teamforge_solver::{
    diagnose, CandidateScorer, ConstraintChecker, FormationStats, HaltReason, OverflowReport,
    ParallelEvaluator, Seat, SkillBalancer, TeamFormation, TeamFormationResult, TeamRegistry,
    Violation,
};

// Ingestion and export
pub use teamforge_solver::ingest;

#[cfg(feature = "console")]
pub use teamforge_console as console;

mod formation;
pub mod report;

pub use formation::{form_teams, form_teams_with, worker_pool};

pub mod prelude {
    pub use super::{form_teams, form_teams_with};
    pub use super::{Participant, ParticipantId, PersonalityType, RoleType, Team};
    pub use super::{FormationConfig, TeamFormation, TeamFormationResult, TeamRegistry};
    pub use super::{TeamForgeError, Violation};
}

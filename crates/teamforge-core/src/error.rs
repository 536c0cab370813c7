//! Error types for TeamForge

use thiserror::Error;

/// Main error type for TeamForge operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TeamForgeError {
    /// The participant pool handed to a formation run was empty
    #[error("No participants given")]
    EmptyPool,

    /// Target team size outside the supported range
    #[error("Team size must be between {min} and {max}, got {size}")]
    TeamSizeOutOfRange { size: usize, min: usize, max: usize },

    /// A participant attribute update was rejected before being applied
    #[error("Invalid {field}: {reason}")]
    InvalidAttribute { field: &'static str, reason: String },

    /// No team holds a participant with this id
    #[error("Unknown participant: {0}")]
    UnknownParticipant(String),

    /// A participant with this id is already registered
    #[error("Participant already registered: {0}")]
    DuplicateParticipant(String),

    /// A personality survey answer was outside 1..=5
    #[error("Survey answer {question} must be between 1 and 5, got {value}")]
    InvalidSurveyAnswer { question: usize, value: u8 },
}

/// Result type alias for TeamForge operations
pub type Result<T> = std::result::Result<T, TeamForgeError>;

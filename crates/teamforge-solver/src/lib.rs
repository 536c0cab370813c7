//! TeamForge Solver - Team formation engine
//!
//! This crate provides the formation pipeline and its building blocks:
//! - Hard-constraint checks and violation diagnosis
//! - Candidate scoring and selection, sequential or on a worker pool
//! - Phases (greedy assembly, overflow partitioning, skill balancing)
//! - Formation runs and their results
//! - Post-formation edits through [`TeamRegistry`]
//! - Chunked CSV ingestion and export
//! - Run statistics

pub mod constraint;
pub mod formation;
pub mod ingest;
pub mod phase;
pub mod registry;
pub mod scope;
pub mod score;
pub mod selection;
pub mod stats;

pub use constraint::{diagnose, ConstraintChecker, PersonalityTally, Violation};
pub use formation::{OverflowReport, TeamFormation, TeamFormationResult};
pub use phase::{
    AssemblyOutcome, AssemblyPhase, BalancePhase, BalanceSummary, GreedyTeamAssembler, HaltReason,
    OverflowPhase, Phase, SkillBalancer,
};
pub use registry::{Seat, TeamRegistry};
pub use scope::FormationScope;
pub use score::CandidateScorer;
pub use selection::{
    CandidateSelector, ParallelEvaluator, Selection, SelectionMode, SequentialSelector,
};
pub use stats::FormationStats;

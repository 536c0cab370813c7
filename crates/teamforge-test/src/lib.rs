//! Shared test fixtures for TeamForge crates.
//!
//! This crate provides participant builders, scenario pools and invariant
//! assertions. It depends only on `teamforge-core` so the solver crate can
//! use it as a dev-dependency.
//!
//! - [`participant`] - Participant builder
//! - [`pools`] - Scenario and seeded random pools
//! - [`invariants`] - Assertions over formed teams
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! teamforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use teamforge_test::participant::participant;
//! use teamforge_test::pools::random_pool;
//! ```

pub mod invariants;
pub mod participant;
pub mod pools;

// Re-export commonly used items at crate root for convenience
pub use invariants::{assert_compliant, assert_exact_partition};
pub use participant::{participant, ParticipantBuilder};
pub use pools::random_pool;

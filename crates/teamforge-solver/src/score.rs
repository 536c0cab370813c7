//! Soft-preference scoring of legal candidates.

use teamforge_core::team::{average_skill, personality_count};
use teamforge_core::{Participant, PersonalityType};

/// Awarded when the candidate's preferred role is new to the team.
pub const ROLE_NOVELTY_BONUS: f64 = 25.0;

/// Skill closeness is `SKILL_CLOSENESS_BASE - |skill - team average|`.
pub const SKILL_CLOSENESS_BASE: f64 = 15.0;

/// Awarded to a thinker while the team has fewer than two thinkers.
pub const THINKER_BONUS: f64 = 10.0;

/// Average skill assumed for a team with no members.
pub const EMPTY_TEAM_BASELINE: f64 = 5.0;

/// Ranks candidates that already passed the hard constraints.
///
/// # Example
///
/// ```
/// use teamforge_core::{Participant, PersonalityType, RoleType};
/// use teamforge_solver::CandidateScorer;
///
/// let candidate = Participant::new(
///     "P1", "Ada", "ada@university.edu", "Chess", 5,
///     RoleType::Defender, 60, PersonalityType::Thinker,
/// );
///
/// // New role, skill equal to the neutral baseline, and the thinker bonus.
/// assert_eq!(CandidateScorer::score(&[], &candidate), 25.0 + 15.0 + 10.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CandidateScorer;

impl CandidateScorer {
    pub fn score(team: &[Participant], candidate: &Participant) -> f64 {
        let mut score = 0.0;

        let role = candidate.preferred_role();
        if !team.iter().any(|m| m.preferred_role() == role) {
            score += ROLE_NOVELTY_BONUS;
        }

        let avg = if team.is_empty() {
            EMPTY_TEAM_BASELINE
        } else {
            average_skill(team)
        };
        score += SKILL_CLOSENESS_BASE - (f64::from(candidate.skill_level()) - avg).abs();

        if candidate.personality_type() == PersonalityType::Thinker
            && personality_count(team, PersonalityType::Thinker) < 2
        {
            score += THINKER_BONUS;
        }

        score
    }
}

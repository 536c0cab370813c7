//! Personality survey scoring and classification.
//!
//! A participant answers five questions on a 1..=5 scale. The raw sum is
//! scaled by 4 onto 20..=100 and bucketed into a [`PersonalityType`]:
//!
//! | score | type |
//! |---|---|
//! | 90..=100 | Leader |
//! | 70..=89 | Balanced |
//! | 50..=69 | Thinker |
//! | below 50 | Socializer |

use crate::error::{Result, TeamForgeError};
use crate::participant::PersonalityType;

/// Number of questions in the survey.
pub const QUESTION_COUNT: usize = 5;

const MIN_ANSWER: u8 = 1;
const MAX_ANSWER: u8 = 5;
const SCORE_SCALE: u32 = 4;

/// Lowest reachable personality score.
pub const MIN_SCORE: u32 = QUESTION_COUNT as u32 * MIN_ANSWER as u32 * SCORE_SCALE;

/// Highest reachable personality score.
pub const MAX_SCORE: u32 = QUESTION_COUNT as u32 * MAX_ANSWER as u32 * SCORE_SCALE;

/// A completed five-question survey.
///
/// # Example
///
/// ```
/// use teamforge_core::{PersonalitySurvey, PersonalityType};
///
/// let survey = PersonalitySurvey::new([5, 5, 4, 5, 4]).unwrap();
/// assert_eq!(survey.score(), 92);
/// assert_eq!(survey.personality_type(), PersonalityType::Leader);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonalitySurvey {
    answers: [u8; QUESTION_COUNT],
}

impl PersonalitySurvey {
    /// Creates a survey, rejecting answers outside 1..=5.
    pub fn new(answers: [u8; QUESTION_COUNT]) -> Result<Self> {
        for (idx, &value) in answers.iter().enumerate() {
            if !(MIN_ANSWER..=MAX_ANSWER).contains(&value) {
                return Err(TeamForgeError::InvalidSurveyAnswer {
                    question: idx + 1,
                    value,
                });
            }
        }
        Ok(Self { answers })
    }

    pub fn answers(&self) -> [u8; QUESTION_COUNT] {
        self.answers
    }

    /// Scaled personality score in 20..=100.
    pub fn score(&self) -> u32 {
        self.answers.iter().map(|&a| a as u32).sum::<u32>() * SCORE_SCALE
    }

    pub fn personality_type(&self) -> PersonalityType {
        classify(self.score())
    }
}

/// Maps a personality score to its classification.
pub fn classify(score: u32) -> PersonalityType {
    if score >= 90 {
        PersonalityType::Leader
    } else if score >= 70 {
        PersonalityType::Balanced
    } else if score >= 50 {
        PersonalityType::Thinker
    } else {
        PersonalityType::Socializer
    }
}

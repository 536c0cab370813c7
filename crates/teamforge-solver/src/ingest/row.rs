//! Row parsing rules shared by every ingestion worker.

use std::io::BufRead;
use std::str::FromStr;

use teamforge_core::personality::{MAX_SCORE, MIN_SCORE};
use teamforge_core::update::{MAX_SKILL, MIN_SKILL};
use teamforge_core::{Participant, PersonalityType, RoleType};
use thiserror::Error;

/// Fields per participant record.
pub const COLUMN_COUNT: usize = 8;

/// A rejected input row. Every variant carries the raw row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected {expected} columns, found {found}: {row}")]
    ColumnCount {
        expected: usize,
        found: usize,
        row: String,
    },

    #[error("invalid number in {field}: {row}")]
    InvalidNumber { field: &'static str, row: String },

    #[error("invalid {field} '{value}': {row}")]
    InvalidEnum {
        field: &'static str,
        value: String,
        row: String,
    },

    #[error("skill level {value} is outside 1..=10: {row}")]
    InvalidSkill { value: i64, row: String },

    #[error("personality score {value} is outside 20..=100: {row}")]
    InvalidPersonalityScore { value: i64, row: String },

    #[error("malformed CSV record ({message}): {row}")]
    Csv { row: String, message: String },
}

impl ParseError {
    /// The offending raw row.
    pub fn row(&self) -> &str {
        match self {
            ParseError::ColumnCount { row, .. }
            | ParseError::InvalidNumber { row, .. }
            | ParseError::InvalidEnum { row, .. }
            | ParseError::InvalidSkill { row, .. }
            | ParseError::InvalidPersonalityScore { row, .. }
            | ParseError::Csv { row, .. } => row,
        }
    }
}

/// Parses one CSV record into a participant.
///
/// Columns: id, name, email, preferred game, skill level, preferred role,
/// personality score, personality type. Fields are trimmed and may be
/// quoted. Role and personality type match case-insensitively.
///
/// # Example
///
/// ```
/// use teamforge_core::{PersonalityType, RoleType};
/// use teamforge_solver::ingest::parse_row;
///
/// let p = parse_row("P001,Ana,ana@university.edu,\"Chess, Blitz\",7, defender ,84,balanced")
///     .unwrap();
/// assert_eq!(p.preferred_game(), "Chess, Blitz");
/// assert_eq!(p.preferred_role(), RoleType::Defender);
/// assert_eq!(p.personality_type(), PersonalityType::Balanced);
///
/// assert!(parse_row("P002,Bo,bo@university.edu,FIFA,seven,ATTACKER,70,THINKER").is_err());
/// ```
pub fn parse_row(line: &str) -> Result<Participant, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(line.as_bytes());

    let mut record = csv::StringRecord::new();
    match reader.read_record(&mut record) {
        Ok(true) => {}
        Ok(false) => {
            return Err(ParseError::ColumnCount {
                expected: COLUMN_COUNT,
                found: 0,
                row: line.to_string(),
            })
        }
        Err(e) => {
            return Err(ParseError::Csv {
                row: line.to_string(),
                message: e.to_string(),
            })
        }
    }

    if record.len() != COLUMN_COUNT {
        return Err(ParseError::ColumnCount {
            expected: COLUMN_COUNT,
            found: record.len(),
            row: line.to_string(),
        });
    }
    let field = |i: usize| record.get(i).unwrap_or_default();

    let skill: i64 = field(4).parse().map_err(|_| ParseError::InvalidNumber {
        field: "skill level",
        row: line.to_string(),
    })?;
    let skill = u8::try_from(skill)
        .ok()
        .filter(|s| (MIN_SKILL..=MAX_SKILL).contains(s))
        .ok_or_else(|| ParseError::InvalidSkill {
            value: skill,
            row: line.to_string(),
        })?;

    let role = parse_enum::<RoleType>("preferred role", field(5), line)?;

    let score: i64 = field(6).parse().map_err(|_| ParseError::InvalidNumber {
        field: "personality score",
        row: line.to_string(),
    })?;
    let score = u32::try_from(score)
        .ok()
        .filter(|s| (MIN_SCORE..=MAX_SCORE).contains(s))
        .ok_or_else(|| ParseError::InvalidPersonalityScore {
            value: score,
            row: line.to_string(),
        })?;

    let kind = parse_enum::<PersonalityType>("personality type", field(7), line)?;

    Ok(Participant::new(
        field(0),
        field(1),
        field(2),
        field(3),
        skill,
        role,
        score,
        kind,
    ))
}

fn parse_enum<T: FromStr>(field: &'static str, value: &str, row: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidEnum {
        field,
        value: value.to_string(),
        row: row.to_string(),
    })
}

/// Parses rows in order, stopping at the first bad one.
pub fn parse_rows<S: AsRef<str>>(rows: &[S]) -> Result<Vec<Participant>, ParseError> {
    rows.iter().map(|row| parse_row(row.as_ref())).collect()
}

/// Reads the non-blank lines of `reader`, optionally dropping a header.
pub fn read_rows<R: BufRead>(reader: R, skip_header: bool) -> std::io::Result<Vec<String>> {
    let mut rows = Vec::new();
    let mut lines = reader.lines();
    if skip_header {
        if let Some(header) = lines.next() {
            header?;
        }
    }
    for line in lines {
        let line = line?;
        if !line.trim().is_empty() {
            rows.push(line);
        }
    }
    Ok(rows)
}

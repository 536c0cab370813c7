//! CSV export of teams and rosters.

use std::io;

use teamforge_core::{Participant, Team};

pub const TEAM_HEADER: [&str; 9] = [
    "TeamID",
    "ID",
    "Name",
    "Email",
    "PreferredGame",
    "SkillLevel",
    "Role",
    "PersonalityScore",
    "PersonalityType",
];

pub const PARTICIPANT_HEADER: [&str; 8] = [
    "ID",
    "Name",
    "Email",
    "PreferredGame",
    "SkillLevel",
    "Role",
    "PersonalityScore",
    "PersonalityType",
];

fn record(p: &Participant) -> [String; 8] {
    [
        p.id().to_string(),
        p.name().to_string(),
        p.email().to_string(),
        p.preferred_game().to_string(),
        p.skill_level().to_string(),
        p.preferred_role().to_string(),
        p.personality_score().to_string(),
        p.personality_type().to_string(),
    ]
}

/// Writes one row per member, prefixed with the team id.
pub fn write_teams<'a, W, I>(writer: W, teams: I) -> Result<(), csv::Error>
where
    W: io::Write,
    I: IntoIterator<Item = &'a Team>,
{
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(TEAM_HEADER)?;
    for team in teams {
        let team_id = team.id().to_string();
        for member in team.members() {
            let fields = record(member);
            let row = std::iter::once(team_id.as_str()).chain(fields.iter().map(String::as_str));
            out.write_record(row)?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Writes the eight-column roster that [`parse_row`](super::parse_row)
/// reads back.
pub fn write_participants<W: io::Write>(
    writer: W,
    participants: &[Participant],
) -> Result<(), csv::Error> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(PARTICIPANT_HEADER)?;
    for p in participants {
        out.write_record(record(p))?;
    }
    out.flush()?;
    Ok(())
}

//! Plain-text rendering of a formation result.

use std::fmt::Write;

use teamforge_core::{Participant, Team};
use teamforge_solver::TeamFormationResult;

const RULE_WIDTH: usize = 50;
const NAME_WIDTH: usize = 15;

/// Renders every team followed by a summary.
///
/// Overflow teams are listed after the compliant ones, each with the rules
/// it breaks on a `Violation:` line.
///
/// # Example
///
/// ```
/// use teamforge::prelude::*;
///
/// let pool = vec![
///     Participant::new("1", "Ana", "ana@university.edu", "Chess", 5,
///         RoleType::Strategist, 95, PersonalityType::Leader),
///     Participant::new("2", "Bo", "bo@university.edu", "FIFA", 6,
///         RoleType::Attacker, 75, PersonalityType::Balanced),
/// ];
/// let result = TeamFormation::new(pool, 3).unwrap().with_seed(0).form();
///
/// let text = teamforge::report::render(&result);
/// assert!(text.contains(" Team 1 [Overflow]"));
/// assert!(text.contains(" Violation: Wrong size (2/3) | Only 2 roles"));
/// assert!(text.contains(" Total Players: 2"));
/// ```
pub fn render(result: &TeamFormationResult) -> String {
    let mut out = String::new();
    if result.team_count() == 0 {
        out.push_str("No teams yet.\n");
        return out;
    }

    let rule = "=".repeat(RULE_WIDTH);
    let _ = writeln!(out, "\n{rule}");
    let _ = writeln!(out, "           FORMED TEAMS");
    let _ = writeln!(out, "{rule}\n");

    let target = result.target_size().get();
    for team in result.compliant_teams() {
        render_team(&mut out, team, target, "Good");
        out.push('\n');
    }

    let reports = result.overflow_reports();
    if !reports.is_empty() {
        let _ = writeln!(out, "--- Overflow Teams (may break rules) ---\n");
    }
    for report in reports {
        render_team(&mut out, report.team, target, "Overflow");
        if !report.violations.is_empty() {
            let violations: Vec<String> = report.violations.iter().map(ToString::to_string).collect();
            let _ = writeln!(out, " Violation: {}", violations.join(" | "));
        }
        out.push('\n');
    }

    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, " Summary");
    let _ = writeln!(out, " Good Teams   : {}", result.compliant_teams().len());
    let _ = writeln!(out, " Overflow     : {}", result.overflow_teams().len());
    let _ = writeln!(out, " Total Teams  : {}", result.team_count());
    let _ = writeln!(out, " Total Players: {}", result.participant_count());
    let _ = writeln!(out, "{rule}");
    out
}

fn render_team(out: &mut String, team: &Team, target: usize, tag: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, " Team {} [{tag}]", team.id());
    let _ = writeln!(out, "{rule}");

    for member in team.members() {
        let _ = writeln!(out, "{}", member_row(member));
    }
    let _ = writeln!(
        out,
        "\n Avg Skill: {:.2} | Size: {}/{}",
        team.average_skill(),
        team.len(),
        target
    );
}

fn member_row(p: &Participant) -> String {
    format!(
        " {:<6} | {:<15} | {:<12} | Skill: {:>2} | {:<11} | {:<10}",
        p.id().as_str(),
        short_name(p.name()),
        p.preferred_game(),
        p.skill_level(),
        p.preferred_role().as_str(),
        p.personality_type().as_str(),
    )
}

fn short_name(name: &str) -> String {
    if name.chars().count() > NAME_WIDTH {
        let head: String = name.chars().take(NAME_WIDTH - 2).collect();
        format!("{head}..")
    } else {
        name.to_string()
    }
}

//! Tests for row parsing, chunked ingestion and export.

use std::io::Cursor;
use std::sync::Arc;

use rayon::ThreadPool;
use teamforge_config::IngestConfig;
use teamforge_core::{PersonalityType, RoleType, Team};
use teamforge_test::{participant, random_pool};

use super::*;

fn workers(n: usize) -> Arc<ThreadPool> {
    Arc::new(rayon::ThreadPoolBuilder::new().num_threads(n).build().unwrap())
}

fn row(i: usize) -> String {
    format!("P{i:03},Player {i},p{i:03}@university.edu,Chess,{},DEFENDER,70,BALANCED", i % 10 + 1)
}

#[test]
fn test_parse_row_fields() {
    let p = parse_row("  P7 , Ana Lee ,ana@university.edu,Valorant,10,coordinator,95,Leader").unwrap();
    assert_eq!(p.id().as_str(), "P7");
    assert_eq!(p.name(), "Ana Lee");
    assert_eq!(p.preferred_game(), "Valorant");
    assert_eq!(p.skill_level(), 10);
    assert_eq!(p.preferred_role(), RoleType::Coordinator);
    assert_eq!(p.personality_score(), 95);
    assert_eq!(p.personality_type(), PersonalityType::Leader);
}

#[test]
fn test_parse_row_column_count() {
    let err = parse_row("P1,Ana,ana@university.edu,Chess,5,DEFENDER,70").unwrap_err();
    assert!(matches!(err, ParseError::ColumnCount { expected: 8, found: 7, .. }));

    let err = parse_row("P1,Ana,ana@university.edu,Chess,5,DEFENDER,70,BALANCED,extra").unwrap_err();
    assert!(matches!(err, ParseError::ColumnCount { found: 9, .. }));

    let err = parse_row("").unwrap_err();
    assert!(matches!(err, ParseError::ColumnCount { found: 0, .. }));
}

#[test]
fn test_parse_row_rejects_bad_values() {
    let err = parse_row("P1,Ana,ana@university.edu,Chess,x,DEFENDER,70,BALANCED").unwrap_err();
    assert!(matches!(err, ParseError::InvalidNumber { field: "skill level", .. }));

    let err = parse_row("P1,Ana,ana@university.edu,Chess,11,DEFENDER,70,BALANCED").unwrap_err();
    assert!(matches!(err, ParseError::InvalidSkill { value: 11, .. }));

    let err = parse_row("P1,Ana,ana@university.edu,Chess,-2,DEFENDER,70,BALANCED").unwrap_err();
    assert!(matches!(err, ParseError::InvalidSkill { value: -2, .. }));

    let err = parse_row("P1,Ana,ana@university.edu,Chess,5,GOALIE,70,BALANCED").unwrap_err();
    assert_eq!(
        err,
        ParseError::InvalidEnum {
            field: "preferred role",
            value: "GOALIE".to_string(),
            row: "P1,Ana,ana@university.edu,Chess,5,GOALIE,70,BALANCED".to_string(),
        }
    );

    let err = parse_row("P1,Ana,ana@university.edu,Chess,5,DEFENDER,-1,BALANCED").unwrap_err();
    assert!(matches!(err, ParseError::InvalidPersonalityScore { value: -1, .. }));

    let err = parse_row("P1,Ana,ana@university.edu,Chess,5,DEFENDER,7.5,BALANCED").unwrap_err();
    assert!(matches!(err, ParseError::InvalidNumber { field: "personality score", .. }));

    let err = parse_row("P1,Ana,ana@university.edu,Chess,5,DEFENDER,70,GRUMPY").unwrap_err();
    assert!(matches!(err, ParseError::InvalidEnum { field: "personality type", .. }));
    assert_eq!(err.row(), "P1,Ana,ana@university.edu,Chess,5,DEFENDER,70,GRUMPY");
}

#[test]
fn test_personality_score_range() {
    let line = |score: &str| format!("P1,Ana,ana@university.edu,Chess,5,DEFENDER,{score},BALANCED");

    assert_eq!(parse_row(&line("20")).unwrap().personality_score(), 20);
    assert_eq!(parse_row(&line("100")).unwrap().personality_score(), 100);

    let err = parse_row(&line("19")).unwrap_err();
    assert!(matches!(err, ParseError::InvalidPersonalityScore { value: 19, .. }));
    let err = parse_row(&line("101")).unwrap_err();
    assert!(matches!(err, ParseError::InvalidPersonalityScore { value: 101, .. }));
    assert_eq!(
        err.to_string(),
        format!("personality score 101 is outside 20..=100: {}", line("101"))
    );
}

#[test]
fn test_parse_rows_stops_at_first_error() {
    let rows = [row(1), "broken".to_string(), row(3)];
    let err = parse_rows(&rows).unwrap_err();
    assert_eq!(err.row(), "broken");
    assert_eq!(parse_rows(&[row(1), row(2)]).unwrap().len(), 2);
}

#[test]
fn test_read_rows_skips_header_and_blanks() {
    let input = format!("ID,Name,Email,PreferredGame,SkillLevel,Role,PersonalityScore,PersonalityType\n{}\n\n   \n{}\n", row(1), row(2));
    let rows = read_rows(Cursor::new(input.clone()), true).unwrap();
    assert_eq!(rows, vec![row(1), row(2)]);

    let rows = read_rows(Cursor::new(input), false).unwrap();
    assert_eq!(rows.len(), 3);
}

#[test]
fn test_chunk_len() {
    let ingestor = ParallelIngestor::new(workers(2), 4);
    assert_eq!(ingestor.chunk_len(10), 3);
    assert_eq!(ingestor.chunk_len(8), 2);
    assert_eq!(ingestor.chunk_len(3), 1);
    assert_eq!(ingestor.chunk_len(0), 1);

    let single = ParallelIngestor::new(workers(1), 0);
    assert_eq!(single.chunk_len(10), 10);
}

#[test]
fn test_ingest_keeps_input_order() {
    let rows: Vec<String> = (0..103).map(row).collect();
    let report = ParallelIngestor::new(workers(4), 4).ingest(&rows);

    assert_eq!(report.chunks().len(), 4);
    assert!(report.is_complete());
    let participants = report.into_participants().unwrap();
    let ids: Vec<String> = participants.iter().map(|p| p.id().to_string()).collect();
    let expected: Vec<String> = (0..103).map(|i| format!("P{i:03}")).collect();
    assert_eq!(ids, expected);
}

#[test]
fn test_bad_row_fails_only_its_chunk() {
    let mut rows: Vec<String> = (0..12).map(row).collect();
    rows[7] = "P007,Broken,p007@university.edu,Chess,0,DEFENDER,70,BALANCED".to_string();

    let report = ParallelIngestor::new(workers(3), 3).ingest(&rows);
    assert!(!report.is_complete());
    let failed: Vec<usize> = report.failures().map(IngestError::chunk).collect();
    assert_eq!(failed, vec![1]);

    let err = report.clone().into_participants().unwrap_err();
    assert!(matches!(
        err,
        IngestError::Parse { chunk: 1, source: ParseError::InvalidSkill { value: 0, .. } }
    ));

    let (participants, failures) = report.partial();
    assert_eq!(participants.len(), 8);
    assert_eq!(failures.len(), 1);
    assert_eq!(participants[4].id().as_str(), "P008");
}

#[test]
fn test_ingest_empty_input() {
    let rows: Vec<String> = Vec::new();
    let report = ParallelIngestor::new(workers(2), 4).ingest(&rows);
    assert!(report.chunks().is_empty());
    assert!(report.into_participants().unwrap().is_empty());
}

#[test]
fn test_ingest_reader() {
    let input = format!("header\n{}\n{}\n", row(1), row(2));
    let report = ParallelIngestor::new(workers(2), 2)
        .ingest_reader(Cursor::new(input))
        .unwrap();
    assert_eq!(report.into_participants().unwrap().len(), 2);
}

#[test]
fn test_headerless_input_from_config_keeps_first_row() {
    let config = IngestConfig {
        thread_count: 2,
        skip_header: false,
    };
    let ingestor = ParallelIngestor::from_config(workers(2), &config);
    assert!(!ingestor.skip_header());

    let input = format!("{}\n{}\n", row(1), row(2));
    let participants = ingestor
        .ingest_reader(Cursor::new(input))
        .unwrap()
        .into_participants()
        .unwrap();
    let ids: Vec<&str> = participants.iter().map(|p| p.id().as_str()).collect();
    assert_eq!(ids, vec!["P001", "P002"]);

    let default = ParallelIngestor::from_config(workers(2), &IngestConfig::default());
    assert!(default.skip_header());
}

#[test]
fn test_roster_export_reads_back() {
    let roster = random_pool(30, 5);
    let mut out = Vec::new();
    write_participants(&mut out, &roster).unwrap();

    let text = String::from_utf8(out).unwrap();
    let rows = read_rows(Cursor::new(text), true).unwrap();
    let parsed = parse_rows(&rows).unwrap();
    assert_eq!(parsed, roster);
    for (a, b) in parsed.iter().zip(&roster) {
        assert_eq!(a.preferred_game(), b.preferred_game());
        assert_eq!(a.skill_level(), b.skill_level());
        assert_eq!(a.personality_type(), b.personality_type());
    }
}

#[test]
fn test_team_export() {
    let team = Team::with_members(
        4,
        vec![
            participant("L1").name("Ana").personality(PersonalityType::Leader).build(),
            participant("T1").name("Bo, Jr.").game("FIFA").build(),
        ],
    );
    let mut out = Vec::new();
    export::write_teams(&mut out, [&team]).unwrap();

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines[0],
        "TeamID,ID,Name,Email,PreferredGame,SkillLevel,Role,PersonalityScore,PersonalityType"
    );
    assert_eq!(lines[1], "4,L1,Ana,l1@university.edu,Chess,5,STRATEGIST,92,LEADER");
    assert_eq!(lines[2], "4,T1,\"Bo, Jr.\",t1@university.edu,FIFA,5,STRATEGIST,76,BALANCED");
    assert_eq!(lines.len(), 3);
}

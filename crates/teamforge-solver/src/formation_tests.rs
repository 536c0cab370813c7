//! Tests for formation runs.

use std::sync::Arc;

use teamforge_config::{FormationConfig, ParallelConfig};
use teamforge_core::{PersonalityType, TeamForgeError};
use teamforge_test::pools::{all_leaders, small_pool, two_team_pool};
use teamforge_test::{assert_compliant, assert_exact_partition, participant, random_pool};

use super::*;

#[test]
fn test_rejects_empty_pool() {
    let err = TeamFormation::new(Vec::new(), 4).unwrap_err();
    assert_eq!(err, TeamForgeError::EmptyPool);
}

#[test]
fn test_rejects_team_size_out_of_range() {
    for size in [0, 1, 11] {
        let err = TeamFormation::new(small_pool(4), size).unwrap_err();
        assert!(matches!(err, TeamForgeError::TeamSizeOutOfRange { .. }));
    }
    assert!(TeamFormation::new(small_pool(4), 2).is_ok());
    assert!(TeamFormation::new(small_pool(4), 10).is_ok());
}

#[test]
fn test_rejects_duplicate_ids() {
    let pool = vec![participant("p1").build(), participant("P1").game("FIFA").build()];
    let err = TeamFormation::new(pool, 2).unwrap_err();
    assert!(matches!(err, TeamForgeError::DuplicateParticipant(_)));
}

#[test]
fn test_two_compliant_teams() {
    for seed in 0..20 {
        let pool = two_team_pool();
        let result = TeamFormation::new(pool.clone(), 6)
            .unwrap()
            .with_seed(seed)
            .form();

        assert_eq!(result.compliant_teams().len(), 2, "seed {seed}");
        assert!(result.overflow_teams().is_empty());
        assert!(result.halt_reason().is_none());
        assert!(result.balance().final_gap < 1.2);
        for team in result.compliant_teams() {
            assert_compliant(team, 6);
        }
        assert_exact_partition(&pool, result.all_teams());
    }
}

#[test]
fn test_undersized_pool_goes_to_overflow() {
    let pool = small_pool(5);
    let result = TeamFormation::new(pool.clone(), 6).unwrap().with_seed(3).form();

    assert!(result.compliant_teams().is_empty());
    assert_eq!(result.overflow_teams().len(), 1);
    assert_eq!(result.overflow_teams()[0].len(), 5);
    assert_eq!(result.overflow_teams()[0].id(), 1);

    let reports = result.overflow_reports();
    assert_eq!(reports[0].violations[0].to_string(), "Wrong size (5/6)");
    assert_exact_partition(&pool, result.all_teams());
}

#[test]
fn test_all_leaders_overflow() {
    let pool = all_leaders(7);
    let result = TeamFormation::new(pool.clone(), 3).unwrap().with_seed(9).form();

    assert!(result.compliant_teams().is_empty());
    assert_eq!(
        result.halt_reason(),
        Some(&HaltReason::Incomplete { size: 1, target: 3 })
    );
    let sizes: Vec<usize> = result.overflow_teams().iter().map(Team::len).collect();
    assert_eq!(sizes, vec![3, 3, 1]);

    for report in result.overflow_reports() {
        if report.team.len() > 1 {
            assert!(report
                .violations
                .contains(&Violation::TooManyLeaders(report.team.len())));
        }
    }
    assert_exact_partition(&pool, result.all_teams());
}

#[test]
fn test_no_leader_halts_immediately() {
    let pool: Vec<_> = (0..8)
        .map(|i| participant(&format!("b{i}")).game(&format!("G{i}")).build())
        .collect();
    let result = TeamFormation::new(pool, 4).unwrap().with_seed(0).form();

    assert_eq!(result.halt_reason(), Some(&HaltReason::NoLeader));
    assert_eq!(result.stats().attempts, 1);
    assert_eq!(result.overflow_teams().len(), 2);
    for report in result.overflow_reports() {
        assert!(report.violations.contains(&Violation::NoLeader));
    }
}

#[test]
fn test_team_ids_are_contiguous() {
    let pool = random_pool(90, 4);
    let result = TeamFormation::new(pool, 5).unwrap().with_seed(4).form();

    let ids: Vec<usize> = result.all_teams().map(Team::id).collect();
    let expected: Vec<usize> = (1..=result.team_count()).collect();
    assert_eq!(ids, expected);
}

#[test]
fn test_random_pools_hold_invariants() {
    for seed in 0..25 {
        let pool = random_pool(60 + seed as usize * 3, seed);
        let size = 3 + (seed as usize % 6);
        let result = TeamFormation::new(pool.clone(), size)
            .unwrap()
            .with_seed(seed)
            .form();

        assert_exact_partition(&pool, result.all_teams());
        for team in result.compliant_teams() {
            assert_compliant(team, size);
        }
        for team in result.overflow_teams() {
            assert!(team.len() <= size && !team.is_empty());
        }
        assert!(result.balance().iterations <= 50);
        assert_eq!(result.participant_count(), pool.len());
    }
}

#[test]
fn test_same_seed_same_teams() {
    let pool = random_pool(80, 21);
    let a = TeamFormation::new(pool.clone(), 4).unwrap().with_seed(21).form();
    let b = TeamFormation::new(pool, 4).unwrap().with_seed(21).form();

    let ids = |r: &TeamFormationResult| -> Vec<Vec<String>> {
        r.all_teams()
            .map(|t| t.members().iter().map(|m| m.id().to_string()).collect())
            .collect()
    };
    assert_eq!(ids(&a), ids(&b));
}

#[test]
fn test_parallel_run_holds_invariants() {
    let workers = Arc::new(
        rayon::ThreadPoolBuilder::new()
            .num_threads(4)
            .build()
            .unwrap(),
    );

    for seed in 0..3 {
        let pool = random_pool(600, seed);
        let sequential = TeamFormation::new(pool.clone(), 5)
            .unwrap()
            .with_seed(seed)
            .form();
        let parallel = TeamFormation::new(pool.clone(), 5)
            .unwrap()
            .with_seed(seed)
            .with_worker_pool(Arc::clone(&workers))
            .form();

        assert!(parallel.stats().parallel_selections > 0);
        assert_eq!(
            parallel.compliant_teams().len(),
            sequential.compliant_teams().len()
        );
        assert_exact_partition(&pool, parallel.all_teams());
        for team in parallel.compliant_teams() {
            assert_compliant(team, 5);
        }
    }
}

#[test]
fn test_from_config() {
    let config = FormationConfig::new()
        .with_team_size(6)
        .with_random_seed(2)
        .with_parallel(ParallelConfig {
            enabled: false,
            ..ParallelConfig::default()
        });
    let workers = Arc::new(rayon::ThreadPoolBuilder::new().num_threads(2).build().unwrap());

    let formation = TeamFormation::from_config(two_team_pool(), &config, Some(workers)).unwrap();
    assert_eq!(formation.target_size().get(), 6);
    let result = formation.form();
    assert_eq!(result.stats().parallel_selections, 0);
    assert_eq!(result.compliant_teams().len(), 2);

    let bad = FormationConfig::new().with_team_size(12);
    assert!(TeamFormation::from_config(two_team_pool(), &bad, None).is_err());
}

#[test]
fn test_balancing_keeps_leaders() {
    let pool = random_pool(120, 77);
    let result = TeamFormation::new(pool, 6).unwrap().with_seed(77).form();

    for team in result.compliant_teams() {
        assert_eq!(team.personality_count(PersonalityType::Leader), 1);
    }
    assert_eq!(
        result.stats().balance_swaps,
        result.balance().swaps as u64
    );
}

//! Formation entry points that hide the pool and config wiring.

use std::sync::Arc;

use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::warn;

use teamforge_config::{FormationConfig, ParallelConfig};
use teamforge_core::{Participant, Result};
use teamforge_solver::{TeamFormation, TeamFormationResult};

/// Forms teams with the configuration in `teamforge.toml`.
///
/// A missing or unreadable file falls back to the default configuration.
pub fn form_teams(participants: Vec<Participant>) -> Result<TeamFormationResult> {
    let config = FormationConfig::load("teamforge.toml").unwrap_or_default();
    form_teams_with(participants, &config)
}

/// Forms teams with an explicit configuration.
///
/// # Errors
///
/// Fails if the pool is empty, holds duplicate ids, or the configured team
/// size is outside the supported range.
pub fn form_teams_with(
    participants: Vec<Participant>,
    config: &FormationConfig,
) -> Result<TeamFormationResult> {
    #[cfg(feature = "console")]
    teamforge_console::init();

    let workers = worker_pool(&config.parallel);
    Ok(TeamFormation::from_config(participants, config, workers)?.form())
}

/// Builds the candidate-evaluation worker pool, or `None` when parallel
/// evaluation is disabled or the pool cannot be created.
pub fn worker_pool(config: &ParallelConfig) -> Option<Arc<ThreadPool>> {
    if !config.enabled {
        return None;
    }

    let threads = config.thread_count.resolve();
    match ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("teamforge-worker-{i}"))
        .build()
    {
        Ok(pool) => Some(Arc::new(pool)),
        Err(e) => {
            warn!(
                event = "worker_pool_unavailable",
                threads = threads,
                error = %e,
            );
            None
        }
    }
}

//! Colorful console output for formation runs.
//!
//! Provides a custom `tracing` layer that formats TeamForge events with colors.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (formation/phase start and end, teams formed,
//!   overflow teams, balancing swaps, registry edits)
//! - **WARN**: Parallel fallbacks and failed ingestion chunks
//! - **DEBUG**: Per-selection and per-chunk detail

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static RUN_START_NANOS: AtomicU64 = AtomicU64::new(0);

/// Package version for banner display.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initializes the console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the TeamForge banner and sets up tracing. `RUST_LOG` overrides
/// the default `teamforge_solver=info` filter.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::INFO.into())
            .parse_lossy(
                std::env::var(EnvFilter::DEFAULT_ENV)
                    .unwrap_or_else(|_| "teamforge_solver=info,teamforge=info".to_string()),
            );

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(FormationConsoleLayer)
            .try_init();
    });
}

// Marks the start of a formation run for elapsed time tracking.
fn mark_run_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    RUN_START_NANOS.store(nanos, Ordering::Relaxed);
}

// Returns elapsed time since the run started.
fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = RUN_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let banner = r#"
 _____                     _____
|_   _|__  __ _ _ __ ___  |  ___|__  _ __ __ _  ___
  | |/ _ \/ _` | '_ ` _ \ | |_ / _ \| '__/ _` |/ _ \
  | |  __/ (_| | | | | | ||  _| (_) | | | (_| |  __/
  |_|\___|\__,_|_| |_| |_||_|  \___/|_|  \__, |\___|
                                         |___/
"#;

    let version_line = format!("                   v{} - Team Formation Engine\n", VERSION);

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats formation events with colors.
pub struct FormationConsoleLayer;

impl<S: Subscriber> Layer<S> for FormationConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let target = metadata.target();

        if !target.starts_with("teamforge_solver")
            && target != "teamforge"
            && !target.starts_with("teamforge::")
        {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Debug, Default)]
struct EventVisitor {
    event: Option<String>,
    phase: Option<String>,
    reason: Option<String>,
    violations: Option<String>,
    participant: Option<String>,
    outgoing: Option<String>,
    incoming: Option<String>,
    error: Option<String>,
    phase_index: Option<u64>,
    participants: Option<u64>,
    team_size: Option<u64>,
    pool: Option<u64>,
    teams: Option<u64>,
    remaining: Option<u64>,
    team_id: Option<u64>,
    size: Option<u64>,
    compliant: Option<u64>,
    overflow: Option<u64>,
    attempts: Option<u64>,
    candidates: Option<u64>,
    iterations: Option<u64>,
    swaps: Option<u64>,
    iteration: Option<u64>,
    strong_team: Option<u64>,
    weak_team: Option<u64>,
    rows: Option<u64>,
    chunks: Option<u64>,
    chunk: Option<u64>,
    failed: Option<u64>,
    duration_ms: Option<u64>,
    avg_skill: Option<f64>,
    gap: Option<f64>,
    gap_threshold: Option<f64>,
    to_overflow: Option<bool>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        self.record_str(field, s.trim_matches('"'));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        let slot = match field.name() {
            "event" => &mut self.event,
            "phase" => &mut self.phase,
            "reason" => &mut self.reason,
            "violations" => &mut self.violations,
            "participant" => &mut self.participant,
            "outgoing" => &mut self.outgoing,
            "incoming" => &mut self.incoming,
            "error" => &mut self.error,
            _ => return,
        };
        *slot = Some(value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        let slot = match field.name() {
            "phase_index" => &mut self.phase_index,
            "participants" => &mut self.participants,
            "team_size" => &mut self.team_size,
            "pool" => &mut self.pool,
            "teams" => &mut self.teams,
            "remaining" => &mut self.remaining,
            "team_id" => &mut self.team_id,
            "size" => &mut self.size,
            "compliant" => &mut self.compliant,
            "overflow" => &mut self.overflow,
            "attempts" => &mut self.attempts,
            "candidates" => &mut self.candidates,
            "iterations" => &mut self.iterations,
            "swaps" => &mut self.swaps,
            "iteration" => &mut self.iteration,
            "strong_team" => &mut self.strong_team,
            "weak_team" => &mut self.weak_team,
            "rows" => &mut self.rows,
            "chunks" => &mut self.chunks,
            "chunk" => &mut self.chunk,
            "failed" => &mut self.failed,
            "duration_ms" => &mut self.duration_ms,
            _ => return,
        };
        *slot = Some(value);
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        match field.name() {
            "avg_skill" => self.avg_skill = Some(value),
            "gap" => self.gap = Some(value),
            "gap_threshold" => self.gap_threshold = Some(value),
            _ => {}
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "to_overflow" {
            self.to_overflow = Some(value);
        }
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    let event = v.event.as_deref().unwrap_or("");

    match event {
        "formation_start" => format_formation_start(v),
        "formation_end" => format_formation_end(v),
        "phase_start" => format_phase_start(v),
        "phase_end" => format_phase_end(v),
        "team_formed" => format_team_formed(v),
        "assembly_halted" => format_assembly_halted(v),
        "overflow_team" => format_overflow_team(v),
        "balance_swap" => format_balance_swap(v),
        "parallel_fallback" => format_parallel_fallback(v),
        "ingest_end" => format_ingest_end(v),
        "ingest_failed" => format_ingest_failed(v),
        "late_registration" => format_late_registration(v),
        "withdrawal" => format_withdrawal(v),
        _ if level == Level::DEBUG => format_debug(event),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn count(n: Option<u64>) -> String {
    n.unwrap_or(0).to_formatted_string(&Locale::en)
}

fn format_formation_start(v: &EventVisitor) -> String {
    mark_run_start();
    format!(
        "{} {} Forming teams │ {} participants │ team size {}",
        format_elapsed(),
        "▶".bright_green().bold(),
        count(v.participants).bright_yellow(),
        count(v.team_size).bright_yellow(),
    )
}

fn format_formation_end(v: &EventVisitor) -> String {
    let compliant = v.compliant.unwrap_or(0);
    let overflow = v.overflow.unwrap_or(0);

    let status = if overflow == 0 {
        "ALL COMPLIANT".bright_green().bold().to_string()
    } else {
        format!("{} OVERFLOW", overflow).bright_red().bold().to_string()
    };

    let mut output = format!(
        "{} {} Formation complete │ {} │ {} │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        format_gap(v.gap.unwrap_or(0.0), v.gap_threshold),
        status
    );

    let rows = [
        ("Compliant teams:", compliant.to_formatted_string(&Locale::en)),
        ("Overflow teams:", overflow.to_formatted_string(&Locale::en)),
        ("Assembly attempts:", count(v.attempts)),
        ("Candidates scored:", count(v.candidates)),
        ("Final skill gap:", format!("{:.2}", v.gap.unwrap_or(0.0))),
    ];

    // Summary box
    output.push_str("\n\n");
    output.push_str(
        &"╔══════════════════════════════════════════════════════════╗"
            .bright_cyan()
            .to_string(),
    );
    output.push('\n');
    for (label, value) in rows {
        output.push_str(&format!(
            "{}  {:<20}{:>34}  {}",
            "║".bright_cyan(),
            label,
            value,
            "║".bright_cyan()
        ));
        output.push('\n');
    }
    output.push_str(
        &"╚══════════════════════════════════════════════════════════╝"
            .bright_cyan()
            .to_string(),
    );
    output.push('\n');

    output
}

fn format_phase_start(v: &EventVisitor) -> String {
    let phase = v.phase.as_deref().unwrap_or("Unknown");

    format!(
        "{} {} {} started",
        format_elapsed(),
        "▶".bright_blue(),
        phase.white().bold()
    )
}

fn format_phase_end(v: &EventVisitor) -> String {
    let phase = v.phase.as_deref().unwrap_or("Unknown");

    let mut output = format!(
        "{} {} {} ended │ {}",
        format_elapsed(),
        "◀".bright_blue(),
        phase.white().bold(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
    );

    if let Some(teams) = v.teams {
        output.push_str(&format!(
            " │ {} teams",
            teams.to_formatted_string(&Locale::en).white()
        ));
    }
    if let Some(remaining) = v.remaining {
        output.push_str(&format!(
            " │ {} left",
            remaining.to_formatted_string(&Locale::en).white()
        ));
    }
    if let Some(swaps) = v.swaps {
        output.push_str(&format!(
            " │ {} swaps in {} iterations",
            swaps.to_formatted_string(&Locale::en).bright_magenta().bold(),
            count(v.iterations)
        ));
    }
    if let Some(gap) = v.gap {
        output.push_str(&format!(" │ {}", format_gap(gap, v.gap_threshold)));
    }

    output
}

fn format_team_formed(v: &EventVisitor) -> String {
    format!(
        "{} {} Team {:>4} │ {} members │ avg skill {}",
        format_elapsed(),
        "✓".bright_green(),
        count(v.team_id).bright_white(),
        count(v.size),
        format!("{:.2}", v.avg_skill.unwrap_or(0.0)).bright_yellow(),
    )
}

fn format_assembly_halted(v: &EventVisitor) -> String {
    format!(
        "{} {} Assembly halted │ {} │ {} left",
        format_elapsed(),
        "■".yellow(),
        v.reason.as_deref().unwrap_or("unknown").yellow(),
        count(v.remaining),
    )
}

fn format_overflow_team(v: &EventVisitor) -> String {
    format!(
        "{} {} Team {:>4} │ {} members │ {}",
        format_elapsed(),
        "✗".bright_red(),
        count(v.team_id).bright_white(),
        count(v.size),
        v.violations.as_deref().unwrap_or("").bright_red(),
    )
}

fn format_balance_swap(v: &EventVisitor) -> String {
    format!(
        "{} {} Swap {:>3} │ {} (team {}) ⇄ {} (team {}) │ {}",
        format_elapsed(),
        "⇄".bright_cyan(),
        count(v.iteration).bright_black(),
        v.outgoing.as_deref().unwrap_or("?"),
        count(v.strong_team),
        v.incoming.as_deref().unwrap_or("?"),
        count(v.weak_team),
        format_gap(v.gap.unwrap_or(0.0), v.gap_threshold),
    )
}

fn format_parallel_fallback(v: &EventVisitor) -> String {
    format!(
        "{} {} Sequential fallback │ {} candidates │ {}",
        format_elapsed(),
        "⚠".yellow().bold(),
        count(v.candidates),
        v.reason.as_deref().unwrap_or("unknown").yellow(),
    )
}

fn format_ingest_end(v: &EventVisitor) -> String {
    let failed = v.failed.unwrap_or(0);
    let status = if failed == 0 {
        "ok".bright_green().to_string()
    } else {
        format!("{} failed", failed).bright_red().to_string()
    };
    format!(
        "{} {} Ingested {} rows │ {} chunks │ {} │ {}",
        format_elapsed(),
        "⚡".bright_cyan(),
        count(v.rows).bright_yellow(),
        count(v.chunks),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        status
    )
}

fn format_ingest_failed(v: &EventVisitor) -> String {
    format!(
        "{} {} Chunk {} rejected │ {}",
        format_elapsed(),
        "✗".bright_red(),
        count(v.chunk),
        v.error.as_deref().unwrap_or("").bright_red(),
    )
}

fn format_late_registration(v: &EventVisitor) -> String {
    let target = if v.to_overflow.unwrap_or(false) {
        "overflow team".yellow().to_string()
    } else {
        "team".white().to_string()
    };
    format!(
        "{} {} {} joined {} {}",
        format_elapsed(),
        "+".bright_green(),
        v.participant.as_deref().unwrap_or("?").bright_white(),
        target,
        count(v.team_id),
    )
}

fn format_withdrawal(v: &EventVisitor) -> String {
    format!(
        "{} {} {} left team {}",
        format_elapsed(),
        "-".bright_red(),
        v.participant.as_deref().unwrap_or("?").bright_white(),
        count(v.team_id),
    )
}

fn format_debug(event: &str) -> String {
    if event.is_empty() {
        return String::new();
    }
    format!("{} {} {}", format_elapsed(), "·".bright_black(), event.bright_black())
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

/// Green once the gap is under the balancer's threshold, yellow above it.
/// Plain when the event carries no threshold.
fn format_gap(gap: f64, threshold: Option<f64>) -> String {
    let text = format!("gap {:.2}", gap);
    match threshold {
        Some(threshold) if gap < threshold => text.bright_green().to_string(),
        Some(_) => text.yellow().to_string(),
        None => text,
    }
}

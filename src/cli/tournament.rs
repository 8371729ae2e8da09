//! Tournament command implementation.

use super::output::{format_tournament_csv, format_tournament_text, JsonTournamentResult};
use super::{lookup_policy, CliError, TournamentFormat};
use indicatif::{ProgressBar, ProgressStyle};
use pcrb::tournament::{run_stats, PolicyPair, TournamentConfig};
use pcrb::{BattleConfig, GameInfo, Memo, Policy, RobotState};
use std::sync::Arc;
use std::time::Instant;

type SharedPolicy = Arc<dyn Policy + Send + Sync>;

/// Execute the tournament command.
///
/// # Errors
///
/// Returns an error if a policy is unknown or the thread pool cannot be built.
pub(crate) fn execute(
    first: &str,
    second: &str,
    rounds: u32,
    turns: u32,
    threads: Option<usize>,
    format: TournamentFormat,
    progress: bool,
) -> Result<(), CliError> {
    let shared: [SharedPolicy; 2] = [
        Arc::from(lookup_policy(first)?),
        Arc::from(lookup_policy(second)?),
    ];
    let policy_names = [first.to_string(), second.to_string()];

    let config = TournamentConfig {
        battle: BattleConfig {
            max_turn: turns,
            ..BattleConfig::default()
        },
        rounds,
        ..TournamentConfig::default()
    };

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(num_threads) = threads {
        builder = builder.num_threads(num_threads);
    }
    let pool = builder
        .build()
        .map_err(|e| CliError::Other(format!("Failed to build thread pool: {e}")))?;

    let pb = if progress {
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} rounds ({per_sec})")
            .map_err(|e| CliError::Other(format!("Invalid progress template: {e}")))?
            .progress_chars("=>-");
        let pb = ProgressBar::new(u64::from(rounds));
        pb.set_style(style);
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();

    // Policies are shared; each round still gets its own memos.
    let stats = pool.install(|| {
        run_stats(&config, |_| -> PolicyPair {
            if let Some(pb) = &pb {
                pb.inc(1);
            }
            (per_round(&shared[0]), per_round(&shared[1]))
        })
    });

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();

    #[allow(clippy::cast_precision_loss)]
    let rounds_per_sec = if duration.as_secs_f64() > 0.0 {
        (stats.rounds_played + stats.aborted) as f64 / duration.as_secs_f64()
    } else {
        0.0
    };

    match format {
        TournamentFormat::Text => {
            println!();
            print!("{}", format_tournament_text(&stats, &policy_names));
            println!();
            println!("Duration: {:.2}s ({:.0} rounds/sec)", duration.as_secs_f64(), rounds_per_sec);
        }
        TournamentFormat::Json => {
            let json_result = JsonTournamentResult::from_stats(&stats, &policy_names);
            let json = serde_json::to_string_pretty(&json_result)
                .map_err(|e| CliError::Other(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
        TournamentFormat::Csv => {
            print!("{}", format_tournament_csv(&stats, &policy_names));
        }
    }

    Ok(())
}

/// A boxed handle on a shared policy.
fn per_round(policy: &SharedPolicy) -> Box<dyn Policy> {
    let policy = Arc::clone(policy);
    Box::new(move |me: &RobotState, info: &GameInfo, memo: &mut Memo| {
        policy.decide(me, info, memo)
    })
}

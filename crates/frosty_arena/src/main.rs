//! Frosty - AI vs. AI tic-tac-toe CLI.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use frosty_arena::{
    Backend, ConsoleSink, FirstEmptyPlayer, MatchOutcome, MoveProvider, Orchestrator, PRESETS,
    PlayerConfig, from_config, tui,
};
use frosty_tictactoe::{FreezeDice, NeverFreeze, RngDice};
use std::time::Duration;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

/// Pause added to local players in the TUI so moves are watchable.
const LOCAL_TUI_DELAY: Duration = Duration::from_millis(400);

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            player_x,
            player_o,
            seed,
            no_freeze,
            turn_limit,
            tui,
        } => {
            init_tracing(tui)?;
            run_match(&player_x, &player_o, seed, no_freeze, turn_limit, tui).await
        }
        Command::Presets => {
            list_presets();
            Ok(())
        }
    }
}

/// Logs to stderr, or to a file when the TUI owns the screen.
fn init_tracing(tui: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,frosty_arena=debug"));

    if tui {
        let log_file = std::fs::File::create("frosty_tui.log")?;
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::sync::Arc::new(log_file))
            .with_ansi(false)
            .try_init();
    } else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }
    Ok(())
}

/// Builds a provider for one command-line player argument.
#[instrument]
fn build_player(arg: &str, tui: bool) -> Result<Box<dyn MoveProvider>> {
    let config = PlayerConfig::resolve(arg)?;
    if tui && *config.backend() == Backend::Local {
        return Ok(Box::new(
            FirstEmptyPlayer::new(config.name().clone()).with_delay(LOCAL_TUI_DELAY),
        ));
    }
    Ok(from_config(&config)?)
}

/// Run one match
#[instrument]
async fn run_match(
    player_x: &str,
    player_o: &str,
    seed: Option<u64>,
    no_freeze: bool,
    turn_limit: u32,
    tui: bool,
) -> Result<()> {
    // Configuration errors surface here, before the match starts.
    let x = build_player(player_x, tui)?;
    let o = build_player(player_o, tui)?;

    let dice: Box<dyn FreezeDice> = if no_freeze {
        Box::new(NeverFreeze)
    } else if let Some(seed) = seed {
        Box::new(RngDice::seeded(seed))
    } else {
        Box::new(RngDice::from_entropy())
    };

    let orchestrator = Orchestrator::new(x, o, dice).with_turn_limit(turn_limit);

    let outcome: Option<MatchOutcome> = if tui {
        tui::run_match_tui(orchestrator).await?
    } else {
        let mut sink = ConsoleSink::stdout();
        Some(orchestrator.run(&mut sink).await)
    };

    match outcome {
        Some(outcome) => info!(
            status = %outcome.status(),
            winner = ?outcome.winner(),
            turns = outcome.turns(),
            "Match finished"
        ),
        None => info!("Match abandoned"),
    }
    Ok(())
}

/// Prints the preset table.
fn list_presets() {
    println!("{:<10} {:<12} {:<10} MODEL", "PRESET", "NAME", "PROVIDER");
    for preset in PRESETS {
        println!(
            "{:<10} {:<12} {:<10} {}",
            preset.key,
            preset.name,
            preset.backend.to_string(),
            preset.model
        );
    }
}

//! Command-line interface for frosty.

use clap::{Parser, Subcommand};

/// Frosty - AI vs. AI tic-tac-toe where cells freeze
#[derive(Parser, Debug)]
#[command(name = "frosty")]
#[command(about = "Pit two language models against each other at frozen-cell tic-tac-toe", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play one match
    Play {
        /// Player X: a preset name (see `frosty presets`) or a player .toml file
        #[arg(short = 'x', long = "x", default_value = "gpt4o")]
        player_x: String,

        /// Player O: a preset name or a player .toml file
        #[arg(short = 'o', long = "o", default_value = "gemini")]
        player_o: String,

        /// Seed for the freeze dice (reproducible freezes)
        #[arg(long, conflicts_with = "no_freeze")]
        seed: Option<u64>,

        /// Disable the frozen-cell rule
        #[arg(long)]
        no_freeze: bool,

        /// Turns played before a stalled match is called a draw
        #[arg(long, default_value_t = frosty_arena::DEFAULT_TURN_LIMIT)]
        turn_limit: u32,

        /// Watch the match in the terminal UI
        #[arg(long)]
        tui: bool,
    },

    /// List the built-in player presets
    Presets,
}

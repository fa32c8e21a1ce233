// Command-line interface for the `touchline` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use touchline_core::Position;

/// Build a fantasy football squad and follow your leagues from the terminal.
#[derive(Parser, Debug)]
#[command(name = "touchline", version)]
pub struct Cli {
    /// Directory holding touchline.toml (defaults to the platform config dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an account and log in
    Register(RegisterArgs),
    /// Log in with email and password
    Login(LoginArgs),
    /// Forget the stored login, team and draft
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Browse the player catalog
    Players(PlayersArgs),
    /// Build and save your squad
    #[command(subcommand)]
    Team(TeamCommand),
    /// Create, join and follow leagues
    #[command(subcommand)]
    League(LeagueCommand),
    /// Weekly and per-player points
    #[command(subcommand)]
    Points(PointsCommand),
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    #[arg(long)]
    pub username: String,
    #[arg(long)]
    pub full_name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long, env = "TOUCHLINE_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long, env = "TOUCHLINE_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Args, Debug)]
pub struct PlayersArgs {
    /// GK, DEF, MID or FWD (matches primary or secondary position)
    #[arg(long, short)]
    pub position: Option<Position>,
    /// Player or club name
    #[arg(long, short)]
    pub search: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum TeamCommand {
    /// Show the local draft and what still blocks saving
    Show,
    /// Replace the local draft with the team saved on the server
    Pull,
    /// Add a player to the starters (or the bench)
    Add {
        player_id: String,
        /// Put the player on the bench
        #[arg(long)]
        bench: bool,
        /// Position to play a dual-position starter in
        #[arg(long = "as", value_name = "POS", conflicts_with = "bench")]
        position: Option<Position>,
    },
    /// Remove a player from the starters or the bench
    Remove { player_id: String },
    /// Make a starter the captain
    Captain { player_id: String },
    /// Save the draft to the server
    Save {
        /// Team name to use if the team has to be created
        #[arg(long)]
        name: Option<String>,
    },
    /// Discard the local draft
    Reset,
}

#[derive(Subcommand, Debug)]
pub enum LeagueCommand {
    Create { name: String },
    /// Join with an invite code
    Join { invite_code: String },
    Show { league_id: String },
    Leaderboard {
        league_id: String,
        /// Write CSV to stdout instead of a table
        #[arg(long)]
        csv: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum PointsCommand {
    /// Points for every player in a game week
    Week { week: u32 },
    /// A player's points history
    Player { player_id: String },
}

// Command handlers. Each one runs a short request sequence and prints the
// outcome on stdout; diagnostics go to the log file.

pub mod auth;
pub mod league;
pub mod players;
pub mod points;
pub mod team;

use std::path::Path;

use anyhow::{Context, Result};

use touchline_core::{Composer, SquadRules};

use crate::api::ApiClient;
use crate::cli::Command;
use crate::config::Config;
use crate::db::SessionStore;

/// Everything a command needs: configuration and the local session. The
/// API client is built per command from both.
pub struct AppContext {
    pub config: Config,
    pub session: SessionStore,
}

impl AppContext {
    /// Open the session store under `data_dir` unless the config points
    /// elsewhere.
    pub fn open(config: Config, data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;
        let db_path = config.session_db_path(data_dir);
        let session = SessionStore::open(&db_path.to_string_lossy())?;
        Ok(AppContext { config, session })
    }

    /// An API client authenticated with the stored token, if any.
    pub fn api(&self) -> Result<ApiClient> {
        let token = self.session.token()?;
        let client = ApiClient::from_config(&self.config).context("failed to build HTTP client")?;
        Ok(client.with_token(token))
    }

    /// A composer that knows the logged-in user's name for captaincy checks.
    pub fn composer(&self) -> Result<Composer> {
        let composer = Composer::new(SquadRules::default());
        Ok(match self.session.user()? {
            Some(user) if !user.full_name.trim().is_empty() => composer.with_owner(user.full_name),
            _ => composer,
        })
    }
}

pub async fn dispatch(ctx: &AppContext, command: Command) -> Result<()> {
    match command {
        Command::Register(args) => auth::register(ctx, args).await,
        Command::Login(args) => auth::login(ctx, args).await,
        Command::Logout => auth::logout(ctx),
        Command::Whoami => auth::whoami(ctx),
        Command::Players(args) => players::run(ctx, args).await,
        Command::Team(cmd) => team::run(ctx, cmd).await,
        Command::League(cmd) => league::run(ctx, cmd).await,
        Command::Points(cmd) => points::run(ctx, cmd).await,
    }
}

use anyhow::{bail, Context, Result};
use tracing::info;

use super::AppContext;
use crate::cli::LeagueCommand;
use crate::render;

pub async fn run(ctx: &AppContext, cmd: LeagueCommand) -> Result<()> {
    let api = ctx.api()?;
    match cmd {
        LeagueCommand::Create { name } => {
            let name = name.trim();
            if name.is_empty() {
                bail!("league name cannot be empty");
            }
            let league = api
                .create_league(name)
                .await
                .context("failed to create league")?;
            info!(league_id = %league.id, "league created");
            println!("Created {} ({}).", league.name, league.id);
            println!("Share invite code {} with your friends.", league.invite_code);
        }
        LeagueCommand::Join { invite_code } => {
            if invite_code.trim().is_empty() {
                bail!("invite code cannot be empty");
            }
            let league = api
                .join_league(&invite_code)
                .await
                .context("failed to join league")?;
            info!(league_id = %league.id, "league joined");
            println!("Joined {} ({}).", league.name, league.id);
        }
        LeagueCommand::Show { league_id } => {
            let detail = api
                .get_league(&league_id)
                .await
                .with_context(|| format!("failed to load league {league_id}"))?;
            print!("{}", render::league_detail(&detail));
        }
        LeagueCommand::Leaderboard { league_id, csv } => {
            let members = api
                .leaderboard(&league_id)
                .await
                .with_context(|| format!("failed to load leaderboard for {league_id}"))?;
            if csv {
                print!("{}", render::leaderboard_csv(&members)?);
            } else if members.is_empty() {
                println!("No members yet.");
            } else {
                print!("{}", render::leaderboard_table(&members));
            }
        }
    }
    Ok(())
}

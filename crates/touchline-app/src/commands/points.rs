use anyhow::{bail, Context, Result};

use super::AppContext;
use crate::cli::PointsCommand;
use crate::render;

pub async fn run(ctx: &AppContext, cmd: PointsCommand) -> Result<()> {
    let api = ctx.api()?;
    let rows = match cmd {
        PointsCommand::Week { week } => {
            if week == 0 {
                bail!("game weeks start at 1");
            }
            api.week_points(week)
                .await
                .with_context(|| format!("failed to load points for week {week}"))?
        }
        PointsCommand::Player { player_id } => api
            .player_points(&player_id)
            .await
            .with_context(|| format!("failed to load points for player {player_id}"))?,
    };
    if rows.is_empty() {
        println!("No points recorded.");
    } else {
        print!("{}", render::points_table(&rows));
    }
    Ok(())
}

use anyhow::{Context, Result};

use touchline_core::squad::catalog::filter_players;

use super::AppContext;
use crate::api::FantasyApi;
use crate::cli::PlayersArgs;
use crate::render;

pub async fn run(ctx: &AppContext, args: PlayersArgs) -> Result<()> {
    let search = args.search.as_deref();
    let players = ctx
        .api()?
        .list_players(args.position, search)
        .await
        .context("failed to load players")?;

    // Re-applied locally so the listing matches the query exactly.
    let shown = filter_players(&players, args.position, search);
    if shown.is_empty() {
        println!("No players match.");
        return Ok(());
    }
    for player in &shown {
        println!("{}", render::player_row(player));
    }
    println!("\n{} players (* = top player)", shown.len());
    Ok(())
}

use anyhow::{Context, Result};
use tracing::info;

use touchline_core::{Composer, Draft, Player, Position, PositionProposal, SquadError};

use super::AppContext;
use crate::api::FantasyApi;
use crate::cli::TeamCommand;
use crate::render;
use crate::workflow::{self, SaveError};

pub async fn run(ctx: &AppContext, cmd: TeamCommand) -> Result<()> {
    match cmd {
        TeamCommand::Show => show(ctx),
        TeamCommand::Pull => pull(ctx).await,
        TeamCommand::Add {
            player_id,
            bench,
            position,
        } => {
            let slot = if bench {
                AddSlot::Bench
            } else {
                AddSlot::Starter(position)
            };
            add(ctx, &player_id, slot).await
        }
        TeamCommand::Remove { player_id } => remove(ctx, &player_id),
        TeamCommand::Captain { player_id } => captain(ctx, &player_id),
        TeamCommand::Save { name } => save(ctx, name).await,
        TeamCommand::Reset => reset(ctx),
    }
}

fn load_draft(ctx: &AppContext) -> Result<Draft> {
    Ok(ctx.session.load_draft()?.unwrap_or_default())
}

fn show(ctx: &AppContext) -> Result<()> {
    let draft = load_draft(ctx)?;
    let composer = ctx.composer()?;
    print!("{}", render::draft_summary(&draft, &composer));
    Ok(())
}

async fn pull(ctx: &AppContext) -> Result<()> {
    let (team, draft) = workflow::pull_team(&ctx.api()?)
        .await
        .context("failed to load your team")?;
    match &team {
        Some(team) => {
            ctx.session.set_team_id(&team.id)?;
            println!("Loaded {} ({} points).", team.name, team.total_points);
        }
        None => {
            ctx.session.clear_team_id()?;
            println!("You have no team yet; starting from an empty squad.");
        }
    }
    ctx.session.save_draft(&draft)?;
    let composer = ctx.composer()?;
    print!("{}", render::draft_summary(&draft, &composer));
    Ok(())
}

/// Where `team add` puts a player. Only a starter takes a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddSlot {
    Bench,
    Starter(Option<Position>),
}

/// Add `player` to the starters or the bench.
///
/// A dual-position starter needs an explicit position; without one the
/// choice is reported back as `PositionChoiceRequired`.
pub fn apply_add(
    composer: &Composer,
    draft: &Draft,
    player: &Player,
    slot: AddSlot,
) -> Result<Draft, SquadError> {
    let position = match slot {
        AddSlot::Bench => return composer.add_to_bench(draft, player),
        AddSlot::Starter(position) => position,
    };
    match (composer.propose_add_starter(draft, player)?, position) {
        (_, Some(pos)) => composer.confirm_add_starter(draft, player, pos),
        (PositionProposal::AutoAssigned(pos), None) => {
            composer.confirm_add_starter(draft, player, pos)
        }
        (PositionProposal::NeedsChoice(options), None) => {
            Err(SquadError::PositionChoiceRequired {
                name: player.name.clone(),
                options,
            })
        }
    }
}

/// Remove a player from wherever they sit in the draft.
pub fn apply_remove(
    composer: &Composer,
    draft: &Draft,
    player_id: &str,
) -> Result<Draft, SquadError> {
    if draft.starter(player_id).is_some() {
        composer.remove_starter(draft, player_id)
    } else {
        composer.remove_bench(draft, player_id)
    }
}

async fn add(ctx: &AppContext, player_id: &str, slot: AddSlot) -> Result<()> {
    let player = ctx
        .api()?
        .get_player(player_id)
        .await
        .with_context(|| format!("failed to load player {player_id}"))?;
    let draft = load_draft(ctx)?;
    let composer = ctx.composer()?;

    let next = match apply_add(&composer, &draft, &player, slot) {
        Ok(next) => next,
        Err(e @ SquadError::PositionChoiceRequired { .. }) => {
            println!("Rerun with --as <POS> to pick where {} plays.", player.name);
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    ctx.session.save_draft(&next)?;
    let placed = match slot {
        AddSlot::Bench => "bench".to_string(),
        AddSlot::Starter(_) => next
            .starter(&player.id)
            .map(|s| format!("starters as {}", s.position))
            .unwrap_or_default(),
    };
    info!(player = %player.name, slot = %placed, "draft updated");
    println!("Added {} to the {placed}.", player.name);
    print!("{}", render::draft_summary(&next, &composer));
    Ok(())
}

fn remove(ctx: &AppContext, player_id: &str) -> Result<()> {
    let draft = load_draft(ctx)?;
    let composer = ctx.composer()?;
    let next = apply_remove(&composer, &draft, player_id)?;
    ctx.session.save_draft(&next)?;
    println!("Removed {player_id}.");
    print!("{}", render::draft_summary(&next, &composer));
    Ok(())
}

fn captain(ctx: &AppContext, player_id: &str) -> Result<()> {
    let draft = load_draft(ctx)?;
    let composer = ctx.composer()?;
    let next = composer.set_captain(&draft, player_id)?;
    ctx.session.save_draft(&next)?;
    if let Some(c) = next.captain() {
        println!("{} is your captain.", c.player.name);
    }
    Ok(())
}

async fn save(ctx: &AppContext, name: Option<String>) -> Result<()> {
    let api = ctx.api()?;
    let draft = load_draft(ctx)?;
    let composer = ctx.composer()?;

    // A team created from another machine is not in the local session yet.
    let team_id = match ctx.session.team_id()? {
        Some(id) => Some(id),
        None if composer.is_save_ready(&draft) => api
            .my_team()
            .await
            .context("failed to look up your team")?
            .map(|t| t.id),
        None => None,
    };
    let team_name = name.unwrap_or_else(|| ctx.config.team.default_name.clone());

    let saved = match workflow::save_draft(
        &api,
        &draft,
        &composer,
        team_id.as_deref(),
        team_name.trim(),
    )
    .await
    {
        Ok(saved) => saved,
        Err(SaveError::NotReady(blockers)) => {
            println!("Your squad is not ready to save:");
            for b in &blockers {
                println!("  - {b}");
            }
            anyhow::bail!("save refused: {} issue(s) to fix", blockers.len());
        }
        Err(SaveError::Api(e)) => return Err(e).context("failed to save team"),
    };

    ctx.session.set_team_id(&saved.team.id)?;
    ctx.session.save_draft(&saved.draft)?;
    println!("Saved {}.", saved.team.name);
    print!("{}", render::draft_summary(&saved.draft, &composer));
    Ok(())
}

fn reset(ctx: &AppContext) -> Result<()> {
    ctx.session.clear_draft()?;
    println!("Local draft discarded. Run `touchline team pull` to reload your saved team.");
    Ok(())
}

// Multi-request flows that tie the local draft to the server's team.

use thiserror::Error;
use tracing::{info, warn};

use touchline_core::squad::views::SaveBlocker;
use touchline_core::team::FantasyTeam;
use touchline_core::{Composer, Draft};

use crate::api::{ApiError, FantasyApi};

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("squad is not ready to save: {}", describe(.0))]
    NotReady(Vec<SaveBlocker>),

    #[error(transparent)]
    Api(#[from] ApiError),
}

fn describe(blockers: &[SaveBlocker]) -> String {
    blockers
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// The server's team after a successful save, and the draft rebuilt from it.
#[derive(Debug, Clone)]
pub struct SavedTeam {
    pub team: FantasyTeam,
    pub draft: Draft,
}

/// Persist `draft` as the user's team.
///
/// Refuses before any request when the draft is not save-ready for the
/// composer's owner, including a captain who shares the owner's name. With no
/// known `team_id` a team named `team_name` is created first. The returned
/// draft comes from the server's response, not from the input.
pub async fn save_draft<A>(
    api: &A,
    draft: &Draft,
    composer: &Composer,
    team_id: Option<&str>,
    team_name: &str,
) -> Result<SavedTeam, SaveError>
where
    A: FantasyApi + ?Sized,
{
    let blockers = composer.save_blockers(draft);
    let request = match draft.to_request() {
        Some(request) if blockers.is_empty() => request,
        _ => {
            warn!(count = blockers.len(), "save refused locally");
            return Err(SaveError::NotReady(blockers));
        }
    };

    let team_id = match team_id {
        Some(id) => id.to_string(),
        None => {
            let created = api.create_team(team_name).await?;
            info!(team_id = %created.id, "created team before first save");
            created.id
        }
    };

    let team = api.set_team_players(&team_id, &request).await?;
    info!(team_id = %team.id, players = team.players.len(), "team saved");
    let draft = Draft::from_team(&team);
    Ok(SavedTeam { team, draft })
}

/// Fetch the user's team and hydrate a draft from it. No team on the
/// server yields an empty draft and no team.
pub async fn pull_team<A>(api: &A) -> Result<(Option<FantasyTeam>, Draft), ApiError>
where
    A: FantasyApi + ?Sized,
{
    match api.my_team().await? {
        Some(team) => {
            let draft = Draft::from_team(&team);
            info!(team_id = %team.id, players = draft.len(), "pulled team");
            Ok((Some(team), draft))
        }
        None => {
            info!("no team on server; starting from an empty draft");
            Ok((None, Draft::new()))
        }
    }
}

// Team payloads exchanged with the fantasy API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::squad::player::Player;
use crate::squad::position::Position;

/// A starter as returned by the server: the catalog row plus the slot the
/// player was saved in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarterPlayer {
    #[serde(flatten)]
    pub player: Player,
    pub assigned_position: Position,
}

/// The server's canonical view of a user's team.
///
/// `create_team` answers with the bare team row, so the roster fields all
/// default to empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FantasyTeam {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub captain_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub players: Vec<StarterPlayer>,
    #[serde(default)]
    pub bench: Vec<Player>,
    #[serde(default)]
    pub total_points: i64,
}

/// One starter line of a save request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarterSelection {
    pub player_id: String,
    pub assigned_position: Position,
}

/// Body of `PUT /api/teams/{id}/players`: replaces the whole composition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetPlayersRequest {
    pub starters: Vec<StarterSelection>,
    pub bench_player_ids: Vec<String>,
    pub captain_id: String,
}

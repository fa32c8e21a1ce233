// The squad being edited: starters with their slots, the bench, the captain.

use serde::{Deserialize, Serialize};

use super::player::{Player, StarterAssignment};
use super::price::Price;
use crate::team::{FantasyTeam, SetPlayersRequest, StarterSelection};

/// Fixed roster shape and spending limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SquadRules {
    pub budget: Price,
    pub starters: usize,
    pub bench: usize,
    /// Goalkeepers a full bench must contain.
    pub bench_goalkeepers: usize,
    /// Top players allowed across starters and bench combined.
    pub max_top_players: usize,
}

impl Default for SquadRules {
    fn default() -> Self {
        SquadRules {
            budget: Price::from_units(70),
            starters: 6,
            bench: 3,
            bench_goalkeepers: 1,
            max_top_players: 2,
        }
    }
}

/// An in-progress squad.
///
/// Fields are only writable from inside the crate; callers change a draft
/// through [`Composer`](super::composer::Composer), which returns a new value
/// or a rejection reason.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    pub(crate) starters: Vec<StarterAssignment>,
    pub(crate) bench: Vec<Player>,
    #[serde(default)]
    pub(crate) captain_id: Option<String>,
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a draft from the server's team, as-is.
    ///
    /// No rules are checked: a legacy or incomplete team (no captain, wrong
    /// bench shape) loads fine and simply is not save-ready.
    pub fn from_team(team: &FantasyTeam) -> Self {
        Draft {
            starters: team
                .players
                .iter()
                .map(|s| StarterAssignment {
                    player: s.player.clone(),
                    position: s.assigned_position,
                })
                .collect(),
            bench: team.bench.clone(),
            captain_id: team.captain_id.clone(),
        }
    }

    pub fn starters(&self) -> &[StarterAssignment] {
        &self.starters
    }

    pub fn bench(&self) -> &[Player] {
        &self.bench
    }

    pub fn captain_id(&self) -> Option<&str> {
        self.captain_id.as_deref()
    }

    /// The captain's assignment, if the captain is a current starter.
    pub fn captain(&self) -> Option<&StarterAssignment> {
        let id = self.captain_id.as_deref()?;
        self.starter(id)
    }

    pub fn starter(&self, player_id: &str) -> Option<&StarterAssignment> {
        self.starters.iter().find(|s| s.player.id == player_id)
    }

    pub fn bench_player(&self, player_id: &str) -> Option<&Player> {
        self.bench.iter().find(|p| p.id == player_id)
    }

    /// Whether the player is anywhere in the squad.
    pub fn contains(&self, player_id: &str) -> bool {
        self.starter(player_id).is_some() || self.bench_player(player_id).is_some()
    }

    /// Starters then bench.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.starters
            .iter()
            .map(|s| &s.player)
            .chain(self.bench.iter())
    }

    /// Number of players across starters and bench.
    pub fn len(&self) -> usize {
        self.starters.len() + self.bench.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starters.is_empty() && self.bench.is_empty()
    }

    /// Build the save payload. `None` until a captain is chosen, since the
    /// server requires one.
    pub fn to_request(&self) -> Option<SetPlayersRequest> {
        let captain_id = self.captain()?.player.id.clone();
        Some(SetPlayersRequest {
            starters: self
                .starters
                .iter()
                .map(|s| StarterSelection {
                    player_id: s.player.id.clone(),
                    assigned_position: s.position,
                })
                .collect(),
            bench_player_ids: self.bench.iter().map(|p| p.id.clone()).collect(),
            captain_id,
        })
    }
}

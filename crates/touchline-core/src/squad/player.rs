// Catalog players and starter slot assignments.

use serde::{Deserialize, Serialize};

use super::position::Position;
use super::price::Price;

/// A footballer as supplied by the player catalog. Read-only reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    /// Primary position.
    pub position: Position,
    #[serde(default)]
    pub secondary_position: Option<Position>,
    #[serde(default)]
    pub is_top_player: bool,
    pub team_name: String,
    #[serde(default)]
    pub photo_url: Option<String>,
    pub price: Price,
    #[serde(default)]
    pub total_points: i64,
}

impl Player {
    /// Positions this player may be assigned to as a starter: the primary
    /// position, then the secondary one when it differs.
    pub fn playable_positions(&self) -> Vec<Position> {
        match self.secondary_position {
            Some(secondary) if secondary != self.position => vec![self.position, secondary],
            _ => vec![self.position],
        }
    }

    pub fn can_play(&self, pos: Position) -> bool {
        self.position == pos || self.secondary_position == Some(pos)
    }

    /// Bench goalkeeper rules look at the primary position only.
    pub fn is_goalkeeper(&self) -> bool {
        self.position.is_goalkeeper()
    }
}

/// A starter bound to the position they will play.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarterAssignment {
    pub player: Player,
    pub position: Position,
}

impl StarterAssignment {
    /// Whether the player is playing out of their primary position.
    pub fn is_flex(&self) -> bool {
        self.position != self.player.position
    }
}

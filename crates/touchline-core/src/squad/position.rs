// Football positions and their wire abbreviations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Positions a player can be listed at or assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "GK")]
    Goalkeeper,
    #[serde(rename = "DEF")]
    Defender,
    #[serde(rename = "MID")]
    Midfielder,
    #[serde(rename = "FWD")]
    Forward,
}

impl Position {
    /// Every position, in pitch order from the goal outwards.
    pub const ALL: [Position; 4] = [
        Position::Goalkeeper,
        Position::Defender,
        Position::Midfielder,
        Position::Forward,
    ];

    /// Parse a position abbreviation, case-insensitively.
    ///
    /// Accepts the API spellings ("GK", "DEF", "MID", "FWD") plus the
    /// single-letter shorthands used on formation labels.
    pub fn from_str_pos(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "GK" | "G" => Some(Position::Goalkeeper),
            "DEF" | "D" => Some(Position::Defender),
            "MID" | "M" => Some(Position::Midfielder),
            "FWD" | "F" => Some(Position::Forward),
            _ => None,
        }
    }

    /// Return the display string for this position.
    pub fn display_str(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "GK",
            Position::Defender => "DEF",
            Position::Midfielder => "MID",
            Position::Forward => "FWD",
        }
    }

    pub fn is_goalkeeper(&self) -> bool {
        matches!(self, Position::Goalkeeper)
    }

    /// Outfield positions are the ones that appear in a formation label.
    pub fn is_outfield(&self) -> bool {
        !self.is_goalkeeper()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.display_str())
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_str_pos(s).ok_or_else(|| format!("unknown position '{s}' (expected GK, DEF, MID or FWD)"))
    }
}

/// Render a list of positions as "GK/DEF".
pub fn join_positions(positions: &[Position]) -> String {
    positions
        .iter()
        .map(Position::display_str)
        .collect::<Vec<_>>()
        .join("/")
}

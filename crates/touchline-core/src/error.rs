// Reasons a squad edit is rejected.
//
// Every variant is recoverable: the draft the operation was applied to is
// left untouched, and the Display text is shown to the user as-is.

use thiserror::Error;

use crate::squad::position::{join_positions, Position};
use crate::squad::price::Price;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SquadError {
    #[error("starting lineup is full ({limit}/{limit}); add to the bench or remove a starter")]
    SquadFull { limit: usize },

    #[error("bench is full ({limit}/{limit}); remove a bench player first")]
    BenchFull { limit: usize },

    #[error("{name} is already in your squad")]
    DuplicatePlayer { name: String },

    #[error("adding a player priced ${price} would bring the squad to ${total_after}, over the ${budget} budget")]
    BudgetExceeded {
        price: Price,
        total_after: Price,
        budget: Price,
    },

    #[error("maximum {limit} top players allowed per squad (starters and bench combined)")]
    TopPlayerLimitExceeded { limit: usize },

    #[error("your last bench slot must be a goalkeeper")]
    BenchNeedsGoalkeeper,

    #[error("bench already has a goalkeeper; the other bench slots must be DEF/MID/FWD")]
    BenchGoalkeeperLimitExceeded,

    #[error("{name} cannot play as {position}")]
    PositionNotPlayable { name: String, position: Position },

    #[error("{name} can play {}; choose a position", join_positions(.options))]
    PositionChoiceRequired {
        name: String,
        options: Vec<Position>,
    },

    #[error("player {player_id} is not in the squad")]
    NotFound { player_id: String },

    #[error("player {player_id} is not a starter; only starters can be captain")]
    NotAStarter { player_id: String },

    #[error("you cannot captain {name} because they share your name; choose a different captain")]
    SelfCaptaincyForbidden { name: String },
}

// Library root: squad construction rules and the data model shared with the
// API layer. No I/O lives here.

pub mod error;
pub mod squad;
pub mod team;

pub use error::SquadError;
pub use squad::composer::{Composer, PositionProposal};
pub use squad::draft::{Draft, SquadRules};
pub use squad::player::{Player, StarterAssignment};
pub use squad::position::Position;
pub use squad::price::Price;

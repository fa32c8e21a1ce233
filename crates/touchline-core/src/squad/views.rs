// Read-only summaries derived from a draft: formation, budget, save readiness.

use std::fmt;

use super::draft::{Draft, SquadRules};
use super::position::Position;
use super::price::Price;

/// Starters assigned to each position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PositionCounts {
    pub goalkeepers: usize,
    pub defenders: usize,
    pub midfielders: usize,
    pub forwards: usize,
}

impl PositionCounts {
    pub fn get(&self, pos: Position) -> usize {
        match pos {
            Position::Goalkeeper => self.goalkeepers,
            Position::Defender => self.defenders,
            Position::Midfielder => self.midfielders,
            Position::Forward => self.forwards,
        }
    }
}

pub fn position_counts(draft: &Draft) -> PositionCounts {
    let mut counts = PositionCounts::default();
    for s in draft.starters() {
        match s.position {
            Position::Goalkeeper => counts.goalkeepers += 1,
            Position::Defender => counts.defenders += 1,
            Position::Midfielder => counts.midfielders += 1,
            Position::Forward => counts.forwards += 1,
        }
    }
    counts
}

/// "D-M-F" starter counts, e.g. "2-2-1". The goalkeeper is implied.
/// `None` while there are no starters.
pub fn formation_label(draft: &Draft) -> Option<String> {
    if draft.starters().is_empty() {
        return None;
    }
    let c = position_counts(draft);
    Some(format!("{}-{}-{}", c.defenders, c.midfielders, c.forwards))
}

/// Positions with no starter assigned, in GK, DEF, MID, FWD order.
pub fn missing_positions(draft: &Draft) -> Vec<Position> {
    let counts = position_counts(draft);
    Position::ALL
        .into_iter()
        .filter(|&p| counts.get(p) == 0)
        .collect()
}

pub fn total_cost(draft: &Draft) -> Price {
    draft.players().map(|p| p.price).sum()
}

/// Budget minus total cost. Negative for an over-budget hydrated team.
pub fn remaining_budget(draft: &Draft, rules: &SquadRules) -> Price {
    rules.budget - total_cost(draft)
}

pub fn top_player_count(draft: &Draft) -> usize {
    draft.players().filter(|p| p.is_top_player).count()
}

pub fn bench_goalkeeper_count(draft: &Draft) -> usize {
    draft.bench().iter().filter(|p| p.is_goalkeeper()).count()
}

/// A reason a draft cannot be saved yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveBlocker {
    StarterCount { have: usize, need: usize },
    BenchCount { have: usize, need: usize },
    BenchGoalkeepers { have: usize, need: usize },
    MissingPositions(Vec<Position>),
    StarterGoalkeepers { have: usize },
    NoCaptain,
    /// The captain shares the editing user's name. Only an owner-aware
    /// check (`Composer::save_blockers`) reports this.
    SelfCaptain { name: String },
    OverBudget { total: Price, budget: Price },
    TooManyTopPlayers { have: usize, limit: usize },
}

impl fmt::Display for SaveBlocker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveBlocker::StarterCount { have, need } => {
                write!(f, "select exactly {need} starting players ({have}/{need})")
            }
            SaveBlocker::BenchCount { have, need } => {
                write!(f, "select exactly {need} bench players ({have}/{need})")
            }
            SaveBlocker::BenchGoalkeepers { have, need } => {
                write!(f, "bench must include exactly {need} goalkeeper (has {have})")
            }
            SaveBlocker::MissingPositions(missing) => {
                write!(
                    f,
                    "starting lineup needs at least one {}",
                    super::position::join_positions(missing)
                )
            }
            SaveBlocker::StarterGoalkeepers { have } => {
                write!(f, "starting lineup must have exactly 1 GK (has {have})")
            }
            SaveBlocker::NoCaptain => write!(f, "choose a captain from your starters"),
            SaveBlocker::SelfCaptain { name } => {
                write!(f, "{name} shares your name and cannot be captain")
            }
            SaveBlocker::OverBudget { total, budget } => {
                write!(f, "squad costs ${total}, over the ${budget} budget")
            }
            SaveBlocker::TooManyTopPlayers { have, limit } => {
                write!(f, "{have} top players selected, maximum is {limit}")
            }
        }
    }
}

/// Everything standing between this draft and a save, in the order the
/// server would complain about it. Empty when the draft is ready.
pub fn save_blockers(draft: &Draft, rules: &SquadRules) -> Vec<SaveBlocker> {
    let mut blockers = Vec::new();

    let starters = draft.starters().len();
    if starters != rules.starters {
        blockers.push(SaveBlocker::StarterCount {
            have: starters,
            need: rules.starters,
        });
    }

    let bench = draft.bench().len();
    if bench != rules.bench {
        blockers.push(SaveBlocker::BenchCount {
            have: bench,
            need: rules.bench,
        });
    }

    let bench_gks = bench_goalkeeper_count(draft);
    if bench_gks != rules.bench_goalkeepers {
        blockers.push(SaveBlocker::BenchGoalkeepers {
            have: bench_gks,
            need: rules.bench_goalkeepers,
        });
    }

    let missing = missing_positions(draft);
    if !missing.is_empty() {
        blockers.push(SaveBlocker::MissingPositions(missing));
    }

    let starter_gks = position_counts(draft).goalkeepers;
    // Zero goalkeepers is already reported as a missing position.
    if starter_gks > 1 {
        blockers.push(SaveBlocker::StarterGoalkeepers { have: starter_gks });
    }

    if draft.captain().is_none() {
        blockers.push(SaveBlocker::NoCaptain);
    }

    let total = total_cost(draft);
    if total > rules.budget {
        blockers.push(SaveBlocker::OverBudget {
            total,
            budget: rules.budget,
        });
    }

    let top = top_player_count(draft);
    if top > rules.max_top_players {
        blockers.push(SaveBlocker::TooManyTopPlayers {
            have: top,
            limit: rules.max_top_players,
        });
    }

    blockers
}

pub fn is_save_ready(draft: &Draft, rules: &SquadRules) -> bool {
    save_blockers(draft, rules).is_empty()
}

/// Where a draft sits on the way to a saveable squad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SquadPhase {
    Empty,
    Building,
    Complete,
}

pub fn phase(draft: &Draft, rules: &SquadRules) -> SquadPhase {
    if draft.is_empty() {
        SquadPhase::Empty
    } else if is_save_ready(draft, rules) {
        SquadPhase::Complete
    } else {
        SquadPhase::Building
    }
}

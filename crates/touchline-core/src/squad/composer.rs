// Squad edits: each operation takes a draft and returns the next one, or the
// reason the edit is not allowed. A rejected edit never changes anything.

use tracing::debug;

use super::draft::{Draft, SquadRules};
use super::player::{Player, StarterAssignment};
use super::position::Position;
use super::price::Price;
use super::views::{self, SaveBlocker};
use crate::error::SquadError;

/// Result of the first half of adding a starter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionProposal {
    /// The player has a single playable position.
    AutoAssigned(Position),
    /// The player plays two positions; the caller must pick one and call
    /// [`Composer::confirm_add_starter`].
    NeedsChoice(Vec<Position>),
}

/// Applies squad rules to draft edits on behalf of one user.
#[derive(Debug, Clone, Default)]
pub struct Composer {
    rules: SquadRules,
    /// The editing user's full name. A starter with the same name cannot be
    /// captain.
    owner_name: Option<String>,
}

impl Composer {
    pub fn new(rules: SquadRules) -> Self {
        Composer {
            rules,
            owner_name: None,
        }
    }

    pub fn with_owner(mut self, full_name: impl Into<String>) -> Self {
        self.owner_name = Some(full_name.into());
        self
    }

    pub fn rules(&self) -> &SquadRules {
        &self.rules
    }

    pub fn owner_name(&self) -> Option<&str> {
        self.owner_name.as_deref()
    }

    // -----------------------------------------------------------------------
    // Starters
    // -----------------------------------------------------------------------

    /// Check whether `player` may join the starters and say which position
    /// they would take.
    pub fn propose_add_starter(
        &self,
        draft: &Draft,
        player: &Player,
    ) -> Result<PositionProposal, SquadError> {
        if draft.starters.len() >= self.rules.starters {
            return Err(self.reject(SquadError::SquadFull {
                limit: self.rules.starters,
            }));
        }
        self.check_admission(draft, player)?;

        let mut options = player.playable_positions();
        if options.len() == 1 {
            Ok(PositionProposal::AutoAssigned(options.remove(0)))
        } else {
            Ok(PositionProposal::NeedsChoice(options))
        }
    }

    /// Add `player` as a starter playing `position`.
    pub fn confirm_add_starter(
        &self,
        draft: &Draft,
        player: &Player,
        position: Position,
    ) -> Result<Draft, SquadError> {
        self.propose_add_starter(draft, player)?;
        if !player.can_play(position) {
            return Err(self.reject(SquadError::PositionNotPlayable {
                name: player.name.clone(),
                position,
            }));
        }

        let mut next = draft.clone();
        next.starters.push(StarterAssignment {
            player: player.clone(),
            position,
        });
        debug!(player = %player.name, %position, "starter added");
        Ok(next)
    }

    /// One-step add for callers that cannot prompt: succeeds only when the
    /// position is unambiguous.
    pub fn add_to_starters(&self, draft: &Draft, player: &Player) -> Result<Draft, SquadError> {
        match self.propose_add_starter(draft, player)? {
            PositionProposal::AutoAssigned(pos) => self.confirm_add_starter(draft, player, pos),
            PositionProposal::NeedsChoice(options) => {
                Err(SquadError::PositionChoiceRequired {
                    name: player.name.clone(),
                    options,
                })
            }
        }
    }

    /// Remove a starter. Removing the captain also clears the captaincy.
    pub fn remove_starter(&self, draft: &Draft, player_id: &str) -> Result<Draft, SquadError> {
        let idx = draft
            .starters
            .iter()
            .position(|s| s.player.id == player_id)
            .ok_or_else(|| SquadError::NotFound {
                player_id: player_id.to_string(),
            })?;

        let mut next = draft.clone();
        next.starters.remove(idx);
        if next.captain_id.as_deref() == Some(player_id) {
            next.captain_id = None;
        }
        Ok(next)
    }

    // -----------------------------------------------------------------------
    // Bench
    // -----------------------------------------------------------------------

    /// Add `player` to the bench.
    ///
    /// A full bench holds exactly one goalkeeper (by primary position), so a
    /// third player must be the keeper if none is there yet, and a second
    /// keeper is never allowed.
    pub fn add_to_bench(&self, draft: &Draft, player: &Player) -> Result<Draft, SquadError> {
        if draft.bench.len() >= self.rules.bench {
            return Err(self.reject(SquadError::BenchFull {
                limit: self.rules.bench,
            }));
        }
        self.check_admission(draft, player)?;

        let keepers = views::bench_goalkeeper_count(draft);
        let open_slots = self.rules.bench - draft.bench.len();
        let keepers_needed = self.rules.bench_goalkeepers.saturating_sub(keepers);

        if player.is_goalkeeper() {
            if keepers >= self.rules.bench_goalkeepers {
                return Err(self.reject(SquadError::BenchGoalkeeperLimitExceeded));
            }
        } else if open_slots <= keepers_needed {
            return Err(self.reject(SquadError::BenchNeedsGoalkeeper));
        }

        let mut next = draft.clone();
        next.bench.push(player.clone());
        debug!(player = %player.name, "bench player added");
        Ok(next)
    }

    pub fn remove_bench(&self, draft: &Draft, player_id: &str) -> Result<Draft, SquadError> {
        let idx = draft
            .bench
            .iter()
            .position(|p| p.id == player_id)
            .ok_or_else(|| SquadError::NotFound {
                player_id: player_id.to_string(),
            })?;

        let mut next = draft.clone();
        next.bench.remove(idx);
        Ok(next)
    }

    // -----------------------------------------------------------------------
    // Captaincy
    // -----------------------------------------------------------------------

    pub fn set_captain(&self, draft: &Draft, player_id: &str) -> Result<Draft, SquadError> {
        let starter = draft
            .starter(player_id)
            .ok_or_else(|| SquadError::NotAStarter {
                player_id: player_id.to_string(),
            })?;

        if let Some(owner) = self.owner_name.as_deref() {
            if names_match(&starter.player.name, owner) {
                return Err(self.reject(SquadError::SelfCaptaincyForbidden {
                    name: starter.player.name.clone(),
                }));
            }
        }

        let mut next = draft.clone();
        next.captain_id = Some(player_id.to_string());
        Ok(next)
    }

    pub fn clear_captain(&self, draft: &Draft) -> Draft {
        let mut next = draft.clone();
        next.captain_id = None;
        next
    }

    // -----------------------------------------------------------------------
    // Readiness
    // -----------------------------------------------------------------------

    /// [`views::save_blockers`] plus the owner's captaincy rule, which a
    /// draft hydrated from the server has never been checked against.
    pub fn save_blockers(&self, draft: &Draft) -> Vec<SaveBlocker> {
        let mut blockers = views::save_blockers(draft, &self.rules);
        if let (Some(owner), Some(captain)) = (self.owner_name.as_deref(), draft.captain()) {
            if names_match(&captain.player.name, owner) {
                blockers.push(SaveBlocker::SelfCaptain {
                    name: captain.player.name.clone(),
                });
            }
        }
        blockers
    }

    pub fn is_save_ready(&self, draft: &Draft) -> bool {
        self.save_blockers(draft).is_empty()
    }

    // -----------------------------------------------------------------------
    // Shared checks
    // -----------------------------------------------------------------------

    /// Rules shared by starters and bench: no duplicates, the budget, and the
    /// top-player cap (one pool across the whole squad).
    fn check_admission(&self, draft: &Draft, player: &Player) -> Result<(), SquadError> {
        if draft.contains(&player.id) {
            return Err(self.reject(SquadError::DuplicatePlayer {
                name: player.name.clone(),
            }));
        }

        // An unrepresentable total is over any budget.
        match views::total_cost(draft).checked_add(player.price) {
            Some(total_after) if total_after <= self.rules.budget => {}
            total_after => {
                return Err(self.reject(SquadError::BudgetExceeded {
                    price: player.price,
                    total_after: total_after.unwrap_or(Price::MAX),
                    budget: self.rules.budget,
                }));
            }
        }

        if player.is_top_player && views::top_player_count(draft) >= self.rules.max_top_players {
            return Err(self.reject(SquadError::TopPlayerLimitExceeded {
                limit: self.rules.max_top_players,
            }));
        }

        Ok(())
    }

    fn reject(&self, err: SquadError) -> SquadError {
        debug!(reason = %err, "squad edit rejected");
        err
    }
}

/// Trimmed, case-insensitive name comparison. Blank names never match.
fn names_match(a: &str, b: &str) -> bool {
    let (a, b) = (a.trim(), b.trim());
    !a.is_empty() && a.to_lowercase() == b.to_lowercase()
}

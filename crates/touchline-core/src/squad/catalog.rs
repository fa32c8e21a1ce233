// Player catalog filtering for the picker view.

use super::player::Player;
use super::position::Position;

/// Players matching a position filter and free-text search.
///
/// The position matches either the primary or the secondary position. The
/// search text matches player or club name, case-insensitively. `None` or a
/// blank search keeps everything.
pub fn filter_players<'a>(
    players: &'a [Player],
    position: Option<Position>,
    search: Option<&str>,
) -> Vec<&'a Player> {
    let needle = search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    players
        .iter()
        .filter(|p| match position {
            Some(pos) => p.position == pos || p.secondary_position == Some(pos),
            None => true,
        })
        .filter(|p| match &needle {
            Some(n) => p.name.to_lowercase().contains(n) || p.team_name.to_lowercase().contains(n),
            None => true,
        })
        .collect()
}

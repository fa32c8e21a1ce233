// Plain-text rendering of drafts, catalog rows and league tables.

use std::fmt::Write as _;

use touchline_core::squad::views;
use touchline_core::{Composer, Draft, Player};

use crate::api::types::{LeagueDetail, LeagueMember, PlayerPointsDisplay};

/// One catalog line: id, name, positions, club, price, points, top marker.
pub fn player_row(player: &Player) -> String {
    let positions = match player.secondary_position {
        Some(secondary) if secondary != player.position => {
            format!("{}/{}", player.position, secondary)
        }
        _ => player.position.to_string(),
    };
    let top = if player.is_top_player { " *" } else { "" };
    format!(
        "{:<10} {:<24} {:<8} {:<18} ${:>6} {:>4} pts{top}",
        player.id, player.name, positions, player.team_name, player.price, player.total_points
    )
}

/// The draft with its formation, budget and everything blocking a save.
pub fn draft_summary(draft: &Draft, composer: &Composer) -> String {
    let rules = composer.rules();
    let mut out = String::new();
    let formation = views::formation_label(draft).unwrap_or_else(|| "-".to_string());
    let _ = writeln!(
        out,
        "Formation {formation}   Starters {}/{}   Bench {}/{}",
        draft.starters().len(),
        rules.starters,
        draft.bench().len(),
        rules.bench
    );
    let _ = writeln!(
        out,
        "Spent ${} of ${}   Remaining ${}   Top players {}/{}",
        views::total_cost(draft),
        rules.budget,
        views::remaining_budget(draft, rules),
        views::top_player_count(draft),
        rules.max_top_players
    );

    let _ = writeln!(out, "\nStarters");
    if draft.starters().is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    let captain = draft.captain_id();
    for s in draft.starters() {
        let marker = if captain == Some(s.player.id.as_str()) {
            " (C)"
        } else {
            ""
        };
        let flex = if s.is_flex() { " flex" } else { "" };
        let _ = writeln!(out, "  {:<4}{flex} {}{marker}", s.position, player_row(&s.player));
    }

    let _ = writeln!(out, "\nBench");
    if draft.bench().is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for p in draft.bench() {
        let _ = writeln!(out, "  {}", player_row(p));
    }

    let missing = views::missing_positions(draft);
    if !missing.is_empty() && !draft.starters().is_empty() {
        let names: Vec<String> = missing.iter().map(ToString::to_string).collect();
        let _ = writeln!(out, "\nNo starter yet at: {}", names.join(", "));
    }

    let blockers = composer.save_blockers(draft);
    if blockers.is_empty() {
        let _ = writeln!(out, "\nReady to save.");
    } else {
        let _ = writeln!(out, "\nBefore saving:");
        for b in &blockers {
            let _ = writeln!(out, "  - {b}");
        }
    }
    out
}

fn points_cell(points: Option<i64>) -> String {
    points.map_or_else(|| "-".to_string(), |p| p.to_string())
}

pub fn leaderboard_table(members: &[LeagueMember]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:>3}  {:<20} {:<24} {:>6}", "#", "Manager", "Team", "Pts");
    for (rank, m) in members.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}  {:<20} {:<24} {:>6}",
            rank + 1,
            m.username,
            m.team_name.as_deref().unwrap_or("-"),
            points_cell(m.total_points)
        );
    }
    out
}

/// Leaderboard as CSV with a header row.
pub fn leaderboard_csv(members: &[LeagueMember]) -> Result<String, csv::Error> {
    let mut buf = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buf);
        writer.write_record(["rank", "user_id", "username", "team_name", "total_points"])?;
        for (rank, m) in members.iter().enumerate() {
            writer.write_record([
                (rank + 1).to_string(),
                m.user_id.clone(),
                m.username.clone(),
                m.team_name.clone().unwrap_or_default(),
                m.total_points.map(|p| p.to_string()).unwrap_or_default(),
            ])?;
        }
        writer.flush()?;
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

pub fn league_detail(detail: &LeagueDetail) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", detail.league.name, detail.league.id);
    let _ = writeln!(out, "Invite code: {}", detail.league.invite_code);
    let _ = writeln!(out, "Members: {}", detail.members.len());
    for m in &detail.members {
        let _ = writeln!(
            out,
            "  {:<20} {:<24} {:>6}",
            m.username,
            m.team_name.as_deref().unwrap_or("-"),
            points_cell(m.total_points)
        );
    }
    out
}

pub fn points_table(rows: &[PlayerPointsDisplay]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4}  {:<24} {:<4} {:>3} {:>3} {:>3} {:>3} {:>3} {:>5}",
        "Wk", "Player", "Pos", "G", "A", "CS", "SV", "TK", "Pts"
    );
    for r in rows {
        let _ = writeln!(
            out,
            "{:>4}  {:<24} {:<4} {:>3} {:>3} {:>3} {:>3} {:>3} {:>5}",
            r.week_number,
            r.player_name,
            r.position,
            r.goals,
            r.assists,
            r.clean_sheets,
            r.saves,
            r.tackles,
            r.total_points
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use touchline_core::{Position, Price, SquadRules};

    fn player(id: &str, name: &str, position: Position, secondary: Option<Position>) -> Player {
        Player {
            id: id.into(),
            name: name.into(),
            position,
            secondary_position: secondary,
            is_top_player: false,
            team_name: "United".into(),
            photo_url: None,
            price: Price::from_cents(725),
            total_points: 12,
        }
    }

    fn member(name: &str, team: Option<&str>, points: Option<i64>) -> LeagueMember {
        LeagueMember {
            user_id: format!("u-{name}"),
            username: name.into(),
            team_name: team.map(str::to_string),
            total_points: points,
        }
    }

    #[test]
    fn player_row_shows_dual_position_and_price() {
        let row = player_row(&player("p1", "Dana Flex", Position::Defender, Some(Position::Midfielder)));
        assert!(row.contains("DEF/MID"));
        assert!(row.contains("$  7.25"));
        assert!(!row.ends_with('*'));
    }

    #[test]
    fn player_row_marks_top_players() {
        let mut p = player("p1", "Star", Position::Forward, None);
        p.is_top_player = true;
        assert!(player_row(&p).ends_with(" *"));
    }

    #[test]
    fn empty_draft_summary_lists_blockers() {
        let text = draft_summary(&Draft::new(), &Composer::new(SquadRules::default()));
        assert!(text.contains("Formation -"));
        assert!(text.contains("Remaining $70.00"));
        assert!(text.contains("Before saving:"));
        assert!(text.contains("choose a captain"));
    }

    #[test]
    fn summary_marks_captain_and_missing_positions() {
        let composer = Composer::new(SquadRules::default());
        let fwd = player("f1", "Ray Winger", Position::Forward, None);
        let draft = composer.add_to_starters(&Draft::new(), &fwd).unwrap();
        let draft = composer.set_captain(&draft, "f1").unwrap();

        let text = draft_summary(&draft, &composer);
        assert!(text.contains("Formation 0-0-1"));
        assert!(text.contains("Ray Winger"));
        assert!(text.contains("(C)"));
        assert!(text.contains("No starter yet at: GK, DEF, MID"));
    }

    #[test]
    fn summary_flags_owner_captain_from_server() {
        let fwd = player("f1", "Casey Coach", Position::Forward, None);
        let anonymous = Composer::new(SquadRules::default());
        let draft = anonymous.add_to_starters(&Draft::new(), &fwd).unwrap();
        let draft = anonymous.set_captain(&draft, "f1").unwrap();
        assert!(!draft_summary(&draft, &anonymous).contains("cannot be captain"));

        let owner = Composer::new(SquadRules::default()).with_owner("Casey Coach");
        let text = draft_summary(&draft, &owner);
        assert!(text.contains("Casey Coach shares your name and cannot be captain"));
    }

    #[test]
    fn leaderboard_table_ranks_and_handles_missing_points() {
        let text = leaderboard_table(&[
            member("alice", Some("Alice XI"), Some(88)),
            member("bob", None, None),
        ]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].trim_start().starts_with("1  alice"));
        assert!(lines[2].contains('-'));
    }

    #[test]
    fn leaderboard_csv_has_header_and_rows() {
        let csv = leaderboard_csv(&[
            member("alice", Some("Alice, XI"), Some(88)),
            member("bob", None, None),
        ])
        .unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "rank,user_id,username,team_name,total_points");
        assert_eq!(lines[1], "1,u-alice,alice,\"Alice, XI\",88");
        assert_eq!(lines[2], "2,u-bob,bob,,");
    }

    #[test]
    fn points_table_has_one_line_per_row() {
        let rows = vec![PlayerPointsDisplay {
            player_id: "p1".into(),
            player_name: "Ray Winger".into(),
            position: "FWD".into(),
            goals: 2,
            assists: 1,
            clean_sheets: 0,
            saves: 0,
            tackles: 3,
            total_points: 14,
            week_number: 5,
        }];
        let text = points_table(&rows);
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("Ray Winger"));
    }
}

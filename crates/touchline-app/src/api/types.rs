// Request and response bodies for the auth, league and points endpoints.
// Player and team payloads live in touchline-core.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    /// Older accounts may predate the field.
    #[serde(default)]
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// ---------------------------------------------------------------------------
// Teams
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct CreateTeamRequest {
    pub name: String,
}

// ---------------------------------------------------------------------------
// Leagues
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct League {
    pub id: String,
    pub name: String,
    pub invite_code: String,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// One row of a league table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueMember {
    pub user_id: String,
    pub username: String,
    #[serde(default)]
    pub team_name: Option<String>,
    /// Null for members who have not built a team yet.
    #[serde(default)]
    pub total_points: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueDetail {
    pub league: League,
    #[serde(default)]
    pub members: Vec<LeagueMember>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateLeagueRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct JoinLeagueRequest {
    pub invite_code: String,
}

// ---------------------------------------------------------------------------
// Points
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerPointsDisplay {
    pub player_id: String,
    pub player_name: String,
    pub position: String,
    pub goals: i64,
    pub assists: i64,
    pub clean_sheets: i64,
    pub saves: i64,
    pub tackles: i64,
    pub total_points: i64,
    pub week_number: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_response_parses() {
        let json = r#"{
            "token": "jwt.token.here",
            "user": {
                "id": "8b1e",
                "username": "coach",
                "full_name": "Casey Coach",
                "email": "casey@example.com",
                "created_at": "2025-02-01T09:30:00Z"
            }
        }"#;
        let resp: AuthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.token, "jwt.token.here");
        assert_eq!(resp.user.full_name, "Casey Coach");
        assert!(resp.user.created_at.is_some());
    }

    #[test]
    fn user_without_full_name_defaults_to_empty() {
        let json = r#"{ "id": "1", "username": "u", "email": "u@x.io" }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.full_name, "");
    }

    #[test]
    fn leaderboard_member_with_no_team() {
        let json = r#"[
            { "user_id": "1", "username": "a", "team_name": "Alpha", "total_points": 42 },
            { "user_id": "2", "username": "b", "team_name": null, "total_points": null }
        ]"#;
        let rows: Vec<LeagueMember> = serde_json::from_str(json).unwrap();
        assert_eq!(rows[0].total_points, Some(42));
        assert_eq!(rows[1].team_name, None);
        assert_eq!(rows[1].total_points, None);
    }

    #[test]
    fn league_detail_parses() {
        let json = r#"{
            "league": {
                "id": "l1", "name": "Sunday League", "invite_code": "AB12CD",
                "created_by": "u1", "created_at": "2025-02-01T09:30:00Z"
            },
            "members": [
                { "user_id": "u1", "username": "coach", "team_name": "FC Coach", "total_points": 10 }
            ]
        }"#;
        let detail: LeagueDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.league.invite_code, "AB12CD");
        assert_eq!(detail.members.len(), 1);
    }

    #[test]
    fn register_request_serializes_full_name() {
        let req = RegisterRequest {
            username: "coach".into(),
            full_name: "Casey Coach".into(),
            email: "casey@example.com".into(),
            password: "secret1".into(),
        };
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["full_name"], "Casey Coach");
    }
}

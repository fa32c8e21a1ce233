// HTTP client for the fantasy football API.
//
// Every call is a JSON request against `{base_url}/api/...`. Protected
// endpoints carry the session's bearer token. Non-success responses are
// turned into `ApiError::Server` with the message from the body's `error`
// field, so the server's validation text reaches the user unchanged.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use touchline_core::team::{FantasyTeam, SetPlayersRequest};
use touchline_core::{Player, Position};

use super::types::*;
use crate::config::Config;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("not logged in; run `touchline login` first")]
    NotAuthenticated,
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            ApiError::NotAuthenticated => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND.as_u16())
    }
}

// ---------------------------------------------------------------------------
// Team-building seam
// ---------------------------------------------------------------------------

/// The catalog and team endpoints the squad workflow depends on.
#[async_trait]
pub trait FantasyApi: Send + Sync {
    async fn list_players(
        &self,
        position: Option<Position>,
        search: Option<&str>,
    ) -> Result<Vec<Player>, ApiError>;

    async fn get_player(&self, player_id: &str) -> Result<Player, ApiError>;

    /// The user's team, or `None` when they have not created one yet.
    async fn my_team(&self) -> Result<Option<FantasyTeam>, ApiError>;

    async fn create_team(&self, name: &str) -> Result<FantasyTeam, ApiError>;

    /// Replace the team's whole composition. The response is the canonical
    /// team after the change.
    async fn set_team_players(
        &self,
        team_id: &str,
        request: &SetPlayersRequest,
    ) -> Result<FantasyTeam, ApiError>;
}

// ---------------------------------------------------------------------------
// ApiClient
// ---------------------------------------------------------------------------

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Self::new(
            &config.api.base_url,
            Duration::from_secs(config.api.timeout_secs),
        )
    }

    /// Attach (or drop) the bearer token used for protected endpoints.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    fn authed(&self, request: RequestBuilder) -> Result<RequestBuilder, ApiError> {
        match &self.token {
            Some(token) => Ok(request.bearer_auth(token)),
            None => Err(ApiError::NotAuthenticated),
        }
    }

    /// Send a request and decode a JSON body, mapping error statuses.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let url = response.url().path().to_string();
        debug!(%status, %url, "API response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = extract_error_message(status, &body);
            warn!(%status, %url, %message, "API request failed");
            return Err(ApiError::Server {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<T>().await?)
    }

    // -- auth --

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        info!(username = %request.username, "registering account");
        self.send(self.http.post(self.url("/api/auth/register")).json(request))
            .await
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        info!(email = %request.email, "logging in");
        self.send(self.http.post(self.url("/api/auth/login")).json(request))
            .await
    }

    // -- leagues --

    pub async fn create_league(&self, name: &str) -> Result<League, ApiError> {
        let body = CreateLeagueRequest {
            name: name.to_string(),
        };
        let request = self.authed(self.http.post(self.url("/api/leagues")).json(&body))?;
        self.send(request).await
    }

    pub async fn join_league(&self, invite_code: &str) -> Result<League, ApiError> {
        let body = JoinLeagueRequest {
            invite_code: invite_code.trim().to_string(),
        };
        let request = self.authed(self.http.post(self.url("/api/leagues/join")).json(&body))?;
        self.send(request).await
    }

    pub async fn get_league(&self, league_id: &str) -> Result<LeagueDetail, ApiError> {
        self.send(self.http.get(self.url(&format!("/api/leagues/{league_id}"))))
            .await
    }

    pub async fn leaderboard(&self, league_id: &str) -> Result<Vec<LeagueMember>, ApiError> {
        self.send(
            self.http
                .get(self.url(&format!("/api/leagues/{league_id}/leaderboard"))),
        )
        .await
    }

    // -- points --

    pub async fn week_points(&self, week: u32) -> Result<Vec<PlayerPointsDisplay>, ApiError> {
        self.send(self.http.get(self.url(&format!("/api/points/week/{week}"))))
            .await
    }

    pub async fn player_points(
        &self,
        player_id: &str,
    ) -> Result<Vec<PlayerPointsDisplay>, ApiError> {
        self.send(
            self.http
                .get(self.url(&format!("/api/points/player/{player_id}"))),
        )
        .await
    }
}

#[async_trait]
impl FantasyApi for ApiClient {
    async fn list_players(
        &self,
        position: Option<Position>,
        search: Option<&str>,
    ) -> Result<Vec<Player>, ApiError> {
        let query = player_query(position, search);
        self.send(self.http.get(self.url("/api/players")).query(&query))
            .await
    }

    async fn get_player(&self, player_id: &str) -> Result<Player, ApiError> {
        self.send(self.http.get(self.url(&format!("/api/players/{player_id}"))))
            .await
    }

    async fn my_team(&self) -> Result<Option<FantasyTeam>, ApiError> {
        let request = self.authed(self.http.get(self.url("/api/teams/my")))?;
        match self.send(request).await {
            Ok(team) => Ok(Some(team)),
            Err(e) if e.is_not_found() => {
                debug!("user has no team yet");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn create_team(&self, name: &str) -> Result<FantasyTeam, ApiError> {
        info!(%name, "creating team");
        let body = CreateTeamRequest {
            name: name.to_string(),
        };
        let request = self.authed(self.http.post(self.url("/api/teams")).json(&body))?;
        self.send(request).await
    }

    async fn set_team_players(
        &self,
        team_id: &str,
        request: &SetPlayersRequest,
    ) -> Result<FantasyTeam, ApiError> {
        info!(%team_id, "saving team composition");
        let builder = self.authed(
            self.http
                .put(self.url(&format!("/api/teams/{team_id}/players")))
                .json(request),
        )?;
        self.send(builder).await
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Query pairs for the player list; absent or blank filters are omitted.
pub(crate) fn player_query(
    position: Option<Position>,
    search: Option<&str>,
) -> Vec<(&'static str, String)> {
    let mut query = Vec::new();
    if let Some(pos) = position {
        query.push(("position", pos.display_str().to_string()));
    }
    if let Some(s) = search.map(str::trim).filter(|s| !s.is_empty()) {
        query.push(("search", s.to_string()));
    }
    query
}

/// Pull the `error` field out of an error body, falling back to a generic
/// message naming the status.
///
/// Expected shape: `{ "error": "Team name cannot be empty" }`
pub(crate) fn extract_error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error")?.as_str().map(str::to_string))
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()))
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_from_body() {
        let body = r#"{ "error": "Bench must include exactly 1 goalkeeper (GK)" }"#;
        assert_eq!(
            extract_error_message(StatusCode::BAD_REQUEST, body),
            "Bench must include exactly 1 goalkeeper (GK)"
        );
    }

    #[test]
    fn error_message_fallback_for_non_json() {
        assert_eq!(
            extract_error_message(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>"),
            "Request failed with status 502"
        );
    }

    #[test]
    fn error_message_fallback_for_missing_field() {
        assert_eq!(
            extract_error_message(StatusCode::INTERNAL_SERVER_ERROR, r#"{ "detail": "x" }"#),
            "Request failed with status 500"
        );
        assert_eq!(
            extract_error_message(StatusCode::CONFLICT, r#"{ "error": "" }"#),
            "Request failed with status 409"
        );
    }

    #[test]
    fn player_query_omits_blank_filters() {
        assert!(player_query(None, None).is_empty());
        assert!(player_query(None, Some("  ")).is_empty());
        assert_eq!(
            player_query(Some(Position::Defender), Some(" stone ")),
            vec![("position", "DEF".to_string()), ("search", "stone".to_string())]
        );
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:8080/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(client.url("/api/players"), "http://localhost:8080/api/players");
    }

    #[test]
    fn protected_call_without_token_is_rejected() {
        let client = ApiClient::new("http://localhost:8080", Duration::from_secs(5)).unwrap();
        let request = client.http.get(client.url("/api/teams/my"));
        assert!(matches!(
            client.authed(request),
            Err(ApiError::NotAuthenticated)
        ));
    }

    #[tokio::test]
    async fn my_team_without_token_fails_before_network() {
        let client = ApiClient::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
        assert!(matches!(
            client.my_team().await,
            Err(ApiError::NotAuthenticated)
        ));
    }

    #[test]
    fn server_error_exposes_status() {
        let err = ApiError::Server {
            status: 400,
            message: "nope".into(),
        };
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.to_string(), "nope");
        assert_eq!(ApiError::NotAuthenticated.status(), None);
    }

    #[test]
    fn only_404_counts_as_not_found() {
        let missing = ApiError::Server {
            status: 404,
            message: "Team not found".into(),
        };
        let forbidden = ApiError::Server {
            status: 403,
            message: "Forbidden".into(),
        };
        assert!(missing.is_not_found());
        assert!(!forbidden.is_not_found());
        assert!(!ApiError::NotAuthenticated.is_not_found());
    }
}

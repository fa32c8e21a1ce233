// SQLite-backed session store: auth token, cached user, team id and the
// squad draft being edited between invocations.

use std::sync::{Mutex, MutexGuard, PoisonError};

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use touchline_core::Draft;

use crate::api::types::User;

const TOKEN_KEY: &str = "auth_token";
const USER_KEY: &str = "auth_user";
const TEAM_ID_KEY: &str = "team_id";
const DRAFT_KEY: &str = "draft";

/// Key-value persistence for everything the client remembers locally.
pub struct SessionStore {
    conn: Mutex<Connection>,
}

impl SessionStore {
    /// Open (or create) the store at `path`. Pass `":memory:"` for an
    /// ephemeral store.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open session store at {path}"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )
        .context("failed to set session store pragmas")?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS session (
                key        TEXT PRIMARY KEY,
                value      TEXT NOT NULL,
                updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
            );",
        )
        .context("failed to create session schema")?;

        Ok(SessionStore {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ------------------------------------------------------------------
    // Raw key-value access
    // ------------------------------------------------------------------

    fn save_value<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)
            .with_context(|| format!("failed to serialize session value `{key}`"))?;
        self.conn()
            .execute(
                "INSERT OR REPLACE INTO session (key, value) VALUES (?1, ?2)",
                params![key, json],
            )
            .with_context(|| format!("failed to save session value `{key}`"))?;
        Ok(())
    }

    fn load_value<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let json: Option<String> = self
            .conn()
            .query_row(
                "SELECT value FROM session WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .with_context(|| format!("failed to read session value `{key}`"))?;

        json.map(|s| {
            serde_json::from_str(&s)
                .with_context(|| format!("failed to deserialize session value `{key}`"))
        })
        .transpose()
    }

    fn delete_keys(&self, keys: &[&str]) -> Result<()> {
        let mut conn = self.conn();
        let tx = conn.transaction().context("failed to begin transaction")?;
        for key in keys {
            tx.execute("DELETE FROM session WHERE key = ?1", params![key])
                .with_context(|| format!("failed to delete session value `{key}`"))?;
        }
        tx.commit().context("failed to commit session delete")?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Authentication
    // ------------------------------------------------------------------

    pub fn save_auth(&self, token: &str, user: &User) -> Result<()> {
        self.save_value(TOKEN_KEY, &token)?;
        self.save_value(USER_KEY, user)?;
        debug!(username = %user.username, "session saved");
        Ok(())
    }

    pub fn token(&self) -> Result<Option<String>> {
        self.load_value(TOKEN_KEY)
    }

    pub fn user(&self) -> Result<Option<User>> {
        self.load_value(USER_KEY)
    }

    pub fn is_authenticated(&self) -> Result<bool> {
        Ok(self.token()?.is_some())
    }

    /// Forget the login along with the team and draft that belonged to it.
    pub fn clear_auth(&self) -> Result<()> {
        self.delete_keys(&[TOKEN_KEY, USER_KEY, TEAM_ID_KEY, DRAFT_KEY])?;
        debug!("session cleared");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Team and draft
    // ------------------------------------------------------------------

    pub fn team_id(&self) -> Result<Option<String>> {
        self.load_value(TEAM_ID_KEY)
    }

    pub fn set_team_id(&self, team_id: &str) -> Result<()> {
        self.save_value(TEAM_ID_KEY, &team_id)
    }

    pub fn clear_team_id(&self) -> Result<()> {
        self.delete_keys(&[TEAM_ID_KEY])
    }

    pub fn save_draft(&self, draft: &Draft) -> Result<()> {
        self.save_value(DRAFT_KEY, draft)
    }

    pub fn load_draft(&self) -> Result<Option<Draft>> {
        self.load_value(DRAFT_KEY)
    }

    pub fn clear_draft(&self) -> Result<()> {
        self.delete_keys(&[DRAFT_KEY])
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

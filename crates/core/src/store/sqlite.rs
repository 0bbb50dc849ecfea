//! # SQLite Team Store
//!
//! Team documents stored as rows of a single `teams` table. Members are kept
//! as a JSON array in the `pokemons` column so a team reads and writes as
//! one document, the same shape the remote store uses.

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Arc, Mutex};

use super::TeamStore;
use crate::error::StoreError;
use crate::models::{Member, NewTeam, Team, TeamId, TeamPatch};

/// Schema version for migrations
const SCHEMA_VERSION: i32 = 1;

pub struct SqliteTeamStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteTeamStore {
    /// Open or create the database at `.teambuilder/teams.db`
    pub fn open() -> Result<Self, StoreError> {
        Self::open_at(".teambuilder/teams.db")
    }

    /// Open database at a specific path
    pub fn open_at<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent).ok();
        }

        let conn = Connection::open(path.as_ref())?;
        Self::from_connection(conn)
    }

    /// Throwaway database, used by tests
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.run_migrations()?;
        Ok(store)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|e| StoreError::Lock(e.to_string()))
    }

    fn run_migrations(&self) -> Result<(), StoreError> {
        let conn = self.lock()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS schema_version (version INTEGER PRIMARY KEY)",
            [],
        )?;

        let current_version: i32 = conn
            .query_row(
                "SELECT COALESCE(MAX(version), 0) FROM schema_version",
                [],
                |row| row.get(0),
            )
            .unwrap_or(0);

        if current_version < 1 {
            conn.execute(
                r#"
                CREATE TABLE IF NOT EXISTS teams (
                    id TEXT PRIMARY KEY,
                    name TEXT NOT NULL,
                    pokemons TEXT NOT NULL DEFAULT '[]',
                    created_at TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                )
                "#,
                [],
            )?;
            conn.execute(
                "CREATE INDEX IF NOT EXISTS idx_teams_created ON teams(created_at)",
                [],
            )?;
            conn.execute(
                "INSERT OR REPLACE INTO schema_version (version) VALUES (?1)",
                [SCHEMA_VERSION],
            )?;
            tracing::debug!(version = SCHEMA_VERSION, "Team store schema migrated");
        }

        Ok(())
    }

    fn insert(&self, team: &NewTeam) -> Result<TeamId, StoreError> {
        let id = generate_team_id();
        let now = Utc::now().to_rfc3339();
        let pokemons = serde_json::to_string(&team.pokemons)?;

        let conn = self.lock()?;
        conn.execute(
            r#"
            INSERT INTO teams (id, name, pokemons, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?4)
            "#,
            params![id.as_str(), team.name, pokemons, now],
        )?;

        Ok(id)
    }

    fn patch(&self, id: &TeamId, patch: &TeamPatch) -> Result<(), StoreError> {
        let pokemons = patch
            .pokemons
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;
        let now = Utc::now().to_rfc3339();

        let conn = self.lock()?;
        let affected = conn.execute(
            r#"
            UPDATE teams
            SET name = COALESCE(?1, name),
                pokemons = COALESCE(?2, pokemons),
                updated_at = ?3
            WHERE id = ?4
            "#,
            params![patch.name, pokemons, now, id.as_str()],
        )?;

        if affected == 0 {
            return Err(StoreError::NotFound(id.clone()));
        }
        Ok(())
    }

    fn remove(&self, id: &TeamId) -> Result<(), StoreError> {
        let conn = self.lock()?;
        let affected = conn.execute("DELETE FROM teams WHERE id = ?1", params![id.as_str()])?;
        if affected == 0 {
            return Err(StoreError::NotFound(id.clone()));
        }
        Ok(())
    }

    fn select_all(&self) -> Result<Vec<Team>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, name, pokemons
            FROM teams
            ORDER BY created_at ASC, rowid ASC
            "#,
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, name, pokemons)| {
                let pokemons: Vec<Member> = serde_json::from_str(&pokemons).map_err(|e| {
                    StoreError::Malformed(format!("team {}: pokemons column: {}", id, e))
                })?;
                Ok(Team {
                    id: TeamId::new(id),
                    name,
                    pokemons,
                })
            })
            .collect()
    }
}

#[async_trait]
impl TeamStore for SqliteTeamStore {
    async fn create(&self, team: &NewTeam) -> Result<TeamId, StoreError> {
        self.insert(team)
    }

    async fn update(&self, id: &TeamId, patch: &TeamPatch) -> Result<(), StoreError> {
        self.patch(id, patch)
    }

    async fn delete(&self, id: &TeamId) -> Result<(), StoreError> {
        self.remove(id)
    }

    async fn list_all(&self) -> Result<Vec<Team>, StoreError> {
        self.select_all()
    }

    fn backend_name(&self) -> &'static str {
        "sqlite"
    }
}

/// Generate a unique team ID (timestamp plus random suffix)
fn generate_team_id() -> TeamId {
    use std::collections::hash_map::RandomState;
    use std::hash::{BuildHasher, Hasher};

    let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
    let salt = RandomState::new().build_hasher().finish() as u32;
    TeamId::new(format!("t-{:x}-{:08x}", nanos, salt))
}

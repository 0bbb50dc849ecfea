//! Process-local team store.
//!
//! Keeps teams in insertion order. Used by tests and by `--store memory`.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

use super::TeamStore;
use crate::error::StoreError;
use crate::models::{NewTeam, Team, TeamId, TeamPatch};

#[derive(Default)]
pub struct InMemoryTeamStore {
    teams: RwLock<Vec<Team>>,
    next_id: AtomicU64,
}

impl InMemoryTeamStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the given teams already stored
    pub fn with_teams(teams: Vec<Team>) -> Self {
        // continue after the highest seeded `team-N`
        let highest = teams
            .iter()
            .filter_map(|t| t.id.as_str().strip_prefix("team-"))
            .filter_map(|n| n.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        Self {
            next_id: AtomicU64::new(highest),
            teams: RwLock::new(teams),
        }
    }
}

#[async_trait]
impl TeamStore for InMemoryTeamStore {
    async fn create(&self, team: &NewTeam) -> Result<TeamId, StoreError> {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let id = TeamId::new(format!("team-{}", n));
        self.teams
            .write()
            .await
            .push(team.clone().into_team(id.clone()));
        Ok(id)
    }

    async fn update(&self, id: &TeamId, patch: &TeamPatch) -> Result<(), StoreError> {
        let mut teams = self.teams.write().await;
        let team = teams
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        patch.apply_to(team);
        Ok(())
    }

    async fn delete(&self, id: &TeamId) -> Result<(), StoreError> {
        let mut teams = self.teams.write().await;
        let before = teams.len();
        teams.retain(|t| &t.id != id);
        if teams.len() == before {
            return Err(StoreError::NotFound(id.clone()));
        }
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Team>, StoreError> {
        Ok(self.teams.read().await.clone())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Member;

    #[tokio::test]
    async fn test_create_assigns_distinct_ids() {
        let store = InMemoryTeamStore::new();
        let a = store.create(&NewTeam::named("A")).await.unwrap();
        let b = store.create(&NewTeam::named("B")).await.unwrap();
        assert_ne!(a, b);

        let teams = store.list_all().await.unwrap();
        assert_eq!(teams.len(), 2);
        assert_eq!(teams[0].name, "A");
        assert_eq!(teams[1].id, b);
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_field() {
        let store = InMemoryTeamStore::new();
        let id = store.create(&NewTeam::named("A")).await.unwrap();

        store
            .update(&id, &TeamPatch::members(vec![Member::new("mew", "psychic", 64)]))
            .await
            .unwrap();
        store.update(&id, &TeamPatch::rename("B")).await.unwrap();

        let team = &store.list_all().await.unwrap()[0];
        assert_eq!(team.name, "B");
        assert_eq!(team.pokemons.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_team_is_not_found() {
        let store = InMemoryTeamStore::new();
        let missing = TeamId::new("nope");
        assert!(matches!(
            store.delete(&missing).await,
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.update(&missing, &TeamPatch::rename("x")).await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_seeded_ids_do_not_collide() {
        let seeded = NewTeam::named("Seed").into_team(TeamId::new("team-1"));
        let store = InMemoryTeamStore::with_teams(vec![seeded]);
        let id = tokio_test::block_on(store.create(&NewTeam::named("New"))).unwrap();
        assert_eq!(id.as_str(), "team-2");
    }

    #[tokio::test]
    async fn test_seeded_gap_does_not_collide() {
        let seeded = NewTeam::named("Seed").into_team(TeamId::new("team-2"));
        let store = InMemoryTeamStore::with_teams(vec![seeded]);

        let id = store.create(&NewTeam::named("New")).await.unwrap();
        assert_eq!(id.as_str(), "team-3");
        let ids: Vec<_> = store.list_all().await.unwrap().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![TeamId::new("team-2"), TeamId::new("team-3")]);
    }
}

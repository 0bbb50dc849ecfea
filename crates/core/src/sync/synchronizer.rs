//! # Team Synchronizer
//!
//! Turns user intents into validated store writes followed by a full
//! re-read of the team collection.
//!
//! The state lock is never held across a store call, so overlapping
//! intents race against the store without coordination: the last write to
//! resolve wins and local state reflects the last refresh to complete.

use std::future::Future;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

use super::events::{SyncEvent, SyncEventKind};
use super::state::{Action, BuilderState, Selection};
use super::{Outcome, SkipReason};
use crate::catalog::{load_catalog, CatalogSource};
use crate::error::{StoreError, SyncError};
use crate::models::{CatalogEntry, Member, NewTeam, Team, TeamId, TeamPatch};
use crate::store::TeamStore;

const EVENT_CAPACITY: usize = 100;

pub struct TeamSynchronizer {
    store: Arc<dyn TeamStore>,
    state: RwLock<BuilderState>,
    events: broadcast::Sender<SyncEvent>,
}

impl TeamSynchronizer {
    pub fn new(store: Arc<dyn TeamStore>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            store,
            state: RwLock::new(BuilderState::default()),
            events,
        }
    }

    pub fn store(&self) -> &Arc<dyn TeamStore> {
        &self.store
    }

    /// Receive an event after every state transition
    pub fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.events.subscribe()
    }

    /// Copy of the current state for rendering
    pub async fn snapshot(&self) -> BuilderState {
        self.state.read().await.clone()
    }

    async fn dispatch(&self, action: Action) {
        self.state.write().await.apply(action);
    }

    fn publish(&self, event: SyncEvent) {
        // no subscribers is fine
        let _ = self.events.send(event);
    }

    fn skip<T>(&self, intent: &'static str, reason: SkipReason) -> Outcome<T> {
        tracing::debug!(intent, %reason, "Intent skipped");
        Outcome::Skipped(reason)
    }

    async fn cached_team(&self, id: &TeamId) -> Option<Team> {
        self.state.read().await.team(id).cloned()
    }

    /// Initial load: replace local teams and select the first one
    #[tracing::instrument(skip(self))]
    pub async fn load_teams(&self) -> Result<Vec<Team>, SyncError> {
        let teams = match self.store.list_all().await {
            Ok(teams) => teams,
            Err(e) => {
                let err = SyncError::store("refresh", e);
                self.report("load_teams", &err).await;
                return Err(err);
            }
        };

        let event = {
            let mut state = self.state.write().await;
            state.apply(Action::TeamsLoaded(teams.clone()));
            SyncEvent::new(SyncEventKind::TeamsLoaded, "load_teams")
                .with_teams(&state.teams, state.active_team_id.as_ref())
        };
        tracing::info!(teams = teams.len(), backend = self.store.backend_name(), "Teams loaded");
        self.publish(event);
        Ok(teams)
    }

    /// Re-read every team from the store and replace local state with it
    pub async fn resync(&self) -> Result<Vec<Team>, SyncError> {
        match self.store.list_all().await {
            Ok(teams) => {
                self.commit("resync", teams.clone(), Selection::Keep).await;
                Ok(teams)
            }
            Err(e) => {
                let err = SyncError::store("refresh", e);
                self.report("resync", &err).await;
                Err(err)
            }
        }
    }

    /// Create an empty team and make it the active one
    pub async fn create_team(&self, name: &str) -> Result<Outcome<TeamId>, SyncError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(self.skip("create_team", SkipReason::EmptyName));
        }

        let draft = NewTeam::named(name);
        let id = self
            .write_then_refresh("create_team", "create", self.store.create(&draft), |id| {
                Selection::Select(id.clone())
            })
            .await?;

        tracing::info!(team_id = %id, name, "Team created");
        Ok(Outcome::Applied(id))
    }

    pub async fn rename_team(&self, id: &TeamId, new_name: &str) -> Result<Outcome<()>, SyncError> {
        let Some(team) = self.cached_team(id).await else {
            return Ok(self.skip("rename_team", SkipReason::UnknownTeam));
        };
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Ok(self.skip("rename_team", SkipReason::EmptyName));
        }
        if new_name == team.name {
            return Ok(self.skip("rename_team", SkipReason::UnchangedName));
        }

        let patch = TeamPatch::rename(new_name);
        self.write_then_refresh("rename_team", "update", self.store.update(id, &patch), |_| {
            Selection::Keep
        })
        .await?;

        tracing::info!(team_id = %id, from = %team.name, to = new_name, "Team renamed");
        Ok(Outcome::Applied(()))
    }

    /// Delete a team. Confirmation is the caller's job.
    pub async fn delete_team(&self, id: &TeamId) -> Result<Outcome<()>, SyncError> {
        let was_active = {
            let state = self.state.read().await;
            if state.team(id).is_none() {
                return Ok(self.skip("delete_team", SkipReason::UnknownTeam));
            }
            state.active_team_id.as_ref() == Some(id)
        };
        let selection = if was_active {
            Selection::FirstRemaining
        } else {
            Selection::Keep
        };

        self.write_then_refresh("delete_team", "delete", self.store.delete(id), |_| selection)
            .await?;

        tracing::info!(team_id = %id, was_active, "Team deleted");
        Ok(Outcome::Applied(()))
    }

    /// Append a member unless the team is full or already has one by that name
    pub async fn add_member(&self, id: &TeamId, member: Member) -> Result<Outcome<()>, SyncError> {
        let Some(team) = self.cached_team(id).await else {
            return Ok(self.skip("add_member", SkipReason::UnknownTeam));
        };
        if team.contains(&member.name) {
            return Ok(self.skip("add_member", SkipReason::DuplicateMember));
        }
        if team.is_full() {
            return Ok(self.skip("add_member", SkipReason::TeamFull));
        }

        let member_name = member.name.clone();
        let mut pokemons = team.pokemons;
        pokemons.push(member);
        let patch = TeamPatch::members(pokemons);

        self.write_then_refresh("add_member", "update", self.store.update(id, &patch), |_| {
            Selection::Keep
        })
        .await?;

        tracing::info!(team_id = %id, member = %member_name, "Member added");
        Ok(Outcome::Applied(()))
    }

    /// Remove a member by name. The write happens even if nobody matched.
    pub async fn remove_member(
        &self,
        id: &TeamId,
        member_name: &str,
    ) -> Result<Outcome<()>, SyncError> {
        let Some(team) = self.cached_team(id).await else {
            return Ok(self.skip("remove_member", SkipReason::UnknownTeam));
        };

        let pokemons: Vec<Member> = team
            .pokemons
            .into_iter()
            .filter(|p| p.name != member_name)
            .collect();
        let patch = TeamPatch::members(pokemons);

        self.write_then_refresh("remove_member", "update", self.store.update(id, &patch), |_| {
            Selection::Keep
        })
        .await?;

        tracing::info!(team_id = %id, member = member_name, "Member removed");
        Ok(Outcome::Applied(()))
    }

    /// Change the active team (local only)
    pub async fn select_team(&self, id: &TeamId) -> Outcome<()> {
        let event = {
            let mut state = self.state.write().await;
            if state.team(id).is_none() {
                return self.skip("select_team", SkipReason::UnknownTeam);
            }
            state.apply(Action::TeamSelected(id.clone()));
            SyncEvent::new(SyncEventKind::SelectionChanged, "select_team")
                .with_teams(&state.teams, state.active_team_id.as_ref())
        };
        self.publish(event);
        Outcome::Applied(())
    }

    /// Load the catalog into state; returns the number of entries loaded
    pub async fn load_catalog(&self, source: &dyn CatalogSource, limit: u32) -> usize {
        let entries = load_catalog(source, limit).await;
        let count = entries.len();
        let event = {
            let mut state = self.state.write().await;
            state.apply(Action::CatalogLoaded(entries));
            SyncEvent::new(SyncEventKind::CatalogLoaded, "load_catalog")
                .with_teams(&state.teams, state.active_team_id.as_ref())
        };
        self.publish(event);
        count
    }

    pub async fn set_query(&self, query: &str) {
        self.dispatch(Action::QueryChanged(query.to_string())).await;
    }

    /// Catalog entries matching the current query
    pub async fn filtered_catalog(&self) -> Vec<CatalogEntry> {
        let state = self.state.read().await;
        state.filtered_catalog().into_iter().cloned().collect()
    }

    /// Catalog entry with exactly this name
    pub async fn catalog_entry(&self, name: &str) -> Option<CatalogEntry> {
        let state = self.state.read().await;
        state.catalog.iter().find(|e| e.name == name).cloned()
    }

    /// Run one write, then refresh. Tracks the in-flight counter either way.
    async fn write_then_refresh<T, W>(
        &self,
        intent: &'static str,
        store_call: &'static str,
        write: W,
        selection: impl FnOnce(&T) -> Selection,
    ) -> Result<T, SyncError>
    where
        W: Future<Output = Result<T, StoreError>>,
    {
        self.dispatch(Action::MutationStarted).await;
        let result = self.perform(intent, store_call, write, selection).await;
        self.dispatch(Action::MutationFinished).await;

        if let Err(e) = &result {
            self.report(intent, e).await;
        }
        result
    }

    async fn perform<T, W>(
        &self,
        intent: &'static str,
        store_call: &'static str,
        write: W,
        selection: impl FnOnce(&T) -> Selection,
    ) -> Result<T, SyncError>
    where
        W: Future<Output = Result<T, StoreError>>,
    {
        let value = write
            .await
            .map_err(|e| SyncError::store(store_call, e))?;
        let teams = self
            .store
            .list_all()
            .await
            .map_err(|e| SyncError::store("refresh", e))?;
        self.commit(intent, teams, selection(&value)).await;
        Ok(value)
    }

    async fn commit(&self, intent: &'static str, teams: Vec<Team>, selection: Selection) {
        let event = {
            let mut state = self.state.write().await;
            state.apply(Action::Resynced { teams, selection });
            SyncEvent::new(SyncEventKind::TeamsRefreshed, intent)
                .with_teams(&state.teams, state.active_team_id.as_ref())
        };
        tracing::debug!(intent, teams = event.teams.len(), "Teams refreshed");
        self.publish(event);
    }

    async fn report(&self, intent: &'static str, error: &SyncError) {
        tracing::warn!(intent, error = %error, "Store call failed, local state unchanged");
        let event = {
            let state = self.state.read().await;
            SyncEvent::new(SyncEventKind::StoreFailed, intent)
                .with_teams(&state.teams, state.active_team_id.as_ref())
                .with_error(&error.to_string())
        };
        self.publish(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::StubCatalog;
    use crate::models::TEAM_CAPACITY;
    use crate::store::InMemoryTeamStore;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// In-memory store that counts writes and can be told to fail
    #[derive(Default)]
    struct RecordingStore {
        inner: InMemoryTeamStore,
        writes: AtomicUsize,
        fail_writes: AtomicBool,
        fail_lists: AtomicBool,
        yield_on_write: bool,
    }

    impl RecordingStore {
        fn writes(&self) -> usize {
            self.writes.load(Ordering::SeqCst)
        }

        async fn before_write(&self) -> Result<(), StoreError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            if self.yield_on_write {
                tokio::task::yield_now().await;
            }
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(StoreError::Status {
                    status: 503,
                    message: "unavailable".to_string(),
                });
            }
            Ok(())
        }
    }

    #[async_trait]
    impl TeamStore for RecordingStore {
        async fn create(&self, team: &NewTeam) -> Result<TeamId, StoreError> {
            self.before_write().await?;
            self.inner.create(team).await
        }

        async fn update(&self, id: &TeamId, patch: &TeamPatch) -> Result<(), StoreError> {
            self.before_write().await?;
            self.inner.update(id, patch).await
        }

        async fn delete(&self, id: &TeamId) -> Result<(), StoreError> {
            self.before_write().await?;
            self.inner.delete(id).await
        }

        async fn list_all(&self) -> Result<Vec<Team>, StoreError> {
            if self.fail_lists.load(Ordering::SeqCst) {
                return Err(StoreError::Status {
                    status: 503,
                    message: "unavailable".to_string(),
                });
            }
            self.inner.list_all().await
        }

        fn backend_name(&self) -> &'static str {
            "recording"
        }
    }

    fn setup() -> (Arc<RecordingStore>, TeamSynchronizer) {
        setup_with(RecordingStore::default())
    }

    fn setup_with(store: RecordingStore) -> (Arc<RecordingStore>, TeamSynchronizer) {
        let store = Arc::new(store);
        let sync = TeamSynchronizer::new(store.clone());
        (store, sync)
    }

    fn pokemon(name: &str) -> Member {
        Member::new(name, "normal", 50)
    }

    async fn create(sync: &TeamSynchronizer, name: &str) -> TeamId {
        sync.create_team(name).await.unwrap().applied().unwrap()
    }

    #[tokio::test]
    async fn test_create_team_selects_new_team() {
        let (store, sync) = setup();
        let first = create(&sync, "Kanto").await;
        let second = create(&sync, "  Johto ").await;

        let state = sync.snapshot().await;
        assert_eq!(state.teams.len(), 2);
        assert_eq!(state.active_team_id, Some(second.clone()));
        assert_eq!(state.team(&second).unwrap().name, "Johto");
        assert!(state.team(&first).unwrap().pokemons.is_empty());
        assert_eq!(store.writes(), 2);
        assert!(!state.is_loading());
    }

    #[tokio::test]
    async fn test_create_with_blank_name_is_skipped() {
        let (store, sync) = setup();
        let outcome = sync.create_team("   ").await.unwrap();
        assert_eq!(outcome, Outcome::Skipped(SkipReason::EmptyName));
        assert_eq!(store.writes(), 0);
    }

    #[tokio::test]
    async fn test_add_member_sequences_respect_invariants() {
        let (store, sync) = setup();
        let id = create(&sync, "Kanto").await;
        let pool = ["pikachu", "eevee", "pikachu", "snorlax", "mew", "eevee", "onix", "abra",
            "gastly", "mew", "ditto", "zubat"];

        for name in pool.iter().chain(pool.iter()) {
            sync.add_member(&id, pokemon(name)).await.unwrap();

            let state = sync.snapshot().await;
            let team = state.team(&id).unwrap();
            assert!(team.pokemons.len() <= TEAM_CAPACITY);
            let names: HashSet<_> = team.pokemons.iter().map(|p| p.name.as_str()).collect();
            assert_eq!(names.len(), team.pokemons.len());
        }

        let state = sync.snapshot().await;
        let names: Vec<_> = state
            .team(&id)
            .unwrap()
            .pokemons
            .iter()
            .map(|p| p.name.clone())
            .collect();
        assert_eq!(names, vec!["pikachu", "eevee", "snorlax", "mew", "onix", "abra"]);
        // one create plus six applied adds
        assert_eq!(store.writes(), 7);
    }

    #[tokio::test]
    async fn test_add_member_noop_when_full_or_duplicate() {
        let (store, sync) = setup();
        let id = create(&sync, "Kanto").await;
        for name in ["a", "b", "c", "d", "e", "f"] {
            assert!(sync.add_member(&id, pokemon(name)).await.unwrap().is_applied());
        }
        let writes = store.writes();

        let outcome = sync.add_member(&id, pokemon("g")).await.unwrap();
        assert_eq!(outcome.skip_reason(), Some(SkipReason::TeamFull));
        let outcome = sync.add_member(&id, pokemon("a")).await.unwrap();
        assert_eq!(outcome.skip_reason(), Some(SkipReason::DuplicateMember));
        assert_eq!(store.writes(), writes);

        let other = create(&sync, "Johto").await;
        sync.add_member(&other, pokemon("a")).await.unwrap();
        let writes = store.writes();
        let outcome = sync.add_member(&other, pokemon("a")).await.unwrap();
        assert_eq!(outcome.skip_reason(), Some(SkipReason::DuplicateMember));
        assert_eq!(store.writes(), writes);
    }

    #[tokio::test]
    async fn test_remove_then_add_restores_members() {
        let (_store, sync) = setup();
        let id = create(&sync, "Kanto").await;
        for name in ["bulbasaur", "charmander", "squirtle"] {
            sync.add_member(&id, pokemon(name)).await.unwrap();
        }
        let before: HashSet<_> = sync
            .snapshot()
            .await
            .team(&id)
            .unwrap()
            .pokemons
            .iter()
            .map(|p| p.name.clone())
            .collect();

        sync.remove_member(&id, "charmander").await.unwrap();
        assert_eq!(sync.snapshot().await.team(&id).unwrap().pokemons.len(), 2);
        sync.add_member(&id, pokemon("charmander")).await.unwrap();

        let after: HashSet<_> = sync
            .snapshot()
            .await
            .team(&id)
            .unwrap()
            .pokemons
            .iter()
            .map(|p| p.name.clone())
            .collect();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_remove_missing_member_still_writes() {
        let (store, sync) = setup();
        let id = create(&sync, "Kanto").await;
        let writes = store.writes();

        let outcome = sync.remove_member(&id, "missingno").await.unwrap();
        assert!(outcome.is_applied());
        assert_eq!(store.writes(), writes + 1);
        assert!(sync.snapshot().await.team(&id).unwrap().pokemons.is_empty());
    }

    #[tokio::test]
    async fn test_delete_active_team_selects_first_remaining() {
        let (_store, sync) = setup();
        let a = create(&sync, "A").await;
        let b = create(&sync, "B").await;
        let c = create(&sync, "C").await;
        assert_eq!(sync.snapshot().await.active_team_id, Some(c.clone()));

        sync.delete_team(&c).await.unwrap();
        let state = sync.snapshot().await;
        assert_eq!(state.teams.len(), 2);
        assert_eq!(state.active_team_id, Some(a.clone()));

        // deleting an inactive team keeps the selection
        sync.select_team(&b).await;
        sync.delete_team(&a).await.unwrap();
        assert_eq!(sync.snapshot().await.active_team_id, Some(b.clone()));

        sync.delete_team(&b).await.unwrap();
        let state = sync.snapshot().await;
        assert!(state.teams.is_empty());
        assert_eq!(state.active_team_id, None);
    }

    #[tokio::test]
    async fn test_rename_rules() {
        let (store, sync) = setup();
        let id = create(&sync, "Kanto").await;
        let writes = store.writes();

        let outcome = sync.rename_team(&id, "Kanto").await.unwrap();
        assert_eq!(outcome.skip_reason(), Some(SkipReason::UnchangedName));
        let outcome = sync.rename_team(&id, "").await.unwrap();
        assert_eq!(outcome.skip_reason(), Some(SkipReason::EmptyName));
        assert_eq!(store.writes(), writes);

        assert!(sync.rename_team(&id, "Indigo").await.unwrap().is_applied());
        assert_eq!(store.writes(), writes + 1);
        assert_eq!(sync.snapshot().await.team(&id).unwrap().name, "Indigo");
    }

    #[tokio::test]
    async fn test_unknown_team_is_skipped() {
        let (store, sync) = setup();
        let ghost = TeamId::new("ghost");
        assert_eq!(
            sync.add_member(&ghost, pokemon("a")).await.unwrap(),
            Outcome::Skipped(SkipReason::UnknownTeam)
        );
        assert_eq!(
            sync.remove_member(&ghost, "a").await.unwrap(),
            Outcome::Skipped(SkipReason::UnknownTeam)
        );
        assert_eq!(
            sync.delete_team(&ghost).await.unwrap(),
            Outcome::Skipped(SkipReason::UnknownTeam)
        );
        assert_eq!(
            sync.select_team(&ghost).await,
            Outcome::Skipped(SkipReason::UnknownTeam)
        );
        assert_eq!(store.writes(), 0);
    }

    #[tokio::test]
    async fn test_failed_write_leaves_state_unchanged() {
        let (store, sync) = setup();
        let id = create(&sync, "Kanto").await;
        let before = sync.snapshot().await;
        let mut events = sync.subscribe();

        store.fail_writes.store(true, Ordering::SeqCst);
        let err = sync.add_member(&id, pokemon("mew")).await.unwrap_err();
        match err {
            SyncError::StoreUnavailable { operation, .. } => assert_eq!(operation, "update"),
        }

        let after = sync.snapshot().await;
        assert_eq!(after, before);
        assert!(!after.is_loading());

        let event = events.recv().await.unwrap();
        assert_eq!(event.kind, SyncEventKind::StoreFailed);
        assert_eq!(event.operation, "add_member");
        assert!(event.error.is_some());
    }

    #[tokio::test]
    async fn test_failed_refresh_is_reported() {
        let (store, sync) = setup();
        let id = create(&sync, "Kanto").await;

        store.fail_lists.store(true, Ordering::SeqCst);
        let err = sync.rename_team(&id, "Indigo").await.unwrap_err();
        assert!(matches!(
            err,
            SyncError::StoreUnavailable {
                operation: "refresh",
                ..
            }
        ));
        // local cache still shows the pre-write name
        assert_eq!(sync.snapshot().await.team(&id).unwrap().name, "Kanto");

        store.fail_lists.store(false, Ordering::SeqCst);
        sync.resync().await.unwrap();
        assert_eq!(sync.snapshot().await.team(&id).unwrap().name, "Indigo");
    }

    #[tokio::test]
    async fn test_load_teams_selects_first() {
        let seeded = vec![
            NewTeam::named("A").into_team(TeamId::new("a")),
            NewTeam::named("B").into_team(TeamId::new("b")),
        ];
        let (_store, sync) = setup_with(RecordingStore {
            inner: InMemoryTeamStore::with_teams(seeded),
            ..Default::default()
        });

        let teams = sync.load_teams().await.unwrap();
        assert_eq!(teams.len(), 2);
        assert_eq!(sync.snapshot().await.active_team_id, Some(TeamId::new("a")));
    }

    #[tokio::test]
    async fn test_overlapping_adds_last_writer_wins() {
        let (store, sync) = setup_with(RecordingStore {
            yield_on_write: true,
            ..Default::default()
        });
        let id = create(&sync, "Kanto").await;

        let (a, b) = tokio::join!(
            sync.add_member(&id, pokemon("pikachu")),
            sync.add_member(&id, pokemon("eevee"))
        );
        assert!(a.unwrap().is_applied());
        assert!(b.unwrap().is_applied());

        // both writes started from the same cached (empty) team
        let stored = store.inner.list_all().await.unwrap();
        assert_eq!(stored[0].pokemons.len(), 1);
        assert_eq!(sync.snapshot().await.team(&id).unwrap().pokemons.len(), 1);
    }

    #[tokio::test]
    async fn test_refresh_event_is_published() {
        let (_store, sync) = setup();
        let mut events = sync.subscribe();
        let id = create(&sync, "Kanto").await;

        let event = events.recv().await.unwrap();
        assert_eq!(event.kind, SyncEventKind::TeamsRefreshed);
        assert_eq!(event.operation, "create_team");
        assert_eq!(event.active_team_id, Some(id));
        assert_eq!(event.teams.len(), 1);
    }

    #[tokio::test]
    async fn test_catalog_and_search() {
        let (_store, sync) = setup();
        let stub = StubCatalog::new(&[
            ("pikachu", &["electric"], 112),
            ("raichu", &["electric"], 218),
            ("psyduck", &["water"], 64),
        ]);
        assert_eq!(sync.load_catalog(&stub, 151).await, 3);

        sync.set_query("CHU").await;
        let names: Vec<_> = sync
            .filtered_catalog()
            .await
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["pikachu", "raichu"]);

        let entry = sync.catalog_entry("psyduck").await.unwrap();
        let id = create(&sync, "Kanto").await;
        sync.add_member(&id, entry.to_member()).await.unwrap();
        let state = sync.snapshot().await;
        assert_eq!(state.active_stats().types_covered, vec!["water"]);
        assert_eq!(state.active_stats().average_base_experience, 64);
    }

    #[tokio::test]
    async fn test_catalog_event_carries_teams() {
        let (_store, sync) = setup();
        let id = create(&sync, "Kanto").await;
        let mut events = sync.subscribe();

        let stub = StubCatalog::new(&[("mew", &["psychic"], 64)]);
        sync.load_catalog(&stub, 151).await;

        let event = events.recv().await.unwrap();
        assert_eq!(event.kind, SyncEventKind::CatalogLoaded);
        assert_eq!(event.teams.len(), 1);
        assert_eq!(event.active_team_id, Some(id));
    }
}

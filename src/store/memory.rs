//! In-memory store implementations.
//!
//! Back the integration tests and double as a small single-node
//! deployment option. `MemoryStore` holds its write lock across the
//! conflict check and the write, which is what makes
//! [`ConflictPolicy::Replace`] atomic here.

use super::repository::{
    AssetError, AssetStore, ConflictPolicy, ScoreRepository, StoreError, StoreResult,
    TournamentRepository,
};
use crate::models::{AssetRef, Match, MatchId, ScoreRecord, Team, TeamId, Tournament, TournamentId};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct StoreInner {
    tournaments: HashMap<TournamentId, Tournament>,
    matches: HashMap<MatchId, Match>,
    scores: HashMap<(MatchId, TeamId), ScoreRecord>,
}

/// In-memory record store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a tournament aggregate.
    pub async fn insert_tournament(&self, tournament: Tournament) {
        let mut inner = self.inner.write().await;
        inner.tournaments.insert(tournament.id, tournament);
    }

    /// Seed a match.
    pub async fn insert_match(&self, match_ref: Match) {
        let mut inner = self.inner.write().await;
        inner.matches.insert(match_ref.id, match_ref);
    }

    /// Number of stored score records, across all tournaments.
    pub async fn score_count(&self) -> usize {
        self.inner.read().await.scores.len()
    }
}

#[async_trait]
impl TournamentRepository for MemoryStore {
    async fn tournament(&self, id: TournamentId) -> StoreResult<Option<Tournament>> {
        Ok(self.inner.read().await.tournaments.get(&id).cloned())
    }

    async fn match_by_id(&self, id: MatchId) -> StoreResult<Option<Match>> {
        Ok(self.inner.read().await.matches.get(&id).cloned())
    }

    async fn teams(&self, tournament_id: TournamentId) -> StoreResult<Vec<Team>> {
        let inner = self.inner.read().await;
        inner
            .tournaments
            .get(&tournament_id)
            .map(|t| t.teams.clone())
            .ok_or(StoreError::TournamentNotFound(tournament_id))
    }
}

#[async_trait]
impl ScoreRepository for MemoryStore {
    async fn upsert(&self, record: ScoreRecord, policy: ConflictPolicy) -> StoreResult<ScoreRecord> {
        let mut inner = self.inner.write().await;
        let key = (record.match_id, record.team_id);
        if inner.scores.contains_key(&key) && policy == ConflictPolicy::Reject {
            return Err(StoreError::Conflict {
                match_id: record.match_id,
                team_id: record.team_id,
            });
        }
        inner.scores.insert(key, record.clone());
        Ok(record)
    }

    async fn get(&self, match_id: MatchId, team_id: TeamId) -> StoreResult<Option<ScoreRecord>> {
        Ok(self.inner.read().await.scores.get(&(match_id, team_id)).cloned())
    }

    async fn by_tournament(&self, tournament_id: TournamentId) -> StoreResult<Vec<ScoreRecord>> {
        let inner = self.inner.read().await;
        Ok(inner
            .scores
            .values()
            .filter(|record| {
                inner
                    .matches
                    .get(&record.match_id)
                    .is_some_and(|m| m.tournament_id == tournament_id)
            })
            .cloned()
            .collect())
    }

    async fn delete(&self, match_id: MatchId, team_id: TeamId) -> StoreResult<bool> {
        let mut inner = self.inner.write().await;
        Ok(inner.scores.remove(&(match_id, team_id)).is_some())
    }
}

/// In-memory asset store keyed by reference string.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    assets: Arc<std::sync::RwLock<HashMap<String, Vec<u8>>>>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, reference: impl Into<String>, bytes: Vec<u8>) {
        let mut assets = self.assets.write().unwrap_or_else(|e| e.into_inner());
        assets.insert(reference.into(), bytes);
    }
}

impl AssetStore for MemoryAssets {
    fn load(&self, asset: &AssetRef) -> Result<Vec<u8>, AssetError> {
        let assets = self.assets.read().unwrap_or_else(|e| e.into_inner());
        assets
            .get(asset.as_str())
            .cloned()
            .ok_or_else(|| AssetError::NotFound(asset.to_string()))
    }
}

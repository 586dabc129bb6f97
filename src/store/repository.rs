//! Repository trait definitions for testability and dependency injection.
//!
//! The surrounding application supplies implementations backed by its
//! own database and file storage; the core only relies on the
//! contracts below. The `(match, team)` uniqueness invariant on score
//! records is the store's correctness boundary: concurrent writers to
//! the same pair must be serialized by the implementation, writers to
//! different pairs need not block each other.

use crate::models::{AssetRef, Match, MatchId, ScoreRecord, Team, TeamId, Tournament, TournamentId};
use async_trait::async_trait;
use thiserror::Error;

/// Record store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("score already recorded for match {match_id} / team {team_id}")]
    Conflict { match_id: MatchId, team_id: TeamId },

    #[error("tournament not found: {0}")]
    TournamentNotFound(TournamentId),

    #[error("storage backend error: {0}")]
    Backend(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// What an upsert should do when a record already exists for the
/// `(match, team)` pair. The mutation handler decides; both outcomes
/// are valid post-conditions of the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Surface [`StoreError::Conflict`], leaving the existing record
    /// untouched.
    Reject,
    /// Atomically replace the existing record within the same upsert.
    Replace,
}

/// Read access to tournament aggregates and matches.
#[async_trait]
pub trait TournamentRepository: Send + Sync {
    /// Fetch a tournament with its teams, themes, and configs.
    async fn tournament(&self, id: TournamentId) -> StoreResult<Option<Tournament>>;

    /// Fetch a single match.
    async fn match_by_id(&self, id: MatchId) -> StoreResult<Option<Match>>;

    /// Teams enrolled in a tournament.
    async fn teams(&self, tournament_id: TournamentId) -> StoreResult<Vec<Team>>;
}

/// CRUD over score records with uniqueness enforcement.
#[async_trait]
pub trait ScoreRepository: Send + Sync {
    /// Write a record, resolving `(match, team)` conflicts per `policy`.
    ///
    /// With [`ConflictPolicy::Replace`] the check-and-write must be
    /// atomic (a SQL store would use a single upsert statement).
    async fn upsert(&self, record: ScoreRecord, policy: ConflictPolicy) -> StoreResult<ScoreRecord>;

    /// Fetch the record for a `(match, team)` pair.
    async fn get(&self, match_id: MatchId, team_id: TeamId) -> StoreResult<Option<ScoreRecord>>;

    /// All records across a tournament's matches.
    async fn by_tournament(&self, tournament_id: TournamentId) -> StoreResult<Vec<ScoreRecord>>;

    /// Delete the record for a `(match, team)` pair. Returns whether a
    /// record existed.
    async fn delete(&self, match_id: MatchId, team_id: TeamId) -> StoreResult<bool>;
}

/// Asset store errors
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset not found: {0}")]
    NotFound(String),

    #[error("asset read failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Resolves image and font references to raw bytes.
///
/// Deliberately blocking: the renderer runs off latency-sensitive
/// paths and loads assets inline (see the concurrency notes in the
/// crate docs).
pub trait AssetStore: Send + Sync {
    fn load(&self, asset: &AssetRef) -> Result<Vec<u8>, AssetError>;
}

/// Filesystem-backed asset store rooted at a media directory.
#[derive(Debug, Clone)]
pub struct FsAssets {
    root: std::path::PathBuf,
}

impl FsAssets {
    pub fn new(root: impl Into<std::path::PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetStore for FsAssets {
    fn load(&self, asset: &AssetRef) -> Result<Vec<u8>, AssetError> {
        let path = self.root.join(asset.as_str());
        if !path.is_file() {
            return Err(AssetError::NotFound(asset.to_string()));
        }
        Ok(std::fs::read(path)?)
    }
}

//! Manager for score record mutations.

use crate::leaderboard::{self, TeamStanding};
use crate::models::{MatchId, ScoreRecord, TeamId, TournamentId};
use crate::notify::ChangeNotifier;
use crate::points;
use crate::store::{ConflictPolicy, ScoreRepository, StoreError, TournamentRepository};
use std::sync::Arc;
use thiserror::Error;

/// Score mutation errors
#[derive(Debug, Error)]
pub enum ScoreError {
    /// The record has no resolvable match or tournament. Scoring
    /// without a tournament context is meaningless, so this aborts the
    /// operation without a partial write.
    #[error("no tournament context for match {match_id}")]
    MissingContext { match_id: MatchId },

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type ScoreResult<T> = Result<T, ScoreError>;

/// Mutation handler support for score records.
///
/// Every write recomputes `total_points` through the scoring engine,
/// overwriting any externally supplied total, and every successful
/// mutation (create, update, delete) notifies the tournament's topic
/// exactly once, after the write is durably applied. Notification
/// failure is logged, never propagated.
pub struct ScoreManager {
    tournaments: Arc<dyn TournamentRepository>,
    scores: Arc<dyn ScoreRepository>,
    notifier: Arc<dyn ChangeNotifier>,
}

impl ScoreManager {
    pub fn new(
        tournaments: Arc<dyn TournamentRepository>,
        scores: Arc<dyn ScoreRepository>,
        notifier: Arc<dyn ChangeNotifier>,
    ) -> Self {
        Self {
            tournaments,
            scores,
            notifier,
        }
    }

    /// Record a team's result for a match, creating or updating the
    /// `(match, team)` record per `policy`.
    pub async fn record_score(
        &self,
        match_id: MatchId,
        team_id: TeamId,
        kills: u32,
        placement: u32,
        policy: ConflictPolicy,
    ) -> ScoreResult<ScoreRecord> {
        let (tournament_id, config) = self.tournament_context(match_id).await?;
        let record = ScoreRecord {
            match_id,
            team_id,
            kills,
            placement,
            total_points: points::compute(kills, placement, &config),
        };

        let stored = self.scores.upsert(record, policy).await?;
        log::info!(
            "recorded score for match {match_id} / team {team_id}: {} points",
            stored.total_points
        );
        self.notify(tournament_id).await;
        Ok(stored)
    }

    /// Delete a team's result for a match. Returns whether a record
    /// existed; only an actual deletion triggers a notification.
    pub async fn delete_score(&self, match_id: MatchId, team_id: TeamId) -> ScoreResult<bool> {
        let (tournament_id, _) = self.tournament_context(match_id).await?;
        let removed = self.scores.delete(match_id, team_id).await?;
        if removed {
            log::info!("deleted score for match {match_id} / team {team_id}");
            self.notify(tournament_id).await;
        }
        Ok(removed)
    }

    /// Current standings for a tournament, optionally scoped to one match.
    ///
    /// Convenience wrapper over [`leaderboard::aggregate`] for the
    /// JSON-serving endpoint and the renderer.
    pub async fn standings(
        &self,
        tournament_id: TournamentId,
        match_filter: Option<MatchId>,
    ) -> ScoreResult<Vec<TeamStanding>> {
        let teams = self.tournaments.teams(tournament_id).await?;
        let records = self.scores.by_tournament(tournament_id).await?;
        Ok(leaderboard::aggregate(&records, &teams, match_filter))
    }

    async fn tournament_context(
        &self,
        match_id: MatchId,
    ) -> ScoreResult<(TournamentId, crate::points::PointsConfig)> {
        let match_ref = self
            .tournaments
            .match_by_id(match_id)
            .await?
            .ok_or(ScoreError::MissingContext { match_id })?;
        let tournament = self
            .tournaments
            .tournament(match_ref.tournament_id)
            .await?
            .ok_or(ScoreError::MissingContext { match_id })?;
        Ok((tournament.id, tournament.points_config))
    }

    async fn notify(&self, tournament_id: TournamentId) {
        if let Err(e) = self.notifier.standings_changed(tournament_id).await {
            log::warn!("standings notification failed for tournament {tournament_id}: {e}");
        }
    }
}

//! Aggregation output models.

use crate::models::{AssetRef, TeamId};
use serde::{Deserialize, Serialize};

/// A team's aggregated performance across some scope of matches.
///
/// Constructed on demand by [`super::aggregate`], never persisted.
/// Invariant: `position_points == total_points - total_kills`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStanding {
    pub team_id: TeamId,
    pub team_name: String,
    pub team_logo: Option<AssetRef>,
    pub total_points: i64,
    pub total_kills: u32,
    /// WWCD count: matches finished at placement 1.
    pub wins: u32,
    pub position_points: i64,
    pub matches_played: usize,
}

impl TeamStanding {
    /// An all-zero standing for a team with no recorded scores.
    pub fn empty(team_id: TeamId, team_name: impl Into<String>, team_logo: Option<AssetRef>) -> Self {
        Self {
            team_id,
            team_name: team_name.into(),
            team_logo,
            total_points: 0,
            total_kills: 0,
            wins: 0,
            position_points: 0,
            matches_played: 0,
        }
    }
}

//! Folding score records into ranked standings.

use super::models::TeamStanding;
use crate::models::{MatchId, ScoreRecord, Team};
use std::collections::BTreeSet;

/// Fold score records into ranked standings.
///
/// Every team in `teams` appears exactly once, all-zero when it has no
/// matching records (an enrolled team is always listed). When
/// `match_filter` is set, only records from that match count.
///
/// Ordering is descending by `(total_points, wins, position_points)`.
/// Beyond that tuple the order is pinned to team name ascending, then
/// team id ascending, so the output is deterministic regardless of
/// input record order.
pub fn aggregate(
    records: &[ScoreRecord],
    teams: &[Team],
    match_filter: Option<MatchId>,
) -> Vec<TeamStanding> {
    let mut standings: Vec<TeamStanding> = teams
        .iter()
        .map(|team| standing_for(team, records, match_filter))
        .collect();

    standings.sort_by(|a, b| {
        (b.total_points, b.wins, b.position_points)
            .cmp(&(a.total_points, a.wins, a.position_points))
            .then_with(|| a.team_name.cmp(&b.team_name))
            .then_with(|| a.team_id.cmp(&b.team_id))
    });
    standings
}

fn standing_for(team: &Team, records: &[ScoreRecord], match_filter: Option<MatchId>) -> TeamStanding {
    let mut standing = TeamStanding::empty(team.id, team.name.clone(), team.logo.clone());
    let mut matches = BTreeSet::new();

    for record in records.iter().filter(|r| {
        r.team_id == team.id && match_filter.is_none_or(|m| r.match_id == m)
    }) {
        standing.total_points += record.total_points;
        standing.total_kills += record.kills;
        if record.placement == 1 {
            standing.wins += 1;
        }
        matches.insert(record.match_id);
    }

    standing.matches_played = matches.len();
    standing.position_points = standing.total_points - i64::from(standing.total_kills);
    standing
}

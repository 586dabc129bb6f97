//! The scoring computation.

use super::schema::PointsConfig;

/// Compute a team's point total for one match result.
///
/// `kill points = kills * kill_multiplier`; placement points resolve
/// through exact entry, then first matching range, then 0. The result
/// is their sum. This function is invoked on every score write and the
/// returned value overwrites whatever total the caller supplied.
///
/// Malformed configuration is absorbed during
/// [`PointsConfig::from_value`]; by the time this runs there is nothing
/// left to fail on.
pub fn compute(kills: u32, placement: u32, config: &PointsConfig) -> i64 {
    let kill_points = i64::from(kills) * config.kill_multiplier;
    kill_points + config.placement_points(placement)
}

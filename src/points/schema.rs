//! Boundary parsing of the points-config document.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An inclusive placement range parsed from a `"lo-hi"` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementRange {
    pub lo: u32,
    pub hi: u32,
    pub points: i64,
}

impl PlacementRange {
    pub fn contains(&self, placement: u32) -> bool {
        self.lo <= placement && placement <= self.hi
    }
}

/// A tournament's point schedule, parsed once from its JSON document.
///
/// Parsing is total: any malformed input degrades to defaults rather
/// than failing. Keys that are neither a rank, a range, nor `"kill"`
/// are captured in `extras` and ignored by scoring, so documents may
/// carry additional fields without error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointsConfig {
    /// Points awarded per kill. Defaults to 1 when the `"kill"` key is
    /// absent or not coercible to an integer.
    pub kill_multiplier: i64,
    /// Exact-rank entries, e.g. `"1": 12`.
    pub exact: Vec<(u32, i64)>,
    /// Range entries in document order; the first matching range wins.
    pub ranges: Vec<PlacementRange>,
    /// Unrecognized keys, preserved untouched.
    pub extras: serde_json::Map<String, Value>,
}

impl Default for PointsConfig {
    fn default() -> Self {
        Self {
            kill_multiplier: 1,
            exact: Vec::new(),
            ranges: Vec::new(),
            extras: serde_json::Map::new(),
        }
    }
}

impl PointsConfig {
    /// Parse a points-config document.
    ///
    /// Never fails: a non-object document yields the all-default config,
    /// a non-numeric `"kill"` value falls back to multiplier 1, and
    /// malformed range keys (`"7-x"`) land in `extras`.
    pub fn from_value(value: &Value) -> Self {
        let mut config = Self::default();
        let Some(object) = value.as_object() else {
            return config;
        };

        for (key, raw) in object {
            if key == "kill" {
                config.kill_multiplier = coerce_int(raw).unwrap_or(1);
            } else if let Ok(rank) = key.parse::<u32>() {
                config.exact.push((rank, coerce_int(raw).unwrap_or(0)));
            } else if let Some(range) = parse_range(key, raw) {
                config.ranges.push(range);
            } else {
                config.extras.insert(key.clone(), raw.clone());
            }
        }
        config
    }

    /// Resolve the points for a placement: exact entry first, then the
    /// first matching range, then 0.
    pub fn placement_points(&self, placement: u32) -> i64 {
        if let Some((_, points)) = self.exact.iter().find(|(rank, _)| *rank == placement) {
            return *points;
        }
        self.ranges
            .iter()
            .find(|range| range.contains(placement))
            .map_or(0, |range| range.points)
    }

    /// Standard BGMI-style schedule: 1st=12, 2nd=9, 3rd=7, 4th=5,
    /// 5th=4, 6th-7th=3, 8th-10th=2, 11th-12th=1, 1 point per kill.
    pub fn standard() -> Self {
        Self::from_value(&serde_json::json!({
            "1": 12, "2": 9, "3": 7, "4": 5, "5": 4,
            "6-7": 3, "8-10": 2, "11-12": 1,
            "kill": 1,
        }))
    }
}

fn parse_range(key: &str, raw: &Value) -> Option<PlacementRange> {
    let (lo, hi) = key.split_once('-')?;
    let lo = lo.trim().parse::<u32>().ok()?;
    let hi = hi.trim().parse::<u32>().ok()?;
    Some(PlacementRange {
        lo,
        hi,
        points: coerce_int(raw).unwrap_or(0),
    })
}

/// Integer coercion matching the permissive document format: numbers
/// are truncated, strings are parsed, everything else is rejected.
fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_standard_schedule() {
        let config = PointsConfig::standard();
        assert_eq!(config.kill_multiplier, 1);
        assert_eq!(config.exact.len(), 5);
        assert_eq!(
            config.ranges,
            vec![
                PlacementRange { lo: 6, hi: 7, points: 3 },
                PlacementRange { lo: 8, hi: 10, points: 2 },
                PlacementRange { lo: 11, hi: 12, points: 1 },
            ]
        );
        assert!(config.extras.is_empty());
        assert_eq!(config.placement_points(1), 12);
        assert_eq!(config.placement_points(7), 3);
        assert_eq!(config.placement_points(13), 0);
    }

    #[test]
    fn test_non_object_document_yields_defaults() {
        for doc in [json!(null), json!(42), json!("{}"), json!([1, 2])] {
            let config = PointsConfig::from_value(&doc);
            assert_eq!(config, PointsConfig::default());
        }
    }

    #[test]
    fn test_non_numeric_kill_falls_back_to_one() {
        let config = PointsConfig::from_value(&json!({"kill": "lots"}));
        assert_eq!(config.kill_multiplier, 1);

        let config = PointsConfig::from_value(&json!({"kill": [2]}));
        assert_eq!(config.kill_multiplier, 1);
    }

    #[test]
    fn test_string_values_are_coerced() {
        let config = PointsConfig::from_value(&json!({"1": "12", "kill": "2"}));
        assert_eq!(config.kill_multiplier, 2);
        assert_eq!(config.placement_points(1), 12);
    }

    #[test]
    fn test_malformed_range_key_lands_in_extras() {
        let config = PointsConfig::from_value(&json!({"7-x": 2, "note": "ignore me"}));
        assert!(config.ranges.is_empty());
        assert_eq!(config.extras.len(), 2);
        assert_eq!(config.placement_points(8), 0);
    }

    #[test]
    fn test_first_matching_range_wins() {
        let config = PointsConfig::from_value(&json!({"5-10": 3, "8-12": 1}));
        assert_eq!(config.placement_points(8), 3);
        assert_eq!(config.placement_points(11), 1);
    }

    #[test]
    fn test_inverted_range_matches_nothing() {
        let config = PointsConfig::from_value(&json!({"10-7": 5}));
        assert_eq!(config.placement_points(8), 0);
    }
}

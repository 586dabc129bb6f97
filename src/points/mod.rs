//! Point schedules and the scoring engine.
//!
//! A tournament defines its scoring rules as an open-ended JSON document
//! (the "points config"): placement keys map a rank or an inclusive
//! `"lo-hi"` range to a point value, and the `"kill"` key gives the
//! per-kill multiplier. The document is parsed once at the boundary into
//! [`PointsConfig`]; [`compute`] turns a per-match result into a point
//! total and is the single source of truth for
//! [`crate::models::ScoreRecord::total_points`].
//!
//! Malformed configuration never fails scoring. Every unparseable piece
//! degrades to a documented default instead (multiplier 1, 0 placement
//! points).

pub mod engine;
pub mod schema;

pub use engine::compute;
pub use schema::{PlacementRange, PointsConfig};

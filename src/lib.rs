//! # Scoreboard Core
//!
//! Scoring, standings aggregation, and themed leaderboard rendering for
//! competitive tournaments.
//!
//! Organisers record per-match, per-team results; this crate turns raw
//! results into ranked standings and shareable graphics. The
//! surrounding application (accounts, CRUD, permissions, HTTP) is a
//! collaborator: it supplies validated records through the [`store`]
//! traits and consumes the outputs below.
//!
//! ## Pipeline
//!
//! ```text
//! score mutation ─▶ points::compute ─▶ leaderboard::aggregate ─▶ render
//!       │
//!       └─────────▶ notify (standings-changed fan-out to live viewers)
//! ```
//!
//! ## Core Modules
//!
//! - [`points`]: point schedules and the scoring engine
//! - [`leaderboard`]: pure aggregation into ranked [`leaderboard::TeamStanding`]s
//! - [`render`]: themed image rendering and bundle export
//! - [`notify`]: per-tournament change-notification fan-out
//! - [`scores`]: the mutation path tying the above together
//! - [`store`]: collaborator traits plus in-memory implementations
//!
//! ## Concurrency
//!
//! Scoring and aggregation are pure and safe for unlimited concurrent
//! use. Score writes for one `(match, team)` pair are serialized by the
//! record store. Rendering blocks on asset I/O and raster work; run it
//! via `spawn_blocking` or a worker. Notification publish never blocks
//! the mutation that triggered it.
//!
//! ## Example
//!
//! ```
//! use scoreboard_core::points::{self, PointsConfig};
//!
//! let config = PointsConfig::from_value(&serde_json::json!({
//!     "1": 10, "2": 6, "7-10": 1, "kill": 1,
//! }));
//! assert_eq!(points::compute(4, 1, &config), 14);
//! ```

/// Domain entities supplied by the surrounding application.
pub mod models;

/// Point schedules and the scoring engine.
pub mod points;

/// Standings aggregation.
pub mod leaderboard;

/// Themed image rendering and bundle export.
pub mod render;

/// Change-notification fan-out.
pub mod notify;

/// Score mutation path.
pub mod scores;

/// Collaborator interfaces and in-memory implementations.
pub mod store;

pub use leaderboard::{TeamStanding, aggregate};
pub use models::{
    AssetRef, Match, MatchId, ScoreRecord, Team, TeamId, Theme, ThemeId, Tournament, TournamentId,
};
pub use notify::{BroadcastNotifier, ChangeNotifier, NoopNotifier, StandingsChanged};
pub use points::{PointsConfig, compute};
pub use render::{LayoutConfig, LayoutRenderer, RenderError, RenderPage, RenderReport};
pub use scores::{ScoreError, ScoreManager};
pub use store::{AssetStore, ConflictPolicy, ScoreRepository, StoreError, TournamentRepository};

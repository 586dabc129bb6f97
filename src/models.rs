//! Domain entities shared across the scoreboard core.
//!
//! These records arrive pre-validated from the surrounding application
//! (account management, CRUD, permissions are collaborator concerns); the
//! core only reads them, with the single exception of [`ScoreRecord`],
//! which is mutated through [`crate::scores::ScoreManager`].

use crate::points::PointsConfig;
use crate::render::LayoutConfig;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tournament ID type
pub type TournamentId = Uuid;

/// Team ID type
pub type TeamId = Uuid;

/// Match ID type
pub type MatchId = Uuid;

/// Theme ID type
pub type ThemeId = Uuid;

/// Opaque reference to an image or font asset, resolved by an
/// [`crate::store::AssetStore`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetRef(pub String);

impl AssetRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AssetRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AssetRef {
    fn from(reference: &str) -> Self {
        Self(reference.to_owned())
    }
}

/// A team enrolled in a tournament.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// Logo asset, if the team uploaded one.
    pub logo: Option<AssetRef>,
}

impl Team {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            logo: None,
        }
    }

    pub fn with_logo(mut self, logo: impl Into<String>) -> Self {
        self.logo = Some(AssetRef::new(logo));
        self
    }
}

/// A single match within a tournament.
///
/// `(tournament_id, match_number)` uniqueness is enforced by the record
/// store, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub tournament_id: TournamentId,
    /// 1-indexed match number within the tournament.
    pub match_number: u32,
    pub map_name: String,
    pub created_at: DateTime<Utc>,
}

impl Match {
    pub fn new(tournament_id: TournamentId, match_number: u32, map_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            match_number,
            map_name: map_name.into(),
            created_at: Utc::now(),
        }
    }
}

/// One team's result in one match.
///
/// At most one record exists per `(match_id, team_id)` pair.
/// `total_points` is derived: it always equals
/// [`crate::points::compute`] over the owning tournament's
/// [`PointsConfig`] and is recomputed on every write, never trusted
/// from external input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub match_id: MatchId,
    pub team_id: TeamId,
    pub kills: u32,
    /// Finishing rank in the match, 1 = first place.
    pub placement: u32,
    pub total_points: i64,
}

/// A named visual template used to render standings for a tournament.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub id: ThemeId,
    pub tournament_id: TournamentId,
    pub name: String,
    /// Background image the standings are drawn onto.
    pub background: AssetRef,
    /// Optional TrueType/OpenType font asset.
    pub custom_font: Option<AssetRef>,
    pub teams_per_page: usize,
    pub layout: LayoutConfig,
}

impl Theme {
    pub const DEFAULT_TEAMS_PER_PAGE: usize = 20;

    pub fn new(
        tournament_id: TournamentId,
        name: impl Into<String>,
        background: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            name: name.into(),
            background: AssetRef::new(background),
            custom_font: None,
            teams_per_page: Self::DEFAULT_TEAMS_PER_PAGE,
            layout: LayoutConfig::default(),
        }
    }
}

/// A tournament aggregate: enrolled teams, point schedule, and themes.
///
/// The legacy fields carry the pre-theme single-image configuration some
/// tournaments still use; theme resolution falls back to them when no
/// [`Theme`] exists (see [`crate::render::LayoutRenderer::resolve_theme`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub points_config: PointsConfig,
    pub teams: Vec<Team>,
    pub themes: Vec<Theme>,
    pub legacy_background: Option<AssetRef>,
    pub legacy_layout: Option<LayoutConfig>,
}

impl Tournament {
    pub fn new(name: impl Into<String>, points_config: PointsConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            created_at: Utc::now(),
            points_config,
            teams: Vec::new(),
            themes: Vec::new(),
            legacy_background: None,
            legacy_layout: None,
        }
    }

    /// Look up a theme owned by this tournament.
    pub fn theme(&self, theme_id: ThemeId) -> Option<&Theme> {
        self.themes.iter().find(|t| t.id == theme_id)
    }
}

//! The layout-driven standings renderer.

use super::fonts::{self, ResolvedFont};
use super::layout::{Column, LayoutConfig};
use crate::leaderboard::TeamStanding;
use crate::models::{AssetRef, Theme, ThemeId, Tournament};
use crate::store::AssetStore;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage, imageops};
use std::io::Cursor;
use std::sync::Arc;
use thiserror::Error;

/// Rendering errors
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("asset unavailable: {what}: {reason}")]
    AssetUnavailable { what: String, reason: String },

    #[error("page {page} out of range ({pages} pages available)")]
    PageOutOfRange { page: usize, pages: usize },

    #[error("image encoding failed: {0}")]
    Encode(String),

    #[error("bundle write failed: {0}")]
    Bundle(String),
}

pub type RenderResult<T> = Result<T, RenderError>;

/// One rendered page: a flattened PNG plus its 1-indexed page number.
#[derive(Debug, Clone)]
pub struct RenderPage {
    pub page: usize,
    pub png: Vec<u8>,
}

/// Outcome of a batch render: the pages that succeeded plus the pages
/// that were skipped, each with the reason. A skipped page never
/// aborts the batch.
#[derive(Debug, Default)]
pub struct RenderReport {
    pub pages: Vec<RenderPage>,
    pub skipped: Vec<SkippedPage>,
}

#[derive(Debug)]
pub struct SkippedPage {
    pub page: usize,
    pub reason: RenderError,
}

/// A theme resolved down to the pieces rendering needs, whether it
/// came from a [`Theme`] or from a tournament's legacy fields.
#[derive(Debug, Clone)]
pub struct ResolvedTheme {
    pub background: AssetRef,
    pub custom_font: Option<AssetRef>,
    pub layout: LayoutConfig,
    pub teams_per_page: usize,
}

impl From<&Theme> for ResolvedTheme {
    fn from(theme: &Theme) -> Self {
        Self {
            background: theme.background.clone(),
            custom_font: theme.custom_font.clone(),
            layout: theme.layout.clone(),
            teams_per_page: theme.teams_per_page.max(1),
        }
    }
}

/// Projects ranked standings onto a themed background image.
///
/// Performs blocking asset I/O and CPU-bound raster work; callers on
/// latency-sensitive paths should move invocations off them (e.g.
/// `tokio::task::spawn_blocking`).
pub struct LayoutRenderer {
    assets: Arc<dyn AssetStore>,
}

impl LayoutRenderer {
    pub fn new(assets: Arc<dyn AssetStore>) -> Self {
        Self { assets }
    }

    /// Resolve which theme to render with.
    ///
    /// Precedence: the explicitly requested theme when it belongs to
    /// the tournament, then the tournament's first theme, then its
    /// legacy single-image fields. No background anywhere is a
    /// reported error, never a silent blank render.
    pub fn resolve_theme(
        tournament: &Tournament,
        theme_id: Option<ThemeId>,
    ) -> RenderResult<ResolvedTheme> {
        if let Some(id) = theme_id
            && let Some(theme) = tournament.theme(id)
        {
            return Ok(theme.into());
        }
        if let Some(theme) = tournament.themes.first() {
            return Ok(theme.into());
        }
        if let Some(background) = &tournament.legacy_background {
            return Ok(ResolvedTheme {
                background: background.clone(),
                custom_font: None,
                layout: tournament.legacy_layout.clone().unwrap_or_default(),
                teams_per_page: Theme::DEFAULT_TEAMS_PER_PAGE,
            });
        }
        Err(RenderError::AssetUnavailable {
            what: format!("tournament {} background", tournament.id),
            reason: "no theme and no legacy background image".to_owned(),
        })
    }

    /// Number of pages `standings` spans at `page_size`, with a floor
    /// of one page even when empty.
    pub fn page_count(standings_len: usize, page_size: usize) -> usize {
        standings_len.div_ceil(page_size.max(1)).max(1)
    }

    /// Render a single 1-indexed page.
    pub fn render(
        &self,
        theme: &ResolvedTheme,
        standings: &[TeamStanding],
        page_size: usize,
        page: usize,
    ) -> RenderResult<RenderPage> {
        let page_size = page_size.max(1);
        let pages = Self::page_count(standings.len(), page_size);
        if page == 0 || page > pages {
            return Err(RenderError::PageOutOfRange { page, pages });
        }

        let start = (page - 1) * page_size;
        let end = (start + page_size).min(standings.len());
        let rows = standings.get(start..end).unwrap_or(&[]);

        let mut canvas = self.load_background(&theme.background)?;
        let font = fonts::resolve(self.assets.as_ref(), theme.custom_font.as_ref());
        self.draw_rows(&mut canvas, theme, &font, rows, start);

        let mut png = Vec::new();
        DynamicImage::ImageRgba8(canvas)
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| RenderError::Encode(e.to_string()))?;
        Ok(RenderPage { page, png })
    }

    /// Render every page that contains data (minimum one page).
    ///
    /// Partial-failure policy for batch export: a failing page is
    /// logged and recorded in the report's `skipped` list while the
    /// remaining pages still render.
    pub fn render_all(
        &self,
        theme: &ResolvedTheme,
        standings: &[TeamStanding],
        page_size: usize,
    ) -> RenderReport {
        let mut report = RenderReport::default();
        for page in 1..=Self::page_count(standings.len(), page_size) {
            match self.render(theme, standings, page_size, page) {
                Ok(rendered) => report.pages.push(rendered),
                Err(reason) => {
                    log::warn!("skipping page {page}: {reason}");
                    report.skipped.push(SkippedPage { page, reason });
                }
            }
        }
        report
    }

    fn load_background(&self, background: &AssetRef) -> RenderResult<RgbaImage> {
        let bytes = self
            .assets
            .load(background)
            .map_err(|e| RenderError::AssetUnavailable {
                what: background.to_string(),
                reason: e.to_string(),
            })?;
        let decoded = image::load_from_memory(&bytes).map_err(|e| RenderError::AssetUnavailable {
            what: background.to_string(),
            reason: format!("decode failed: {e}"),
        })?;
        Ok(decoded.to_rgba8())
    }

    fn draw_rows(
        &self,
        canvas: &mut RgbaImage,
        theme: &ResolvedTheme,
        font: &ResolvedFont,
        rows: &[TeamStanding],
        start_index: usize,
    ) {
        let layout = &theme.layout;
        let color = Rgba(layout.rgba_color());

        for (row, standing) in rows.iter().enumerate() {
            // Ranks continue across pages: page 2 of 20 starts at 21.
            let rank = start_index + row + 1;
            let y = layout.start_y + row as i64 * layout.row_height;

            // Rank goes down first, then the logo pastes over it when
            // their offsets overlap.
            if let Some(offset) = layout.column_offset(Column::Rank) {
                self.draw_cell(canvas, layout, font, color, offset, y, &rank.to_string());
            }
            if let Some(offset) = layout.column_offset(Column::Logo) {
                self.draw_logo(canvas, layout, standing, offset, y);
            }

            for column in Column::TEXT_ORDER {
                let Some(offset) = layout.column_offset(column) else {
                    continue;
                };
                let text = match column {
                    Column::Rank => continue,
                    Column::Team => standing.team_name.clone(),
                    Column::Wwcd => standing.wins.to_string(),
                    Column::Matches => standing.matches_played.to_string(),
                    Column::PosPts => standing.position_points.to_string(),
                    Column::FinPts => standing.total_kills.to_string(),
                    Column::Total => standing.total_points.to_string(),
                    Column::Logo => continue,
                };
                self.draw_cell(canvas, layout, font, color, offset, y, &text);
            }
        }
    }

    fn draw_cell(
        &self,
        canvas: &mut RgbaImage,
        layout: &LayoutConfig,
        font: &ResolvedFont,
        color: Rgba<u8>,
        offset: i64,
        y: i64,
        text: &str,
    ) {
        let x = (layout.start_x + offset) as i32;
        let y = y as i32;
        let stroke = layout.stroke_width as i32;

        // Stroke is same-color offset redraws, thickening the glyphs
        // the way the legacy boards did.
        for dx in -stroke..=stroke {
            for dy in -stroke..=stroke {
                fonts::draw_text(canvas, color, x + dx, y + dy, layout.font_size, font, text);
            }
        }
    }

    /// Paste a team logo, vertically centred in the row. Load or
    /// decode failures are logged and skipped, never fatal.
    fn draw_logo(
        &self,
        canvas: &mut RgbaImage,
        layout: &LayoutConfig,
        standing: &TeamStanding,
        offset: i64,
        y: i64,
    ) {
        let Some(logo_ref) = &standing.team_logo else {
            return;
        };
        let bytes = match self.assets.load(logo_ref) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("logo {logo_ref} for {} unavailable: {e}", standing.team_name);
                return;
            }
        };
        let logo = match image::load_from_memory(&bytes) {
            Ok(img) => img.to_rgba8(),
            Err(e) => {
                log::warn!("logo {logo_ref} for {} undecodable: {e}", standing.team_name);
                return;
            }
        };

        let size = layout.logo_size.max(1);
        let resized = imageops::resize(&logo, size, size, imageops::FilterType::Lanczos3);
        let logo_y = y + (layout.row_height - i64::from(size)) / 2 + layout.logo_y_offset;
        imageops::overlay(canvas, &resized, layout.start_x + offset, logo_y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::points::PointsConfig;
    use crate::store::MemoryAssets;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let canvas = RgbaImage::from_pixel(width, height, Rgba([10, 10, 40, 255]));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(canvas)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn standing(name: &str, points: i64) -> TeamStanding {
        let mut s = TeamStanding::empty(uuid::Uuid::new_v4(), name, None);
        s.total_points = points;
        s.position_points = points;
        s
    }

    fn renderer_with_background() -> (LayoutRenderer, ResolvedTheme) {
        let assets = MemoryAssets::new();
        assets.insert("bg.png", png_bytes(400, 300));
        let theme = ResolvedTheme {
            background: AssetRef::new("bg.png"),
            custom_font: None,
            layout: LayoutConfig::default(),
            teams_per_page: 20,
        };
        (LayoutRenderer::new(Arc::new(assets)), theme)
    }

    #[test]
    fn test_page_count_floor_is_one() {
        assert_eq!(LayoutRenderer::page_count(0, 20), 1);
        assert_eq!(LayoutRenderer::page_count(20, 20), 1);
        assert_eq!(LayoutRenderer::page_count(21, 20), 2);
        assert_eq!(LayoutRenderer::page_count(45, 20), 3);
        // Degenerate page size is clamped rather than dividing by zero.
        assert_eq!(LayoutRenderer::page_count(3, 0), 3);
    }

    #[test]
    fn test_render_single_page_produces_png() {
        let (renderer, theme) = renderer_with_background();
        let standings = vec![standing("Alpha", 20), standing("Bravo", 10)];

        let page = renderer.render(&theme, &standings, 20, 1).unwrap();
        assert_eq!(page.page, 1);
        // PNG magic prefix.
        assert_eq!(&page.png[..8], &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n']);
    }

    #[test]
    fn test_page_out_of_range() {
        let (renderer, theme) = renderer_with_background();
        let standings = vec![standing("Alpha", 20)];

        let err = renderer.render(&theme, &standings, 20, 2).unwrap_err();
        assert!(matches!(err, RenderError::PageOutOfRange { page: 2, pages: 1 }));
        let err = renderer.render(&theme, &standings, 20, 0).unwrap_err();
        assert!(matches!(err, RenderError::PageOutOfRange { page: 0, .. }));
    }

    #[test]
    fn test_render_all_empty_standings_is_one_background_page() {
        let (renderer, theme) = renderer_with_background();
        let report = renderer.render_all(&theme, &[], 20);
        assert_eq!(report.pages.len(), 1);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn test_render_all_pagination_sizes() {
        let (renderer, theme) = renderer_with_background();
        let standings: Vec<TeamStanding> =
            (0..45).map(|i| standing(&format!("Team {i}"), 45 - i)).collect();

        let report = renderer.render_all(&theme, &standings, 20);
        assert_eq!(report.pages.len(), 3);
        assert_eq!(
            report.pages.iter().map(|p| p.page).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_missing_background_is_asset_unavailable() {
        let renderer = LayoutRenderer::new(Arc::new(MemoryAssets::new()));
        let theme = ResolvedTheme {
            background: AssetRef::new("gone.png"),
            custom_font: None,
            layout: LayoutConfig::default(),
            teams_per_page: 20,
        };

        let err = renderer.render(&theme, &[], 20, 1).unwrap_err();
        assert!(matches!(err, RenderError::AssetUnavailable { .. }));
    }

    #[test]
    fn test_missing_logo_never_fails_the_page() {
        let (renderer, theme) = renderer_with_background();
        let mut theme = theme;
        theme.layout.columns = Some(
            [(Column::Logo, 10), (Column::Team, 120)]
                .into_iter()
                .collect(),
        );
        let mut s = standing("Alpha", 20);
        s.team_logo = Some(AssetRef::new("logos/gone.png"));

        assert!(renderer.render(&theme, &[s], 20, 1).is_ok());
    }

    #[test]
    fn test_theme_resolution_precedence() {
        let mut tournament = Tournament::new("Cup", PointsConfig::standard());

        // Nothing configured at all: reported error.
        assert!(matches!(
            LayoutRenderer::resolve_theme(&tournament, None),
            Err(RenderError::AssetUnavailable { .. })
        ));

        // Legacy background is the last fallback.
        tournament.legacy_background = Some(AssetRef::new("legacy.png"));
        let resolved = LayoutRenderer::resolve_theme(&tournament, None).unwrap();
        assert_eq!(resolved.background.as_str(), "legacy.png");

        // A theme beats legacy; an explicit id beats the first theme.
        tournament.themes.push(Theme::new(tournament.id, "First", "first.png"));
        let second = Theme::new(tournament.id, "Second", "second.png");
        let second_id = second.id;
        tournament.themes.push(second);

        let resolved = LayoutRenderer::resolve_theme(&tournament, None).unwrap();
        assert_eq!(resolved.background.as_str(), "first.png");
        let resolved = LayoutRenderer::resolve_theme(&tournament, Some(second_id)).unwrap();
        assert_eq!(resolved.background.as_str(), "second.png");

        // A foreign theme id falls through to the first theme.
        let resolved = LayoutRenderer::resolve_theme(&tournament, Some(ThemeId::new_v4())).unwrap();
        assert_eq!(resolved.background.as_str(), "first.png");
    }
}

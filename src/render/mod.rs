//! Layout-driven image rendering of standings.
//!
//! A theme supplies a background image, an optional font, and a column
//! layout; the renderer projects ranked standings onto it, one page per
//! `teams_per_page` rows, and the bundle writer packs a full page set
//! into a zip archive for download.
//!
//! Rendering does blocking asset I/O and CPU-bound raster work, so it
//! belongs off latency-sensitive request paths.

pub mod bundle;
pub mod fonts;
pub mod layout;
pub mod renderer;

pub use bundle::write_bundle;
pub use layout::{Column, LayoutConfig};
pub use renderer::{
    LayoutRenderer, RenderError, RenderPage, RenderReport, RenderResult, ResolvedTheme,
    SkippedPage,
};

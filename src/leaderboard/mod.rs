//! Standings aggregation.
//!
//! Folds score records into ranked [`TeamStanding`]s. Pure computation,
//! no side effects: safe to call repeatedly and concurrently for
//! read-only views, and consumed both by the JSON standings endpoint
//! and by [`crate::render::LayoutRenderer`].

pub mod aggregator;
pub mod models;

pub use aggregator::aggregate;
pub use models::TeamStanding;

//! Score mutation path: recompute-on-write, conflict policy, and
//! notification fan-out.

pub mod manager;

pub use manager::{ScoreError, ScoreManager, ScoreResult};

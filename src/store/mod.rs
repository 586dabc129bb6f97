//! Collaborator interfaces: record store and asset store.
//!
//! The core owns no persistence. Tournaments, matches, and score
//! records live behind the async repository traits in [`repository`],
//! and image/font bytes behind the blocking [`AssetStore`] trait.
//! [`memory`] provides in-process implementations used throughout the
//! test suites and suitable for small single-node deployments.

pub mod memory;
pub mod repository;

pub use memory::{MemoryAssets, MemoryStore};
pub use repository::{
    AssetError, AssetStore, ConflictPolicy, FsAssets, ScoreRepository, StoreError, StoreResult,
    TournamentRepository,
};

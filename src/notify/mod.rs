//! Change notification fan-out.
//!
//! Every durable score mutation publishes a lightweight "standings
//! changed" event on the owning tournament's topic. The event carries
//! no payload beyond the tournament id: subscribers re-fetch standings
//! rather than receive a diff. Delivery is best-effort and asynchronous
//! relative to the mutation that triggered it; a failed publish is
//! logged and never fails the mutation (see
//! [`crate::scores::ScoreManager`]).
//!
//! The notifier is an injected dependency, not a process-wide broker
//! handle. [`BroadcastNotifier`] is the in-process implementation;
//! deployments with an external pub/sub transport implement
//! [`ChangeNotifier`] over it instead.

use crate::models::TournamentId;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{RwLock, broadcast};

/// Per-topic buffer; a lagging viewer misses intermediate events and
/// re-fetches on the next one, so a modest buffer is plenty.
const TOPIC_CAPACITY: usize = 128;

/// Notification errors
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("transport rejected publish for tournament {0}")]
    Transport(TournamentId),
}

/// The "standings changed" event. Scope identifier only, no diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandingsChanged {
    pub tournament_id: TournamentId,
}

/// Fire-and-forget publisher of standings-changed events.
///
/// One best-effort attempt per mutation; implementations must not
/// retry indefinitely or block on subscriber delivery.
#[async_trait]
pub trait ChangeNotifier: Send + Sync {
    async fn standings_changed(&self, tournament_id: TournamentId) -> Result<(), NotifyError>;
}

/// No-op notifier for wiring the mutation path without live viewers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

#[async_trait]
impl ChangeNotifier for NoopNotifier {
    async fn standings_changed(&self, _tournament_id: TournamentId) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// In-process fan-out over per-tournament broadcast channels.
#[derive(Debug, Clone, Default)]
pub struct BroadcastNotifier {
    topics: Arc<RwLock<HashMap<TournamentId, broadcast::Sender<StandingsChanged>>>>,
}

impl BroadcastNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to a tournament's standings-changed topic.
    ///
    /// Creates the topic on first use; the channel stays alive for the
    /// notifier's lifetime, so publishes before the first subscriber
    /// are simply dropped (viewers fetch current standings on attach
    /// anyway).
    pub async fn subscribe(&self, tournament_id: TournamentId) -> broadcast::Receiver<StandingsChanged> {
        let mut topics = self.topics.write().await;
        topics
            .entry(tournament_id)
            .or_insert_with(|| broadcast::channel(TOPIC_CAPACITY).0)
            .subscribe()
    }

    /// Number of live subscribers on a tournament's topic.
    pub async fn subscriber_count(&self, tournament_id: TournamentId) -> usize {
        let topics = self.topics.read().await;
        topics.get(&tournament_id).map_or(0, |tx| tx.receiver_count())
    }
}

#[async_trait]
impl ChangeNotifier for BroadcastNotifier {
    async fn standings_changed(&self, tournament_id: TournamentId) -> Result<(), NotifyError> {
        let topics = self.topics.read().await;
        if let Some(tx) = topics.get(&tournament_id) {
            // A send error only means nobody is listening right now.
            if tx.send(StandingsChanged { tournament_id }).is_err() {
                log::debug!("no live viewers for tournament {tournament_id}");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_subscribers_receive_scoped_events() {
        let notifier = BroadcastNotifier::new();
        let cup = Uuid::new_v4();
        let other = Uuid::new_v4();

        let mut cup_rx = notifier.subscribe(cup).await;
        let mut other_rx = notifier.subscribe(other).await;

        notifier.standings_changed(cup).await.unwrap();

        let event = cup_rx.recv().await.unwrap();
        assert_eq!(event.tournament_id, cup);
        assert!(other_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_fan_out_reaches_every_subscriber() {
        let notifier = BroadcastNotifier::new();
        let cup = Uuid::new_v4();

        let mut a = notifier.subscribe(cup).await;
        let mut b = notifier.subscribe(cup).await;
        assert_eq!(notifier.subscriber_count(cup).await, 2);

        notifier.standings_changed(cup).await.unwrap();
        assert_eq!(a.recv().await.unwrap().tournament_id, cup);
        assert_eq!(b.recv().await.unwrap().tournament_id, cup);
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_ok() {
        let notifier = BroadcastNotifier::new();
        assert!(notifier.standings_changed(Uuid::new_v4()).await.is_ok());
    }
}

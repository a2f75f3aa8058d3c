use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use url::Url;

use crate::delivery::deliver;
use crate::health::HealthMonitor;
use crate::message::Message;

/// Fans a message out to one delivery worker per secondary and blocks the
/// caller until `required_acks` of them have confirmed persistence.
/// Workers that haven't acked by the time this returns keep running in the
/// background — there is no reference back to the caller past this point.
pub struct ReplicationCoordinator {
    client: reqwest::Client,
    secondaries: Vec<Url>,
    health: Arc<HealthMonitor>,
    backoff_base: Duration,
    request_timeout: Duration,
    shutdown: watch::Receiver<bool>,
}

impl ReplicationCoordinator {
    pub fn new(
        client: reqwest::Client,
        secondaries: Vec<Url>,
        health: Arc<HealthMonitor>,
        backoff_base: Duration,
        request_timeout: Duration,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        ReplicationCoordinator {
            client,
            secondaries,
            health,
            backoff_base,
            request_timeout,
            shutdown,
        }
    }

    pub fn secondary_count(&self) -> usize {
        self.secondaries.len()
    }

    /// `required_acks` must be the client's `w - 1` (the primary's own write
    /// is the first ack) and must be `<= secondary_count()`. A caller passing
    /// more than that is an internal logic bug — the HTTP handler is
    /// responsible for rejecting an out-of-range `w` before ever calling in —
    /// so it's asserted, not returned as an error.
    pub async fn replicate(&self, message: &Message, required_acks: usize) {
        assert!(
            required_acks <= self.secondaries.len(),
            "required_acks {required_acks} exceeds secondary count {}",
            self.secondaries.len()
        );

        let n = self.secondaries.len();
        let (tx, mut rx) = mpsc::channel::<()>(n.max(1));

        for secondary in &self.secondaries {
            tokio::spawn(deliver(
                self.client.clone(),
                secondary.clone(),
                message.clone(),
                self.backoff_base,
                self.request_timeout,
                self.health.clone(),
                tx.clone(),
                self.shutdown.clone(),
            ));
        }
        drop(tx);

        for _ in 0..required_acks {
            // Workers hold their own sender clones, so this can only return
            // `None` if every worker has exited without sending — which
            // can't happen before its ack, since delivery retries forever.
            rx.recv().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc as StdArc;
    use std::time::Duration;

    async fn monitor_with(secondaries: Vec<Url>) -> StdArc<HealthMonitor> {
        let (monitor, _handle) = HealthMonitor::start(
            reqwest::Client::new(),
            secondaries,
            Duration::from_secs(3600),
            Duration::from_millis(50),
        )
        .await;
        monitor
    }

    #[tokio::test]
    async fn w_equals_zero_returns_immediately_without_waiting() {
        let secondaries = vec!["http://127.0.0.1:65530".parse().unwrap()];
        let health = monitor_with(secondaries.clone()).await;
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        let coordinator = ReplicationCoordinator::new(
            reqwest::Client::new(),
            secondaries,
            health,
            Duration::from_millis(10),
            Duration::from_millis(20),
            shutdown_rx,
        );

        let message = Message { id: 0, payload: std::sync::Arc::from("x") };
        tokio::time::timeout(Duration::from_millis(200), coordinator.replicate(&message, 0))
            .await
            .expect("replicate(w=0) must not block the caller");
    }

    #[tokio::test]
    #[should_panic(expected = "required_acks")]
    async fn required_acks_above_secondary_count_panics() {
        let health = monitor_with(vec![]).await;
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        let coordinator = ReplicationCoordinator::new(
            reqwest::Client::new(),
            vec![],
            health,
            Duration::from_millis(10),
            Duration::from_millis(20),
            shutdown_rx,
        );
        let message = Message { id: 0, payload: std::sync::Arc::from("x") };
        coordinator.replicate(&message, 1).await;
    }
}

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Alive,
    Dead,
}

/// Periodically probes a fixed set of secondaries and exposes their last
/// observed liveness. Status is a hint consumed by the delivery worker's
/// skip-if-dead check — never a correctness-load-bearing value, so probe
/// overlap resolving last-write-wins is acceptable.
pub struct HealthMonitor {
    client: reqwest::Client,
    secondaries: Vec<Url>,
    request_timeout: Duration,
    status: Mutex<HashMap<Url, Status>>,
    shutdown_tx: watch::Sender<bool>,
}

impl HealthMonitor {
    /// Spawns the background probe loop. Does not return until every
    /// secondary has a status from a synchronous initial sweep, which avoids
    /// a race where a delivery worker consults status before any probe ran.
    pub async fn start(
        client: reqwest::Client,
        secondaries: Vec<Url>,
        period: Duration,
        request_timeout: Duration,
    ) -> (Arc<Self>, JoinHandle<()>) {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let monitor = Arc::new(HealthMonitor {
            client,
            secondaries,
            request_timeout,
            status: Mutex::new(HashMap::new()),
            shutdown_tx,
        });

        monitor.sweep().await;

        let loop_monitor = monitor.clone();
        let handle = tokio::spawn(async move { loop_monitor.run(period, shutdown_rx).await });

        (monitor, handle)
    }

    async fn run(self: Arc<Self>, period: Duration, mut shutdown_rx: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(period);
        ticker.tick().await; // first tick fires immediately; we already swept.
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.sweep().await;
                }
                _ = shutdown_rx.changed() => {
                    if *shutdown_rx.borrow() {
                        debug!("health monitor shutting down");
                        return;
                    }
                }
            }
        }
    }

    async fn sweep(&self) {
        let probes = self.secondaries.iter().map(|url| self.probe_one(url));
        futures::future::join_all(probes).await;
    }

    async fn probe_one(&self, url: &Url) {
        let target = url
            .join("/api/v1/healthcheck")
            .expect("secondary base url must be a valid base");
        let result = self
            .client
            .get(target)
            .timeout(self.request_timeout)
            .send()
            .await;

        let status = match result {
            Ok(resp) if resp.status().is_success() => Status::Alive,
            Ok(resp) => {
                warn!(%url, status = %resp.status(), "healthcheck returned non-200");
                Status::Dead
            }
            Err(err) => {
                warn!(%url, error = %err, "healthcheck request failed");
                Status::Dead
            }
        };

        self.status.lock().unwrap().insert(url.clone(), status);
    }

    /// Last observed status for `url`. Asking about a url that was never
    /// configured is a programmer error.
    pub fn status(&self, url: &Url) -> Status {
        *self
            .status
            .lock()
            .unwrap()
            .get(url)
            .unwrap_or_else(|| panic!("unknown secondary url queried: {url}"))
    }

    /// True iff every known secondary is currently `Dead`.
    pub fn no_quorum(&self) -> bool {
        let status = self.status.lock().unwrap();
        !status.is_empty() && status.values().all(|s| *s == Status::Dead)
    }

    /// Idempotent, cooperative shutdown: the running loop exits on its next
    /// tick or select wakeup. In-flight probes may finish but no new ones
    /// are launched after this returns.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }
}

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::sync::{mpsc, watch};
use tracing::{info, warn};
use url::Url;

use crate::health::{HealthMonitor, Status};
use crate::message::{Message, ReplicateRequest};

/// No operator-configurable ceiling is specified by the retry-forever
/// contract, but an uncapped `base * 2^n` overflows `Duration` after roughly
/// 32 attempts at any realistic base. Capping here is purely a defense
/// against that overflow, not a caller-visible deadline.
pub const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// `backoff(n) = base * 2^n + U(-base/2, +base/2)`, clamped to `MAX_BACKOFF`.
/// The jitter decorrelates retries across the workers fanned out from one
/// client request.
pub fn backoff(base: Duration, attempt: u32) -> Duration {
    let doubled = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
    let grown = base.saturating_mul(doubled).min(MAX_BACKOFF);

    let half_base_millis = (base.as_millis() / 2) as i64;
    let jitter_millis = if half_base_millis == 0 {
        0
    } else {
        rand::thread_rng().gen_range(-half_base_millis..=half_base_millis)
    };

    if jitter_millis >= 0 {
        grown
            .saturating_add(Duration::from_millis(jitter_millis as u64))
            .min(MAX_BACKOFF)
    } else {
        grown.saturating_sub(Duration::from_millis((-jitter_millis) as u64))
    }
}

/// One delivery task per `(secondary, message)`. Retries forever,
/// skipping the send attempt while the health monitor reports the secondary
/// `Dead`, until it gets a 200 back. The worker sends the identical payload
/// on every attempt; de-duplication lives entirely on the secondary, so a
/// retry racing a previously-timed-out-but-actually-delivered attempt is
/// harmless.
pub async fn deliver(
    client: reqwest::Client,
    secondary: Url,
    message: Message,
    backoff_base: Duration,
    request_timeout: Duration,
    health: Arc<HealthMonitor>,
    acked: mpsc::Sender<()>,
    mut shutdown: watch::Receiver<bool>,
) {
    let body = ReplicateRequest::from(&message);
    let target = secondary
        .join("/api/v1/internal/replicate")
        .expect("secondary base url must be a valid base");

    let mut attempt: u32 = 0;
    loop {
        if *shutdown.borrow() {
            return;
        }

        if health.status(&secondary) != Status::Dead {
            let result = client
                .post(target.clone())
                .json(&body)
                .timeout(request_timeout)
                .send()
                .await;

            match result {
                Ok(resp) if resp.status().is_success() => {
                    // Best-effort: the coordinator may have already stopped
                    // listening once its required-ack count was reached.
                    let _ = acked.try_send(());
                    return;
                }
                Ok(resp) => {
                    warn!(%secondary, id = body.id, status = %resp.status(), "replicate rejected");
                }
                Err(err) => {
                    warn!(%secondary, id = body.id, error = %err, "replicate request failed");
                }
            }
        } else {
            info!(%secondary, id = body.id, "skipping send, secondary is dead");
        }

        let sleep = backoff(backoff_base, attempt);
        attempt = attempt.saturating_add(1);

        tokio::select! {
            _ = tokio::time::sleep(sleep) => {}
            _ = shutdown.changed() => {
                if *shutdown.borrow() {
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_shape_matches_the_formula_bounds() {
        let base = Duration::from_millis(10);
        for attempt in 0..10 {
            let half = base.as_millis() / 2;
            let grown = base.saturating_mul(2u32.pow(attempt)).min(MAX_BACKOFF);
            let lower = grown.saturating_sub(Duration::from_millis(half as u64));
            let upper = grown.saturating_add(Duration::from_millis(half as u64)).min(MAX_BACKOFF);

            for _ in 0..50 {
                let sample = backoff(base, attempt);
                assert!(sample >= lower, "attempt {attempt}: {sample:?} < {lower:?}");
                assert!(sample <= upper, "attempt {attempt}: {sample:?} > {upper:?}");
            }
        }
    }

    #[test]
    fn backoff_never_exceeds_the_cap_even_after_many_attempts() {
        let base = Duration::from_millis(10);
        for attempt in [20u32, 32, 64, 100] {
            assert!(backoff(base, attempt) <= MAX_BACKOFF);
        }
    }
}

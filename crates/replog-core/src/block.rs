use tokio::sync::{Mutex, Notify};

/// Test-only failure-injection hook. Emulates a partitioned secondary:
/// while armed, the secondary's health endpoint answers 406 (so the health
/// monitor marks it `Dead` and delivery workers stop sending) and `apply`
/// blocks before touching the log.
#[derive(Default)]
pub struct ReplicationBlock {
    state: Mutex<BlockState>,
    notify: Notify,
}

#[derive(Default)]
struct BlockState {
    should_wait: bool,
    waiters: u32,
}

impl ReplicationBlock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called at the top of the applier and by the health endpoint. Blocks
    /// while armed; unblocks once `set_enabled(false)` broadcasts.
    pub async fn block_if_needed(&self) {
        loop {
            {
                let mut state = self.state.lock().await;
                if !state.should_wait {
                    return;
                }
                state.waiters += 1;
            }

            self.notify.notified().await;

            let mut state = self.state.lock().await;
            state.waiters -= 1;
            if !state.should_wait {
                return;
            }
            // Spurious wake (armed again between our wait and now) — loop.
        }
    }

    /// Arms or disarms the hook. Disarming broadcasts the wake-up and then
    /// waits for every previously-blocked caller to observe it and drain,
    /// so a caller of `set_enabled(false)` knows all queued requests have
    /// proceeded by the time this returns.
    pub async fn set_enabled(&self, enabled: bool) {
        {
            let mut state = self.state.lock().await;
            state.should_wait = enabled;
        }
        if !enabled {
            self.notify.notify_waiters();
            loop {
                let waiters = self.state.lock().await.waiters;
                if waiters == 0 {
                    break;
                }
                tokio::task::yield_now().await;
            }
        }
    }

    pub async fn is_waiting(&self) -> bool {
        self.state.lock().await.should_wait
    }
}

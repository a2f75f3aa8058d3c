use std::sync::Arc;

use replog_core::{Log, ReplicationCoordinator};

#[derive(Clone)]
pub struct PrimaryState {
    pub log: Arc<Log>,
    pub coordinator: Arc<ReplicationCoordinator>,
    /// `N + 1`: the largest `w` the primary will accept.
    pub max_w: u32,
}

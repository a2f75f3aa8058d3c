use std::sync::Arc;

use replog_core::{Log, ReplicationBlock};

#[derive(Clone)]
pub struct SecondaryState {
    pub log: Arc<Log>,
    pub block: Arc<ReplicationBlock>,
}

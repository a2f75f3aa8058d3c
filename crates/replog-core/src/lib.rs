//! Core primitives for a single-master replicated append-only log: the
//! ordered log store, the health monitor, the retrying delivery worker, the
//! quorum-ack replication coordinator, and the test-only failure-injection
//! hook. HTTP wiring lives in the `replog-primary` and `replog-secondary`
//! binary crates, which depend on this one.

pub mod block;
pub mod config;
pub mod coordinator;
pub mod delivery;
pub mod error;
pub mod health;
pub mod log;
pub mod message;

pub use block::ReplicationBlock;
pub use config::{parse_secondary_urls, Mode};
pub use coordinator::ReplicationCoordinator;
pub use delivery::{backoff, MAX_BACKOFF};
pub use error::AppError;
pub use health::{HealthMonitor, Status};
pub use log::Log;
pub use message::{AppendRequest, Message, MessagesResponse, ReplicateRequest};

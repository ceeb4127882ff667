//! Pending-action pool and its service binding.
//!
//! The pool buffers validated transfers and votes per originating account
//! until the block proposer picks them and a committed block retires them.
//!
//! ## Data Flow
//!
//! 1. Action Ingestion: the network layer submits deserialized actions
//! 2. Validation: signature and provenance checks via the [`crate::validation::Validator`]
//! 3. Buffering: accepted actions land in their sender's nonce-keyed queue
//! 4. Picking: the proposer takes non-destructive snapshots for candidate blocks
//! 5. Commit Cleanup: committed actions are removed, empty queues dropped
//!
//! ## Thread Safety
//!
//! The pool itself is safe for concurrent use with per-account locking
//! granularity. The optional [`ActPoolService`] additionally runs the pool
//! behind lock-free ring buffers on a dedicated OS thread, so collaborators
//! never contend with each other directly.

mod account_queue;
mod pool;
mod service;
mod types;

pub use account_queue::{ACCOUNT_QUEUE_CAPACITY, AccountQueue};
pub use pool::{ActionPool, PoolStats};
pub use service::{ActPoolChannels, ActPoolService};
pub use types::{CommittedNotification, PickRequest, PickResponse, RejectReason};

//! Pool type definitions: the rejection taxonomy and the messages passed
//! through the service's ring buffers.

use thiserror::Error;

use crate::state::action::{Action, Transfer, Vote};

/// Why the pool refused an action.
///
/// All four rejections are terminal for that action instance, leave the pool
/// unchanged, and are returned synchronously to the inserting path. The
/// network layer may log them but must not retry the same action.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Signature missing, malformed, or failing verification
    #[error("Action is unsigned or its signature does not verify")]
    Unsigned,

    /// Coinbase flag set on an externally submitted transfer
    #[error("Coinbase transfer submitted from outside block assembly")]
    IllegalCoinbase,

    /// The nonce slot is already occupied for this account
    #[error("Duplicate nonce for this account")]
    DuplicateNonce,

    /// The account's queue is at capacity
    #[error("Account queue is full")]
    Full,
}

/// Request from consensus for the currently pending actions.
///
/// Sent by the block proposer when it needs candidate content for a block.
#[derive(Debug, Clone)]
pub struct PickRequest {
    /// Height of the block being proposed (for context/logging)
    pub height: u64,
}

/// Response carrying a snapshot of the pool's pending actions.
///
/// Transfers and votes partition the pending set; each account's actions
/// appear in ascending nonce order, accounts in ascending address order.
#[derive(Debug, Clone)]
pub struct PickResponse {
    /// Height echoed from the request
    pub height: u64,
    /// Pending transfers
    pub transfers: Vec<Transfer>,
    /// Pending votes
    pub votes: Vec<Vote>,
}

/// Notification from consensus that a block was committed.
///
/// The pool removes the committed actions so they cannot be picked again.
/// A proposed-but-unfinalized block must not produce this notification.
#[derive(Debug, Clone)]
pub struct CommittedNotification {
    /// Height of the committed block
    pub height: u64,
    /// Actions included in the committed block
    pub actions: Vec<Action>,
}

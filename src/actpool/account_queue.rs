//! Per-account buffer of pending actions.

use std::collections::{BTreeMap, BTreeSet};

use super::types::RejectReason;
use crate::state::action::Action;

/// Maximum number of pending actions a single account may hold.
pub const ACCOUNT_QUEUE_CAPACITY: usize = 256;

/// [`AccountQueue`] holds one account's pending actions keyed by nonce.
///
/// Each nonce slot is filled at most once: the first accepted action wins
/// and is never overwritten, even by a later arrival. The queue rejects
/// inserts beyond capacity instead of evicting older entries.
#[derive(Debug)]
pub struct AccountQueue {
    /// Pending actions by nonce; iteration order is ascending nonce
    items: BTreeMap<u64, Action>,
    /// Fixed maximum number of entries
    capacity: usize,
}

impl AccountQueue {
    /// Creates an empty queue with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            items: BTreeMap::new(),
            capacity,
        }
    }

    /// Attempts to buffer an action.
    ///
    /// Fails with [`RejectReason::DuplicateNonce`] if the nonce slot is
    /// occupied, or [`RejectReason::Full`] if the queue is at capacity and
    /// the nonce is new.
    pub fn insert(&mut self, action: Action) -> Result<(), RejectReason> {
        if self.items.contains_key(&action.nonce()) {
            return Err(RejectReason::DuplicateNonce);
        }
        if self.items.len() >= self.capacity {
            return Err(RejectReason::Full);
        }
        self.items.insert(action.nonce(), action);
        Ok(())
    }

    /// Returns all held actions in ascending nonce order. Read-only.
    pub fn pick(&self) -> Vec<Action> {
        self.items.values().cloned().collect()
    }

    /// Removes the given nonces if present; unknown nonces are ignored.
    ///
    /// Returns whether the queue is now empty.
    pub fn remove(&mut self, nonces: &BTreeSet<u64>) -> bool {
        for nonce in nonces {
            self.items.remove(nonce);
        }
        self.items.is_empty()
    }

    /// Number of pending actions.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when no actions are pending.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

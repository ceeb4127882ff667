//! The pending-action pool.
//!
//! One logical [`ActionPool`] exists per node. The network layer inserts
//! gossiped actions, the block proposer takes non-destructive snapshots,
//! and the commit path removes actions once a block is finalized.
//!
//! ## Locking
//!
//! Accounts live in a sharded map, so mutation takes a write lock only on
//! the touched account's shard: inserts for different accounts proceed in
//! parallel while inserts for the same account are serialized. Snapshot
//! assembly locks one account at a time and never holds a lock across the
//! whole pool, so a long pick cannot stall ingestion.

use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use slog::Logger;

use super::account_queue::{ACCOUNT_QUEUE_CAPACITY, AccountQueue};
use super::types::RejectReason;
use crate::state::action::{Action, Transfer, Vote};
use crate::state::address::Address;
use crate::validation::Validator;

/// [`ActionPool`] buffers validated, not-yet-committed actions per account.
pub struct ActionPool {
    /// Per-account queues; an address is present iff its queue is non-empty
    accounts: DashMap<Address, AccountQueue>,
    /// Admission rules applied before any action is buffered
    validator: Validator,
    /// Capacity of each account's queue
    queue_capacity: usize,
    /// Statistics: actions accepted since creation
    total_accepted: AtomicU64,
    /// Statistics: actions rejected since creation
    total_rejected: AtomicU64,
    /// Statistics: actions removed by commit resets
    total_committed: AtomicU64,
    logger: Logger,
}

impl ActionPool {
    /// Creates a pool with the default per-account capacity.
    pub fn new(validator: Validator, logger: Logger) -> Self {
        Self::with_queue_capacity(validator, ACCOUNT_QUEUE_CAPACITY, logger)
    }

    /// Creates a pool with a custom per-account capacity.
    pub fn with_queue_capacity(validator: Validator, queue_capacity: usize, logger: Logger) -> Self {
        Self {
            accounts: DashMap::new(),
            validator,
            queue_capacity,
            total_accepted: AtomicU64::new(0),
            total_rejected: AtomicU64::new(0),
            total_committed: AtomicU64::new(0),
            logger,
        }
    }

    /// Validates an action and buffers it in its sender's queue.
    ///
    /// Rejection is final for this action instance and leaves the pool
    /// unchanged; the caller must not retry. The sender's queue is created
    /// lazily on its first accepted action.
    pub fn insert(&self, action: Action) -> Result<(), RejectReason> {
        if let Err(reason) = self.validator.validate(&action) {
            self.total_rejected.fetch_add(1, Ordering::Relaxed);
            slog::debug!(
                self.logger,
                "Action rejected by validation";
                "reason" => %reason,
                "sender" => %action.sender(),
                "nonce" => action.nonce(),
            );
            return Err(reason);
        }

        let sender = action.sender();
        let nonce = action.nonce();

        let result = match self.accounts.entry(sender) {
            Entry::Occupied(mut occupied) => occupied.get_mut().insert(action),
            Entry::Vacant(vacant) => {
                // A fresh queue cannot refuse its first action, so the
                // non-empty invariant holds for the inserted entry.
                let mut queue = AccountQueue::new(self.queue_capacity);
                let result = queue.insert(action);
                if result.is_ok() {
                    vacant.insert(queue);
                }
                result
            }
        };

        match result {
            Ok(()) => {
                self.total_accepted.fetch_add(1, Ordering::Relaxed);
                slog::trace!(
                    self.logger,
                    "Action buffered";
                    "sender" => %sender,
                    "nonce" => nonce,
                );
            }
            Err(reason) => {
                self.total_rejected.fetch_add(1, Ordering::Relaxed);
                slog::debug!(
                    self.logger,
                    "Action rejected by account queue";
                    "reason" => %reason,
                    "sender" => %sender,
                    "nonce" => nonce,
                );
            }
        }

        result
    }

    /// Returns a snapshot of all pending actions, partitioned by variant.
    ///
    /// Non-destructive: a picked action stays pending until a commit reset
    /// removes it, so a proposed block that never finalizes costs nothing.
    /// Accounts are visited in ascending address order and each account's
    /// actions appear in ascending nonce order; each account is snapshotted
    /// under its own short-held lock, so concurrent inserts to other
    /// accounts are never blocked.
    pub fn pick_acts(&self) -> (Vec<Transfer>, Vec<Vote>) {
        let mut addresses: Vec<Address> = self.accounts.iter().map(|entry| *entry.key()).collect();
        addresses.sort_unstable();

        let mut transfers = Vec::new();
        let mut votes = Vec::new();
        for address in addresses {
            // The entry may have been emptied by a concurrent reset since
            // the key scan; skip it rather than hold the map still.
            let Some(queue) = self.accounts.get(&address) else {
                continue;
            };
            for action in queue.pick() {
                match action {
                    Action::Transfer(transfer) => transfers.push(transfer),
                    Action::Vote(vote) => votes.push(vote),
                }
            }
        }

        (transfers, votes)
    }

    /// Removes actions confirmed committed in a finalized block.
    ///
    /// Unknown senders and nonces are ignored, which makes the call
    /// idempotent. Queues that become empty are dropped from the account
    /// map. This is the pool's only removal path; nothing expires on its
    /// own.
    pub fn reset(&self, committed: &[Action]) {
        let mut by_sender: HashMap<Address, BTreeSet<u64>> = HashMap::new();
        for action in committed {
            by_sender
                .entry(action.sender())
                .or_default()
                .insert(action.nonce());
        }

        let mut removed = 0u64;
        for (sender, nonces) in by_sender {
            if let Entry::Occupied(mut occupied) = self.accounts.entry(sender) {
                let queue = occupied.get_mut();
                let before = queue.len();
                let now_empty = queue.remove(&nonces);
                removed += (before - queue.len()) as u64;
                if now_empty {
                    occupied.remove();
                }
            }
        }

        self.total_committed.fetch_add(removed, Ordering::Relaxed);
        slog::debug!(
            self.logger,
            "Removed committed actions";
            "removed" => removed,
            "pending" => self.pending_count(),
        );
    }

    /// Total number of pending actions across all accounts.
    pub fn pending_count(&self) -> usize {
        self.accounts.iter().map(|entry| entry.value().len()).sum()
    }

    /// Number of accounts currently holding pending actions.
    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    /// Returns counters describing the pool's lifetime activity.
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            pending_actions: self.pending_count(),
            accounts: self.account_count(),
            total_accepted: self.total_accepted.load(Ordering::Relaxed),
            total_rejected: self.total_rejected.load(Ordering::Relaxed),
            total_committed: self.total_committed.load(Ordering::Relaxed),
        }
    }
}

/// Statistics about the action pool.
#[derive(Debug, Clone)]
pub struct PoolStats {
    /// Current number of pending actions
    pub pending_actions: usize,
    /// Number of accounts with pending actions
    pub accounts: usize,
    /// Total actions accepted since creation
    pub total_accepted: u64,
    /// Total actions rejected since creation
    pub total_rejected: u64,
    /// Total actions removed by commit resets
    pub total_committed: u64,
}

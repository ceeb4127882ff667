//! Read capability onto the ledger collaborator's confirmed state.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::state::account::Account;
use crate::state::address::Address;

/// Read access to confirmed account state, supplied by the ledger
/// collaborator.
///
/// The pool treats this as optional: when no reader is available,
/// validation degrades to syntactic-only checks and state sanity is
/// deferred to block-assembly-time re-validation.
pub trait ChainStateReader: Send + Sync {
    /// Returns the confirmed state for an account, if it exists.
    fn account(&self, address: &Address) -> Option<Account>;
}

/// In-memory chain state for tests and standalone operation.
///
/// Pending actions are never persisted, so a real deployment wires the
/// ledger's own store here instead.
#[derive(Debug, Default)]
pub struct InMemoryChainState {
    accounts: RwLock<HashMap<Address, Account>>,
}

impl InMemoryChainState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an account's confirmed state.
    pub fn put_account(&self, account: Account) {
        self.accounts.write().unwrap().insert(account.address, account);
    }
}

impl ChainStateReader for InMemoryChainState {
    fn account(&self, address: &Address) -> Option<Account> {
        self.accounts.read().unwrap().get(address).copied()
    }
}

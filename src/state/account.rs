use rkyv::{Archive, Deserialize, Serialize};

use crate::state::address::Address;

/// [`Account`] is the ledger collaborator's confirmed view of an account.
///
/// It carries the balance and the last confirmed nonce. The nonce is used
/// to reject replays of actions whose slot is already consumed on chain.
#[derive(Archive, Deserialize, Serialize, Clone, Copy, Debug)]
pub struct Account {
    /// The account's address
    pub address: Address,
    /// The account's confirmed balance
    pub balance: u64,
    /// The last nonce confirmed in a committed block
    pub nonce: u64,
}

impl Account {
    pub fn new(address: Address, balance: u64, nonce: u64) -> Self {
        Self {
            address,
            balance,
            nonce,
        }
    }
}

impl PartialEq for Account {
    fn eq(&self, other: &Self) -> bool {
        self.address == other.address
    }
}

impl Eq for Account {}

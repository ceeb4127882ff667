//! Stateless admission rules for externally submitted actions.

use std::sync::Arc;

use super::chain_state::ChainStateReader;
use crate::actpool::RejectReason;
use crate::state::action::Action;

/// [`Validator`] applies the pool's admission rules.
///
/// Checks run in order and short-circuit on the first failure:
/// 1. the signature must verify against the declared sender,
/// 2. transfers must not carry the coinbase flag (coinbase rewards are
///    synthesized only by the node's own block assembly),
/// 3. with a chain-state reader present, the nonce must be beyond the
///    sender's confirmed nonce.
///
/// Balance sufficiency is left to block-assembly re-validation. Purely
/// functional; a failed validation has no side effects.
pub struct Validator {
    chain_state: Option<Arc<dyn ChainStateReader>>,
}

impl Validator {
    /// Creates a validator without a ledger collaborator.
    /// Validation is syntactic-only.
    pub fn new() -> Self {
        Self { chain_state: None }
    }

    /// Creates a validator that also consults confirmed chain state.
    pub fn with_chain_state(chain_state: Arc<dyn ChainStateReader>) -> Self {
        Self {
            chain_state: Some(chain_state),
        }
    }

    /// Checks an action against the admission rules.
    pub fn validate(&self, action: &Action) -> Result<(), RejectReason> {
        if !action.verify() {
            return Err(RejectReason::Unsigned);
        }

        if action.is_coinbase() {
            return Err(RejectReason::IllegalCoinbase);
        }

        if let Some(chain_state) = &self.chain_state {
            if let Some(account) = chain_state.account(&action.sender()) {
                // A nonce at or below the confirmed nonce was already
                // consumed by a committed block.
                if action.nonce() <= account.nonce {
                    return Err(RejectReason::DuplicateNonce);
                }
            }
        }

        Ok(())
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

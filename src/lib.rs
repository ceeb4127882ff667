//! Pending-action pool for a blockchain node.
//!
//! Receives gossiped transfers and votes from the network layer, validates
//! and buffers them per originating account, and hands consistent, bounded
//! batches to the block-production path. Committed blocks retire their
//! actions from the pool; nothing else ever removes a pending action.
//!
//! The P2P overlay, consensus scheme, and ledger store are external
//! collaborators: the pool meets them at [`actpool::ActPoolService`]'s
//! channels (or direct [`actpool::ActionPool`] calls) and at the optional
//! [`validation::ChainStateReader`] capability.

pub mod actpool;
pub mod config;
pub mod crypto;
pub mod state;
pub mod validation;

pub use actpool::{ActPoolChannels, ActPoolService, ActionPool, RejectReason};
pub use config::ActPoolConfig;
pub use state::action::{Action, Transfer, Vote};
pub use state::address::Address;
pub use validation::Validator;

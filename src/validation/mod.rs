pub mod chain_state;
pub mod validator;

pub use chain_state::{ChainStateReader, InMemoryChainState};
pub use validator::Validator;

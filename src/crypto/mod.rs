pub mod action_crypto;

pub use action_crypto::{ActPublicKey, ActSecretKey, ActSignature, SignatureError};

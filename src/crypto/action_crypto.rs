//! Ed25519 signing primitives for actions.
//!
//! Actions are signed over their canonical digest, and the sender's address
//! is the public key itself, so verification needs nothing beyond the action.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::{CryptoRng, RngCore};
use rkyv::{Archive, Deserialize, Serialize};
use thiserror::Error;

/// Length of an Ed25519 public key in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Length of an Ed25519 signature in bytes.
pub const SIGNATURE_LENGTH: usize = 64;

/// Errors produced when reconstructing keys from raw bytes.
#[derive(Debug, Error)]
pub enum SignatureError {
    /// The bytes do not encode a valid Ed25519 public key
    #[error("Malformed public key bytes")]
    MalformedPublicKey,
}

/// An Ed25519 secret key used to sign actions.
pub struct ActSecretKey {
    inner: SigningKey,
}

impl ActSecretKey {
    /// Generates a fresh keypair from a cryptographically secure RNG.
    pub fn generate<R: CryptoRng + RngCore>(rng: &mut R) -> Self {
        Self {
            inner: SigningKey::generate(rng),
        }
    }

    /// Returns the public half of the keypair.
    pub fn public_key(&self) -> ActPublicKey {
        ActPublicKey {
            inner: self.inner.verifying_key(),
        }
    }

    /// Signs a message (an action digest).
    pub fn sign(&self, message: &[u8]) -> ActSignature {
        ActSignature {
            bytes: self.inner.sign(message).to_bytes(),
        }
    }
}

/// An Ed25519 public key identifying an account.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActPublicKey {
    inner: VerifyingKey,
}

impl ActPublicKey {
    /// Reconstructs a public key from its 32-byte encoding.
    pub fn from_bytes(bytes: &[u8; PUBLIC_KEY_LENGTH]) -> Result<Self, SignatureError> {
        VerifyingKey::from_bytes(bytes)
            .map(|inner| Self { inner })
            .map_err(|_| SignatureError::MalformedPublicKey)
    }

    /// Returns the 32-byte encoding of the key.
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        self.inner.to_bytes()
    }

    /// Verifies a signature over a message.
    pub fn verify(&self, message: &[u8], signature: &ActSignature) -> bool {
        let signature = Signature::from_bytes(&signature.bytes);
        self.inner.verify(message, &signature).is_ok()
    }
}

/// A detached Ed25519 signature carried inside an action.
#[derive(Archive, Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActSignature {
    /// Raw 64-byte signature encoding
    pub bytes: [u8; SIGNATURE_LENGTH],
}

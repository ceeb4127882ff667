//! Action value types: transfers and votes.
//!
//! An action is an immutable signed intent from an account. Signing never
//! mutates in place; it produces a new signed copy. Signatures cover the
//! blake3 digest of a domain-separated canonical encoding of the body, so
//! the two variants can never be confused for one another.

use rkyv::{Archive, Deserialize, Serialize, rancor, util::AlignedVec};

use crate::crypto::action_crypto::{ActSecretKey, ActSignature};
use crate::state::address::Address;

/// [`Transfer`] moves value from a sender to a recipient.
///
/// The coinbase flag marks rewards minted by the node's own block assembly.
/// It is never legitimately set on a transfer arriving from the network.
#[derive(Archive, Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    /// The sender of the transfer
    pub sender: Address,
    /// The recipient of the transfer
    pub recipient: Address,
    /// The amount transferred
    pub amount: u64,
    /// The sender-scoped sequence number. This value is
    /// incremental and used to prevent replay attacks.
    pub nonce: u64,
    /// True only for block rewards synthesized during block assembly
    pub coinbase: bool,
    /// The sender's signature over the transfer digest, if signed
    pub signature: Option<ActSignature>,
}

impl Transfer {
    /// Creates an unsigned transfer.
    pub fn new(sender: Address, recipient: Address, amount: u64, nonce: u64) -> Self {
        Self {
            sender,
            recipient,
            amount,
            nonce,
            coinbase: false,
            signature: None,
        }
    }

    /// Creates a coinbase reward transfer.
    ///
    /// Only the block-assembly path constructs these; the pool's insert
    /// path rejects any action carrying the flag.
    pub fn coinbase(recipient: Address, amount: u64, nonce: u64) -> Self {
        Self {
            sender: Address::MINT_AUTHORITY,
            recipient,
            amount,
            nonce,
            coinbase: true,
            signature: None,
        }
    }

    /// Computes the digest of the transfer body. The signature is excluded.
    pub fn digest(&self) -> [u8; blake3::OUT_LEN] {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"transfer");
        hasher.update(self.sender.as_bytes());
        hasher.update(self.recipient.as_bytes());
        hasher.update(&self.amount.to_le_bytes());
        hasher.update(&self.nonce.to_le_bytes());
        hasher.update(&[self.coinbase as u8]);
        hasher.finalize().into()
    }

    /// Returns a signed copy of the transfer.
    pub fn sign(&self, secret_key: &ActSecretKey) -> Self {
        let mut signed = self.clone();
        signed.signature = Some(secret_key.sign(&self.digest()));
        signed
    }

    /// Verifies the signature against the sender's public key.
    pub fn verify(&self) -> bool {
        let Some(signature) = &self.signature else {
            return false;
        };
        let Ok(public_key) = self.sender.to_public_key() else {
            return false;
        };
        public_key.verify(&self.digest(), signature)
    }
}

/// [`Vote`] registers the voter's support for a votee.
#[derive(Archive, Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Vote {
    /// The account casting the vote
    pub voter: Address,
    /// The account voted for
    pub votee: Address,
    /// The voter-scoped sequence number
    pub nonce: u64,
    /// The voter's signature over the vote digest, if signed
    pub signature: Option<ActSignature>,
}

impl Vote {
    /// Creates an unsigned vote.
    pub fn new(voter: Address, votee: Address, nonce: u64) -> Self {
        Self {
            voter,
            votee,
            nonce,
            signature: None,
        }
    }

    /// Computes the digest of the vote body. The signature is excluded.
    pub fn digest(&self) -> [u8; blake3::OUT_LEN] {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"vote");
        hasher.update(self.voter.as_bytes());
        hasher.update(self.votee.as_bytes());
        hasher.update(&self.nonce.to_le_bytes());
        hasher.finalize().into()
    }

    /// Returns a signed copy of the vote.
    pub fn sign(&self, secret_key: &ActSecretKey) -> Self {
        let mut signed = self.clone();
        signed.signature = Some(secret_key.sign(&self.digest()));
        signed
    }

    /// Verifies the signature against the voter's public key.
    pub fn verify(&self) -> bool {
        let Some(signature) = &self.signature else {
            return false;
        };
        let Ok(public_key) = self.voter.to_public_key() else {
            return false;
        };
        public_key.verify(&self.digest(), signature)
    }
}

/// [`Action`] is the sum of everything the pool buffers: a transfer or a vote.
#[derive(Archive, Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Transfer(Transfer),
    Vote(Vote),
}

impl Action {
    /// The originating account: the transfer's sender or the vote's voter.
    pub fn sender(&self) -> Address {
        match self {
            Action::Transfer(transfer) => transfer.sender,
            Action::Vote(vote) => vote.voter,
        }
    }

    /// The sender-scoped sequence number.
    pub fn nonce(&self) -> u64 {
        match self {
            Action::Transfer(transfer) => transfer.nonce,
            Action::Vote(vote) => vote.nonce,
        }
    }

    /// The digest of the action body.
    pub fn digest(&self) -> [u8; blake3::OUT_LEN] {
        match self {
            Action::Transfer(transfer) => transfer.digest(),
            Action::Vote(vote) => vote.digest(),
        }
    }

    /// Verifies the action's signature.
    pub fn verify(&self) -> bool {
        match self {
            Action::Transfer(transfer) => transfer.verify(),
            Action::Vote(vote) => vote.verify(),
        }
    }

    /// True for coinbase reward transfers.
    pub fn is_coinbase(&self) -> bool {
        match self {
            Action::Transfer(transfer) => transfer.coinbase,
            Action::Vote(_) => false,
        }
    }

    /// Serializes the action for the gossip wire boundary.
    pub fn to_bytes(&self) -> Result<AlignedVec, rancor::Error> {
        rkyv::to_bytes::<rancor::Error>(self)
    }

    /// Deserializes an action received from the wire.
    ///
    /// The payload is copied into aligned storage and validated; malformed
    /// bytes fail here rather than reaching the pool.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, rancor::Error> {
        let mut aligned = AlignedVec::<16>::new();
        aligned.extend_from_slice(bytes);
        rkyv::from_bytes::<Self, rancor::Error>(&aligned)
    }
}

impl From<Transfer> for Action {
    fn from(transfer: Transfer) -> Self {
        Action::Transfer(transfer)
    }
}

impl From<Vote> for Action {
    fn from(vote: Vote) -> Self {
        Action::Vote(vote)
    }
}

//! Record Encoding
//!
//! Layout of ledger records in the host's key-value store. Each key is a
//! one-byte namespace followed by the record's natural key (identity, or a
//! big-endian sequence number so lexical order matches numeric order).
//! Values are Borsh.
//!
//! [`StateDigest`] hashes records in key order; two ledgers with the same
//! digest hold the same state.

use borsh::BorshSerialize;
use sha2::{Digest, Sha256};

use crate::errors::{PoolError, PoolResult};
use crate::types::Address;

/// Storage namespaces
pub mod namespace {
    pub const POOL_STATE: u8 = 0x01;
    pub const SECURITY_STATE: u8 = 0x02;
    pub const PARAMETERS: u8 = 0x03;
    pub const CLOCK: u8 = 0x04;
    pub const POSITION: u8 = 0x10;
    pub const OPERATOR: u8 = 0x11;
    pub const YIELD_SNAPSHOT: u8 = 0x20;
    pub const EVENT: u8 = 0x21;
}

/// Key of a singleton record
pub fn singleton_key(namespace: u8) -> Vec<u8> {
    vec![namespace]
}

/// Key of an identity-keyed record
pub fn identity_key(namespace: u8, identity: &Address) -> Vec<u8> {
    let mut key = Vec::with_capacity(1 + identity.len());
    key.push(namespace);
    key.extend_from_slice(identity);
    key
}

/// Key of a sequence-keyed record
pub fn sequence_key(namespace: u8, sequence: u64) -> Vec<u8> {
    let mut key = Vec::with_capacity(9);
    key.push(namespace);
    key.extend_from_slice(&sequence.to_be_bytes());
    key
}

/// Borsh-encode a record
pub fn encode<T: BorshSerialize>(record: &T) -> PoolResult<Vec<u8>> {
    borsh::to_vec(record).map_err(|e| PoolError::Encoding {
        reason: e.to_string(),
    })
}

/// Decode a Borsh record
pub fn decode<T: borsh::BorshDeserialize>(bytes: &[u8]) -> Option<T> {
    borsh::from_slice(bytes).ok()
}

/// Running SHA-256 over `(key, value)` pairs
pub struct StateDigest {
    hasher: Sha256,
}

impl Default for StateDigest {
    fn default() -> Self {
        Self::new()
    }
}

impl StateDigest {
    pub fn new() -> Self {
        Self {
            hasher: Sha256::new(),
        }
    }

    /// Absorb one encoded record. Length prefixes keep entries unambiguous.
    pub fn update(&mut self, key: &[u8], value: &[u8]) {
        self.hasher.update((key.len() as u32).to_le_bytes());
        self.hasher.update(key);
        self.hasher.update((value.len() as u32).to_le_bytes());
        self.hasher.update(value);
    }

    pub fn finalize(self) -> [u8; 32] {
        let result = self.hasher.finalize();
        let mut out = [0u8; 32];
        out.copy_from_slice(&result);
        out
    }
}

use crate::error::LedgerError;
use crate::transaction::Transaction;
use sha2::{Digest, Sha256};

pub type Sha256Hash = [u8; 32];

/// An ordered batch of transactions sealed by proof-of-work.
///
/// A block starts out with its hash cached at nonce 0 and becomes sealed
/// once `mine` returns; after that it is never mutated again. It links to
/// its predecessor by a value copy of that block's hash, never by holding
/// the block itself.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Block {
    pub timestamp: u64,
    pub transactions: Vec<Transaction>,
    pub previous_hash: Sha256Hash,
    pub hash: Sha256Hash,
    pub nonce: u64,
}

impl Block {
    pub fn new(timestamp: u64, transactions: Vec<Transaction>, previous_hash: Sha256Hash) -> Self {
        let mut block = Block {
            timestamp,
            transactions,
            previous_hash,
            hash: [0u8; 32],
            nonce: 0,
        };
        block.hash = block.compute_hash();
        block
    }

    /// Digest over (previous_hash, timestamp, transaction content hashes in
    /// inclusion order, nonce). Field order and encoding are fixed so an
    /// independent recomputation matches byte for byte.
    pub fn compute_hash(&self) -> Sha256Hash {
        let mut hasher = Sha256::new();
        hasher.update(self.previous_hash);
        hasher.update(self.timestamp.to_le_bytes());
        for tx in &self.transactions {
            hasher.update(tx.content_hash());
        }
        hasher.update(self.nonce.to_le_bytes());
        hasher.finalize().into()
    }

    /// Increments the nonce and rehashes until the first `difficulty` hex
    /// digits of the hash are zero. Runs for as long as the search takes.
    pub fn mine(&mut self, difficulty: u32) {
        while !meets_difficulty(&self.hash, difficulty) {
            self.nonce += 1;
            self.hash = self.compute_hash();
        }
    }

    /// Same search as `mine`, giving up after `budget` iterations. The
    /// block is left unsealed at its last attempted nonce on failure.
    pub fn mine_with_budget(&mut self, difficulty: u32, budget: u64) -> Result<(), LedgerError> {
        let mut spent = 0u64;
        while !meets_difficulty(&self.hash, difficulty) {
            if spent == budget {
                return Err(LedgerError::MiningBudgetExhausted {
                    budget,
                    nonce: self.nonce,
                });
            }
            self.nonce += 1;
            self.hash = self.compute_hash();
            spent += 1;
        }
        Ok(())
    }
}

/// True when the first `difficulty` hex digits (nibbles) of `hash` are zero.
pub fn meets_difficulty(hash: &Sha256Hash, difficulty: u32) -> bool {
    let nibbles = difficulty.min(64) as usize;
    let full_bytes = nibbles / 2;
    if !hash[..full_bytes].iter().all(|b| *b == 0) {
        return false;
    }
    nibbles % 2 == 0 || hash[full_bytes] & 0xF0 == 0
}

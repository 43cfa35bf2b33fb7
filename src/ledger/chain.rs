use crate::config::LedgerConfig;
use crate::crypto::CryptoContext;
use crate::error::LedgerError;
use crate::ledger::block::Block;
use crate::transaction::Transaction;
use tracing::{debug, info};

pub const DEFAULT_DIFFICULTY: u32 = 2;
pub const DEFAULT_MINING_REWARD: u64 = 100;

/// Fixed timestamp of the genesis placeholder block (2023-01-01 UTC, millis).
const GENESIS_TIMESTAMP: u64 = 1_672_531_200_000;

/// The append-only chain of blocks plus the pool of transactions waiting
/// to be mined into the next one.
///
/// Every mutating operation takes `&mut self`, so mining rounds can never
/// interleave and the pool handoff inside `mine_pending_transactions` is
/// indivisible with respect to `add_transaction`.
pub struct Ledger {
    pub chain: Vec<Block>,
    pub difficulty: u32,
    pub pending: Vec<Transaction>,
    pub mining_reward: u64,
    crypto: CryptoContext,
}

impl Ledger {
    pub fn new(crypto: CryptoContext) -> Self {
        Self::with_config(LedgerConfig::default(), crypto)
    }

    pub fn with_config(config: LedgerConfig, crypto: CryptoContext) -> Self {
        Ledger {
            chain: vec![Self::genesis_block()],
            difficulty: config.difficulty,
            pending: Vec::new(),
            mining_reward: config.mining_reward,
            crypto,
        }
    }

    /// The genesis placeholder: fixed timestamp, no transactions, zeroed
    /// previous hash. Never mined and never re-validated.
    fn genesis_block() -> Block {
        Block::new(GENESIS_TIMESTAMP, Vec::new(), [0u8; 32])
    }

    pub fn crypto(&self) -> &CryptoContext {
        &self.crypto
    }

    pub fn latest_block(&self) -> &Block {
        self.chain
            .last()
            .expect("chain always holds the genesis block")
    }

    /// Admits a transaction to the pending pool. Both addresses must be
    /// present and the signature must verify. Sender-less (reward-shaped)
    /// submissions are rejected outright; reward transactions are minted
    /// only by `mine_pending_transactions`.
    pub fn add_transaction(&mut self, tx: Transaction) -> Result<(), LedgerError> {
        let sender = tx.sender.as_deref().ok_or_else(|| {
            LedgerError::InvalidTransaction(
                "sender address is required; rewards are minted by mining".to_string(),
            )
        })?;
        if sender.is_empty() {
            return Err(LedgerError::InvalidTransaction(
                "sender address is empty".to_string(),
            ));
        }
        if tx.recipient.is_empty() {
            return Err(LedgerError::InvalidTransaction(
                "recipient address is empty".to_string(),
            ));
        }
        tx.verify(&self.crypto)?;

        debug!("Queued transaction {} for the next block", tx.hash_str());
        self.pending.push(tx);
        Ok(())
    }

    /// Packages the whole pending pool into a new block, seals it against
    /// the chain tip, appends it, and reseeds the pool with a single
    /// reward transaction for `miner`. The reward is therefore credited
    /// on-chain by the next mined block.
    pub fn mine_pending_transactions(&mut self, miner: &str) {
        let timestamp = chrono::Utc::now().timestamp_millis() as u64;
        let transactions = std::mem::take(&mut self.pending);
        let mut block = Block::new(timestamp, transactions, self.latest_block().hash);

        block.mine(self.difficulty);
        info!(
            "Mined block {} at height {} with {} transaction(s), nonce {}",
            hex::encode(block.hash),
            self.chain.len(),
            block.transactions.len(),
            block.nonce
        );

        self.chain.push(block);
        self.pending = vec![Transaction::reward(miner.to_string(), self.mining_reward)];
    }

    /// Net balance of `address`: one linear scan over every mined
    /// transaction, subtracting where it sent and adding where it
    /// received. Pending transactions (the freshly reseeded reward
    /// included) are not counted, so a miner's balance runs negative
    /// until its reward is mined into the chain.
    pub fn balance_of(&self, address: &str) -> i64 {
        let mut balance = 0i64;
        for block in &self.chain {
            for tx in &block.transactions {
                if tx.sender.as_deref() == Some(address) {
                    balance -= tx.amount as i64;
                }
                if tx.recipient == address {
                    balance += tx.amount as i64;
                }
            }
        }
        balance
    }
}

//! Error types for the ledger

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum LedgerError {
    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),
    #[error("Transaction is not signed")]
    MissingSignature,
    #[error("Signature does not match transaction contents")]
    SignatureInvalid,
    #[error("Signing key does not match the sender address")]
    SignerMismatch,
    #[error("Cryptographic error: {0}")]
    CryptoError(String),
    #[error("Mining budget of {budget} iterations exhausted at nonce {nonce}")]
    MiningBudgetExhausted { budget: u64, nonce: u64 },
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, LedgerError>;

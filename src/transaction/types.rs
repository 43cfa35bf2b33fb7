/// Transaction types, separated from validation logic
use crate::crypto::{Address, CryptoContext, KeyPair};
use crate::error::LedgerError;
use crate::ledger::Sha256Hash;
use sha2::{Digest, Sha256};

/// One transfer on the ledger. A regular transfer names its sender and must
/// be signed before it is accepted anywhere; a reward transaction has no
/// sender and credits the miner unconditionally.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Transaction {
    pub sender: Option<Address>,
    pub recipient: Address,
    pub amount: u64,
    pub signature: Option<Vec<u8>>,
}

impl Transaction {
    /// A transfer from `sender` to `recipient`. Starts unsigned.
    pub fn transfer(sender: Address, recipient: Address, amount: u64) -> Self {
        Transaction {
            sender: Some(sender),
            recipient,
            amount,
            signature: None,
        }
    }

    /// A sender-less reward crediting the miner.
    pub fn reward(recipient: Address, amount: u64) -> Self {
        Transaction {
            sender: None,
            recipient,
            amount,
            signature: None,
        }
    }

    pub fn is_reward(&self) -> bool {
        self.sender.is_none()
    }

    /// SHA-256 over the ordered (sender, recipient, amount) tuple.
    /// String fields are length-prefixed so the encoding is unambiguous.
    pub fn content_hash(&self) -> Sha256Hash {
        let mut hasher = Sha256::new();
        match &self.sender {
            Some(sender) => {
                hasher.update([1u8]);
                hasher.update((sender.len() as u64).to_le_bytes());
                hasher.update(sender.as_bytes());
            }
            None => hasher.update([0u8]),
        }
        hasher.update((self.recipient.len() as u64).to_le_bytes());
        hasher.update(self.recipient.as_bytes());
        hasher.update(self.amount.to_le_bytes());
        hasher.finalize().into()
    }

    pub fn hash_str(&self) -> String {
        hex::encode(self.content_hash())
    }

    /// Signs the content hash with `keypair` and returns a new, signed copy
    /// of this transaction; the receiver itself is left untouched. Fails
    /// with `SignerMismatch` unless the key pair's address equals the
    /// sender: a party may not sign on behalf of another address, and a
    /// reward transaction has no sender to sign for.
    pub fn sign(&self, ctx: &CryptoContext, keypair: &KeyPair) -> Result<Self, LedgerError> {
        if self.sender.as_deref() != Some(keypair.address().as_str()) {
            return Err(LedgerError::SignerMismatch);
        }

        let digest = self.content_hash();
        let signature = keypair.sign_digest(ctx, &digest)?;

        Ok(Transaction {
            signature: Some(signature.to_vec()),
            ..self.clone()
        })
    }
}

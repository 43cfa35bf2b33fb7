/// Validation logic for transactions separated from type definitions
use crate::crypto::{self, CryptoContext};
use crate::error::LedgerError;
use crate::transaction::types::Transaction;

impl Transaction {
    /// Checks this transaction's signature against its content hash under
    /// the public key the sender address encodes.
    ///
    /// Reward transactions (no sender) pass unconditionally. For everything
    /// else the outcome is a named failure: `MissingSignature` when the
    /// signature is absent or empty, `SignatureInvalid` when it does not
    /// validate, `CryptoError` when the address or signature bytes are
    /// malformed. Does not mutate state.
    pub fn verify(&self, ctx: &CryptoContext) -> Result<(), LedgerError> {
        let sender = match &self.sender {
            None => return Ok(()),
            Some(sender) => sender,
        };

        let signature = self
            .signature
            .as_deref()
            .filter(|sig| !sig.is_empty())
            .ok_or(LedgerError::MissingSignature)?;

        crypto::verify_signature(ctx, sender, &self.content_hash(), signature)
    }
}

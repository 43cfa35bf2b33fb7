use crate::crypto::CryptoContext;
use crate::ledger::block::Block;
use crate::ledger::chain::Ledger;

impl Block {
    /// True when every contained transaction verifies, short-circuiting on
    /// the first that does not. Every transaction-level defect, a missing
    /// signature included, folds to `false` here; validation never raises.
    pub fn all_transactions_valid(&self, ctx: &CryptoContext) -> bool {
        self.transactions.iter().all(|tx| tx.verify(ctx).is_ok())
    }
}

impl Ledger {
    /// Walks every non-genesis block and checks, in order: that its
    /// transactions verify, that its stored hash matches a fresh
    /// recomputation (content tampering), and that its `previous_hash`
    /// equals the prior block's stored hash (splicing or reordering).
    /// The genesis block is assumed correct by construction.
    pub fn is_chain_valid(&self) -> bool {
        for window in self.chain.windows(2) {
            let (previous, block) = (&window[0], &window[1]);

            if !block.all_transactions_valid(self.crypto()) {
                return false;
            }
            if block.hash != block.compute_hash() {
                return false;
            }
            if block.previous_hash != previous.hash {
                return false;
            }
        }
        true
    }
}

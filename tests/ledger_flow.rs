//! Integration tests for the signed-transfer, mining and verification flow

use microledger::config::LedgerConfig;
use microledger::crypto::{CryptoContext, KeyPair};
use microledger::error::LedgerError;
use microledger::ledger::{meets_difficulty, Block, Ledger};
use microledger::transaction::Transaction;

/// Helper to build a ledger at the default difficulty/reward.
fn create_test_ledger(ctx: &CryptoContext) -> Ledger {
    Ledger::new(ctx.clone())
}

/// Helper to build and sign a transfer in one go.
fn signed_transfer(
    ctx: &CryptoContext,
    from: &KeyPair,
    to: &KeyPair,
    amount: u64,
) -> Result<Transaction, LedgerError> {
    Transaction::transfer(from.address(), to.address(), amount).sign(ctx, from)
}

#[test]
fn test_signed_transfer_full_scenario() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = CryptoContext::new();
    let alice = KeyPair::generate(&ctx);
    let bob = KeyPair::generate(&ctx);
    let mut ledger = create_test_ledger(&ctx);

    let tx1 = signed_transfer(&ctx, &alice, &bob, 10)?;
    assert!(tx1.verify(&ctx).is_ok());
    ledger.add_transaction(tx1)?;

    ledger.mine_pending_transactions(&alice.address());
    assert_eq!(ledger.chain.len(), 2);
    assert!(ledger.is_chain_valid());

    // Alice's reward is still pending; only the transfer is on-chain.
    assert_eq!(ledger.balance_of(&alice.address()), -10);
    assert_eq!(ledger.balance_of(&bob.address()), 10);

    // The next round mines the reward: 100 earned minus 10 sent.
    ledger.mine_pending_transactions(&alice.address());
    assert_eq!(ledger.chain.len(), 3);
    assert_eq!(ledger.balance_of(&alice.address()), 90);
    assert_eq!(ledger.balance_of(&bob.address()), 10);
    assert!(ledger.is_chain_valid());

    Ok(())
}

#[test]
fn test_conservation_across_mining_rounds() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = CryptoContext::new();
    let miner = KeyPair::generate(&ctx);
    let bob = KeyPair::generate(&ctx);
    let carol = KeyPair::generate(&ctx);
    let mut ledger = create_test_ledger(&ctx);

    ledger.add_transaction(signed_transfer(&ctx, &miner, &bob, 10)?)?;
    ledger.mine_pending_transactions(&miner.address());

    ledger.add_transaction(signed_transfer(&ctx, &bob, &carol, 4)?)?;
    ledger.mine_pending_transactions(&miner.address());

    ledger.mine_pending_transactions(&miner.address());

    let mined_rounds = ledger.chain.len() as i64 - 1;
    let total: i64 = [&miner, &bob, &carol]
        .iter()
        .map(|kp| ledger.balance_of(&kp.address()))
        .sum();

    // Peer-to-peer transfers net to zero, so everything the three parties
    // hold is mined reward; one reward is always still pending.
    assert_eq!(total, 100 * (mined_rounds - 1));
    assert_eq!(ledger.balance_of(&bob.address()), 10 - 4);
    assert_eq!(ledger.balance_of(&carol.address()), 4);
    assert!(ledger.is_chain_valid());

    Ok(())
}

#[test]
fn test_tampering_with_a_mined_amount_is_detected() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = CryptoContext::new();
    let alice = KeyPair::generate(&ctx);
    let bob = KeyPair::generate(&ctx);
    let mut ledger = create_test_ledger(&ctx);

    ledger.add_transaction(signed_transfer(&ctx, &alice, &bob, 10)?)?;
    ledger.mine_pending_transactions(&alice.address());
    assert!(ledger.is_chain_valid());

    ledger.chain[1].transactions[0].amount = 1;
    assert!(!ledger.is_chain_valid());

    Ok(())
}

#[test]
fn test_tampering_with_linkage_is_detected() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = CryptoContext::new();
    let miner = KeyPair::generate(&ctx);
    let mut ledger = create_test_ledger(&ctx);

    ledger.mine_pending_transactions(&miner.address());
    ledger.mine_pending_transactions(&miner.address());
    assert!(ledger.is_chain_valid());

    let mut reordered = create_test_ledger(&ctx);
    reordered.mine_pending_transactions(&miner.address());
    reordered.mine_pending_transactions(&miner.address());
    reordered.chain.swap(1, 2);
    assert!(!reordered.is_chain_valid());

    ledger.chain[2].previous_hash = [0u8; 32];
    assert!(!ledger.is_chain_valid());

    Ok(())
}

#[test]
fn test_reward_shaped_submission_is_rejected() {
    let ctx = CryptoContext::new();
    let mut ledger = create_test_ledger(&ctx);

    let forged_reward = Transaction::reward("somebody".into(), 1_000_000);
    let result = ledger.add_transaction(forged_reward);

    assert!(matches!(result, Err(LedgerError::InvalidTransaction(_))));
    assert!(ledger.pending.is_empty());
}

#[test]
fn test_signing_for_someone_else_fails_and_leaves_record_unsigned() {
    let ctx = CryptoContext::new();
    let alice = KeyPair::generate(&ctx);
    let mallory = KeyPair::generate(&ctx);

    let tx = Transaction::transfer(alice.address(), mallory.address(), 10);
    let result = tx.sign(&ctx, &mallory);

    assert!(matches!(result, Err(LedgerError::SignerMismatch)));
    assert!(tx.signature.is_none());
}

#[test]
fn test_unsigned_submission_is_rejected() {
    let ctx = CryptoContext::new();
    let alice = KeyPair::generate(&ctx);
    let bob = KeyPair::generate(&ctx);
    let mut ledger = create_test_ledger(&ctx);

    let tx = Transaction::transfer(alice.address(), bob.address(), 10);
    let result = ledger.add_transaction(tx);

    assert!(matches!(result, Err(LedgerError::MissingSignature)));
}

#[test]
fn test_resubmitting_an_invalid_transaction_fails_identically() {
    let ctx = CryptoContext::new();
    let alice = KeyPair::generate(&ctx);
    let bob = KeyPair::generate(&ctx);
    let mut ledger = create_test_ledger(&ctx);

    let tx = Transaction::transfer(alice.address(), bob.address(), 10);
    for _ in 0..2 {
        let result = ledger.add_transaction(tx.clone());
        assert!(matches!(result, Err(LedgerError::MissingSignature)));
    }
}

#[test]
fn test_mining_terminates_within_budget_at_low_difficulty(
) -> Result<(), Box<dyn std::error::Error>> {
    for difficulty in 1..=3 {
        let mut block = Block::new(1_600_000_000_000 + difficulty as u64, vec![], [0u8; 32]);
        block.mine_with_budget(difficulty, 2_000_000)?;
        assert!(meets_difficulty(&block.hash, difficulty));
    }
    Ok(())
}

#[test]
fn test_mined_hash_starts_with_two_zero_hex_digits() {
    let mut block = Block::new(1_600_000_000_000, vec![], [0u8; 32]);
    block.mine(2);
    assert!(hex::encode(block.hash).starts_with("00"));
}

#[test]
fn test_configured_difficulty_and_reward_are_honored() {
    let ctx = CryptoContext::new();
    let miner = KeyPair::generate(&ctx);
    let mut ledger = Ledger::with_config(
        LedgerConfig {
            difficulty: 1,
            mining_reward: 25,
        },
        ctx.clone(),
    );

    ledger.mine_pending_transactions(&miner.address());
    assert!(meets_difficulty(&ledger.latest_block().hash, 1));

    ledger.mine_pending_transactions(&miner.address());
    assert_eq!(ledger.balance_of(&miner.address()), 25);
}

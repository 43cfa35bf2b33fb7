#![forbid(unsafe_code)]
use clap::Parser;
use microledger::config;
use microledger::crypto::{CryptoContext, KeyPair};
use microledger::ledger::Ledger;
use microledger::transaction::Transaction;
use std::path::PathBuf;
use std::time::Instant;

/// Walk the ledger end to end: sign a transfer, mine it, query balances,
/// then tamper with a mined block and watch verification catch it.
#[derive(Parser)]
#[command(name = "ledger-demo", version)]
struct Args {
    /// TOML config file (difficulty, mining_reward); defaults apply when absent
    #[arg(long, default_value = "ledger.toml")]
    config: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let config = config::load_config(&args.config)?;
    let ctx = CryptoContext::new();

    let alice = KeyPair::generate(&ctx);
    let bob = KeyPair::generate(&ctx);
    println!("alice: {}", alice.address());
    println!("bob:   {}", bob.address());

    let mut ledger = Ledger::with_config(config, ctx.clone());

    let tx = Transaction::transfer(alice.address(), bob.address(), 10).sign(&ctx, &alice)?;
    ledger.add_transaction(tx)?;

    println!("\n⛏️  Mining block 1...");
    let start = Instant::now();
    ledger.mine_pending_transactions(&alice.address());
    println!(
        "Sealed in {:?} at nonce {}",
        start.elapsed(),
        ledger.latest_block().nonce
    );

    // Alice's reward sits in the pool until the next block seals it.
    println!("\n⛏️  Mining block 2 (collects the block-1 reward)...");
    let start = Instant::now();
    ledger.mine_pending_transactions(&alice.address());
    println!(
        "Sealed in {:?} at nonce {}",
        start.elapsed(),
        ledger.latest_block().nonce
    );

    println!("\nChain height:     {}", ledger.chain.len());
    println!("Balance of alice: {}", ledger.balance_of(&alice.address()));
    println!("Balance of bob:   {}", ledger.balance_of(&bob.address()));
    println!("Chain valid:      {}", ledger.is_chain_valid());

    println!(
        "\nLatest block:\n{}",
        serde_json::to_string_pretty(ledger.latest_block())?
    );

    // Tamper with a mined transfer and show the chain fails verification.
    ledger.chain[1].transactions[0].amount = 1;
    println!("\nAfter tampering with a mined amount:");
    println!("Chain valid:      {}", ledger.is_chain_valid());

    Ok(())
}

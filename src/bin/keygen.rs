#![forbid(unsafe_code)]
use clap::Parser;
use microledger::crypto::{CryptoContext, KeyPair};

/// Generate a ledger key pair: an address (the hex public key) and the
/// secret key behind it.
#[derive(Parser)]
#[command(name = "ledger-keygen", version)]
struct Args {
    /// Restore the pair from an existing hex secret key instead of generating one
    #[arg(long)]
    secret: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let ctx = CryptoContext::new();

    let keypair = match args.secret {
        Some(secret_hex) => KeyPair::from_secret_bytes(&ctx, &hex::decode(secret_hex)?)?,
        None => KeyPair::generate(&ctx),
    };

    println!("address:    {}", keypair.address());
    println!("secret key: {}", hex::encode(keypair.secret_bytes()));

    Ok(())
}

//! Cryptographic primitives for the ledger

use crate::error::LedgerError;
use rand::rngs::OsRng;
use secp256k1::{
    constants::{COMPACT_SIGNATURE_SIZE, PUBLIC_KEY_SIZE, SECRET_KEY_SIZE},
    ecdsa::Signature,
    All, Message, PublicKey, Secp256k1, SecretKey,
};

/// An address is the hex-encoded compressed secp256k1 public key of the
/// party it names. Verifiers recover the key straight from the address.
pub type Address = String;

/// Explicitly constructed secp256k1 context, passed by reference through
/// every signing and verification call. There is no process-wide instance.
#[derive(Debug, Clone)]
pub struct CryptoContext {
    secp: Secp256k1<All>,
}

impl CryptoContext {
    pub fn new() -> Self {
        CryptoContext {
            secp: Secp256k1::new(),
        }
    }
}

impl Default for CryptoContext {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct KeyPair {
    pub secret_key: SecretKey,
    pub public_key: PublicKey,
}

impl KeyPair {
    /// Generates a new random KeyPair using the OS random number generator.
    pub fn generate(ctx: &CryptoContext) -> Self {
        let secret_key = SecretKey::new(&mut OsRng);
        let public_key = PublicKey::from_secret_key(&ctx.secp, &secret_key);

        KeyPair {
            secret_key,
            public_key,
        }
    }

    /// Creates a KeyPair from raw secret key bytes.
    pub fn from_secret_bytes(ctx: &CryptoContext, bytes: &[u8]) -> Result<Self, LedgerError> {
        let secret_key = SecretKey::from_slice(bytes).map_err(|e| {
            if bytes.len() != SECRET_KEY_SIZE {
                LedgerError::CryptoError(format!(
                    "Secret key must be {} bytes, got {}",
                    SECRET_KEY_SIZE,
                    bytes.len()
                ))
            } else {
                LedgerError::CryptoError(format!("Invalid secret key bytes: {}", e))
            }
        })?;
        let public_key = PublicKey::from_secret_key(&ctx.secp, &secret_key);

        Ok(KeyPair {
            secret_key,
            public_key,
        })
    }

    /// Returns the address of this key pair: the compressed public key, hex-encoded.
    pub fn address(&self) -> Address {
        hex::encode(self.public_key.serialize())
    }

    /// Returns the raw secret key bytes.
    pub fn secret_bytes(&self) -> [u8; SECRET_KEY_SIZE] {
        self.secret_key.secret_bytes()
    }

    /// Signs a 32-byte digest and returns the compact signature bytes.
    pub fn sign_digest(
        &self,
        ctx: &CryptoContext,
        digest: &[u8; 32],
    ) -> Result<[u8; COMPACT_SIGNATURE_SIZE], LedgerError> {
        let message = Message::from_digest_slice(digest)
            .map_err(|e| LedgerError::CryptoError(format!("Failed to create message: {}", e)))?;

        let signature = ctx.secp.sign_ecdsa(&message, &self.secret_key);
        Ok(signature.serialize_compact())
    }
}

/// Decodes an address back into the public key it encodes.
pub fn public_key_from_address(address: &str) -> Result<PublicKey, LedgerError> {
    let bytes = hex::decode(address)
        .map_err(|e| LedgerError::CryptoError(format!("Invalid hex address: {}", e)))?;
    if bytes.len() != PUBLIC_KEY_SIZE {
        return Err(LedgerError::CryptoError(format!(
            "Address must encode {} bytes (compressed public key), got {}",
            PUBLIC_KEY_SIZE,
            bytes.len()
        )));
    }
    PublicKey::from_slice(&bytes)
        .map_err(|e| LedgerError::CryptoError(format!("Invalid public key: {}", e)))
}

/// Verifies an ECDSA signature over a 32-byte digest against the public key
/// an address encodes. `Err(SignatureInvalid)` means the signature does not
/// validate; other errors mean the inputs were malformed.
pub fn verify_signature(
    ctx: &CryptoContext,
    address: &str,
    digest: &[u8; 32],
    signature_bytes: &[u8],
) -> Result<(), LedgerError> {
    if signature_bytes.len() != COMPACT_SIGNATURE_SIZE {
        return Err(LedgerError::CryptoError(format!(
            "Signature must be exactly {} bytes (compact), got {}",
            COMPACT_SIGNATURE_SIZE,
            signature_bytes.len()
        )));
    }

    let public_key = public_key_from_address(address)?;

    let message = Message::from_digest_slice(digest)
        .map_err(|e| LedgerError::CryptoError(format!("Failed to create message: {}", e)))?;

    let signature = Signature::from_compact(signature_bytes)
        .map_err(|e| LedgerError::CryptoError(format!("Invalid signature: {}", e)))?;

    ctx.secp
        .verify_ecdsa(&message, &signature, &public_key)
        .map_err(|_| LedgerError::SignatureInvalid)
}

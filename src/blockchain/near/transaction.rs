//! NEAR transaction encoding and signing.
//!
//! Transactions are Borsh-encoded in the node's `TransactionV0` layout. The
//! signature covers the SHA-256 of the encoded transaction.

use borsh::BorshSerialize;
use ed25519_dalek::{Signer as _, SigningKey};
use sha2::{Digest, Sha256};

use crate::blockchain::wallet::ED25519_PREFIX;

/// An account paired with the key it signs with.
#[derive(Clone)]
pub struct NearSigner {
    account_id: String,
    key: SigningKey,
}

impl NearSigner {
    pub fn new(account_id: impl Into<String>, key: SigningKey) -> Self {
        Self {
            account_id: account_id.into(),
            key,
        }
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.key.verifying_key().to_bytes()
    }

    /// `ed25519:<base58>` form used by the RPC.
    pub fn public_key(&self) -> String {
        format!(
            "{}{}",
            ED25519_PREFIX,
            bs58::encode(self.public_key_bytes()).into_string()
        )
    }

    pub fn sign(&self, message: &[u8]) -> [u8; 64] {
        self.key.sign(message).to_bytes()
    }
}

impl std::fmt::Debug for NearSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NearSigner")
            .field("account_id", &self.account_id)
            .field("public_key", &self.public_key())
            .finish()
    }
}

/// Public key with its curve tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize)]
pub enum PublicKey {
    Ed25519([u8; 32]),
}

/// Signature with its curve tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize)]
pub enum Signature {
    Ed25519([u8; 64]),
}

/// A `FunctionCall` action.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize)]
pub struct FunctionCallAction {
    pub method_name: String,
    pub args: Vec<u8>,
    pub gas: u64,
    pub deposit: u128,
}

/// Transaction actions. Variant order is the wire tag; the SDK only
/// submits `FunctionCall` (tag 2).
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize)]
pub enum Action {
    CreateAccount,
    DeployContract { code: Vec<u8> },
    FunctionCall(FunctionCallAction),
}

/// An unsigned transaction.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize)]
pub struct Transaction {
    pub signer_id: String,
    pub public_key: PublicKey,
    pub nonce: u64,
    pub receiver_id: String,
    pub block_hash: [u8; 32],
    pub actions: Vec<Action>,
}

impl Transaction {
    pub fn to_bytes(&self) -> std::io::Result<Vec<u8>> {
        borsh::to_vec(self)
    }

    /// SHA-256 of the encoded transaction; this is what gets signed.
    pub fn hash(&self) -> std::io::Result<[u8; 32]> {
        Ok(Sha256::digest(self.to_bytes()?).into())
    }

    pub fn sign(self, signer: &NearSigner) -> std::io::Result<SignedTransaction> {
        let hash = self.hash()?;
        Ok(SignedTransaction {
            signature: Signature::Ed25519(signer.sign(&hash)),
            hash,
            transaction: self,
        })
    }
}

/// A transaction with its signature.
#[derive(Debug, Clone, BorshSerialize)]
pub struct SignedTransaction {
    pub transaction: Transaction,
    pub signature: Signature,
    #[borsh(skip)]
    hash: [u8; 32],
}

impl SignedTransaction {
    pub fn to_bytes(&self) -> std::io::Result<Vec<u8>> {
        borsh::to_vec(self)
    }

    /// Transaction hash in the base58 form explorers display.
    pub fn hash(&self) -> String {
        bs58::encode(self.hash).into_string()
    }
}

//! Deterministic signing keys derived from seed phrases.
//!
//! # Security
//! - No private key is ever persisted; credentials are derived per operation
//! - Seed phrases and secret keys are never logged or printed through `Debug`
//!
//! NEAR keys follow SLIP-10 over ed25519 (hardened segments only). EVM keys
//! follow BIP-32 over secp256k1 through alloy's mnemonic builder.

use alloy::primitives::Address;
use alloy::signers::local::coins_bip39::English;
use alloy::signers::local::{MnemonicBuilder, PrivateKeySigner};
use bip39::{Language, Mnemonic};
use ed25519_dalek::SigningKey;
use hmac::{Hmac, Mac};
use sha2::Sha512;
use thiserror::Error;

use crate::blockchain::types::{ChainDescriptor, ChainFamily};
use crate::config::{PauseConfig, SeedPhrase};

type HmacSha512 = Hmac<Sha512>;

const ED25519_CURVE_KEY: &[u8] = b"ed25519 seed";
const HARDENED_OFFSET: u32 = 0x8000_0000;

/// Prefix NEAR uses for ed25519 keys in their text form.
pub const ED25519_PREFIX: &str = "ed25519:";

/// Errors that can occur while deriving a credential.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DerivationError {
    /// Seed phrase is not a BIP-39 English mnemonic.
    #[error("Invalid seed phrase: {0}")]
    SeedPhrase(String),

    /// Derivation path is not well-formed for the key family.
    #[error("Invalid derivation path '{path}': {reason}")]
    Path { path: String, reason: String },

    /// Public key text could not be decoded.
    #[error("Invalid public key '{0}'")]
    PublicKey(String),
}

enum KeyMaterial {
    Ed25519(SigningKey),
    Secp256k1(PrivateKeySigner),
}

/// A signing key pair and the path it was derived from.
///
/// Lives for one operation; never cached.
pub struct Credential {
    derivation_path: String,
    key: KeyMaterial,
}

impl Credential {
    pub fn derivation_path(&self) -> &str {
        &self.derivation_path
    }

    /// Public key text: `ed25519:<base58>` for NEAR, compressed SEC1 hex for EVM.
    pub fn public_key(&self) -> String {
        match &self.key {
            KeyMaterial::Ed25519(key) => format!(
                "{}{}",
                ED25519_PREFIX,
                bs58::encode(key.verifying_key().to_bytes()).into_string()
            ),
            KeyMaterial::Secp256k1(signer) => {
                let point = signer.credential().verifying_key().to_encoded_point(true);
                format!("0x{}", hex::encode(point.as_bytes()))
            }
        }
    }

    /// Secret key text: `ed25519:<base58 of seed||public>` for NEAR, hex scalar for EVM.
    pub fn secret_key(&self) -> String {
        match &self.key {
            KeyMaterial::Ed25519(key) => format!(
                "{}{}",
                ED25519_PREFIX,
                bs58::encode(key.to_keypair_bytes()).into_string()
            ),
            KeyMaterial::Secp256k1(signer) => format!("0x{}", hex::encode(signer.to_bytes())),
        }
    }

    /// NEAR implicit account id for this key. `None` for EVM credentials.
    pub fn implicit_account_id(&self) -> Option<String> {
        match self.key {
            KeyMaterial::Ed25519(_) => implicit_account_id(&self.public_key()).ok(),
            KeyMaterial::Secp256k1(_) => None,
        }
    }

    /// ed25519 signing key for NEAR credentials.
    pub fn ed25519_key(&self) -> Option<&SigningKey> {
        match &self.key {
            KeyMaterial::Ed25519(key) => Some(key),
            KeyMaterial::Secp256k1(_) => None,
        }
    }

    /// HD wallet signer for EVM credentials.
    pub fn evm_signer(&self) -> Option<&PrivateKeySigner> {
        match &self.key {
            KeyMaterial::Ed25519(_) => None,
            KeyMaterial::Secp256k1(signer) => Some(signer),
        }
    }

    pub fn evm_address(&self) -> Option<Address> {
        self.evm_signer().map(|s| s.address())
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("derivation_path", &self.derivation_path)
            .field("public_key", &self.public_key())
            .finish_non_exhaustive()
    }
}

/// Hex-encode the raw bytes behind an `ed25519:<base58>` public key.
pub fn implicit_account_id(public_key: &str) -> Result<String, DerivationError> {
    let raw = public_key.strip_prefix(ED25519_PREFIX).unwrap_or(public_key);
    let bytes = bs58::decode(raw)
        .into_vec()
        .map_err(|_| DerivationError::PublicKey(public_key.to_string()))?;
    if bytes.len() != 32 {
        return Err(DerivationError::PublicKey(public_key.to_string()));
    }
    Ok(hex::encode(bytes))
}

/// Derives credentials from the configured seed phrases.
#[derive(Clone)]
pub struct KeyDeriver {
    evm_seed: SeedPhrase,
    evm_prefix: String,
    near_seed: SeedPhrase,
    near_prefix: String,
}

impl KeyDeriver {
    pub fn from_config(config: &PauseConfig) -> Self {
        Self {
            evm_seed: config.evm.mnemonic.clone(),
            evm_prefix: config.evm.derivation_path.clone(),
            near_seed: config.near.mnemonic.clone(),
            near_prefix: config.near.derivation_path.clone(),
        }
    }

    /// Derive a credential for `family` from a seed phrase and a full path.
    pub fn derive(
        family: ChainFamily,
        seed_phrase: &str,
        derivation_path: &str,
    ) -> Result<Credential, DerivationError> {
        let key = match family {
            ChainFamily::Near => KeyMaterial::Ed25519(derive_ed25519(seed_phrase, derivation_path)?),
            ChainFamily::Evm => KeyMaterial::Secp256k1(derive_secp256k1(seed_phrase, derivation_path)?),
        };

        Ok(Credential {
            derivation_path: derivation_path.to_string(),
            key,
        })
    }

    /// Registered path for a chain: `<prefix>/<index>`, plus a trailing `'` for NEAR.
    pub fn derivation_path(&self, chain: &ChainDescriptor) -> String {
        match chain {
            ChainDescriptor::Evm { index, .. } => format!("{}/{}", self.evm_prefix, index),
            ChainDescriptor::Near { index, .. } => format!("{}/{}'", self.near_prefix, index),
        }
    }

    /// Derive the credential for a classified chain.
    pub fn derive_for_chain(
        &self,
        chain: &ChainDescriptor,
        override_path: Option<&str>,
    ) -> Result<Credential, DerivationError> {
        let path = match override_path {
            Some(path) => path.to_string(),
            None => self.derivation_path(chain),
        };
        let seed = match chain.family() {
            ChainFamily::Evm => &self.evm_seed,
            ChainFamily::Near => &self.near_seed,
        };

        tracing::info!(derivation_path = %path, "Deriving public key");
        let credential = Self::derive(chain.family(), seed.expose(), &path)?;
        tracing::info!(public_key = %credential.public_key(), "Derived public key");

        Ok(credential)
    }
}

impl std::fmt::Debug for KeyDeriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyDeriver")
            .field("evm_prefix", &self.evm_prefix)
            .field("near_prefix", &self.near_prefix)
            .finish_non_exhaustive()
    }
}

fn derive_secp256k1(seed_phrase: &str, path: &str) -> Result<PrivateKeySigner, DerivationError> {
    MnemonicBuilder::<English>::default()
        .phrase(seed_phrase)
        .derivation_path(path)
        .map_err(|e| DerivationError::Path {
            path: path.to_string(),
            reason: e.to_string(),
        })?
        .build()
        .map_err(|e| DerivationError::SeedPhrase(e.to_string()))
}

fn derive_ed25519(seed_phrase: &str, path: &str) -> Result<SigningKey, DerivationError> {
    let normalized = seed_phrase
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ");
    // Checksum is not enforced for NEAR phrases; unknown words still fail.
    let mnemonic = Mnemonic::parse_in_normalized_without_checksum_check(Language::English, &normalized)
        .map_err(|e| DerivationError::SeedPhrase(e.to_string()))?;
    let seed = mnemonic.to_seed_normalized("");

    let secret = slip10_ed25519(&seed, path)?;
    Ok(SigningKey::from_bytes(&secret))
}

/// SLIP-10 ed25519 private key derivation.
fn slip10_ed25519(seed: &[u8], path: &str) -> Result<[u8; 32], DerivationError> {
    let indexes = parse_hardened_path(path)?;

    let (mut key, mut chain_code) = hmac_split(ED25519_CURVE_KEY, &[seed])?;
    for index in indexes {
        let hardened = (index | HARDENED_OFFSET).to_be_bytes();
        (key, chain_code) = hmac_split(&chain_code, &[&[0u8], &key, &hardened])?;
    }

    Ok(key)
}

fn hmac_split(key: &[u8], parts: &[&[u8]]) -> Result<([u8; 32], [u8; 32]), DerivationError> {
    let mut mac = <HmacSha512 as Mac>::new_from_slice(key).map_err(|e| DerivationError::Path {
        path: String::new(),
        reason: e.to_string(),
    })?;
    for part in parts {
        mac.update(part);
    }
    let out = mac.finalize().into_bytes();

    let mut left = [0u8; 32];
    let mut right = [0u8; 32];
    left.copy_from_slice(&out[..32]);
    right.copy_from_slice(&out[32..]);
    Ok((left, right))
}

fn parse_hardened_path(path: &str) -> Result<Vec<u32>, DerivationError> {
    let invalid = |reason: &str| DerivationError::Path {
        path: path.to_string(),
        reason: reason.to_string(),
    };

    let mut segments = path.split('/');
    if segments.next() != Some("m") {
        return Err(invalid("must start with \"m\""));
    }

    let indexes = segments
        .map(|segment| {
            let digits = segment
                .strip_suffix('\'')
                .ok_or_else(|| invalid("ed25519 derivation supports hardened segments only"))?;
            match digits.parse::<u32>() {
                Ok(index) if index < HARDENED_OFFSET => Ok(index),
                _ => Err(invalid("segment is not a valid index")),
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    if indexes.is_empty() {
        return Err(invalid("path has no segments"));
    }
    Ok(indexes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{DEFAULT_ETHEREUM_MNEMONIC, DEFAULT_NEAR_MNEMONIC};

    const LOCAL_IMPLICIT_ACCOUNT: &str =
        "2b699386702a805463a4d9f04741e1311dcbb28c2a733afe2361e99c41b35165";

    #[test]
    fn test_slip10_vector() {
        // SLIP-10 ed25519 test vector 1.
        let seed = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
        let key = slip10_ed25519(&seed, "m/0'").unwrap();
        assert_eq!(
            hex::encode(key),
            "68e0fe46dfb67e368c75379acec591dad19df3cde26e63b93a8e704f1dade7a3"
        );
    }

    #[test]
    fn test_near_golden_implicit_account() {
        let credential =
            KeyDeriver::derive(ChainFamily::Near, DEFAULT_NEAR_MNEMONIC, "m/44'/397'/2'").unwrap();

        assert_eq!(
            credential.public_key(),
            "ed25519:3vTuPLeEkCDw6HL6bovQhnyXMsGVD6w8RhZMFSTfmqT2"
        );
        assert_eq!(
            credential.implicit_account_id().as_deref(),
            Some(LOCAL_IMPLICIT_ACCOUNT)
        );
    }

    #[test]
    fn test_near_mainnet_key() {
        let credential =
            KeyDeriver::derive(ChainFamily::Near, DEFAULT_NEAR_MNEMONIC, "m/44'/397'/0'").unwrap();
        assert_eq!(
            credential.implicit_account_id().as_deref(),
            Some("e1394dca4a0795023c37b983cf50e707a1c274521b9d386d1d9990d1506828c0")
        );
    }

    #[test]
    fn test_evm_golden_address() {
        let credential =
            KeyDeriver::derive(ChainFamily::Evm, DEFAULT_ETHEREUM_MNEMONIC, "m/44'/60'/0'/0/0").unwrap();
        assert_eq!(
            credential.evm_address().unwrap().to_string().to_lowercase(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
        assert!(credential.implicit_account_id().is_none());

        let aurora =
            KeyDeriver::derive(ChainFamily::Evm, DEFAULT_ETHEREUM_MNEMONIC, "m/44'/60'/0'/0/1").unwrap();
        assert_eq!(
            aurora.evm_address().unwrap().to_string().to_lowercase(),
            "0x70997970c51812dc3a010c7d01b50e0d17dc79c8"
        );
    }

    #[test]
    fn test_derivation_is_deterministic() {
        for (family, phrase, path, changed) in [
            (ChainFamily::Near, DEFAULT_NEAR_MNEMONIC, "m/44'/397'/1'", "m/44'/397'/3'"),
            (ChainFamily::Evm, DEFAULT_ETHEREUM_MNEMONIC, "m/44'/60'/0'/0/0", "m/44'/60'/0'/0/2"),
        ] {
            let a = KeyDeriver::derive(family, phrase, path).unwrap();
            let b = KeyDeriver::derive(family, phrase, path).unwrap();
            let c = KeyDeriver::derive(family, phrase, changed).unwrap();

            assert_eq!(a.public_key(), b.public_key());
            assert_eq!(a.secret_key(), b.secret_key());
            assert_ne!(a.public_key(), c.public_key());
        }
    }

    #[test]
    fn test_chain_paths() {
        let deriver = KeyDeriver::from_config(&PauseConfig::default());

        let near = ChainDescriptor::Near {
            chain_id: "local".to_string(),
            index: "2".to_string(),
        };
        let evm = ChainDescriptor::Evm {
            chain_id: 1313161554,
            index: "0/1".to_string(),
        };
        assert_eq!(deriver.derivation_path(&near), "m/44'/397'/2'");
        assert_eq!(deriver.derivation_path(&evm), "m/44'/60'/0'/0/1");

        let credential = deriver.derive_for_chain(&near, None).unwrap();
        assert_eq!(credential.derivation_path(), "m/44'/397'/2'");
        assert_eq!(
            credential.implicit_account_id().as_deref(),
            Some(LOCAL_IMPLICIT_ACCOUNT)
        );

        let overridden = deriver.derive_for_chain(&near, Some("m/44'/397'/0'")).unwrap();
        assert_eq!(overridden.derivation_path(), "m/44'/397'/0'");
    }

    #[test]
    fn test_malformed_inputs() {
        assert!(matches!(
            KeyDeriver::derive(ChainFamily::Near, "not a real seed phrase", "m/44'/397'/0'"),
            Err(DerivationError::SeedPhrase(_))
        ));
        assert!(matches!(
            KeyDeriver::derive(ChainFamily::Near, DEFAULT_NEAR_MNEMONIC, "m/44'/397'/0"),
            Err(DerivationError::Path { .. })
        ));
        assert!(matches!(
            KeyDeriver::derive(ChainFamily::Near, DEFAULT_NEAR_MNEMONIC, "44'/397'"),
            Err(DerivationError::Path { .. })
        ));
        assert!(KeyDeriver::derive(ChainFamily::Evm, "not a real seed phrase", "m/44'/60'/0'/0/0").is_err());
        assert!(KeyDeriver::derive(ChainFamily::Evm, DEFAULT_ETHEREUM_MNEMONIC, "m/x/y").is_err());
    }

    #[test]
    fn test_implicit_account_from_text() {
        assert_eq!(
            implicit_account_id("ed25519:3vTuPLeEkCDw6HL6bovQhnyXMsGVD6w8RhZMFSTfmqT2").unwrap(),
            LOCAL_IMPLICIT_ACCOUNT
        );
        assert!(implicit_account_id("ed25519:0OIl").is_err());
    }

    #[test]
    fn test_debug_hides_secret() {
        let credential =
            KeyDeriver::derive(ChainFamily::Near, DEFAULT_NEAR_MNEMONIC, "m/44'/397'/2'").unwrap();
        let debug = format!("{:?}", credential);
        assert!(!debug.contains(&credential.secret_key()));
        assert!(debug.contains("m/44'/397'/2'"));
    }
}

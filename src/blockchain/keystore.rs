//! Signer key registry for NEAR accounts.
//!
//! Keys are registered per (chain, account) pair with last-writer-wins
//! semantics. Operations on different accounts never interfere; callers
//! serialise operations on the same account.
//!
//! Entries are never evicted: each signing account keeps its last key for the
//! lifetime of the store, so the map grows with the number of distinct
//! (chain, account) pairs, not with the number of operations.

use dashmap::DashMap;
use ed25519_dalek::SigningKey;

/// In-memory key store, one instance per process or per test.
#[derive(Default)]
pub struct KeyStore {
    keys: DashMap<(String, String), SigningKey>,
}

impl KeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `key` as the active key of `account_id` on `chain_id`.
    pub fn set_key(&self, chain_id: &str, account_id: &str, key: SigningKey) {
        self.keys
            .insert((chain_id.to_string(), account_id.to_string()), key);
    }

    /// Active key of `account_id` on `chain_id`.
    pub fn get_key(&self, chain_id: &str, account_id: &str) -> Option<SigningKey> {
        self.keys
            .get(&(chain_id.to_string(), account_id.to_string()))
            .map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl std::fmt::Debug for KeyStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyStore").field("keys", &self.keys.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn key(byte: u8) -> SigningKey {
        SigningKey::from_bytes(&[byte; 32])
    }

    #[test]
    fn test_last_writer_wins() {
        let store = KeyStore::new();
        store.set_key("local", "sender.test", key(1));
        store.set_key("local", "sender.test", key(2));

        assert_eq!(store.len(), 1);
        assert_eq!(
            store.get_key("local", "sender.test").unwrap().to_bytes(),
            [2; 32]
        );
    }

    #[test]
    fn test_scoped_by_chain_and_account() {
        let store = KeyStore::new();
        store.set_key("local", "a.test", key(1));
        store.set_key("testnet", "a.test", key(2));
        store.set_key("local", "b.test", key(3));

        assert_eq!(store.get_key("local", "a.test").unwrap().to_bytes(), [1; 32]);
        assert_eq!(store.get_key("testnet", "a.test").unwrap().to_bytes(), [2; 32]);
        assert!(store.get_key("mainnet", "a.test").is_none());
        assert_eq!(store.len(), 3);
    }

    #[tokio::test]
    async fn test_concurrent_accounts_do_not_interfere() {
        let store = Arc::new(KeyStore::new());

        let handles: Vec<_> = (0u8..16)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store.set_key("local", &format!("acct{}.test", i), key(i));
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        for i in 0u8..16 {
            assert_eq!(
                store.get_key("local", &format!("acct{}.test", i)).unwrap().to_bytes(),
                [i; 32]
            );
        }
    }
}

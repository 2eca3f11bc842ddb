//! # Credential Repository
//!
//! Email → `{password, userId}` map under `gold-calculator-credentials`.
//!
//! Credentials are not cached: the auth flow reads them fresh for every
//! register and login.

use std::collections::BTreeMap;

use gold_core::CredentialEntry;

use super::{load_or_default, save_json};
use crate::error::StoreResult;
use crate::port::KeyValueStore;

/// Storage key of the credential map.
pub const CREDENTIALS_KEY: &str = "gold-calculator-credentials";

/// Credentials keyed by normalized email.
pub type CredentialMap = BTreeMap<String, CredentialEntry>;

/// Repository for login credentials.
#[derive(Debug)]
pub struct CredentialRepository<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S: KeyValueStore + ?Sized> CredentialRepository<'a, S> {
    pub fn new(store: &'a S) -> Self {
        CredentialRepository { store }
    }

    /// Loads the whole map. Missing or malformed data yields an empty map.
    pub fn load(&self) -> CredentialMap {
        load_or_default(self.store, CREDENTIALS_KEY, |map: &CredentialMap| {
            map.values().all(|entry| !entry.user_id.trim().is_empty())
        })
    }

    /// Looks up one entry by the exact key given.
    pub fn find(&self, email: &str) -> Option<CredentialEntry> {
        self.load().remove(email)
    }

    /// Adds or replaces the entry for `email` and writes the map back.
    pub fn insert(&self, email: &str, entry: CredentialEntry) -> StoreResult<()> {
        let mut map = self.load();
        map.insert(email.to_string(), entry);
        save_json(self.store, CREDENTIALS_KEY, &map)
    }
}

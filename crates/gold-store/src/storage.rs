//! # Storage Handle
//!
//! `Storage` wraps any [`KeyValueStore`] and hands out typed repositories.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Storage<S>                                                             │
//! │     │                                                                   │
//! │     ├── .users()        → UserRepository        gold-calculator-users   │
//! │     ├── .session()      → SessionRepository     …-current-user          │
//! │     └── .credentials()  → CredentialRepository  …-credentials           │
//! │                                                                         │
//! │  S = MemoryStore (tests) | FileStore (app) | Arc<dyn KeyValueStore>     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::port::KeyValueStore;
use crate::repository::credentials::CredentialRepository;
use crate::repository::session::SessionRepository;
use crate::repository::users::UserRepository;

/// Typed access to the persisted records.
///
/// ## Usage
/// ```rust
/// use gold_store::{MemoryStore, Storage};
///
/// let storage = Storage::new(MemoryStore::new());
/// storage.users().save(&[]).unwrap();
/// assert!(storage.users().load().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Storage<S> {
    store: S,
}

impl<S: KeyValueStore> Storage<S> {
    /// Wraps a store.
    pub fn new(store: S) -> Self {
        Storage { store }
    }

    /// Gets the account list repository.
    pub fn users(&self) -> UserRepository<'_, S> {
        UserRepository::new(&self.store)
    }

    /// Gets the session repository.
    pub fn session(&self) -> SessionRepository<'_, S> {
        SessionRepository::new(&self.store)
    }

    /// Gets the credential repository.
    pub fn credentials(&self) -> CredentialRepository<'_, S> {
        CredentialRepository::new(&self.store)
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

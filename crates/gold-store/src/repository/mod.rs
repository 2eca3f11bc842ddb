//! # Repositories
//!
//! One repository per persisted key. Each turns JSON text into typed records
//! on the way in and back into JSON text on the way out.
//!
//! ## Schema Validation at the Boundary
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  store.get(key)                                                         │
//! │       │                                                                 │
//! │       ├── absent ─────────────────────────────────────► default         │
//! │       ├── read error ──────────────────── warn! ──────► default         │
//! │       ▼                                                                 │
//! │  serde_json::from_str::<T>()   (typed schema)                           │
//! │       ├── malformed / wrong shape ─────── warn! ──────► default         │
//! │       ▼                                                                 │
//! │  record check (non-empty ids, …)                                        │
//! │       ├── fails ───────────────────────── warn! ──────► default         │
//! │       ▼                                                                 │
//! │  typed value                                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Loading never fails. Any defect in what is stored yields the documented
//! default (empty list, no session, no credentials) as a whole; partial
//! salvage of a list would make the outcome depend on where the damage is.

pub mod credentials;
pub mod session;
pub mod users;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::error::{StoreError, StoreResult};
use crate::port::KeyValueStore;

/// Reads and decodes `key`, falling back to `T::default()` on any defect.
pub(crate) fn load_or_default<S, T, F>(store: &S, key: &str, is_valid: F) -> T
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned + Default,
    F: Fn(&T) -> bool,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(err) => {
            warn!(key, error = %err, "Failed to read stored value, using default");
            return T::default();
        }
    };

    match serde_json::from_str::<T>(&raw) {
        Ok(value) if is_valid(&value) => value,
        Ok(_) => {
            warn!(key, "Stored value has invalid records, using default");
            T::default()
        }
        Err(err) => {
            warn!(key, error = %err, "Stored value is malformed, using default");
            T::default()
        }
    }
}

/// Encodes `value` as JSON and stores it under `key`.
pub(crate) fn save_json<S, T>(store: &S, key: &str, value: &T) -> StoreResult<()>
where
    S: KeyValueStore + ?Sized,
    T: Serialize + ?Sized,
{
    let json = serde_json::to_string(value).map_err(|source| StoreError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &json)
}

/// Shared check for account records: id and email must be present.
pub(crate) fn is_well_formed_account(account: &gold_core::UserAccount) -> bool {
    !account.id.trim().is_empty() && !account.email.trim().is_empty()
}

//! # gold-store: Persistence Layer for the Gold Calculator
//!
//! The calculator keeps its records the way a browser keeps `localStorage`:
//! a flat map of string keys to JSON strings. This crate puts that map behind
//! a port so the auth flow can run against memory in tests and against a
//! JSON file on disk in the app.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Gold Calculator Data Flow                           │
//! │                                                                         │
//! │  AuthManager::register / login / logout                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     gold-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐ │   │
//! │  │   │   Storage     │    │  Repositories  │    │   Adapters   │ │   │
//! │  │   │ (storage.rs)  │───►│ users          │───►│ MemoryStore  │ │   │
//! │  │   │               │    │ session        │    │ FileStore    │ │   │
//! │  │   │               │    │ credentials    │    │              │ │   │
//! │  │   └───────────────┘    └────────────────┘    └──────────────┘ │   │
//! │  │                          typed JSON ⇄ text      KeyValueStore   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  gold-calculator-users / -current-user / -credentials                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`port`] - The `KeyValueStore` trait and the in-memory adapter
//! - [`file`] - JSON file adapter
//! - [`storage`] - `Storage` handle giving typed repository access
//! - [`repository`] - One repository per persisted key
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust
//! use gold_store::{MemoryStore, Storage};
//!
//! let storage = Storage::new(MemoryStore::new());
//! assert!(storage.users().load().is_empty());
//! assert!(storage.session().load().is_none());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod file;
pub mod port;
pub mod repository;
pub mod storage;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use file::FileStore;
pub use port::{KeyValueStore, MemoryStore};
pub use storage::Storage;

pub use repository::credentials::{CredentialMap, CredentialRepository, CREDENTIALS_KEY};
pub use repository::session::{SessionRepository, CURRENT_USER_KEY};
pub use repository::users::{UserRepository, USERS_KEY};

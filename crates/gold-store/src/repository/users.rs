//! # User Repository
//!
//! The ordered list of registered accounts under `gold-calculator-users`.

use gold_core::UserAccount;

use super::{is_well_formed_account, load_or_default, save_json};
use crate::error::StoreResult;
use crate::port::KeyValueStore;

/// Storage key of the account list.
pub const USERS_KEY: &str = "gold-calculator-users";

/// Repository for the account list.
#[derive(Debug)]
pub struct UserRepository<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S: KeyValueStore + ?Sized> UserRepository<'a, S> {
    pub fn new(store: &'a S) -> Self {
        UserRepository { store }
    }

    /// Loads all accounts in registration order. Missing or malformed data
    /// yields an empty list.
    pub fn load(&self) -> Vec<UserAccount> {
        load_or_default(self.store, USERS_KEY, |accounts: &Vec<UserAccount>| {
            accounts.iter().all(is_well_formed_account)
        })
    }

    /// Replaces the stored list.
    pub fn save(&self, accounts: &[UserAccount]) -> StoreResult<()> {
        save_json(self.store, USERS_KEY, accounts)
    }
}

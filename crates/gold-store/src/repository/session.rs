//! # Session Repository
//!
//! The logged-in account under `gold-calculator-current-user`. The key holds
//! a full account record while someone is logged in and is absent otherwise.

use gold_core::UserAccount;

use super::{is_well_formed_account, load_or_default, save_json};
use crate::error::StoreResult;
use crate::port::KeyValueStore;

/// Storage key of the active session.
pub const CURRENT_USER_KEY: &str = "gold-calculator-current-user";

/// Repository for the active session.
#[derive(Debug)]
pub struct SessionRepository<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S: KeyValueStore + ?Sized> SessionRepository<'a, S> {
    pub fn new(store: &'a S) -> Self {
        SessionRepository { store }
    }

    /// Loads the session. Missing or malformed data means nobody is logged in.
    pub fn load(&self) -> Option<UserAccount> {
        load_or_default(self.store, CURRENT_USER_KEY, |session: &Option<UserAccount>| {
            session.as_ref().map_or(true, is_well_formed_account)
        })
    }

    /// Persists `user` as the session, or removes the key for `None`.
    pub fn save(&self, user: Option<&UserAccount>) -> StoreResult<()> {
        match user {
            Some(user) => save_json(self.store, CURRENT_USER_KEY, user),
            None => self.store.remove(CURRENT_USER_KEY),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::MemoryStore;
    use chrono::Utc;

    #[test]
    fn test_save_and_clear() {
        let store = MemoryStore::new();
        let repo = SessionRepository::new(&store);
        let user = UserAccount::new("a@x.com", "Ana", Utc::now());

        repo.save(Some(&user)).unwrap();
        assert_eq!(repo.load(), Some(user));

        repo.save(None).unwrap();
        assert_eq!(repo.load(), None);
        assert_eq!(store.get(CURRENT_USER_KEY).unwrap(), None);
    }

    #[test]
    fn test_malformed_session_is_none() {
        for raw in ["{", "[]", "42", r#"{"id":"1"}"#] {
            let store = MemoryStore::with_entries([(CURRENT_USER_KEY, raw)]);
            assert_eq!(SessionRepository::new(&store).load(), None, "{raw}");
        }
    }

    #[test]
    fn test_null_session_is_none() {
        let store = MemoryStore::with_entries([(CURRENT_USER_KEY, "null")]);
        assert_eq!(SessionRepository::new(&store).load(), None);
    }
}

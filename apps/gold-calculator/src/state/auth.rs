//! # Auth State
//!
//! Registration, login and logout against locally persisted records.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Auth Operations                                      │
//! │                                                                         │
//! │  register(email, pw, name)                                              │
//! │     ├── normalized email taken?        → EmailTaken                     │
//! │     ├── empty field / short password?  → Validation                     │
//! │     ├── credentials[email] = {pw, id}  → write credentials              │
//! │     ├── users.push(account)            → write users                    │
//! │     └── session = account              → write current user             │
//! │                                                                         │
//! │  login(email, pw)                                                       │
//! │     ├── credentials[email as typed]?   → AccountNotFound                │
//! │     ├── password matches?              → InvalidPassword                │
//! │     ├── users has entry.user_id?       → AccountCorrupted               │
//! │     └── session = account              → write current user             │
//! │                                                                         │
//! │  logout()                                                               │
//! │     └── session = none                 → remove current user            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Memory vs. Storage
//! The user list and session are loaded once and kept in memory; the
//! credential map is read fresh on every register and login. In-memory
//! state only changes after the matching write succeeded.

use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use gold_core::validation::{normalize_email, validate_registration};
use gold_core::{CoreError, CredentialEntry, UserAccount};
use gold_store::{KeyValueStore, Storage};

use crate::error::AuthResult;

/// Behavior switches for the auth manager.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuthOptions {
    /// Trim and lowercase the email before the credential lookup at login.
    ///
    /// Registration always stores credentials under the normalized email,
    /// while login looks them up by the email exactly as typed, so
    /// `Ana@X.com` can register but not log back in. Off keeps that
    /// behavior.
    pub normalize_login_email: bool,
}

/// Owns the account list and the active session.
pub struct AuthManager<S> {
    storage: Storage<S>,
    users: Vec<UserAccount>,
    current_user: Option<UserAccount>,
    options: AuthOptions,
    clock: fn() -> DateTime<Utc>,
}

impl<S: KeyValueStore> AuthManager<S> {
    /// Loads users and session from storage.
    ///
    /// Malformed stored data is not an error: it loads as an empty list or
    /// no session.
    pub fn load(storage: Storage<S>, options: AuthOptions) -> Self {
        let users = storage.users().load();
        let current_user = storage.session().load();

        info!(
            users = users.len(),
            logged_in = current_user.is_some(),
            "Auth state loaded"
        );

        AuthManager {
            storage,
            users,
            current_user,
            options,
            clock: Utc::now,
        }
    }

    /// Replaces the time source used for new accounts.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    /// Registers a new account and logs it in.
    ///
    /// ## Errors
    /// - [`CoreError::EmailTaken`] if the normalized email is registered
    /// - [`CoreError::Validation`] for empty fields or a short password
    /// - [`AuthError::Storage`](crate::error::AuthError::Storage) if a write fails
    pub fn register(
        &mut self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> AuthResult<UserAccount> {
        let normalized = normalize_email(email);

        if self.is_email_taken(&normalized) {
            warn!("Registration rejected: email already registered");
            return Err(CoreError::EmailTaken { email: normalized }.into());
        }

        validate_registration(email, password, display_name).map_err(CoreError::from)?;

        let account = self.new_account(email, display_name);

        self.storage
            .credentials()
            .insert(&account.email, CredentialEntry::new(password, account.id.clone()))?;

        let mut users = self.users.clone();
        users.push(account.clone());
        self.storage.users().save(&users)?;
        self.users = users;

        self.storage.session().save(Some(&account))?;
        self.current_user = Some(account.clone());

        info!(user_id = %account.id, total_users = self.users.len(), "User registered");
        Ok(account)
    }

    /// Logs in with an email and password.
    ///
    /// ## Errors
    /// - [`CoreError::AccountNotFound`] if no credential exists for the email
    /// - [`CoreError::InvalidPassword`] if the password differs
    /// - [`CoreError::AccountCorrupted`] if the credential's account is gone
    pub fn login(&mut self, email: &str, password: &str) -> AuthResult<UserAccount> {
        let key = if self.options.normalize_login_email {
            normalize_email(email)
        } else {
            email.to_string()
        };

        let Some(entry) = self.storage.credentials().find(&key) else {
            warn!("Login rejected: no credential for email");
            return Err(CoreError::AccountNotFound.into());
        };

        if !entry.matches(password) {
            warn!(user_id = %entry.user_id, "Login rejected: invalid password");
            return Err(CoreError::InvalidPassword.into());
        }

        let account = match self.users.iter().find(|u| u.id == entry.user_id) {
            Some(account) => account.clone(),
            None => {
                error!(user_id = %entry.user_id, "Credential references a missing account");
                return Err(CoreError::AccountCorrupted {
                    user_id: entry.user_id,
                }
                .into());
            }
        };

        self.storage.session().save(Some(&account))?;
        self.current_user = Some(account.clone());

        info!(user_id = %account.id, "User logged in");
        Ok(account)
    }

    /// Ends the session. Always succeeds: a failed write is logged and the
    /// in-memory session is cleared regardless.
    pub fn logout(&mut self) {
        if let Some(user) = self.current_user.take() {
            info!(user_id = %user.id, "User logged out");
        }

        if let Err(err) = self.storage.session().save(None) {
            error!(error = %err, "Failed to persist logout");
        }
    }

    /// True iff a session is active.
    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    pub fn current_user(&self) -> Option<&UserAccount> {
        self.current_user.as_ref()
    }

    /// Registered accounts in registration order.
    pub fn users(&self) -> &[UserAccount] {
        &self.users
    }

    fn is_email_taken(&self, normalized: &str) -> bool {
        self.users
            .iter()
            .any(|u| normalize_email(&u.email) == normalized)
    }

    /// Builds the account record. Ids come from the clock but are bumped past
    /// the newest existing id, so two registrations in the same millisecond
    /// still get distinct ids.
    fn new_account(&self, email: &str, display_name: &str) -> UserAccount {
        let mut account = UserAccount::new(email, display_name, (self.clock)());

        let newest = self
            .users
            .iter()
            .filter_map(|u| u.id.parse::<i64>().ok())
            .max();

        if let (Some(newest), Ok(id)) = (newest, account.id.parse::<i64>()) {
            if id <= newest {
                match newest.checked_add(1) {
                    Some(next) => account.id = next.to_string(),
                    None => warn!("Stored account ids exhausted, keeping clock id"),
                }
            }
        }

        account
    }
}

impl<S> std::fmt::Debug for AuthManager<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthManager")
            .field("users", &self.users.len())
            .field("current_user", &self.current_user.as_ref().map(|u| &u.id))
            .field("options", &self.options)
            .finish()
    }
}

// =============================================================================
// Managed State
// =============================================================================

/// Shared auth state.
///
/// ## Thread Safety
/// A `Mutex` serializes register/login/logout so two commands never write
/// the session at the same time.
#[derive(Debug)]
pub struct AuthState<S> {
    manager: Mutex<AuthManager<S>>,
}

impl<S: KeyValueStore> AuthState<S> {
    pub fn new(manager: AuthManager<S>) -> Self {
        AuthState {
            manager: Mutex::new(manager),
        }
    }

    /// Executes a function with read access to the manager.
    pub fn with_auth<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&AuthManager<S>) -> R,
    {
        let manager = self.manager.lock().unwrap_or_else(PoisonError::into_inner);
        f(&manager)
    }

    /// Executes a function with write access to the manager.
    pub fn with_auth_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut AuthManager<S>) -> R,
    {
        let mut manager = self.manager.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut manager)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AuthError;
    use chrono::TimeZone;
    use gold_core::ValidationError;
    use gold_store::{
        KeyValueStore, MemoryStore, StoreError, StoreResult, CREDENTIALS_KEY, CURRENT_USER_KEY,
        USERS_KEY,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Memory store whose `nth` call to `set` (1-based) fails.
    struct FailingNthWrite {
        inner: MemoryStore,
        nth: usize,
        sets: AtomicUsize,
    }

    impl FailingNthWrite {
        fn new(inner: MemoryStore, nth: usize) -> Self {
            FailingNthWrite {
                inner,
                nth,
                sets: AtomicUsize::new(0),
            }
        }
    }

    impl KeyValueStore for FailingNthWrite {
        fn get(&self, key: &str) -> StoreResult<Option<String>> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> StoreResult<()> {
            if self.sets.fetch_add(1, Ordering::SeqCst) + 1 == self.nth {
                return Err(StoreError::write(
                    "storage.json",
                    std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
                ));
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> StoreResult<()> {
            self.inner.remove(key)
        }
    }

    fn failing_manager(store: &MemoryStore, nth: usize) -> AuthManager<FailingNthWrite> {
        AuthManager::load(
            Storage::new(FailingNthWrite::new(store.clone(), nth)),
            AuthOptions::default(),
        )
        .with_clock(fixed_clock)
    }

    fn fixed_clock() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_700_000_000_000).unwrap()
    }

    fn manager(store: &MemoryStore) -> AuthManager<MemoryStore> {
        AuthManager::load(Storage::new(store.clone()), AuthOptions::default())
            .with_clock(fixed_clock)
    }

    fn rejected(result: AuthResult<UserAccount>) -> CoreError {
        match result {
            Err(AuthError::Rejected(err)) => err,
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_register_adds_user_and_logs_in() {
        let store = MemoryStore::new();
        let mut auth = manager(&store);

        let account = auth.register(" Ana@X.com ", "secret", " Ana ").unwrap();

        assert_eq!(account.email, "ana@x.com");
        assert_eq!(account.display_name, "Ana");
        assert_eq!(account.id, "1700000000000");
        assert_eq!(auth.users().len(), 1);
        assert!(auth.is_authenticated());
        assert_eq!(auth.current_user(), Some(&account));

        let creds = store.get(CREDENTIALS_KEY).unwrap().unwrap();
        assert!(creds.contains("\"ana@x.com\""));
        assert!(store.get(USERS_KEY).unwrap().unwrap().contains("1700000000000"));
        assert!(store.get(CURRENT_USER_KEY).unwrap().is_some());
    }

    #[test]
    fn test_each_registration_grows_list_by_one() {
        let store = MemoryStore::new();
        let mut auth = manager(&store);

        for (i, email) in ["a@x.com", "b@x.com", "c@x.com"].iter().enumerate() {
            let account = auth.register(email, "secret", "User").unwrap();
            assert_eq!(auth.users().len(), i + 1);
            assert_eq!(auth.current_user(), Some(&account));
        }

        let ids: Vec<&str> = auth.users().iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, ["1700000000000", "1700000000001", "1700000000002"]);
    }

    #[test]
    fn test_duplicate_email_is_conflict_without_mutation() {
        let store = MemoryStore::new();
        let mut auth = manager(&store);
        auth.register("ana@x.com", "secret", "Ana").unwrap();
        auth.logout();
        let snapshot = store.get(CREDENTIALS_KEY).unwrap();

        let err = rejected(auth.register("  ANA@x.com", "other-secret", "Imposter"));

        assert!(matches!(err, CoreError::EmailTaken { .. }));
        assert_eq!(err.to_string(), "Email already registered");
        assert_eq!(auth.users().len(), 1);
        assert!(!auth.is_authenticated());
        assert_eq!(store.get(CREDENTIALS_KEY).unwrap(), snapshot);
    }

    #[test]
    fn test_register_validation() {
        let store = MemoryStore::new();
        let mut auth = manager(&store);

        let err = rejected(auth.register("a@x.com", "secret", "   "));
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::MissingFields)
        ));

        let err = rejected(auth.register("a@x.com", "12345", "Ana"));
        assert_eq!(err.to_string(), "Password must be at least 6 characters long");

        assert!(auth.users().is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn test_login_requires_exact_email() {
        let store = MemoryStore::new();
        let mut auth = manager(&store);
        auth.register("user@x.com", "secret", "User").unwrap();
        auth.logout();

        let err = rejected(auth.login("User@X.com", "secret"));
        assert!(matches!(err, CoreError::AccountNotFound));
        assert!(!auth.is_authenticated());

        let account = auth.login("user@x.com", "secret").unwrap();
        assert_eq!(account.email, "user@x.com");
        assert!(auth.is_authenticated());
    }

    #[test]
    fn test_login_with_normalization_enabled() {
        let store = MemoryStore::new();
        let options = AuthOptions {
            normalize_login_email: true,
        };
        let mut auth = AuthManager::load(Storage::new(store.clone()), options);
        auth.register("User@X.com", "secret", "User").unwrap();
        auth.logout();

        assert!(auth.login("  USER@x.com ", "secret").is_ok());
    }

    #[test]
    fn test_login_wrong_password() {
        let store = MemoryStore::new();
        let mut auth = manager(&store);
        auth.register("user@x.com", "secret", "User").unwrap();
        auth.logout();

        let err = rejected(auth.login("user@x.com", "Secret"));
        assert_eq!(err.to_string(), "Invalid password");
        assert!(!auth.is_authenticated());
    }

    #[test]
    fn test_login_with_dangling_credential_is_corruption() {
        let store = MemoryStore::with_entries([(
            CREDENTIALS_KEY,
            r#"{"ghost@x.com":{"password":"secret","userId":"999"}}"#,
        )]);
        let mut auth = manager(&store);

        let err = rejected(auth.login("ghost@x.com", "secret"));
        assert!(matches!(err, CoreError::AccountCorrupted { ref user_id } if user_id == "999"));
        assert_eq!(store.get(CURRENT_USER_KEY).unwrap(), None);
    }

    #[test]
    fn test_logout_always_clears_session() {
        let store = MemoryStore::new();
        let mut auth = manager(&store);

        auth.logout();
        assert!(!auth.is_authenticated());

        auth.register("a@x.com", "secret", "Ana").unwrap();
        auth.logout();
        assert!(!auth.is_authenticated());
        assert_eq!(store.get(CURRENT_USER_KEY).unwrap(), None);
    }

    #[test]
    fn test_state_survives_reload() {
        let store = MemoryStore::new();
        {
            let mut auth = manager(&store);
            auth.register("a@x.com", "secret", "Ana").unwrap();
        }

        let mut reloaded = manager(&store);
        assert_eq!(reloaded.users().len(), 1);
        assert!(reloaded.is_authenticated());

        reloaded.logout();
        assert!(reloaded.login("a@x.com", "secret").is_ok());
    }

    #[test]
    fn test_malformed_storage_loads_defaults() {
        let store = MemoryStore::with_entries([
            (USERS_KEY, "{broken"),
            (CURRENT_USER_KEY, "[]"),
            (CREDENTIALS_KEY, "\"nope\""),
        ]);
        let mut auth = manager(&store);

        assert!(auth.users().is_empty());
        assert!(!auth.is_authenticated());
        assert!(matches!(
            rejected(auth.login("a@x.com", "secret")),
            CoreError::AccountNotFound
        ));

        auth.register("a@x.com", "secret", "Ana").unwrap();
        assert_eq!(auth.users().len(), 1);
    }

    #[test]
    fn test_register_with_exhausted_ids_keeps_clock_id() {
        let stored = r#"[{"id":"9223372036854775807","email":"a@x.com","name":"A","createdAt":"2023-11-14T22:13:20.000Z"}]"#;
        let store = MemoryStore::with_entries([(USERS_KEY, stored)]);
        let mut auth = manager(&store);
        assert_eq!(auth.users().len(), 1);

        let account = auth.register("b@x.com", "secret", "B").unwrap();
        assert_eq!(account.id, "1700000000000");
        assert_eq!(auth.users().len(), 2);
    }

    #[test]
    fn test_failed_user_list_write_leaves_dangling_credential() {
        let store = MemoryStore::new();
        // Writes: 1 = credentials, 2 = users, 3 = session.
        let mut auth = failing_manager(&store, 2);

        let result = auth.register("a@x.com", "secret", "Ana");
        assert!(matches!(result, Err(AuthError::Storage(_))));
        assert!(auth.users().is_empty());
        assert!(!auth.is_authenticated());
        assert!(store.get(CREDENTIALS_KEY).unwrap().is_some());
        assert_eq!(store.get(USERS_KEY).unwrap(), None);

        let err = rejected(auth.login("a@x.com", "secret"));
        assert!(matches!(err, CoreError::AccountCorrupted { .. }));
        assert_eq!(err.to_string(), "User account corrupted. Please register again.");
    }

    #[test]
    fn test_failed_session_write_keeps_registered_user() {
        let store = MemoryStore::new();
        let mut auth = failing_manager(&store, 3);

        let result = auth.register("a@x.com", "secret", "Ana");
        assert!(matches!(result, Err(AuthError::Storage(_))));
        assert_eq!(auth.users().len(), 1);
        assert!(!auth.is_authenticated());
        assert_eq!(store.get(CURRENT_USER_KEY).unwrap(), None);

        let err = rejected(auth.register("a@x.com", "secret", "Ana"));
        assert_eq!(err.to_string(), "Email already registered");

        assert!(auth.login("a@x.com", "secret").is_ok());
        assert!(auth.is_authenticated());
    }

    #[test]
    fn test_auth_state_wraps_manager() {
        let state = AuthState::new(manager(&MemoryStore::new()));

        state
            .with_auth_mut(|auth| auth.register("a@x.com", "secret", "Ana"))
            .unwrap();
        assert!(state.with_auth(|auth| auth.is_authenticated()));
    }
}

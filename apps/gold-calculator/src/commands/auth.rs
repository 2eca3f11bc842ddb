//! # Auth Commands
//!
//! Commands behind the login and registration forms.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌──────────┐   register / login   ┌──────────┐                         │
//! │  │ Signed   │─────────────────────►│ Signed   │                         │
//! │  │ out      │◄─────────────────────│ in       │                         │
//! │  └──────────┘        logout        └──────────┘                         │
//! │                                                                         │
//! │  get_session() reports either state; on launch it reflects the         │
//! │  session persisted by the previous run.                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use gold_core::UserAccount;
use gold_store::KeyValueStore;

use crate::error::AuthResult;
use crate::state::AuthState;

const REGISTRATION_SUCCESSFUL: &str = "Registration successful";
const REGISTRATION_TECHNICAL_ERROR: &str = "Registration failed due to technical error";
const LOGIN_SUCCESSFUL: &str = "Login successful";
const LOGIN_TECHNICAL_ERROR: &str = "Login failed due to technical error";

/// Outcome of a register or login attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub success: bool,

    /// Message to show the user, on success and failure alike.
    pub message: String,

    /// The signed-in account on success.
    pub user: Option<UserAccount>,
}

impl AuthResponse {
    fn from_result(
        result: AuthResult<UserAccount>,
        success_message: &str,
        technical_message: &str,
    ) -> Self {
        match result {
            Ok(user) => AuthResponse {
                success: true,
                message: success_message.to_string(),
                user: Some(user),
            },
            Err(err) => AuthResponse {
                success: false,
                message: err.user_message(technical_message),
                user: None,
            },
        }
    }
}

/// Current session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub is_authenticated: bool,
    pub current_user: Option<UserAccount>,
}

/// Registers a new account and signs it in.
///
/// ## Messages
/// - `"Registration successful"`
/// - `"Email already registered"`
/// - `"All fields are required"`
/// - `"Password must be at least 6 characters long"`
/// - `"Registration failed due to technical error"` when storage fails
pub fn register<S: KeyValueStore>(
    auth: &AuthState<S>,
    email: &str,
    password: &str,
    display_name: &str,
) -> AuthResponse {
    debug!("register command");
    let result = auth.with_auth_mut(|a| a.register(email, password, display_name));
    AuthResponse::from_result(result, REGISTRATION_SUCCESSFUL, REGISTRATION_TECHNICAL_ERROR)
}

/// Signs in with an email and password.
///
/// ## Messages
/// - `"Login successful"`
/// - `"No account found with this email. Please register first."`
/// - `"Invalid password"`
/// - `"User account corrupted. Please register again."`
/// - `"Login failed due to technical error"` when storage fails
pub fn login<S: KeyValueStore>(auth: &AuthState<S>, email: &str, password: &str) -> AuthResponse {
    debug!("login command");
    let result = auth.with_auth_mut(|a| a.login(email, password));
    AuthResponse::from_result(result, LOGIN_SUCCESSFUL, LOGIN_TECHNICAL_ERROR)
}

/// Signs out. Always succeeds.
pub fn logout<S: KeyValueStore>(auth: &AuthState<S>) -> SessionResponse {
    debug!("logout command");
    auth.with_auth_mut(|a| a.logout());
    get_session(auth)
}

/// Gets the current session.
pub fn get_session<S: KeyValueStore>(auth: &AuthState<S>) -> SessionResponse {
    debug!("get_session command");
    auth.with_auth(|a| SessionResponse {
        is_authenticated: a.is_authenticated(),
        current_user: a.current_user().cloned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{AuthManager, AuthOptions};
    use gold_store::{MemoryStore, Storage, StoreError, StoreResult};

    fn auth_state<S: KeyValueStore>(store: S) -> AuthState<S> {
        AuthState::new(AuthManager::load(
            Storage::new(store),
            AuthOptions::default(),
        ))
    }

    /// Reads like a healthy store but refuses every write.
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> StoreResult<Option<String>> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> StoreResult<()> {
            Err(StoreError::write(
                "storage.json",
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            ))
        }

        fn remove(&self, key: &str) -> StoreResult<()> {
            self.set(key, "")
        }
    }

    #[test]
    fn test_register_then_session() {
        let auth = auth_state(MemoryStore::new());

        let response = register(&auth, "ana@x.com", "secret", "Ana");
        assert!(response.success);
        assert_eq!(response.message, "Registration successful");
        assert_eq!(response.user.as_ref().map(|u| u.email.as_str()), Some("ana@x.com"));

        let session = get_session(&auth);
        assert!(session.is_authenticated);
        assert_eq!(session.current_user, response.user);
    }

    #[test]
    fn test_failure_messages() {
        let auth = auth_state(MemoryStore::new());
        register(&auth, "ana@x.com", "secret", "Ana");

        let cases = [
            (
                register(&auth, "ANA@x.com", "secret", "Ana"),
                "Email already registered",
            ),
            (
                register(&auth, "bo@x.com", "secret", ""),
                "All fields are required",
            ),
            (
                register(&auth, "bo@x.com", "12345", "Bo"),
                "Password must be at least 6 characters long",
            ),
            (
                login(&auth, "bo@x.com", "secret"),
                "No account found with this email. Please register first.",
            ),
            (login(&auth, "ana@x.com", "wrong!"), "Invalid password"),
        ];

        for (response, message) in cases {
            assert!(!response.success);
            assert_eq!(response.message, message);
            assert_eq!(response.user, None);
        }
    }

    #[test]
    fn test_logout_then_login() {
        let auth = auth_state(MemoryStore::new());
        register(&auth, "ana@x.com", "secret", "Ana");

        let session = logout(&auth);
        assert!(!session.is_authenticated);
        assert_eq!(session.current_user, None);

        let response = login(&auth, "ana@x.com", "secret");
        assert!(response.success);
        assert_eq!(response.message, "Login successful");
        assert!(get_session(&auth).is_authenticated);
    }

    #[test]
    fn test_storage_failure_is_technical_error() {
        let auth = auth_state(ReadOnlyStore);

        let response = register(&auth, "ana@x.com", "secret", "Ana");
        assert!(!response.success);
        assert_eq!(response.message, "Registration failed due to technical error");

        let session = get_session(&auth);
        assert!(!session.is_authenticated);
        assert!(auth.with_auth(|a| a.users().is_empty()));

        // Logout swallows the failed write.
        assert!(!logout(&auth).is_authenticated);
    }

    #[test]
    fn test_response_shape() {
        let auth = auth_state(MemoryStore::new());
        let response = register(&auth, "ana@x.com", "secret", "Ana");

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["user"]["name"], "Ana");

        let json = serde_json::to_value(get_session(&auth)).unwrap();
        assert_eq!(json["isAuthenticated"], true);
        assert_eq!(json["currentUser"]["email"], "ana@x.com");
    }
}

//! # API Error Type
//!
//! Error types for the app layer.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Gold Calculator                    │
//! │                                                                         │
//! │  AuthManager::register / login                                         │
//! │       │                                                                 │
//! │       ├── CoreError (taken email, wrong password, …) ─┐                │
//! │       └── StoreError (file write failed) ─────────────┤                │
//! │                                                       ▼                │
//! │                                                  AuthError             │
//! │                                                       │                │
//! │       commands::auth ─────────────────────────────────┤                │
//! │           └── AuthResponse { success: false, message }│  (never Err)   │
//! │                                                       │                │
//! │  PricingEngine::compute_breakdown(13) / set_weight(24, 1e26)           │
//! │       └── UnsupportedKarat / AmountOverflow ──► ApiError  (hard Err)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `ApiError` serializes with a machine-readable `code` and a human-readable
//! `message`:
//! ```json
//! { "code": "UNSUPPORTED_KARAT", "message": "Unsupported karat: 13" }
//! ```

use serde::Serialize;
use thiserror::Error;
use ts_rs::TS;

use gold_core::CoreError;
use gold_store::StoreError;

// =============================================================================
// Auth Error
// =============================================================================

/// Failure of an [`AuthManager`](crate::state::AuthManager) operation.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The request broke a business rule. The message is user-facing.
    #[error(transparent)]
    Rejected(#[from] CoreError),

    /// Persisting the outcome failed. Details are for logs only.
    #[error("storage failure: {0}")]
    Storage(#[from] StoreError),
}

impl AuthError {
    /// Message to show the user. Storage failures get `technical_message`
    /// instead of their internal details.
    pub fn user_message(&self, technical_message: &str) -> String {
        match self {
            AuthError::Rejected(err) => err.to_string(),
            AuthError::Storage(_) => technical_message.to_string(),
        }
    }
}

/// Result type for auth operations.
pub type AuthResult<T> = Result<T, AuthError>;

// =============================================================================
// API Error
// =============================================================================

/// Error returned from command functions.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Missing or too-short input
    ValidationError,

    /// Email already registered
    Conflict,

    /// Unknown email or wrong password
    Unauthorized,

    /// Credential points at a missing account
    Corrupted,

    /// Karat has no calculator
    UnsupportedKarat,

    /// Weight, fee, price or tax too large to price
    AmountOverflow,

    /// Persisting state failed
    StorageError,

    /// Anything else
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::UnsupportedKarat(_) => ErrorCode::UnsupportedKarat,
            CoreError::AmountOverflow { .. } => ErrorCode::AmountOverflow,
            CoreError::EmailTaken { .. } => ErrorCode::Conflict,
            CoreError::AccountNotFound | CoreError::InvalidPassword => ErrorCode::Unauthorized,
            CoreError::AccountCorrupted { .. } => ErrorCode::Corrupted,
            CoreError::Validation(_) => ErrorCode::ValidationError,
        };
        ApiError::new(code, err.to_string())
    }
}

/// Converts storage errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        // Log the actual error but return a generic message
        tracing::error!(error = %err, "Storage operation failed");
        ApiError::new(ErrorCode::StorageError, "Storage operation failed")
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Rejected(err) => err.into(),
            AuthError::Storage(err) => err.into(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for command functions.
pub type ApiResult<T> = Result<T, ApiError>;

//! # Error Types
//!
//! Domain-specific error types for gold-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  gold-core errors (this file)                                          │
//! │  ├── CoreError        - Business rule failures (auth, karat)           │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  gold-store errors (separate crate)                                    │
//! │  └── StoreError       - Storage adapter failures                       │
//! │                                                                         │
//! │  App errors                                                            │
//! │  ├── AuthError        - CoreError or StoreError from the AuthManager   │
//! │  └── ApiError         - What the frontend sees (serialized)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AuthError → ApiError → Frontend   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `Display` text of each auth variant is the exact message shown to the
//! user, so the command layer can hand it straight to the UI.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Karat is not one of the configured calculators (24, 22, 18, 14, 12).
    ///
    /// ## When This Occurs
    /// - `compute_breakdown(13)`
    /// - `set_weight(10, ..)` / `set_design_fee(9, ..)`
    ///
    /// Unlike the auth failures below, this one aborts the calling operation.
    #[error("Unsupported karat: {0}")]
    UnsupportedKarat(u32),

    /// A breakdown figure for this karat is out of `Decimal` range.
    ///
    /// The setter that would cause it is refused, so the stored inputs
    /// always price.
    #[error("Amount is too large to calculate")]
    AmountOverflow { karat: u32 },

    /// An account already exists for the normalized email.
    #[error("Email already registered")]
    EmailTaken { email: String },

    /// No credential entry exists for the email given at login.
    #[error("No account found with this email. Please register first.")]
    AccountNotFound,

    /// Stored password does not match.
    #[error("Invalid password")]
    InvalidPassword,

    /// A credential entry points at an account missing from the user list.
    ///
    /// ## When This Occurs
    /// ```text
    /// credentials["a@x.com"] = { userId: "1700000000000" }
    ///                                        │
    ///                                        ▼
    /// users = [ … no account with id 1700000000000 … ]  ← dangling
    /// ```
    #[error("User account corrupted. Please register again.")]
    AccountCorrupted { user_id: String },

    /// Validation error (wraps ValidationError).
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more required registration fields are empty or whitespace.
    #[error("All fields are required")]
    MissingFields,

    /// Field value is too short.
    #[error("{field} must be at least {min} characters long")]
    TooShort { field: String, min: usize },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

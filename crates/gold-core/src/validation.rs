//! # Validation Module
//!
//! Input rules for account registration.
//!
//! ## Registration Checks (in order)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  register(email, password, name)                                        │
//! │       │                                                                 │
//! │       ├── normalized email already in user list? → EmailTaken           │
//! │       │   (AuthManager, needs the user list)                            │
//! │       │                                                                 │
//! │       ├── any field empty / whitespace?  → MissingFields  ◄── here      │
//! │       │                                                                 │
//! │       ├── password shorter than 6?       → TooShort       ◄── here      │
//! │       │                                                                 │
//! │       └── OK → create account                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use gold_core::validation::{normalize_email, validate_registration};
//!
//! assert_eq!(normalize_email("  Ana@X.com "), "ana@x.com");
//! assert!(validate_registration("ana@x.com", "secret", "Ana").is_ok());
//! assert!(validate_registration("ana@x.com", "12345", "Ana").is_err());
//! ```

use crate::error::ValidationError;
use crate::MIN_PASSWORD_LENGTH;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Canonical form of an email: trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validates the three registration inputs.
///
/// ## Rules
/// - No field may be empty or whitespace-only
/// - Password needs at least [`MIN_PASSWORD_LENGTH`] characters, counted on
///   the raw input (surrounding spaces count)
pub fn validate_registration(
    email: &str,
    password: &str,
    display_name: &str,
) -> ValidationResult<()> {
    if [email, password, display_name]
        .iter()
        .any(|field| field.trim().is_empty())
    {
        return Err(ValidationError::MissingFields);
    }

    validate_password(password)
}

/// Validates password length.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::TooShort {
            field: "Password".to_string(),
            min: MIN_PASSWORD_LENGTH,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

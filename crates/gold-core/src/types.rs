//! # Domain Types
//!
//! Core domain types shared by the auth manager and the pricing engine.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  UserAccount    │   │ CredentialEntry │   │    TaxRate      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (ms epoch)  │◄──│  user_id        │   │  fraction       │       │
//! │  │  email (lower)  │   │  password       │   │  0.12 = 12%     │       │
//! │  │  display_name   │   └─────────────────┘   └─────────────────┘       │
//! │  │  created_at     │     keyed by email                                │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Persisted Shape
//! Field names on the wire are fixed so existing browser-storage data loads:
//! `{"id","email","name","createdAt"}` for accounts and
//! `{"password","userId"}` for credentials.

use std::fmt;

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use ts_rs::TS;

use crate::validation::normalize_email;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate stored as a fraction of the taxed amount.
///
/// ## Why a Newtype?
/// The frontend speaks in percent ("12%"), configuration in basis points
/// (1200) and the formula in fractions (0.12). One type converts between all
/// three so the pricing code only ever sees the fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(#[ts(as = "String")] Decimal);

impl TaxRate {
    /// Creates a tax rate from basis points (1200 = 12%).
    #[inline]
    pub fn from_bps(bps: u32) -> Self {
        TaxRate(Decimal::new(i64::from(bps), 4))
    }

    /// Creates a tax rate from a fraction (0.12 = 12%).
    #[inline]
    pub const fn from_fraction(fraction: Decimal) -> Self {
        TaxRate(fraction)
    }

    /// Creates a tax rate from a percentage (12 = 12%).
    pub fn from_percentage(pct: Decimal) -> Self {
        TaxRate(pct / Decimal::ONE_HUNDRED)
    }

    /// Returns the rate as a fraction.
    #[inline]
    pub const fn fraction(&self) -> Decimal {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> Decimal {
        self.0 * Decimal::ONE_HUNDRED
    }

    /// Factor that turns a pre-tax amount into a tax-inclusive one: `1 + rate`.
    /// `None` if that sum is out of `Decimal` range.
    #[inline]
    pub fn multiplier(&self) -> Option<Decimal> {
        Decimal::ONE.checked_add(self.0)
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(Decimal::ZERO)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::from_bps(crate::DEFAULT_TAX_RATE_BPS)
    }
}

// =============================================================================
// User Account
// =============================================================================

/// A registered user.
///
/// Created once at registration and never mutated or deleted afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    /// Creation time in milliseconds since the Unix epoch, as text.
    /// Unique enough for a single browser; not collision-free.
    pub id: String,

    /// Trimmed, lowercased email. Unique within the user list.
    pub email: String,

    /// Name shown in the UI. Persisted as `name`.
    #[serde(rename = "name")]
    pub display_name: String,

    /// When the account was registered. Always written with milliseconds,
    /// e.g. `2023-11-14T22:13:20.000Z`.
    #[ts(as = "String")]
    #[serde(serialize_with = "serialize_millis")]
    pub created_at: DateTime<Utc>,
}

fn serialize_millis<S>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
}

impl UserAccount {
    /// Builds a new account from raw registration input.
    ///
    /// The email is normalized, the name trimmed, and the timestamp cut to
    /// millisecond precision so the id and `createdAt` describe the same
    /// instant.
    pub fn new(email: &str, display_name: &str, now: DateTime<Utc>) -> Self {
        let created_at = now.trunc_subsecs(3);
        UserAccount {
            id: created_at.timestamp_millis().to_string(),
            email: normalize_email(email),
            display_name: display_name.trim().to_string(),
            created_at,
        }
    }
}

// =============================================================================
// Credential Entry
// =============================================================================

/// Login secret for one account, keyed by normalized email in storage.
///
/// ## Invariant
/// `user_id` must reference an existing [`UserAccount::id`]. A dangling
/// reference is reported as corruption at login.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialEntry {
    /// Plaintext password, exactly as entered at registration.
    pub password: String,

    /// Id of the account this credential unlocks.
    pub user_id: String,
}

impl CredentialEntry {
    /// Creates a credential for the given account.
    pub fn new(password: impl Into<String>, user_id: impl Into<String>) -> Self {
        CredentialEntry {
            password: password.into(),
            user_id: user_id.into(),
        }
    }

    /// Checks a login attempt against the stored password.
    #[inline]
    pub fn matches(&self, password: &str) -> bool {
        self.password == password
    }
}

/// Never print the password, not even in debug logs.
impl fmt::Debug for CredentialEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialEntry")
            .field("password", &"<redacted>")
            .field("user_id", &self.user_id)
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

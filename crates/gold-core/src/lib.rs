//! # gold-core: Pure Business Logic for the Gold Calculator
//!
//! This crate holds the domain rules of the calculator as pure functions and
//! plain data types with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Gold Calculator Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (web UI)                            │   │
//! │  │    Login / Register ──► Karat calculators (24k … 12k)           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               apps/gold-calculator (AuthManager, state)         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ gold-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  pricing  │  │   error   │  │ validation│  │   │
//! │  │   │UserAccount│  │  Karat    │  │ CoreError │  │  register │  │   │
//! │  │   │ TaxRate   │  │  Engine   │  │           │  │   rules   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 gold-store (key-value persistence)              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (UserAccount, CredentialEntry, TaxRate)
//! - [`pricing`] - Karat profiles and the price breakdown computation
//! - [`error`] - Domain error types
//! - [`validation`] - Registration input rules
//!
//! ## Example Usage
//!
//! ```rust
//! use gold_core::pricing::PricingEngine;
//! use rust_decimal::Decimal;
//!
//! let mut engine = PricingEngine::default(); // ₱4000/g, 12% tax
//! engine.set_weight(18, Decimal::from(10)).unwrap();
//! engine.set_design_fee(18, Decimal::from(500)).unwrap();
//!
//! let breakdown = engine.compute_breakdown(18).unwrap();
//! assert_eq!(breakdown.total_price, Decimal::from(34160));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use pricing::{Karat, KaratProfile, PriceBreakdown, PricingEngine};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Karat value of pure gold. Purity of any karat is `karat / 24`.
pub const PURE_GOLD_KARAT: u32 = 24;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Default market price of one gram of pure gold, in pesos.
pub const DEFAULT_GOLD_PRICE_PER_GRAM: i64 = 4000;

/// Default tax rate in basis points (1200 = 12% VAT).
pub const DEFAULT_TAX_RATE_BPS: u32 = 1200;

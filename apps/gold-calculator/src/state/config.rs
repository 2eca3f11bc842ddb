//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`GOLD_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.
//! The live price and tax rate are owned by `CalculatorState`; these values
//! only seed it.

use std::path::PathBuf;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::warn;
use ts_rs::TS;

use gold_core::{TaxRate, DEFAULT_GOLD_PRICE_PER_GRAM, DEFAULT_TAX_RATE_BPS};

use crate::state::AuthOptions;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Opening price of one gram of pure gold.
    #[ts(as = "String")]
    pub base_gold_price_per_gram: Decimal,

    /// Opening tax rate in basis points
    /// e.g., 1200 = 12%
    pub tax_rate_bps: u32,

    /// Currency code (ISO 4217)
    pub currency_code: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Directory holding `storage.json`. `None` means the platform data dir.
    #[ts(as = "Option<String>")]
    pub data_dir: Option<PathBuf>,

    /// Lowercase and trim the email before the credential lookup at login.
    /// Off by default: login matches the email exactly as typed.
    pub normalize_login_email: bool,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Gold: ₱4000 per gram
    /// - Tax: 12%
    /// - Storage: platform data directory
    /// - Login email lookup: exact
    fn default() -> Self {
        ConfigState {
            base_gold_price_per_gram: Decimal::from(DEFAULT_GOLD_PRICE_PER_GRAM),
            tax_rate_bps: DEFAULT_TAX_RATE_BPS,
            currency_code: "PHP".to_string(),
            currency_symbol: "₱".to_string(),
            data_dir: None,
            normalize_login_email: false,
        }
    }
}

impl ConfigState {
    /// Creates a ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `GOLD_PRICE_PER_GRAM`: Override gold price (e.g., "4125.50")
    /// - `GOLD_TAX_RATE`: Override tax rate in percent (e.g., "12")
    /// - `GOLD_DATA_DIR`: Override storage directory
    /// - `GOLD_NORMALIZE_LOGIN_EMAIL`: "true"/"1" to normalize login emails
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConfigState::default();

        if let Some(raw) = lookup("GOLD_PRICE_PER_GRAM") {
            match raw.trim().parse::<Decimal>() {
                Ok(price) => config.base_gold_price_per_gram = price,
                Err(_) => warn!(value = %raw, "Ignoring invalid GOLD_PRICE_PER_GRAM"),
            }
        }

        if let Some(raw) = lookup("GOLD_TAX_RATE") {
            match raw.trim().parse::<Decimal>() {
                Ok(pct) => match pct
                    .checked_mul(Decimal::ONE_HUNDRED)
                    .and_then(|bps| bps.round().to_u32())
                {
                    Some(bps) => config.tax_rate_bps = bps,
                    None => warn!(value = %raw, "Ignoring out-of-range GOLD_TAX_RATE"),
                },
                Err(_) => warn!(value = %raw, "Ignoring invalid GOLD_TAX_RATE"),
            }
        }

        if let Some(dir) = lookup("GOLD_DATA_DIR").filter(|d| !d.trim().is_empty()) {
            config.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(raw) = lookup("GOLD_NORMALIZE_LOGIN_EMAIL") {
            match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => config.normalize_login_email = true,
                "0" | "false" | "no" => config.normalize_login_email = false,
                _ => warn!(value = %raw, "Ignoring invalid GOLD_NORMALIZE_LOGIN_EMAIL"),
            }
        }

        config
    }

    /// Opening tax rate.
    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.tax_rate_bps)
    }

    /// Options handed to the auth manager.
    pub fn auth_options(&self) -> AuthOptions {
        AuthOptions {
            normalize_login_email: self.normalize_login_email,
        }
    }

    /// Formats an amount as a currency string, rounded half away from zero
    /// to centavos.
    ///
    /// ## Example
    /// ```rust
    /// use gold_calculator::state::ConfigState;
    /// use rust_decimal::Decimal;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Decimal::from(34160)), "₱34160.00");
    /// ```
    pub fn format_currency(&self, amount: Decimal) -> String {
        let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!(
            "{}{}{:.2}",
            if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" },
            self.currency_symbol,
            rounded.abs()
        )
    }
}

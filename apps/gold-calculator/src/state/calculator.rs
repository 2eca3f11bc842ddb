//! # Calculator State
//!
//! Holds the live pricing engine: per-karat weights and design fees plus the
//! gold price and tax rate every karat shares.
//!
//! ## Thread Safety
//! The engine sits behind a `Mutex`: several commands edit it and each
//! edit must see the previous one.
//!
//! ```text
//! update_weight(18, 10) ──► lock ──► engine.set_weight ──► compute_breakdown ──► unlock
//! get_all_breakdowns()  ──► lock ──► engine.compute_all ─────────────────────► unlock
//! ```
//!
//! Nothing here is persisted; every launch starts from [`ConfigState`] with
//! zeroed weights and fees.

use std::sync::{Mutex, PoisonError};

use gold_core::PricingEngine;

use crate::state::ConfigState;

/// Shared pricing engine.
#[derive(Debug)]
pub struct CalculatorState {
    engine: Mutex<PricingEngine>,
}

impl CalculatorState {
    /// Seeds the engine with the configured opening price and tax rate.
    pub fn new(config: &ConfigState) -> Self {
        CalculatorState {
            engine: Mutex::new(PricingEngine::new(
                config.base_gold_price_per_gram,
                config.tax_rate(),
            )),
        }
    }

    /// Executes a function with read access to the engine.
    pub fn with_engine<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&PricingEngine) -> R,
    {
        let engine = self.engine.lock().unwrap_or_else(PoisonError::into_inner);
        f(&engine)
    }

    /// Executes a function with write access to the engine.
    pub fn with_engine_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut PricingEngine) -> R,
    {
        let mut engine = self.engine.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut engine)
    }
}

impl Default for CalculatorState {
    fn default() -> Self {
        CalculatorState::new(&ConfigState::default())
    }
}

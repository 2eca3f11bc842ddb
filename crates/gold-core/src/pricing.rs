//! # Pricing Module
//!
//! Karat-based gold jewelry pricing.
//!
//! ## The Formula
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  18k ring, 10 g, ₱500 design fee, gold at ₱4000/g, 12% tax              │
//! │                                                                         │
//! │  purity          = karat / 24             = 18 / 24      = 0.75         │
//! │  pure gold       = weight × purity        = 10 × 0.75    = 7.5 g        │
//! │  material cost   = pure gold × price/g    = 7.5 × 4000   = ₱30,000      │
//! │  subtotal        = material + design fee  = 30000 + 500  = ₱30,500      │
//! │  total           = subtotal × (1 + tax)   = 30500 × 1.12 = ₱34,160      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why Decimal?
//! Grams and design fees are fractional, and `30500 × 1.12` in binary
//! floating point is `34160.000000000004`. Every quantity here is a
//! [`Decimal`], so the breakdown is exact and matches what the customer is
//! quoted.
//!
//! Each karat owns an independent [`KaratProfile`]; changing the 18k weight
//! never touches the 24k calculator.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::TaxRate;
use crate::{DEFAULT_GOLD_PRICE_PER_GRAM, PURE_GOLD_KARAT};

// =============================================================================
// Karat
// =============================================================================

/// A supported gold purity.
///
/// Declaration order is display order (purest first), which is also the
/// iteration order of the engine's profile map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Karat {
    K24,
    K22,
    K18,
    K14,
    K12,
}

impl Karat {
    /// All supported karats, purest first.
    pub const ALL: [Karat; 5] = [Karat::K24, Karat::K22, Karat::K18, Karat::K14, Karat::K12];

    /// Numeric karat value (24, 22, …).
    pub const fn value(self) -> u32 {
        match self {
            Karat::K24 => 24,
            Karat::K22 => 22,
            Karat::K18 => 18,
            Karat::K14 => 14,
            Karat::K12 => 12,
        }
    }

    /// Fraction of pure gold by weight: `karat / 24`.
    pub fn purity(self) -> Decimal {
        Decimal::from(self.value()) / Decimal::from(PURE_GOLD_KARAT)
    }
}

impl TryFrom<u32> for Karat {
    type Error = CoreError;

    fn try_from(value: u32) -> CoreResult<Self> {
        Karat::ALL
            .into_iter()
            .find(|karat| karat.value() == value)
            .ok_or(CoreError::UnsupportedKarat(value))
    }
}

impl fmt::Display for Karat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}k", self.value())
    }
}

// =============================================================================
// Karat Profile
// =============================================================================

/// User inputs for one karat calculator.
///
/// Negative values are stored as given; the calculator defines no valid
/// range for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct KaratProfile {
    /// Total jewelry weight in grams.
    #[ts(as = "String")]
    pub weight_grams: Decimal,

    /// Flat workmanship fee added before tax.
    #[ts(as = "String")]
    pub design_fee: Decimal,
}

// =============================================================================
// Price Breakdown
// =============================================================================

/// Full cost breakdown for one karat, as displayed by a calculator card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub karat: u32,
    #[ts(as = "String")]
    pub weight_grams: Decimal,
    #[ts(as = "String")]
    pub design_fee: Decimal,
    /// `karat / 24`
    #[ts(as = "String")]
    pub purity_fraction: Decimal,
    /// `weight_grams × purity_fraction`
    #[ts(as = "String")]
    pub pure_gold_weight: Decimal,
    /// `pure_gold_weight × base price per gram`
    #[ts(as = "String")]
    pub material_cost: Decimal,
    /// `material_cost + design_fee`
    #[ts(as = "String")]
    pub subtotal: Decimal,
    /// `subtotal × (1 + tax rate)`
    #[ts(as = "String")]
    pub total_price: Decimal,
}

impl PriceBreakdown {
    /// Tax portion of the total price.
    pub fn tax_amount(&self) -> Decimal {
        self.total_price - self.subtotal
    }
}

// =============================================================================
// Pricing Engine
// =============================================================================

/// Owns the five karat calculators and the shared pricing constants.
///
/// ## Usage
/// ```rust
/// use gold_core::pricing::PricingEngine;
/// use rust_decimal::Decimal;
///
/// let mut engine = PricingEngine::default();
/// engine.set_weight(24, Decimal::from(10)).unwrap();
///
/// let breakdown = engine.compute_breakdown(24).unwrap();
/// assert_eq!(breakdown.material_cost, Decimal::from(40000));
/// assert_eq!(breakdown.total_price, Decimal::from(44800));
///
/// assert!(engine.compute_breakdown(13).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct PricingEngine {
    profiles: BTreeMap<Karat, KaratProfile>,
    base_gold_price_per_gram: Decimal,
    tax_rate: TaxRate,
}

impl PricingEngine {
    /// Creates an engine with all profiles zeroed.
    pub fn new(base_gold_price_per_gram: Decimal, tax_rate: TaxRate) -> Self {
        PricingEngine {
            profiles: Karat::ALL
                .into_iter()
                .map(|karat| (karat, KaratProfile::default()))
                .collect(),
            base_gold_price_per_gram,
            tax_rate,
        }
    }

    /// Supported karat values, purest first.
    pub fn available_karats(&self) -> Vec<u32> {
        self.profiles.keys().map(|karat| karat.value()).collect()
    }

    /// Current inputs of one calculator.
    pub fn profile(&self, karat: u32) -> CoreResult<KaratProfile> {
        let karat = Karat::try_from(karat)?;
        Ok(self.profiles.get(&karat).copied().unwrap_or_default())
    }

    /// Computes the cost breakdown for one karat.
    ///
    /// ## Errors
    /// - [`CoreError::UnsupportedKarat`] if `karat` is not 24, 22, 18, 14 or 12
    /// - [`CoreError::AmountOverflow`] if a figure exceeds `Decimal`'s range
    pub fn compute_breakdown(&self, karat: u32) -> CoreResult<PriceBreakdown> {
        let karat = Karat::try_from(karat)?;
        self.breakdown_for(karat)
    }

    /// Breakdowns for every karat, purest first.
    ///
    /// The setters refuse values that would overflow, so this only fails for
    /// an engine built with out-of-range constants.
    pub fn compute_all(&self) -> CoreResult<Vec<PriceBreakdown>> {
        self.profiles
            .keys()
            .map(|karat| self.breakdown_for(*karat))
            .collect()
    }

    /// Sets the jewelry weight in grams for one karat.
    ///
    /// ## Errors
    /// [`CoreError::AmountOverflow`] if the breakdown could no longer be
    /// computed; the previous weight is kept.
    pub fn set_weight(&mut self, karat: u32, grams: Decimal) -> CoreResult<()> {
        let karat = Karat::try_from(karat)?;
        self.apply(|engine| engine.profiles.entry(karat).or_default().weight_grams = grams)
    }

    /// Sets the design fee for one karat. Overflow is refused as in
    /// [`set_weight`](Self::set_weight).
    pub fn set_design_fee(&mut self, karat: u32, fee: Decimal) -> CoreResult<()> {
        let karat = Karat::try_from(karat)?;
        self.apply(|engine| engine.profiles.entry(karat).or_default().design_fee = fee)
    }

    /// Price of one gram of pure gold.
    pub fn base_gold_price_per_gram(&self) -> Decimal {
        self.base_gold_price_per_gram
    }

    /// Updates the market price of pure gold. Applies to every karat.
    ///
    /// ## Errors
    /// [`CoreError::AmountOverflow`] if any karat's breakdown would overflow;
    /// the previous price is kept.
    pub fn set_base_gold_price(&mut self, price_per_gram: Decimal) -> CoreResult<()> {
        self.apply(|engine| engine.base_gold_price_per_gram = price_per_gram)
    }

    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    /// Updates the tax rate. Applies to every karat. Overflow is refused as
    /// in [`set_base_gold_price`](Self::set_base_gold_price).
    pub fn set_tax_rate(&mut self, rate: TaxRate) -> CoreResult<()> {
        self.apply(|engine| engine.tax_rate = rate)
    }

    /// Runs `edit`, then keeps it only if every karat still prices.
    fn apply<F>(&mut self, edit: F) -> CoreResult<()>
    where
        F: FnOnce(&mut PricingEngine),
    {
        let previous = self.clone();
        edit(self);

        if let Err(err) = self.compute_all() {
            *self = previous;
            return Err(err);
        }
        Ok(())
    }

    fn breakdown_for(&self, karat: Karat) -> CoreResult<PriceBreakdown> {
        let profile = self.profiles.get(&karat).copied().unwrap_or_default();
        let overflow = || CoreError::AmountOverflow {
            karat: karat.value(),
        };

        let purity_fraction = karat.purity();
        let pure_gold_weight = profile
            .weight_grams
            .checked_mul(purity_fraction)
            .ok_or_else(overflow)?;
        let material_cost = pure_gold_weight
            .checked_mul(self.base_gold_price_per_gram)
            .ok_or_else(overflow)?;
        let subtotal = material_cost
            .checked_add(profile.design_fee)
            .ok_or_else(overflow)?;
        let total_price = self
            .tax_rate
            .multiplier()
            .and_then(|m| subtotal.checked_mul(m))
            .ok_or_else(overflow)?;

        Ok(PriceBreakdown {
            karat: karat.value(),
            weight_grams: profile.weight_grams,
            design_fee: profile.design_fee,
            purity_fraction,
            pure_gold_weight,
            material_cost,
            subtotal,
            total_price,
        })
    }
}

impl Default for PricingEngine {
    /// ₱4000 per gram of pure gold, 12% tax.
    fn default() -> Self {
        PricingEngine::new(
            Decimal::from(DEFAULT_GOLD_PRICE_PER_GRAM),
            TaxRate::default(),
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

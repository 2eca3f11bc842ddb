//! # Calculator Commands
//!
//! Commands behind the karat calculator cards.
//!
//! ## Card Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  18K GOLD                                          75% pure             │
//! │                                                                         │
//! │  Weight (g)      [ 10        ]   ◄── update_weight(18, 10)              │
//! │  Design fee      [ 500       ]   ◄── update_design_fee(18, 500)         │
//! │  ─────────────────────────────────────────────────                      │
//! │  Pure gold weight                  7.5 g                                │
//! │  Material cost                 ₱30000.00                                │
//! │  Subtotal                      ₱30500.00                                │
//! │  Tax (12%)                      ₱3660.00                                │
//! │  TOTAL                         ₱34160.00                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! One card per karat in [`get_pricing_constants`] order. Editing a card
//! returns its fresh breakdown; price and tax changes return every card.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use ts_rs::TS;

use gold_core::{PriceBreakdown, TaxRate};

use crate::error::ApiResult;
use crate::state::{CalculatorState, ConfigState};

/// A breakdown plus display strings for the card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownResponse {
    pub breakdown: PriceBreakdown,

    /// `total_price - subtotal`
    #[ts(as = "String")]
    pub tax_amount: Decimal,

    /// Total price formatted in the configured currency
    pub formatted_total: String,
}

impl BreakdownResponse {
    fn new(breakdown: PriceBreakdown, config: &ConfigState) -> Self {
        BreakdownResponse {
            tax_amount: breakdown.tax_amount(),
            formatted_total: config.format_currency(breakdown.total_price),
            breakdown,
        }
    }
}

/// Values shared by every calculator card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingConstants {
    #[ts(as = "String")]
    pub base_gold_price_per_gram: Decimal,

    /// Tax rate in percent, e.g. `"12"`
    #[ts(as = "String")]
    pub tax_rate_percentage: Decimal,

    /// Supported karats, purest first
    pub karats: Vec<u32>,

    pub currency_code: String,
}

/// Gets the breakdown for one karat.
///
/// ## Errors
/// - `UNSUPPORTED_KARAT` for anything but 24, 22, 18, 14 and 12
/// - `AMOUNT_OVERFLOW` if the engine holds out-of-range constants
pub fn get_breakdown(
    calculator: &CalculatorState,
    config: &ConfigState,
    karat: u32,
) -> ApiResult<BreakdownResponse> {
    debug!(karat, "get_breakdown command");
    let breakdown = calculator.with_engine(|e| e.compute_breakdown(karat))?;
    Ok(BreakdownResponse::new(breakdown, config))
}

/// Gets the breakdown of every karat, purest first.
pub fn get_all_breakdowns(
    calculator: &CalculatorState,
    config: &ConfigState,
) -> ApiResult<Vec<BreakdownResponse>> {
    debug!("get_all_breakdowns command");
    let breakdowns = calculator.with_engine(|e| e.compute_all())?;
    Ok(breakdowns
        .into_iter()
        .map(|breakdown| BreakdownResponse::new(breakdown, config))
        .collect())
}

/// Sets the weight in grams for one karat.
///
/// Negative weights are accepted and logged.
///
/// ## Errors
/// - `UNSUPPORTED_KARAT` for an unknown karat
/// - `AMOUNT_OVERFLOW` if the weight is too large to price; the previous
///   weight is kept
///
/// ## Returns
/// The updated breakdown of that karat
pub fn update_weight(
    calculator: &CalculatorState,
    config: &ConfigState,
    karat: u32,
    grams: Decimal,
) -> ApiResult<BreakdownResponse> {
    debug!(karat, %grams, "update_weight command");

    let breakdown = calculator.with_engine_mut(|e| {
        e.set_weight(karat, grams)?;
        e.compute_breakdown(karat)
    })?;

    if grams.is_sign_negative() && !grams.is_zero() {
        warn!(karat, %grams, "Negative weight stored");
    }

    Ok(BreakdownResponse::new(breakdown, config))
}

/// Sets the design fee for one karat.
///
/// Negative fees are accepted and logged. Errors as for [`update_weight`].
///
/// ## Returns
/// The updated breakdown of that karat
pub fn update_design_fee(
    calculator: &CalculatorState,
    config: &ConfigState,
    karat: u32,
    fee: Decimal,
) -> ApiResult<BreakdownResponse> {
    debug!(karat, %fee, "update_design_fee command");

    let breakdown = calculator.with_engine_mut(|e| {
        e.set_design_fee(karat, fee)?;
        e.compute_breakdown(karat)
    })?;

    if fee.is_sign_negative() && !fee.is_zero() {
        warn!(karat, %fee, "Negative design fee stored");
    }

    Ok(BreakdownResponse::new(breakdown, config))
}

/// Updates the market price of pure gold per gram.
///
/// ## Errors
/// `AMOUNT_OVERFLOW` if any karat could no longer be priced; the previous
/// price is kept.
///
/// ## Returns
/// Every karat's breakdown at the new price
pub fn set_base_gold_price(
    calculator: &CalculatorState,
    config: &ConfigState,
    price_per_gram: Decimal,
) -> ApiResult<Vec<BreakdownResponse>> {
    debug!(%price_per_gram, "set_base_gold_price command");
    calculator.with_engine_mut(|e| e.set_base_gold_price(price_per_gram))?;
    info!(%price_per_gram, "Gold price updated");
    get_all_breakdowns(calculator, config)
}

/// Updates the tax rate, given in percent (`12` = 12%).
///
/// ## Errors
/// `AMOUNT_OVERFLOW` as for [`set_base_gold_price`].
///
/// ## Returns
/// Every karat's breakdown at the new rate
pub fn set_tax_rate(
    calculator: &CalculatorState,
    config: &ConfigState,
    percentage: Decimal,
) -> ApiResult<Vec<BreakdownResponse>> {
    debug!(%percentage, "set_tax_rate command");
    calculator.with_engine_mut(|e| e.set_tax_rate(TaxRate::from_percentage(percentage)))?;
    info!(%percentage, "Tax rate updated");
    get_all_breakdowns(calculator, config)
}

/// Gets the constants shared by all calculators.
pub fn get_pricing_constants(
    calculator: &CalculatorState,
    config: &ConfigState,
) -> PricingConstants {
    debug!("get_pricing_constants command");
    calculator.with_engine(|e| PricingConstants {
        base_gold_price_per_gram: e.base_gold_price_per_gram(),
        tax_rate_percentage: e.tax_rate().percentage(),
        karats: e.available_karats(),
        currency_code: config.currency_code.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn setup() -> (CalculatorState, ConfigState) {
        let config = ConfigState::default();
        (CalculatorState::new(&config), config)
    }

    #[test]
    fn test_update_returns_fresh_breakdown() {
        let (calculator, config) = setup();

        update_weight(&calculator, &config, 18, Decimal::from(10)).unwrap();
        let response = update_design_fee(&calculator, &config, 18, Decimal::from(500)).unwrap();

        assert_eq!(response.breakdown.karat, 18);
        assert_eq!(response.breakdown.purity_fraction, Decimal::new(75, 2));
        assert_eq!(response.breakdown.pure_gold_weight, Decimal::new(75, 1));
        assert_eq!(response.breakdown.material_cost, Decimal::from(30000));
        assert_eq!(response.breakdown.subtotal, Decimal::from(30500));
        assert_eq!(response.breakdown.total_price, Decimal::from(34160));
        assert_eq!(response.tax_amount, Decimal::from(3660));
        assert_eq!(response.formatted_total, "₱34160.00");
    }

    #[test]
    fn test_unsupported_karat_is_error() {
        let (calculator, config) = setup();

        let err = get_breakdown(&calculator, &config, 13).unwrap_err();
        assert_eq!(err.code, ErrorCode::UnsupportedKarat);
        assert_eq!(err.message, "Unsupported karat: 13");

        assert!(update_weight(&calculator, &config, 10, Decimal::ONE).is_err());
        assert!(update_design_fee(&calculator, &config, 0, Decimal::ONE).is_err());
    }

    #[test]
    fn test_other_karats_unaffected() {
        let (calculator, config) = setup();
        update_weight(&calculator, &config, 24, Decimal::from(10)).unwrap();

        let all = get_all_breakdowns(&calculator, &config).unwrap();
        let karats: Vec<u32> = all.iter().map(|r| r.breakdown.karat).collect();
        assert_eq!(karats, vec![24, 22, 18, 14, 12]);
        assert_eq!(all[0].breakdown.total_price, Decimal::from(44800));
        assert!(all[1..].iter().all(|r| r.breakdown.total_price.is_zero()));
    }

    #[test]
    fn test_negative_weight_is_accepted() {
        let (calculator, config) = setup();
        let response = update_weight(&calculator, &config, 24, Decimal::from(-1)).unwrap();
        assert_eq!(response.breakdown.material_cost, Decimal::from(-4000));
    }

    #[test]
    fn test_price_and_tax_changes_apply_to_all_karats() {
        let (calculator, config) = setup();
        update_weight(&calculator, &config, 24, Decimal::from(10)).unwrap();
        update_weight(&calculator, &config, 12, Decimal::from(10)).unwrap();

        set_base_gold_price(&calculator, &config, Decimal::from(5000)).unwrap();
        let all = set_tax_rate(&calculator, &config, Decimal::ZERO).unwrap();

        assert_eq!(all[0].breakdown.total_price, Decimal::from(50000));
        assert_eq!(all[4].breakdown.total_price, Decimal::from(25000));

        let constants = get_pricing_constants(&calculator, &config);
        assert_eq!(constants.base_gold_price_per_gram, Decimal::from(5000));
        assert!(constants.tax_rate_percentage.is_zero());
        assert_eq!(constants.currency_code, "PHP");
    }

    #[test]
    fn test_huge_weight_leaves_cards_usable() {
        let (calculator, config) = setup();
        update_weight(&calculator, &config, 24, Decimal::from(10)).unwrap();

        let huge = Decimal::from_i128_with_scale(10_i128.pow(26), 0);
        let err = update_weight(&calculator, &config, 24, huge).unwrap_err();
        assert_eq!(err.code, ErrorCode::AmountOverflow);
        assert_eq!(err.message, "Amount is too large to calculate");

        let all = get_all_breakdowns(&calculator, &config).unwrap();
        assert_eq!(all[0].breakdown.total_price, Decimal::from(44800));
        assert!(set_tax_rate(&calculator, &config, Decimal::from(5)).is_ok());
    }

    #[test]
    fn test_huge_gold_price_is_refused() {
        let (calculator, config) = setup();
        update_weight(&calculator, &config, 18, Decimal::from(10)).unwrap();

        let err = set_base_gold_price(&calculator, &config, Decimal::MAX).unwrap_err();
        assert_eq!(err.code, ErrorCode::AmountOverflow);
        assert_eq!(
            get_pricing_constants(&calculator, &config).base_gold_price_per_gram,
            Decimal::from(4000)
        );
    }

    #[test]
    fn test_default_constants() {
        let (calculator, config) = setup();
        let constants = get_pricing_constants(&calculator, &config);

        assert_eq!(constants.base_gold_price_per_gram, Decimal::from(4000));
        assert_eq!(constants.tax_rate_percentage, Decimal::from(12));
        assert_eq!(constants.karats, vec![24, 22, 18, 14, 12]);
    }
}

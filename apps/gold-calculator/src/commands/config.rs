//! # Config Commands
//!
//! Commands for retrieving application configuration.

use tracing::debug;

use crate::state::ConfigState;

/// Gets the current application configuration.
///
/// ## When Used
/// - App startup (currency symbol, opening price and tax)
/// - Settings screen (where `storage.json` lives)
///
/// ## Returns
/// Complete configuration state (read-only)
pub fn get_config(config: &ConfigState) -> ConfigState {
    debug!("get_config command");
    config.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_config_serializes_camel_case() {
        let json = serde_json::to_value(get_config(&ConfigState::default())).unwrap();

        assert_eq!(json["baseGoldPricePerGram"], "4000");
        assert_eq!(json["taxRateBps"], 1200);
        assert_eq!(json["currencySymbol"], "₱");
        assert_eq!(json["normalizeLoginEmail"], false);
    }
}

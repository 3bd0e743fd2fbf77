//! # Configuration State
//!
//! The frontend-facing slice of `TabletopConfig`, fixed at startup.
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.
//!
//! The API key stays inside the gateway client; this state only says
//! whether one is set.

use serde::Serialize;
use tabletop_core::PaymentMethod;
use tabletop_gateway::TabletopConfig;

/// Currencies offered on the payment form.
pub const SUPPORTED_CURRENCIES: [&str; 5] = ["USD", "EUR", "MXN", "GBP", "CAD"];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Store name (sidebar header)
    pub store_name: String,

    /// Currency preselected on the payment form
    pub default_currency: String,

    /// Currency codes the payment form lists
    pub currencies: Vec<String>,

    /// Payment methods the payment form lists
    pub payment_methods: Vec<PaymentMethod>,

    /// Billing provider API root
    pub gateway_url: String,

    /// Whether payments can be registered at all
    pub gateway_configured: bool,
}

impl ConfigState {
    pub fn from_config(config: &TabletopConfig) -> Self {
        let default_currency = config.register.default_currency.to_ascii_uppercase();

        let mut currencies: Vec<String> =
            SUPPORTED_CURRENCIES.iter().map(|c| c.to_string()).collect();
        if !currencies.contains(&default_currency) {
            currencies.insert(0, default_currency.clone());
        }

        ConfigState {
            store_name: config.register.store_name.clone(),
            default_currency,
            currencies,
            payment_methods: PaymentMethod::ALL.to_vec(),
            gateway_url: config.gateway.base_url.clone(),
            gateway_configured: config.gateway.has_api_key(),
        }
    }
}

impl Default for ConfigState {
    fn default() -> Self {
        Self::from_config(&TabletopConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let state = ConfigState::default();
        assert_eq!(state.store_name, "Tabletop");
        assert_eq!(state.default_currency, "USD");
        assert_eq!(state.currencies, SUPPORTED_CURRENCIES);
        assert_eq!(state.payment_methods.len(), 3);
        assert!(!state.gateway_configured);
    }

    #[test]
    fn test_unlisted_default_currency_is_offered_first() {
        let mut config = TabletopConfig::default();
        config.register.default_currency = "jpy".to_string();
        config.gateway.api_key = "sk_test".to_string();

        let state = ConfigState::from_config(&config);
        assert_eq!(state.default_currency, "JPY");
        assert_eq!(state.currencies[0], "JPY");
        assert!(state.gateway_configured);
    }

    #[test]
    fn test_serialized_view_has_no_key() {
        let mut config = TabletopConfig::default();
        config.gateway.api_key = "sk_live_secret".to_string();

        let json = serde_json::to_string(&ConfigState::from_config(&config)).unwrap();
        assert!(!json.contains("sk_live_secret"));
        assert!(json.contains("\"gatewayConfigured\":true"));
    }
}

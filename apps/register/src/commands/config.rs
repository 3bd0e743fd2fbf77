//! # Configuration Commands
//!
//! Exposes the store and payment-form settings to the frontend.

use tracing::debug;

use crate::error::ApiError;
use crate::state::ConfigState;

/// Returns the frontend-facing configuration.
pub fn get_config(config: &ConfigState) -> Result<ConfigState, ApiError> {
    debug!("get_config command");
    Ok(config.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_config() {
        let config = get_config(&ConfigState::default()).unwrap();
        let json = serde_json::to_value(&config).unwrap();

        assert_eq!(json["defaultCurrency"], "USD");
        assert_eq!(json["paymentMethods"][1], "credit");
        assert_eq!(json["currencies"].as_array().map(Vec::len), Some(5));
    }
}

//! # Configuration
//!
//! Configuration for the billing gateway and the register.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     TABLETOP_API_KEY=sk_live_…                                         │
//! │     TABLETOP_CURRENCY=MXN                                              │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/tabletop-pos/tabletop.toml (Linux)                       │
//! │     ~/Library/Application Support/com.tabletop.pos/tabletop.toml       │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     https://api.gigstack.io/v2, pue_invoice, 30s, USD                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # tabletop.toml
//! [gateway]
//! base_url = "https://api.gigstack.io/v2"
//! api_key = "sk_live_..."
//! automation_type = "pue_invoice"
//! timeout_secs = 30
//!
//! [register]
//! store_name = "Tabletop"
//! default_currency = "USD"
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use tabletop_core::validation::validate_currency_code;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{GatewayError, GatewayResult};

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "tabletop.toml";

// =============================================================================
// Gateway Settings
// =============================================================================

/// Billing provider connection settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// API root; `/payments/register` is appended to it.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Sent in the `Authorization` header. Never logged.
    #[serde(default)]
    pub api_key: String,

    /// What the provider does after registering the payment.
    #[serde(default = "default_automation_type")]
    pub automation_type: String,

    /// Whole-request timeout (seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.gigstack.io/v2".to_string()
}

fn default_automation_type() -> String {
    "pue_invoice".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for GatewayConfig {
    fn default() -> Self {
        GatewayConfig {
            base_url: default_base_url(),
            api_key: String::new(),
            automation_type: default_automation_type(),
            timeout_secs: default_timeout(),
        }
    }
}

impl GatewayConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Full URL of the register-payment endpoint.
    pub fn register_payment_url(&self) -> String {
        format!("{}/payments/register", self.base_url.trim_end_matches('/'))
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    pub fn validate(&self) -> GatewayResult<()> {
        let url = Url::parse(&self.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(GatewayError::InvalidConfig(format!(
                "base_url must start with http:// or https://, got: {}",
                self.base_url
            )));
        }

        if self.timeout_secs == 0 {
            return Err(GatewayError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        if self.automation_type.trim().is_empty() {
            return Err(GatewayError::InvalidConfig(
                "automation_type must not be empty".into(),
            ));
        }

        Ok(())
    }
}

/// Hand-written so the API key never reaches a log line.
impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &if self.has_api_key() { "<redacted>" } else { "<unset>" })
            .field("automation_type", &self.automation_type)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

// =============================================================================
// Register Settings
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterSettings {
    /// Shown in the sidebar and logs.
    #[serde(default = "default_store_name")]
    pub store_name: String,

    /// Preselected currency on the payment form.
    #[serde(default = "default_currency")]
    pub default_currency: String,
}

fn default_store_name() -> String {
    "Tabletop".to_string()
}

fn default_currency() -> String {
    "USD".to_string()
}

impl Default for RegisterSettings {
    fn default() -> Self {
        RegisterSettings {
            store_name: default_store_name(),
            default_currency: default_currency(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TabletopConfig {
    #[serde(default)]
    pub gateway: GatewayConfig,

    #[serde(default)]
    pub register: RegisterSettings,
}

impl TabletopConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (tabletop.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> GatewayResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        if !config.gateway.has_api_key() {
            warn!("No billing API key configured; payments will be rejected");
        }

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a TOML document without touching the environment.
    pub fn from_toml_str(contents: &str) -> GatewayResult<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> GatewayResult<()> {
        self.gateway.validate()?;

        validate_currency_code(&self.register.default_currency).map_err(|e| {
            GatewayError::InvalidConfig(format!("default_currency: {}", e))
        })?;

        Ok(())
    }

    /// Applies `TABLETOP_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup (the environment in production).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("TABLETOP_GATEWAY_URL") {
            debug!(url = %url, "Overriding gateway URL from environment");
            self.gateway.base_url = url;
        }

        if let Some(key) = lookup("TABLETOP_API_KEY") {
            debug!("Overriding API key from environment");
            self.gateway.api_key = key;
        }

        if let Some(automation) = lookup("TABLETOP_AUTOMATION_TYPE") {
            self.gateway.automation_type = automation;
        }

        if let Some(timeout) = lookup("TABLETOP_GATEWAY_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.gateway.timeout_secs = secs,
                Err(_) => warn!(value = %timeout, "Ignoring non-numeric gateway timeout"),
            }
        }

        if let Some(name) = lookup("TABLETOP_STORE_NAME") {
            self.register.store_name = name;
        }

        if let Some(currency) = lookup("TABLETOP_CURRENCY") {
            debug!(currency = %currency, "Overriding default currency from environment");
            self.register.default_currency = currency;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "tabletop", "pos")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

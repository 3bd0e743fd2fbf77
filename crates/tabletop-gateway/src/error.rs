//! # Gateway Error Types
//!
//! Error types for billing provider calls and gateway configuration.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Gateway Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Provider            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Transport      │  │  Rejected (non-2xx)     │ │
//! │  │  ConfigLoad…    │  │  Timeout        │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant can be shown to staff through [`GatewayError::user_message`];
//! none of them is fatal. A failed payment leaves the table open.

use thiserror::Error;

/// Result type alias for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Fallback text when a transport failure carries no message.
pub const FALLBACK_FAILURE_MESSAGE: &str = "Payment registration failed";

#[derive(Debug, Error)]
pub enum GatewayError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid gateway or register configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failed to read or parse the config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// The request never produced an HTTP response.
    #[error("{0}")]
    Transport(String),

    /// The request exceeded the configured timeout.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    // =========================================================================
    // Provider Errors
    // =========================================================================
    /// The provider answered with a non-2xx status.
    #[error("Billing provider rejected the payment ({status}): {message}")]
    Rejected { status: u16, message: String },
}

impl GatewayError {
    /// Whether trying the same payment again could succeed.
    ///
    /// Nothing retries automatically; this only decides whether the payment
    /// form suggests "try again".
    pub fn is_retryable(&self) -> bool {
        match self {
            GatewayError::Transport(_) | GatewayError::Timeout(_) => true,
            GatewayError::Rejected { status, .. } => *status == 429 || *status >= 500,
            GatewayError::InvalidConfig(_) | GatewayError::ConfigLoadFailed(_) => false,
        }
    }

    /// The text recorded as `last_error` and shown in the failure toast.
    ///
    /// ```text
    /// Rejected  → provider's "message" (or "Request failed with status code N")
    /// Transport → transport error text (or "Payment registration failed")
    /// others    → Display text
    /// ```
    pub fn user_message(&self) -> String {
        match self {
            GatewayError::Rejected { message, .. } => message.clone(),
            GatewayError::Transport(message) if message.trim().is_empty() => {
                FALLBACK_FAILURE_MESSAGE.to_string()
            }
            other => other.to_string(),
        }
    }
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<std::io::Error> for GatewayError {
    fn from(err: std::io::Error) -> Self {
        GatewayError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for GatewayError {
    fn from(err: toml::de::Error) -> Self {
        GatewayError::ConfigLoadFailed(err.to_string())
    }
}

impl From<url::ParseError> for GatewayError {
    fn from(err: url::ParseError) -> Self {
        GatewayError::InvalidConfig(format!("base_url: {}", err))
    }
}

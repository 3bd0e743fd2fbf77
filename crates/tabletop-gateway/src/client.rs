//! # Payment Gateway Client
//!
//! Registers payments with the billing provider.
//!
//! ## Call Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  register_payment(request)                              │
//! │                                                                         │
//! │   in_flight += 1 ──► last_error = None                                 │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   POST {base_url}/payments/register   (exactly once, no retry)         │
//! │        │                                                                │
//! │        ├── 2xx ─────────────► Ok(GatewayResponse { status, data })     │
//! │        │                      data = JSON body, or the raw text         │
//! │        │                                                                │
//! │        ├── non-2xx ─────────► Err(Rejected)   last_error = message     │
//! │        │                                                                │
//! │        └── no response ─────► Err(Transport | Timeout)                 │
//! │                                                  last_error = message  │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   in_flight −= 1  (also when the future is dropped)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use tracing::{info, warn};

use crate::config::GatewayConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::protocol::{GatewayResponse, RegisterPaymentRequest};

// =============================================================================
// Gateway Seam
// =============================================================================

/// Anything that can register a payment.
///
/// The settlement workflow only talks to this trait, so tests can run it
/// against a simulated provider.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Sends one registration request. Never retries.
    async fn register_payment(
        &self,
        request: &RegisterPaymentRequest,
    ) -> GatewayResult<GatewayResponse>;

    /// True while at least one request is in flight.
    fn is_busy(&self) -> bool;

    /// Message of the most recent failure, cleared when a new call starts.
    fn last_error(&self) -> Option<String>;
}

// =============================================================================
// Gigstack Client
// =============================================================================

pub struct GigstackClient {
    http: reqwest::Client,
    config: GatewayConfig,
    in_flight: AtomicUsize,
    last_error: Mutex<Option<String>>,
}

impl GigstackClient {
    /// Builds a client from validated settings.
    pub fn new(config: GatewayConfig) -> GatewayResult<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| GatewayError::InvalidConfig(format!("HTTP client: {}", e)))?;

        Ok(GigstackClient {
            http,
            config,
            in_flight: AtomicUsize::new(0),
            last_error: Mutex::new(None),
        })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// `Authorization` header value, if a key is configured.
    fn authorization(&self) -> Option<String> {
        let key = self.config.api_key.trim();
        if key.is_empty() {
            None
        } else if key.starts_with("Bearer ") {
            Some(key.to_string())
        } else {
            Some(format!("Bearer {}", key))
        }
    }

    async fn send(&self, body: &RegisterPaymentRequest) -> GatewayResult<GatewayResponse> {
        let mut request = self.http.post(self.config.register_payment_url()).json(body);
        if let Some(auth) = self.authorization() {
            request = request.header(AUTHORIZATION, auth);
        }

        let response = request.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| self.transport_error(e))?;

        if !(200..300).contains(&status) {
            return Err(GatewayError::Rejected {
                status,
                message: rejection_message(status, &text),
            });
        }

        Ok(GatewayResponse {
            status,
            data: success_body(status, text),
        })
    }

    fn transport_error(&self, err: reqwest::Error) -> GatewayError {
        if err.is_timeout() {
            GatewayError::Timeout(self.config.timeout_secs)
        } else {
            GatewayError::Transport(err.to_string())
        }
    }

    fn set_last_error(&self, message: Option<String>) {
        *self.last_error.lock().unwrap_or_else(PoisonError::into_inner) = message;
    }
}

#[async_trait]
impl PaymentGateway for GigstackClient {
    async fn register_payment(
        &self,
        request: &RegisterPaymentRequest,
    ) -> GatewayResult<GatewayResponse> {
        let _busy = InFlight::enter(&self.in_flight);
        self.set_last_error(None);

        let body = request
            .clone()
            .with_default_automation(&self.config.automation_type);

        info!(
            order_id = %body.order_id(),
            payment_form = %body.payment_form,
            currency = %body.currency,
            items = body.items.len(),
            "Registering payment"
        );

        let result = self.send(&body).await;

        match &result {
            Ok(response) => {
                info!(order_id = %body.order_id(), status = response.status, "Payment registered");
            }
            Err(e) => {
                let message = e.user_message();
                warn!(order_id = %body.order_id(), error = %message, "Payment registration failed");
                self.set_last_error(Some(message));
            }
        }

        result
    }

    fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    fn last_error(&self) -> Option<String> {
        self.last_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Holds the in-flight count up for as long as it lives.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        InFlight(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// A 2xx body as JSON. A body that is not JSON is kept as a string, since
/// the payment is already registered.
fn success_body(status: u16, text: String) -> serde_json::Value {
    if text.trim().is_empty() {
        return serde_json::Value::Null;
    }
    serde_json::from_str(&text).unwrap_or_else(|e| {
        warn!(status, error = %e, "Billing provider returned a non-JSON success body");
        serde_json::Value::String(text)
    })
}

/// The provider's `message` field, or a generic status line.
fn rejection_message(status: u16, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("Request failed with status code {}", status))
}

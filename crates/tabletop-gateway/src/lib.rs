//! # tabletop-gateway: Billing Provider Client
//!
//! Registers a table's payment with the billing provider (Gigstack) and
//! loads the configuration that points at it.
//!
//! ## Modules
//!
//! - [`client`] - `PaymentGateway` trait and the reqwest-based `GigstackClient`
//! - [`protocol`] - Register-payment request/response bodies
//! - [`config`] - `tabletop.toml` loading with `TABLETOP_*` overrides
//! - [`error`] - Gateway error types
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use tabletop_core::{LedgerStore, PaymentMethod};
//! use tabletop_gateway::{GigstackClient, PaymentGateway, RegisterPaymentRequest, TabletopConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = TabletopConfig::load(None)?;
//! let client = GigstackClient::new(config.gateway)?;
//!
//! let mut ledger = LedgerStore::new();
//! let table = ledger.create_table("Patio 2")?;
//! let request = RegisterPaymentRequest::for_table(table, PaymentMethod::Cash, "USD", None);
//!
//! let response = client.register_payment(&request).await?;
//! println!("registered with status {}", response.status);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod protocol;

pub use client::{GigstackClient, PaymentGateway};
pub use config::{GatewayConfig, RegisterSettings, TabletopConfig};
pub use error::{GatewayError, GatewayResult};
pub use protocol::{
    ClientRef, ClientSearch, GatewayResponse, ItemTax, PaymentItem, PaymentMetadata,
    RegisterPaymentRequest,
};

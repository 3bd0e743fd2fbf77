//! # Tabletop Register Library
//!
//! The application layer of Tabletop POS: owned state, the command
//! functions a frontend bridge calls, and the pay-bill workflow.
//!
//! ## Module Organization
//! ```text
//! tabletop_register/
//! ├── lib.rs          ◄─── You are here (logging, AppContext)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── ledger.rs   ◄─── Shared LedgerStore behind a mutex
//! │   ├── menu.rs     ◄─── Read-only menu catalog
//! │   └── config.rs   ◄─── Frontend-facing configuration
//! ├── commands/
//! │   ├── table.rs    ◄─── Table and item commands
//! │   ├── menu.rs     ◄─── Menu lookup commands
//! │   ├── payment.rs  ◄─── Pay bill, payment status
//! │   ├── history.rs  ◄─── Paid tables, revenue summary
//! │   └── config.rs   ◄─── Configuration retrieval
//! ├── settlement.rs   ◄─── Validate → register payment → close table
//! ├── notify.rs       ◄─── Toast seam (Notifier trait)
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Register Startup                                  │
//! │                                                                         │
//! │  1. init_tracing()                                                      │
//! │     • tracing-subscriber with env filter                                │
//! │     • Default: info,tabletop=debug, overridable with RUST_LOG           │
//! │                                                                         │
//! │  2. TabletopConfig::load(path)                                          │
//! │     • tabletop.toml → TABLETOP_* env → validate                         │
//! │                                                                         │
//! │  3. AppContext::new(config)                                             │
//! │     • GigstackClient from [gateway]                                     │
//! │     • Empty LedgerState, default MenuState, ConfigState                 │
//! │     • SettlementCoordinator(gateway, TracingNotifier)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust,no_run
//! use tabletop_register::{commands, AppContext};
//! use tabletop_register::settlement::PayBillRequest;
//! use tabletop_core::PaymentMethod;
//!
//! # async fn demo() -> Result<(), tabletop_register::error::ApiError> {
//! tabletop_register::init_tracing();
//! let app = AppContext::load(None)?;
//!
//! let table = commands::table::create_table(&app.ledger, app.notifier.as_ref(), "Patio 2")?;
//! commands::table::add_menu_item(&app.ledger, &app.menu, table.id(), "3")?;
//!
//! let paid = commands::payment::pay_bill(
//!     &app.ledger,
//!     &app.settlement,
//!     PayBillRequest {
//!         table_id: table.id().to_string(),
//!         payment_method: PaymentMethod::Credit,
//!         currency: "USD".to_string(),
//!         email: None,
//!     },
//! )
//! .await?;
//! assert!(!paid.table.is_open());
//! # Ok(())
//! # }
//! ```

pub mod commands;
pub mod error;
pub mod notify;
pub mod settlement;
pub mod state;

use std::path::PathBuf;
use std::sync::Arc;

use tabletop_gateway::{GigstackClient, PaymentGateway, TabletopConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

use error::ApiError;
use notify::{Notifier, TracingNotifier};
use settlement::SettlementCoordinator;
use state::{ConfigState, LedgerState, MenuState};

/// Everything a frontend bridge needs to serve commands.
pub struct AppContext {
    pub ledger: LedgerState,
    pub menu: MenuState,
    pub config: ConfigState,
    pub notifier: Arc<dyn Notifier>,
    pub settlement: SettlementCoordinator,
}

impl AppContext {
    /// Loads configuration (file, then environment) and builds the context.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = TabletopConfig::load(config_path)?;
        Self::new(config)
    }

    /// Builds the context around the real billing client.
    pub fn new(config: TabletopConfig) -> Result<Self, ApiError> {
        let gateway = GigstackClient::new(config.gateway.clone())?;
        info!(url = %config.gateway.register_payment_url(), "Billing client ready");

        Ok(Self::with_gateway(
            &config,
            Arc::new(gateway),
            Arc::new(TracingNotifier),
        ))
    }

    /// Builds the context around any gateway and notifier.
    pub fn with_gateway(
        config: &TabletopConfig,
        gateway: Arc<dyn PaymentGateway>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let config = ConfigState::from_config(config);
        info!(store = %config.store_name, currency = %config.default_currency, "Register state initialized");

        AppContext {
            ledger: LedgerState::new(),
            menu: MenuState::default(),
            config,
            settlement: SettlementCoordinator::new(gateway, notifier.clone()),
            notifier,
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=tabletop_gateway=trace` - Trace the billing client only
/// - Default: info, debug for tabletop crates
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tabletop=debug"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

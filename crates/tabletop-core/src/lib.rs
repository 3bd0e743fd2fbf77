//! # tabletop-core: Pure Business Logic for Tabletop POS
//!
//! This crate is the **heart** of Tabletop POS. It owns the order ledger:
//! tables, their line items, totals, and the open → paid transition.
//! Everything here is synchronous and free of I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Tabletop POS Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (views, toasts)                     │   │
//! │  │   Open Tables ──► Table Details ──► Payment ──► Order History   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            tabletop-register (commands, settlement)             │   │
//! │  └───────────────┬─────────────────────────────┬───────────────────┘   │
//! │                  │                             │                        │
//! │  ┌───────────────▼──────────────────┐  ┌──────▼────────────────────┐   │
//! │  │   ★ tabletop-core (THIS CRATE) ★ │  │    tabletop-gateway       │   │
//! │  │                                  │  │  POST /payments/register  │   │
//! │  │  money · types · ledger · menu   │  └───────────────────────────┘   │
//! │  │  order_id · report · validation  │                                  │
//! │  │                                  │                                  │
//! │  │  NO I/O • NO NETWORK • NO CLOCK  │                                  │
//! │  │  (except capture-time stamps)    │                                  │
//! │  └──────────────────────────────────┘                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`types`] - Order items, tables, payment methods
//! - [`ledger`] - The in-memory store that owns every table
//! - [`order_id`] - Order identifier generation
//! - [`menu`] - Static menu catalog used as item templates
//! - [`report`] - Revenue projections over paid tables
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation (names, emails, currency codes)
//!
//! ## Example Usage
//!
//! ```rust
//! use tabletop_core::{ItemTemplate, LedgerStore, Money};
//!
//! let mut ledger = LedgerStore::new();
//! let table_id = ledger.create_table("Patio 2").unwrap().id().to_string();
//!
//! let salad = ItemTemplate::new("Caesar Salad", Money::from_cents(949), "80141503", "E48");
//! ledger.add_item(&table_id, &salad).unwrap();
//! let table = ledger.add_item(&table_id, &salad).unwrap();
//!
//! assert_eq!(table.items().len(), 1);
//! assert_eq!(table.total().cents(), 1898);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod ledger;
pub mod menu;
pub mod money;
pub mod order_id;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use tabletop_core::Money` instead of
// `use tabletop_core::money::Money`

pub use error::{CoreError, CoreResult, ValidationError};
pub use ledger::LedgerStore;
pub use menu::{MenuCatalog, MenuItem};
pub use money::Money;
pub use order_id::OrderIdGenerator;
pub use report::RevenueSummary;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Prefix carried by every generated order identifier.
pub const ORDER_ID_PREFIX: &str = "ord_";

/// Maximum length of a table name.
pub const MAX_TABLE_NAME_LEN: usize = 100;

/// Maximum length of a customer email (matches the payment form input limit).
pub const MAX_EMAIL_LEN: usize = 255;

//! # Commands Module
//!
//! All commands exposed to the frontend bridge.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── table.rs    ◄─── Open tables, items, delete, search
//! ├── menu.rs     ◄─── Menu catalog lookup
//! ├── payment.rs  ◄─── Pay bill, payment status
//! ├── history.rs  ◄─── Paid tables, revenue summary
//! └── config.rs   ◄─── Configuration retrieval
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs the ledger
//! fn list_open_tables(ledger: &LedgerState)
//!
//! // Needs ledger and menu
//! fn add_menu_item(ledger: &LedgerState, menu: &MenuState, ...)
//!
//! // Needs ledger and the settlement workflow
//! async fn pay_bill(ledger: &LedgerState, settlement: &SettlementCoordinator, ...)
//! ```
//!
//! Every command returns `Result<T, ApiError>` so the bridge can serialize
//! failures as `{ code, message }`.

pub mod config;
pub mod history;
pub mod menu;
pub mod payment;
pub mod table;

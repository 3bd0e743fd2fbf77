//! # State Module
//!
//! Owned application state for the register.
//!
//! ## Why Multiple State Types?
//! Instead of a single struct containing everything, we use separate state
//! types so each command declares exactly what it touches:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │ LedgerState  │  │  MenuState   │  │   ConfigState    │              │
//! │  │              │  │              │  │                  │              │
//! │  │  Arc<Mutex<  │  │  Arc<Menu    │  │  store_name      │              │
//! │  │  LedgerStore │  │   Catalog>   │  │  currencies      │              │
//! │  │  >>          │  │              │  │  gateway status  │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • LedgerState: Protected by Arc<Mutex<T>> for exclusive access        │
//! │  • MenuState: Immutable, shared by Arc                                 │
//! │  • ConfigState: Read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod ledger;
mod menu;

pub use config::{ConfigState, SUPPORTED_CURRENCIES};
pub use ledger::LedgerState;
pub use menu::MenuState;

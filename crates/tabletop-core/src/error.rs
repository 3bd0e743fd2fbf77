//! # Error Types
//!
//! What can go wrong inside the ledger.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Where each error is raised                                             │
//! │                                                                         │
//! │  tabletop-core (this file)                                             │
//! │  ├── ValidationError  bad name / email / currency / price              │
//! │  └── CoreError        unknown table, table already paid                │
//! │                                                                         │
//! │  tabletop-gateway                                                      │
//! │  └── GatewayError     provider refused, timed out, unreachable         │
//! │                                                                         │
//! │  tabletop-register                                                     │
//! │  ├── SettlementError  why a pay-bill attempt did not close the table   │
//! │  └── ApiError         { code, message } handed to the frontend         │
//! │                                                                         │
//! │  ValidationError ─► CoreError ─► SettlementError ─► ApiError            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these are fatal. A failed operation leaves the ledger exactly as
//! it was, and the worst outcome is a table that stays open.

use thiserror::Error;

use crate::types::TableStatus;

#[derive(Debug, Error)]
pub enum CoreError {
    /// No table with this id. Usually a stale id kept after a delete.
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// The table is paid and no longer accepts changes.
    ///
    /// ```text
    /// pay_bill(Patio 2) ──► provider OK ──► close_table ──► Paid
    ///                                                         │
    /// add "Iced Coffee" to Patio 2 ◄──────────────────────────┘
    ///      │
    ///      ▼
    /// TableNotOpen { table_id: "ord_…", status: Paid }
    /// ```
    #[error("Table {table_id} is {status}, cannot perform operation")]
    TableNotOpen {
        table_id: String,
        status: TableStatus,
    },

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),
}

/// Rejected user input. Always raised before any state change or network
/// call.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Empty, or empty after trimming.
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    #[error("{field} must not be negative")]
    Negative { field: String },

    /// An amount the ledger cannot hold in cents.
    #[error("{field} is too large")]
    TooLarge { field: String },

    /// Wrong shape, e.g. an email without a domain or a 4-letter currency.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

pub type CoreResult<T> = Result<T, CoreError>;

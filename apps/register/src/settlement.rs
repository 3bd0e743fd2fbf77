//! # Settlement
//!
//! The pay-bill workflow: the only code that talks to both the ledger and
//! the billing provider.
//!
//! ## Attempt Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        pay_bill(request)                                │
//! │                                                                         │
//! │  ┌────────────┐  bad email / currency                                  │
//! │  │ Validating │─────────────────────────────► Err(Validation)          │
//! │  └─────┬──────┘  missing / paid / in flight ─► Err(TableNotFound | …)  │
//! │        │                                                                │
//! │        │ snapshot table under the ledger lock, then release it         │
//! │        ▼                                                                │
//! │  ┌────────────┐  gateway error                                         │
//! │  │ Submitting │─────────────────────────────► Err(Gateway)             │
//! │  └─────┬──────┘                               table stays Open         │
//! │        │ 2xx                                  "Payment Failed"          │
//! │        ▼                                                                │
//! │  ┌────────────┐  close_table fails                                     │
//! │  │  Settled   │─────────────────────────────► Err(Reconcile)           │
//! │  └─────┬──────┘  (deleted or closed while in flight)                   │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  Ok(Settlement { table: Paid, response })     "Payment Complete"        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Two-Phase Ordering
//! Nothing is reserved locally before the call. The table only becomes Paid
//! after the provider accepted the payment in the same attempt. If the
//! process dies between the provider's 2xx and `close_table`, the payment is
//! registered remotely while the table is still open locally; that window
//! is reported as `Reconcile` when it is observable.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tabletop_core::validation::{validate_currency_code, validate_email};
use tabletop_core::{CoreError, PaymentMethod, Table, TableStatus, ValidationError};
use tabletop_gateway::{GatewayResponse, PaymentGateway, RegisterPaymentRequest};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::notify::{Notification, Notifier};
use crate::state::LedgerState;

// =============================================================================
// Request / Outcome
// =============================================================================

/// What the payment form submits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayBillRequest {
    pub table_id: String,
    pub payment_method: PaymentMethod,
    pub currency: String,
    /// Receipt address; blank means none.
    #[serde(default)]
    pub email: Option<String>,
}

/// A completed settlement.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    /// The table after it was closed.
    pub table: Table,
    pub response: GatewayResponse,
}

#[derive(Debug, Error)]
pub enum SettlementError {
    /// Bad email or currency; nothing was sent.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Table {table_id} is {status}, cannot be paid")]
    TableNotOpen {
        table_id: String,
        status: TableStatus,
    },

    /// Another attempt for the same table has not finished yet.
    #[error("A payment for table {0} is already in progress")]
    AlreadyInFlight(String),

    /// The provider refused or could not be reached. The table is still open.
    #[error("{message}")]
    Gateway { message: String, retryable: bool },

    /// The provider registered the payment but the table could not be closed.
    #[error("Payment registered for table {table_id} but the table could not be closed: {reason}")]
    Reconcile {
        table_id: String,
        reason: String,
        response: GatewayResponse,
    },
}

impl From<CoreError> for SettlementError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::TableNotFound(id) => SettlementError::TableNotFound(id),
            CoreError::TableNotOpen { table_id, status } => {
                SettlementError::TableNotOpen { table_id, status }
            }
            CoreError::Validation(e) => SettlementError::Validation(e),
        }
    }
}

pub type SettlementResult<T> = Result<T, SettlementError>;

// =============================================================================
// Coordinator
// =============================================================================

pub struct SettlementCoordinator {
    gateway: Arc<dyn PaymentGateway>,
    notifier: Arc<dyn Notifier>,
    in_flight: Mutex<HashSet<String>>,
}

impl SettlementCoordinator {
    pub fn new(gateway: Arc<dyn PaymentGateway>, notifier: Arc<dyn Notifier>) -> Self {
        SettlementCoordinator {
            gateway,
            notifier,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// True while any payment is in flight.
    pub fn is_busy(&self) -> bool {
        self.gateway.is_busy()
    }

    pub fn last_error(&self) -> Option<String> {
        self.gateway.last_error()
    }

    /// Whether an attempt for `table_id` is currently in flight.
    pub fn is_settling(&self, table_id: &str) -> bool {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(table_id)
    }

    /// Settles one table: validate, register the payment, close on success.
    pub async fn pay_bill(
        &self,
        ledger: &LedgerState,
        request: PayBillRequest,
    ) -> SettlementResult<Settlement> {
        let PayBillRequest {
            table_id,
            payment_method,
            currency,
            email,
        } = request;

        // Validating
        let currency = validate_currency_code(&currency)?;
        let email = email
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());
        if let Some(email) = &email {
            validate_email(email)?;
        }

        let _attempt = InFlightTable::claim(&self.in_flight, &table_id)
            .ok_or_else(|| SettlementError::AlreadyInFlight(table_id.clone()))?;

        let gateway_request = ledger.with_ledger(|l| {
            let table = l.get(&table_id)?;
            if !table.is_open() {
                return Err(CoreError::TableNotOpen {
                    table_id: table_id.clone(),
                    status: table.status(),
                });
            }
            Ok(RegisterPaymentRequest::for_table(
                table,
                payment_method,
                &currency,
                email.as_deref(),
            ))
        })?;

        // Submitting (ledger lock released)
        info!(
            table_id = %table_id,
            payment_form = %gateway_request.payment_form,
            currency = %currency,
            "Submitting payment"
        );

        let response = match self.gateway.register_payment(&gateway_request).await {
            Ok(response) => response,
            Err(e) => {
                let message = e.user_message();
                warn!(table_id = %table_id, error = %message, "Payment failed, table left open");
                self.notifier.notify(Notification::payment_failed(Some(&message)));
                return Err(SettlementError::Gateway {
                    message,
                    retryable: e.is_retryable(),
                });
            }
        };

        // Settled
        let closed = ledger.with_ledger_mut(|l| {
            l.close_table(&table_id, payment_method).map(Table::clone)
        });

        match closed {
            Ok(table) => {
                info!(
                    table_id = %table_id,
                    total = table.total().cents(),
                    status = response.status,
                    "Table settled"
                );
                self.notifier.notify(Notification::payment_complete(
                    payment_method.as_str(),
                    &currency,
                    email.as_deref(),
                ));
                Ok(Settlement { table, response })
            }
            Err(e) => {
                error!(
                    table_id = %table_id,
                    error = %e,
                    gateway_status = response.status,
                    "Payment registered but table could not be closed; reconcile manually"
                );
                Err(SettlementError::Reconcile {
                    table_id,
                    reason: e.to_string(),
                    response,
                })
            }
        }
    }
}

/// Marks a table as having an attempt in flight until dropped.
struct InFlightTable<'a> {
    set: &'a Mutex<HashSet<String>>,
    table_id: String,
}

impl<'a> InFlightTable<'a> {
    /// `None` if the table already has an attempt in flight.
    fn claim(set: &'a Mutex<HashSet<String>>, table_id: &str) -> Option<Self> {
        let inserted = set
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(table_id.to_string());

        inserted.then(|| InFlightTable {
            set,
            table_id: table_id.to_string(),
        })
    }
}

impl Drop for InFlightTable<'_> {
    fn drop(&mut self) {
        self.set
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.table_id);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

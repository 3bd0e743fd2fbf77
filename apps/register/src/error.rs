//! # API Error
//!
//! The one error shape every command returns: a stable `code` the frontend
//! can switch on and a `message` it can show as-is.
//!
//! ```text
//!   ValidationError ──────────────────────────► VALIDATION_ERROR
//!   CoreError::TableNotFound ─────────────────► NOT_FOUND
//!   CoreError::TableNotOpen ──────────────────► BUSINESS_LOGIC
//!   GatewayError::InvalidConfig ──────────────► CONFIG_ERROR
//!   SettlementError::Gateway ─────────────────► PAYMENT_ERROR    (table still open)
//!   SettlementError::AlreadyInFlight ─────────► CONFLICT
//!   SettlementError::Reconcile ───────────────► RECONCILE_REQUIRED
//! ```
//!
//! Frontend side:
//! ```typescript
//! try {
//!   await invoke('pay_bill', { request });
//! } catch (e) {
//!   if (e.code === 'PAYMENT_ERROR') keepDialogOpen(e.message);
//! }
//! ```

use serde::Serialize;
use tabletop_core::{CoreError, ValidationError};
use tabletop_gateway::GatewayError;
use tracing::error;

use crate::settlement::SettlementError;

/// Serialized as `{"code": "NOT_FOUND", "message": "Table not found: ord_…"}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    pub code: ErrorCode,
    /// Safe to show to staff verbatim.
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Table or menu item not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Operation not allowed in the table's current state
    BusinessLogic,

    /// Billing provider refused or could not be reached
    PaymentError,

    /// A payment for the same table is already in progress
    Conflict,

    /// Payment registered remotely but the table is not closed locally
    ReconcileRequired,

    /// Configuration missing or invalid
    ConfigError,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn payment(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::PaymentError, message)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::TableNotFound(id) => ApiError::not_found("Table", &id),
            CoreError::TableNotOpen { table_id, status } => ApiError::new(
                ErrorCode::BusinessLogic,
                format!("Table {} is {}", table_id, status),
            ),
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::InvalidConfig(_) | GatewayError::ConfigLoadFailed(_) => {
                ApiError::new(ErrorCode::ConfigError, err.to_string())
            }
            other => ApiError::payment(other.user_message()),
        }
    }
}

impl From<SettlementError> for ApiError {
    fn from(err: SettlementError) -> Self {
        match err {
            SettlementError::Validation(e) => e.into(),
            SettlementError::TableNotFound(id) => ApiError::not_found("Table", &id),
            SettlementError::TableNotOpen { .. } => {
                ApiError::new(ErrorCode::BusinessLogic, err.to_string())
            }
            SettlementError::AlreadyInFlight(_) => {
                ApiError::new(ErrorCode::Conflict, err.to_string())
            }
            SettlementError::Gateway { message, .. } => ApiError::payment(message),
            SettlementError::Reconcile { ref table_id, .. } => {
                error!(table_id = %table_id, "Settlement needs manual reconciliation");
                ApiError::new(ErrorCode::ReconcileRequired, err.to_string())
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use tabletop_core::TableStatus;

    #[test]
    fn test_serialized_shape() {
        let err = ApiError::not_found("Table", "ord_missing");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Table not found: ord_missing");
    }

    #[test]
    fn test_core_errors_map_to_codes() {
        let err: ApiError = CoreError::TableNotOpen {
            table_id: "ord_abc".to_string(),
            status: TableStatus::Paid,
        }
        .into();
        assert_eq!(err.code, ErrorCode::BusinessLogic);
        assert_eq!(err.message, "Table ord_abc is paid");

        let err: ApiError = CoreError::Validation(ValidationError::Required {
            field: "table name".to_string(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "table name is required");
    }

    #[test]
    fn test_settlement_errors_map_to_codes() {
        let err: ApiError = SettlementError::Gateway {
            message: "Card declined".to_string(),
            retryable: false,
        }
        .into();
        assert_eq!(err.code, ErrorCode::PaymentError);
        assert_eq!(err.message, "Card declined");

        let err: ApiError = SettlementError::AlreadyInFlight("ord_abc".to_string()).into();
        assert_eq!(err.code, ErrorCode::Conflict);
    }

    #[test]
    fn test_gateway_config_error() {
        let err: ApiError = GatewayError::InvalidConfig("base_url is empty".to_string()).into();
        assert_eq!(err.code, ErrorCode::ConfigError);
    }

    #[test]
    fn test_display() {
        let err = ApiError::payment("Card declined");
        assert_eq!(err.to_string(), "[PaymentError] Card declined");
    }
}

//! # Payment Commands
//!
//! The Pay Bill dialog and the busy indicator beside it.
//!
//! ## Payment Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Pay Bill: Patio 2                               Total: $18.98         │
//! │                                                                         │
//! │  Method:   ( ) Cash   (•) Credit   ( ) Debit                           │
//! │  Currency: [USD ▾]                                                      │
//! │  Email:    [guest@example.com        ]  (optional)                      │
//! │                                                                         │
//! │  [Process Payment] ──► pay_bill ──► SettlementCoordinator               │
//! │         │                                                               │
//! │         │  while in flight: payment_status().busy == true               │
//! │         ▼                                                               │
//! │  Ok  ──► table moves to Order History                                   │
//! │  Err ──► dialog stays open, message shown, table still Open             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use serde_json::Value;
use tabletop_core::Table;
use tracing::debug;

use crate::error::ApiError;
use crate::settlement::{PayBillRequest, SettlementCoordinator};
use crate::state::LedgerState;

/// What the dialog receives after a successful payment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayBillResponse {
    /// The closed table.
    pub table: Table,
    /// HTTP status returned by the billing provider.
    pub gateway_status: u16,
    /// The provider's JSON payload.
    pub gateway: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatus {
    pub busy: bool,
    pub last_error: Option<String>,
}

/// Registers the payment with the billing provider and closes the table.
pub async fn pay_bill(
    ledger: &LedgerState,
    settlement: &SettlementCoordinator,
    request: PayBillRequest,
) -> Result<PayBillResponse, ApiError> {
    debug!(
        table_id = %request.table_id,
        method = %request.payment_method,
        currency = %request.currency,
        "pay_bill command"
    );

    let settled = settlement.pay_bill(ledger, request).await?;

    Ok(PayBillResponse {
        table: settled.table,
        gateway_status: settled.response.status,
        gateway: settled.response.data,
    })
}

pub fn payment_status(settlement: &SettlementCoordinator) -> Result<PaymentStatus, ApiError> {
    debug!("payment_status command");
    Ok(PaymentStatus {
        busy: settlement.is_busy(),
        last_error: settlement.last_error(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::notify::RecordingNotifier;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::{Arc, Mutex};
    use tabletop_core::{ItemTemplate, Money, PaymentMethod, TableStatus};
    use tabletop_gateway::{
        GatewayError, GatewayResponse, GatewayResult, PaymentGateway, RegisterPaymentRequest,
    };

    /// Accepts or declines every payment and remembers the last failure.
    struct StubGateway {
        decline: bool,
        last_error: Mutex<Option<String>>,
    }

    #[async_trait]
    impl PaymentGateway for StubGateway {
        async fn register_payment(
            &self,
            _request: &RegisterPaymentRequest,
        ) -> GatewayResult<GatewayResponse> {
            if self.decline {
                *self.last_error.lock().unwrap() = Some("Card declined".to_string());
                return Err(GatewayError::Rejected {
                    status: 402,
                    message: "Card declined".to_string(),
                });
            }
            Ok(GatewayResponse {
                status: 201,
                data: json!({ "id": "pay_42" }),
            })
        }

        fn is_busy(&self) -> bool {
            false
        }

        fn last_error(&self) -> Option<String> {
            self.last_error.lock().unwrap().clone()
        }
    }

    fn setup(decline: bool) -> (LedgerState, SettlementCoordinator, String) {
        let ledger = LedgerState::new();
        let coffee = ItemTemplate::new("Iced Coffee", Money::from_cents(499), "80141503", "E48");
        let id = ledger.with_ledger_mut(|l| {
            let id = l.create_table("Bar").unwrap().id().to_string();
            l.add_item(&id, &coffee).unwrap();
            id
        });
        let gateway = Arc::new(StubGateway {
            decline,
            last_error: Mutex::new(None),
        });
        let settlement = SettlementCoordinator::new(gateway, Arc::new(RecordingNotifier::default()));
        (ledger, settlement, id)
    }

    fn cash(table_id: &str) -> PayBillRequest {
        PayBillRequest {
            table_id: table_id.to_string(),
            payment_method: PaymentMethod::Cash,
            currency: "mxn".to_string(),
            email: None,
        }
    }

    #[tokio::test]
    async fn test_pay_bill_success() {
        let (ledger, settlement, id) = setup(false);

        let response = pay_bill(&ledger, &settlement, cash(&id)).await.unwrap();
        assert_eq!(response.table.status(), TableStatus::Paid);
        assert_eq!(response.gateway_status, 201);
        assert_eq!(response.gateway["id"], "pay_42");

        let status = payment_status(&settlement).unwrap();
        assert!(!status.busy);
        assert!(status.last_error.is_none());
    }

    #[tokio::test]
    async fn test_pay_bill_declined() {
        let (ledger, settlement, id) = setup(true);

        let err = pay_bill(&ledger, &settlement, cash(&id)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::PaymentError);
        assert_eq!(err.message, "Card declined");

        let status = payment_status(&settlement).unwrap();
        assert_eq!(status.last_error.as_deref(), Some("Card declined"));
        assert!(ledger.with_ledger(|l| l.get(&id).unwrap().is_open()));
    }

    #[tokio::test]
    async fn test_pay_unknown_table() {
        let (ledger, settlement, _) = setup(false);

        let err = pay_bill(&ledger, &settlement, cash("ord_missing"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_pay_bill_request_from_json() {
        let request: PayBillRequest = serde_json::from_value(json!({
            "tableId": "ord_abc",
            "paymentMethod": "debit",
            "currency": "EUR"
        }))
        .unwrap();

        assert_eq!(request.payment_method, PaymentMethod::Debit);
        assert!(request.email.is_none());
    }
}

//! # Register Payment Protocol
//!
//! Request and response bodies for `POST {base_url}/payments/register`.
//!
//! ## Request Body
//! ```text
//! {
//!   "client": { "search": { "on_value": "guest@example.com",   ← only with an email
//!                           "on_key": "email",
//!                           "auto_create": true },
//!               "name": "Patio 2" },
//!   "automation_type": "pue_invoice",
//!   "currency": "USD",
//!   "exchange_rate": 1.0,
//!   "payment_form": "04",
//!   "items": [ { "id": null, "quantity": 2, "description": "Caesar Salad",
//!                "unit_price": 9.49, "product_key": "80141503", "unit_key": "E48",
//!                "taxes": [ { "factor": "Tasa", "inclusive": true, "rate": 0.16,
//!                             "type": "IVA", "withholding": false } ] } ],
//!   "metadata": { "orderId": "ord_…", "orderID": "ord_…" }
//! }
//! ```
//!
//! Amounts are integer cents everywhere else in the workspace. `unit_price`
//! is the one place they become a decimal number of major units.

use serde::{Deserialize, Serialize, Serializer};
use tabletop_core::{Money, OrderItem, PaymentMethod, Table};

/// Exchange rate sent when the caller does not set one.
pub const DEFAULT_EXCHANGE_RATE: f64 = 1.0;

/// Fixed VAT rate; prices already include it.
pub const IVA_RATE: f64 = 0.16;

// =============================================================================
// Request
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegisterPaymentRequest {
    pub client: ClientRef,

    /// Filled from the gateway config when `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub automation_type: Option<String>,

    pub currency: String,
    pub exchange_rate: f64,
    pub payment_form: String,
    pub items: Vec<PaymentItem>,
    pub metadata: PaymentMetadata,
}

impl RegisterPaymentRequest {
    /// Builds the request for settling `table`.
    ///
    /// A blank or missing email sends the table name as the client; otherwise
    /// the provider looks the customer up by email and creates them if needed.
    pub fn for_table(
        table: &Table,
        method: PaymentMethod,
        currency: &str,
        email: Option<&str>,
    ) -> Self {
        let email = email.map(str::trim).filter(|e| !e.is_empty());

        RegisterPaymentRequest {
            client: ClientRef::for_table(table.name(), email),
            automation_type: None,
            currency: currency.to_string(),
            exchange_rate: DEFAULT_EXCHANGE_RATE,
            payment_form: method.payment_form_code().to_string(),
            items: table.items().iter().map(PaymentItem::from_order_item).collect(),
            metadata: PaymentMetadata::for_order(table.id()),
        }
    }

    /// Sets the automation type if the caller left it empty.
    pub fn with_default_automation(mut self, automation_type: &str) -> Self {
        if self.automation_type.is_none() {
            self.automation_type = Some(automation_type.to_string());
        }
        self
    }

    pub fn order_id(&self) -> &str {
        &self.metadata.order_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientRef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<ClientSearch>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ClientRef {
    fn for_table(table_name: &str, email: Option<&str>) -> Self {
        ClientRef {
            search: email.map(|email| ClientSearch {
                on_value: email.to_string(),
                on_key: "email".to_string(),
                auto_create: true,
            }),
            name: Some(table_name.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientSearch {
    pub on_value: String,
    pub on_key: String,
    pub auto_create: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentItem {
    /// Always `null`: line IDs are assigned by the provider.
    pub id: Option<String>,
    pub quantity: i64,
    pub description: String,
    #[serde(serialize_with = "major_units")]
    pub unit_price: Money,
    pub product_key: String,
    pub unit_key: String,
    pub taxes: Vec<ItemTax>,
}

impl PaymentItem {
    pub fn from_order_item(item: &OrderItem) -> Self {
        PaymentItem {
            id: None,
            quantity: item.quantity,
            description: item.description.clone(),
            unit_price: item.unit_price,
            product_key: item.product_key.clone(),
            unit_key: item.unit_key.clone(),
            taxes: vec![ItemTax::iva_inclusive()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemTax {
    pub factor: String,
    pub inclusive: bool,
    pub rate: f64,
    #[serde(rename = "type")]
    pub tax_type: String,
    pub withholding: bool,
}

impl ItemTax {
    /// 16% IVA, already included in the unit price.
    pub fn iva_inclusive() -> Self {
        ItemTax {
            factor: "Tasa".to_string(),
            inclusive: true,
            rate: IVA_RATE,
            tax_type: "IVA".to_string(),
            withholding: false,
        }
    }
}

/// The order ID under both spellings the provider's automations read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentMetadata {
    #[serde(rename = "orderId")]
    pub order_id: String,
    #[serde(rename = "orderID")]
    pub order_id_upper: String,
}

impl PaymentMetadata {
    pub fn for_order(order_id: &str) -> Self {
        PaymentMetadata {
            order_id: order_id.to_string(),
            order_id_upper: order_id.to_string(),
        }
    }
}

fn major_units<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(money.to_major_units())
}

// =============================================================================
// Response
// =============================================================================

/// A successful registration: HTTP status plus the provider's JSON payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayResponse {
    pub status: u16,
    pub data: serde_json::Value,
}

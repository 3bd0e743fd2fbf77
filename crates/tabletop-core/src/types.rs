//! # Domain Types
//!
//! Core domain types used throughout Tabletop POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Table       │   │   OrderItem     │   │  ItemTemplate   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (ord_…)     │◆──│  id (billing)   │◄──│  description    │       │
//! │  │  name           │   │  description    │   │  unit_price     │       │
//! │  │  status         │   │  quantity ≥ 1   │   │  product_key    │       │
//! │  │  total (derived)│   │  unit_price     │   │  unit_key       │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │  TableStatus    │   │ PaymentMethod   │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  Open           │   │  Cash    → "01" │                             │
//! │  │  Paid           │   │  Credit  → "04" │                             │
//! │  └─────────────────┘   │  Debit   → "28" │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! A `Table` exclusively owns its `OrderItem`s and the `LedgerStore` owns
//! every `Table`. Table fields are private: the only way to change them is
//! through the ledger, which keeps `total` and the paid-state fields
//! consistent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Item Template
// =============================================================================

/// The data needed to put an item on a table.
///
/// Usually built from a [`crate::MenuItem`], but any caller can supply one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemTemplate {
    pub description: String,
    pub unit_price: Money,
    /// Product classification code sent to the billing provider.
    pub product_key: String,
    /// Unit-of-measure code sent to the billing provider.
    pub unit_key: String,
}

impl ItemTemplate {
    pub fn new(
        description: impl Into<String>,
        unit_price: Money,
        product_key: impl Into<String>,
        unit_key: impl Into<String>,
    ) -> Self {
        ItemTemplate {
            description: description.into(),
            unit_price,
            product_key: product_key.into(),
            unit_key: unit_key.into(),
        }
    }
}

// =============================================================================
// Order Item
// =============================================================================

/// One line on a table.
///
/// ## Invariants
/// - `quantity >= 1` while the line exists; a line that would reach zero
///   is removed by the ledger instead
/// - `description` is the merge key (case-sensitive, exact match)
/// - `id` is assigned by the billing system and never generated locally
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderItem {
    pub id: Option<String>,
    pub description: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub product_key: String,
    pub unit_key: String,
}

impl OrderItem {
    /// Creates a fresh line with quantity 1 and no billing ID.
    pub fn from_template(template: &ItemTemplate) -> Self {
        OrderItem {
            id: None,
            description: template.description.clone(),
            quantity: 1,
            unit_price: template.unit_price,
            product_key: template.product_key.clone(),
            unit_key: template.unit_key.clone(),
        }
    }

    /// Line subtotal: `unit_price × quantity`, exact in cents.
    #[inline]
    pub fn subtotal(&self) -> Money {
        self.unit_price * self.quantity
    }

    /// Whether this line merges with an item of the given description.
    #[inline]
    pub fn matches(&self, description: &str) -> bool {
        self.description == description
    }
}

// =============================================================================
// Table Status
// =============================================================================

/// Lifecycle of a table. `Open → Paid` happens once and never reverses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TableStatus {
    /// Accepting items.
    #[default]
    Open,
    /// Settled with the billing provider and closed.
    Paid,
}

impl fmt::Display for TableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableStatus::Open => write!(f, "open"),
            TableStatus::Paid => write!(f, "paid"),
        }
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the customer settled the bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Credit card.
    Credit,
    /// Debit card.
    Debit,
}

impl PaymentMethod {
    /// All methods, in the order the payment form lists them.
    pub const ALL: [PaymentMethod; 3] =
        [PaymentMethod::Cash, PaymentMethod::Credit, PaymentMethod::Debit];

    /// Billing provider payment-form code.
    ///
    /// ```text
    /// Cash   → "01"  (efectivo)
    /// Credit → "04"  (tarjeta de crédito)
    /// Debit  → "28"  (tarjeta de débito)
    /// ```
    pub const fn payment_form_code(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "01",
            PaymentMethod::Credit => "04",
            PaymentMethod::Debit => "28",
        }
    }

    /// Lowercase name, as shown in notifications.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Credit => "credit",
            PaymentMethod::Debit => "debit",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = crate::error::ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "credit" | "credit_card" => Ok(PaymentMethod::Credit),
            "debit" | "debit_card" => Ok(PaymentMethod::Debit),
            other => Err(crate::error::ValidationError::InvalidFormat {
                field: "payment method".to_string(),
                reason: format!("'{}' is not one of cash, credit, debit", other),
            }),
        }
    }
}

// =============================================================================
// Table
// =============================================================================

/// An order tab: the aggregate unit of billing.
///
/// ## Invariants
/// - `total == Σ item.subtotal()`, refreshed by the ledger after every
///   item mutation
/// - `closed_at` and `payment_method` are `Some` iff `status == Paid`
/// - Items keep insertion order (first-added appears first)
///
/// No `Deserialize`: a `Table` can only be built by
/// the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    id: String,
    name: String,
    status: TableStatus,
    items: Vec<OrderItem>,
    #[ts(as = "String")]
    created_at: DateTime<Utc>,
    #[ts(as = "Option<String>")]
    closed_at: Option<DateTime<Utc>>,
    payment_method: Option<PaymentMethod>,
    total: Money,
}

impl Table {
    pub(crate) fn open(id: String, name: String, created_at: DateTime<Utc>) -> Self {
        Table {
            id,
            name,
            status: TableStatus::Open,
            items: Vec::new(),
            created_at,
            closed_at: None,
            payment_method: None,
            total: Money::zero(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> TableStatus {
        self.status
    }

    pub fn is_open(&self) -> bool {
        self.status == TableStatus::Open
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Looks up a line by its description.
    pub fn item(&self, description: &str) -> Option<&OrderItem> {
        self.items.iter().find(|i| i.matches(description))
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn closed_at(&self) -> Option<DateTime<Utc>> {
        self.closed_at
    }

    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment_method
    }

    /// Total due, always consistent with the items.
    pub fn total(&self) -> Money {
        self.total
    }

    /// Number of units on the table (Σ quantity), not the number of lines.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    // -------------------------------------------------------------------------
    // Ledger-only mutators
    // -------------------------------------------------------------------------

    /// Adds one unit: merges by description or appends a new line.
    ///
    /// The new line subtotal and table total are checked first; on overflow
    /// the table is left unchanged.
    pub(crate) fn push_unit(&mut self, template: &ItemTemplate) -> Result<(), ValidationError> {
        let line = self.items.iter().position(|i| i.matches(&template.description));
        let quantity = match line {
            Some(pos) => self.items[pos].quantity.checked_add(1),
            None => Some(1),
        };
        let fits = quantity
            .and_then(|q| template.unit_price.checked_mul(q))
            .and(self.total.checked_add(template.unit_price))
            .is_some();
        if !fits {
            return Err(ValidationError::TooLarge {
                field: "table total".to_string(),
            });
        }

        match line {
            Some(pos) => self.items[pos].quantity += 1,
            None => self.items.push(OrderItem::from_template(template)),
        }
        self.recompute_total();
        Ok(())
    }

    /// Removes one unit; drops the line when it reaches zero.
    ///
    /// Returns `false` (and changes nothing) when no line matches.
    pub(crate) fn pop_unit(&mut self, description: &str) -> bool {
        let Some(pos) = self.items.iter().position(|i| i.matches(description)) else {
            return false;
        };

        if self.items[pos].quantity > 1 {
            self.items[pos].quantity -= 1;
        } else {
            self.items.remove(pos);
        }
        self.recompute_total();
        true
    }

    pub(crate) fn mark_paid(&mut self, method: PaymentMethod, closed_at: DateTime<Utc>) {
        self.status = TableStatus::Paid;
        self.closed_at = Some(closed_at);
        self.payment_method = Some(method);
    }

    fn recompute_total(&mut self) {
        self.total = self.items.iter().map(OrderItem::subtotal).sum();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn salad() -> ItemTemplate {
        ItemTemplate::new("Caesar Salad", Money::from_cents(949), "80141503", "E48")
    }

    #[test]
    fn test_order_item_from_template() {
        let item = OrderItem::from_template(&salad());
        assert_eq!(item.id, None);
        assert_eq!(item.quantity, 1);
        assert_eq!(item.subtotal().cents(), 949);
    }

    #[test]
    fn test_subtotal_is_quantity_weighted() {
        let mut item = OrderItem::from_template(&salad());
        item.quantity = 3;
        assert_eq!(item.subtotal().cents(), 2847);
    }

    #[test]
    fn test_merge_key_is_case_sensitive() {
        let item = OrderItem::from_template(&salad());
        assert!(item.matches("Caesar Salad"));
        assert!(!item.matches("caesar salad"));
        assert!(!item.matches("Caesar Salad "));
    }

    #[test]
    fn test_payment_form_codes() {
        assert_eq!(PaymentMethod::Cash.payment_form_code(), "01");
        assert_eq!(PaymentMethod::Credit.payment_form_code(), "04");
        assert_eq!(PaymentMethod::Debit.payment_form_code(), "28");
    }

    #[test]
    fn test_payment_method_parsing() {
        assert_eq!("cash".parse::<PaymentMethod>().unwrap(), PaymentMethod::Cash);
        assert_eq!("Credit".parse::<PaymentMethod>().unwrap(), PaymentMethod::Credit);
        assert_eq!("debit_card".parse::<PaymentMethod>().unwrap(), PaymentMethod::Debit);
        assert!("bitcoin".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_payment_method_serde() {
        let json = serde_json::to_string(&PaymentMethod::Credit).unwrap();
        assert_eq!(json, "\"credit\"");
        let status = serde_json::to_string(&TableStatus::Paid).unwrap();
        assert_eq!(status, "\"paid\"");
    }

    #[test]
    fn test_table_push_and_pop_keep_total() {
        let mut table = Table::open("ord_1".into(), "Bar".into(), Utc::now());
        table.push_unit(&salad()).unwrap();
        table.push_unit(&salad()).unwrap();
        assert_eq!(table.items().len(), 1);
        assert_eq!(table.total().cents(), 1898);
        assert_eq!(table.item_count(), 2);

        assert!(table.pop_unit("Caesar Salad"));
        assert_eq!(table.total().cents(), 949);
        assert!(table.pop_unit("Caesar Salad"));
        assert!(table.items().is_empty());
        assert!(table.total().is_zero());

        assert!(!table.pop_unit("Caesar Salad"));
    }

    #[test]
    fn test_push_unit_overflow_leaves_table_unchanged() {
        let mut table = Table::open("ord_1".into(), "Bar".into(), Utc::now());
        let magnum = ItemTemplate::new("Magnum", Money::from_cents(i64::MAX / 2 + 1), "50202201", "H87");
        table.push_unit(&magnum).unwrap();

        let err = table.push_unit(&magnum).unwrap_err();
        assert!(matches!(err, ValidationError::TooLarge { .. }));
        assert_eq!(table.items()[0].quantity, 1);
        assert_eq!(table.total(), magnum.unit_price);

        let err = table.push_unit(&salad()).unwrap_err();
        assert!(matches!(err, ValidationError::TooLarge { .. }));
        assert_eq!(table.items().len(), 1);
    }

    #[test]
    fn test_table_serializes_camel_case() {
        let table = Table::open("ord_1".into(), "Bar".into(), Utc::now());
        let value = serde_json::to_value(&table).unwrap();
        assert_eq!(value["status"], "open");
        assert!(value.get("createdAt").is_some());
        assert!(value["closedAt"].is_null());
        assert!(value["paymentMethod"].is_null());
    }
}

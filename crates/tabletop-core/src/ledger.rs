//! # Ledger Store
//!
//! Owns every table for the lifetime of the process.
//!
//! ## Ledger Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Ledger Operations                                    │
//! │                                                                         │
//! │  Staff Action             Ledger Method           Table Change          │
//! │  ────────────             ─────────────           ────────────          │
//! │                                                                         │
//! │  "New Table" ────────────► create_table() ──────► push Table (Open)    │
//! │                                                                         │
//! │  Tap menu item ──────────► add_item() ──────────► qty+1 or new line    │
//! │                                                                         │
//! │  Tap "−" on a line ──────► remove_item() ───────► qty−1 or drop line   │
//! │                                                                         │
//! │  Payment succeeded ──────► close_table() ───────► Open → Paid          │
//! │                                                                         │
//! │  "Delete Table" ─────────► delete_table() ──────► remove Table         │
//! │                                                                         │
//! │  NOTE: every item mutation recomputes `total` before returning, and    │
//! │        returns the updated table so callers never re-scan.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! A `LedgerStore` is a plain value. The register app wraps one in a mutex;
//! tests create as many as they like. There is no global instance.

use chrono::Utc;

use crate::error::{CoreError, CoreResult};
use crate::order_id::OrderIdGenerator;
use crate::types::{ItemTemplate, PaymentMethod, Table};
use crate::validation::{validate_item_template, validate_table_name};

/// In-memory store of tables, kept in creation order.
#[derive(Debug, Default)]
pub struct LedgerStore {
    tables: Vec<Table>,
    ids: OrderIdGenerator,
}

impl LedgerStore {
    /// Creates an empty ledger with its own ID generator.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Opens a new table.
    ///
    /// The name is trimmed; a blank name is rejected.
    pub fn create_table(&mut self, name: &str) -> CoreResult<&Table> {
        let name = validate_table_name(name)?;
        let id = self.ids.next_id();

        self.tables.push(Table::open(id, name, Utc::now()));
        // Just pushed, so the vec is non-empty.
        let index = self.tables.len() - 1;
        Ok(&self.tables[index])
    }

    /// Adds one unit of `template` to an open table.
    ///
    /// Merges into an existing line with the same description, otherwise
    /// appends a new line with quantity 1.
    pub fn add_item(&mut self, table_id: &str, template: &ItemTemplate) -> CoreResult<&Table> {
        validate_item_template(template)?;

        let table = self.find_open_mut(table_id)?;
        table.push_unit(template)?;
        Ok(table)
    }

    /// Removes one unit of the line matching `description`.
    ///
    /// A description with no matching line leaves the table untouched and
    /// is not an error.
    pub fn remove_item(&mut self, table_id: &str, description: &str) -> CoreResult<&Table> {
        let table = self.find_open_mut(table_id)?;
        table.pop_unit(description);
        Ok(table)
    }

    /// Deletes a table regardless of its status and returns it.
    pub fn delete_table(&mut self, table_id: &str) -> CoreResult<Table> {
        let index = self.position(table_id)?;
        Ok(self.tables.remove(index))
    }

    /// Transitions an open table to paid.
    ///
    /// Only the settlement workflow should call this, and only after the
    /// billing provider accepted the payment.
    pub fn close_table(&mut self, table_id: &str, method: PaymentMethod) -> CoreResult<&Table> {
        let table = self.find_open_mut(table_id)?;
        table.mark_paid(method, Utc::now());
        Ok(table)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// All tables in creation order.
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn get(&self, table_id: &str) -> CoreResult<&Table> {
        self.tables
            .iter()
            .find(|t| t.id() == table_id)
            .ok_or_else(|| CoreError::TableNotFound(table_id.to_string()))
    }

    /// Open tables in creation order.
    pub fn open_tables(&self) -> Vec<&Table> {
        self.tables.iter().filter(|t| t.is_open()).collect()
    }

    /// Paid tables in creation order.
    pub fn paid_tables(&self) -> Vec<&Table> {
        self.tables.iter().filter(|t| !t.is_open()).collect()
    }

    /// Paid tables, most recently closed first.
    pub fn paid_tables_by_recency(&self) -> Vec<&Table> {
        let mut paid = self.paid_tables();
        paid.sort_by(|a, b| b.closed_at().cmp(&a.closed_at()));
        paid
    }

    /// Tables whose name or ID contains `query`, ignoring case.
    ///
    /// A blank query matches every table.
    pub fn search(&self, query: &str) -> Vec<&Table> {
        let query = query.trim().to_lowercase();
        self.tables
            .iter()
            .filter(|t| matches_query(t, &query))
            .collect()
    }

    /// Open tables matching `query`, in creation order.
    pub fn search_open(&self, query: &str) -> Vec<&Table> {
        let query = query.trim().to_lowercase();
        self.open_tables()
            .into_iter()
            .filter(|t| matches_query(t, &query))
            .collect()
    }

    /// Paid tables matching `query`, most recently closed first.
    pub fn search_paid(&self, query: &str) -> Vec<&Table> {
        let query = query.trim().to_lowercase();
        self.paid_tables_by_recency()
            .into_iter()
            .filter(|t| matches_query(t, &query))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn position(&self, table_id: &str) -> CoreResult<usize> {
        self.tables
            .iter()
            .position(|t| t.id() == table_id)
            .ok_or_else(|| CoreError::TableNotFound(table_id.to_string()))
    }

    fn find_open_mut(&mut self, table_id: &str) -> CoreResult<&mut Table> {
        let index = self.position(table_id)?;
        let table = &mut self.tables[index];

        if !table.is_open() {
            return Err(CoreError::TableNotOpen {
                table_id: table_id.to_string(),
                status: table.status(),
            });
        }

        Ok(table)
    }
}

/// `query` is already trimmed and lowercased; empty matches everything.
fn matches_query(table: &Table, query: &str) -> bool {
    query.is_empty()
        || table.name().to_lowercase().contains(query)
        || table.id().to_lowercase().contains(query)
}

// =============================================================================
// Unit Tests
// =============================================================================


// =============================================================================
// Property Tests
// =============================================================================

#[cfg(test)]
mod proptest_tests {
    use super::*;
    use crate::money::Money;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Add(usize),
        Remove(usize),
    }

    fn menu() -> Vec<ItemTemplate> {
        vec![
            ItemTemplate::new("Caesar Salad", Money::from_cents(949), "80141503", "E48"),
            ItemTemplate::new("Classic Lemonade", Money::from_cents(449), "80141503", "E48"),
            ItemTemplate::new("Grilled Salmon", Money::from_cents(2499), "80141503", "E48"),
            ItemTemplate::new("Water", Money::zero(), "80141503", "E48"),
        ]
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0usize..4).prop_map(Op::Add),
            (0usize..4).prop_map(Op::Remove),
        ]
    }

    proptest! {
        #[test]
        fn total_matches_items_after_every_mutation(ops in prop::collection::vec(op_strategy(), 0..60)) {
            let menu = menu();
            let mut ledger = LedgerStore::new();
            let id = ledger.create_table("Prop").unwrap().id().to_string();

            for op in ops {
                let table = match op {
                    Op::Add(i) => ledger.add_item(&id, &menu[i]).unwrap(),
                    Op::Remove(i) => ledger.remove_item(&id, &menu[i].description).unwrap(),
                };

                let expected: i64 = table
                    .items()
                    .iter()
                    .map(|item| item.unit_price.cents() * item.quantity)
                    .sum();
                prop_assert_eq!(table.total().cents(), expected);
                prop_assert!(table.items().iter().all(|item| item.quantity >= 1));

                let mut seen = std::collections::HashSet::new();
                prop_assert!(table.items().iter().all(|item| seen.insert(item.description.clone())));
            }
        }

        #[test]
        fn add_then_remove_restores_total(start in prop::collection::vec(0usize..4, 0..20), pick in 0usize..4) {
            let menu = menu();
            let mut ledger = LedgerStore::new();
            let id = ledger.create_table("Prop").unwrap().id().to_string();
            for i in start {
                ledger.add_item(&id, &menu[i]).unwrap();
            }

            let before = ledger.get(&id).unwrap().total();
            let after_add = ledger.add_item(&id, &menu[pick]).unwrap().total();
            prop_assert_eq!(after_add - before, menu[pick].unit_price);

            let after_remove = ledger.remove_item(&id, &menu[pick].description).unwrap().total();
            prop_assert_eq!(after_remove, before);
        }
    }
}

//! # Table Commands
//!
//! Opening tables, putting items on them, and removing them again.
//!
//! ## Table Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Open Tables View                                     │
//! │                                                                         │
//! │  [ New Table: "Patio 2" ] ──► create_table ──► "Table Created" toast   │
//! │                                                                         │
//! │  ┌─────────────────────────┐     ┌──────────────────────────────────┐  │
//! │  │ Patio 2      $18.98     │ ──► │ Table Details                    │  │
//! │  │ 2 items                 │     │  Caesar Salad  x2   $18.98  [-]  │  │
//! │  └─────────────────────────┘     │                                  │  │
//! │                                  │  Menu: [+ Iced Coffee] ...       │  │
//! │                                  │        add_menu_item             │  │
//! │                                  │                                  │  │
//! │                                  │  [Pay Bill]  [Delete Table]      │  │
//! │                                  └──────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tabletop_core::validation::validate_search_query;
use tabletop_core::{ItemTemplate, Table};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::notify::{Notification, Notifier};
use crate::state::{LedgerState, MenuState};

/// Opens a new table and announces it.
pub fn create_table(
    ledger: &LedgerState,
    notifier: &dyn Notifier,
    name: &str,
) -> Result<Table, ApiError> {
    debug!(name = %name, "create_table command");

    let table = ledger.with_ledger_mut(|l| l.create_table(name).map(Table::clone))?;

    info!(table_id = %table.id(), name = %table.name(), "Table opened");
    notifier.notify(Notification::table_created(table.name(), table.id()));

    Ok(table)
}

pub fn get_table(ledger: &LedgerState, table_id: &str) -> Result<Table, ApiError> {
    debug!(table_id = %table_id, "get_table command");
    Ok(ledger.with_ledger(|l| l.get(table_id).map(Table::clone))?)
}

/// Every table, open and paid, in creation order.
pub fn list_tables(ledger: &LedgerState) -> Result<Vec<Table>, ApiError> {
    debug!("list_tables command");
    Ok(ledger.with_ledger(|l| l.tables().to_vec()))
}

pub fn list_open_tables(ledger: &LedgerState) -> Result<Vec<Table>, ApiError> {
    debug!("list_open_tables command");
    Ok(ledger.with_ledger(|l| l.open_tables().into_iter().cloned().collect()))
}

/// Matches table names or order ids, case-insensitively.
pub fn search_tables(ledger: &LedgerState, query: &str) -> Result<Vec<Table>, ApiError> {
    debug!(query = %query, "search_tables command");

    let query = validate_search_query(query)?;
    Ok(ledger.with_ledger(|l| l.search(&query).into_iter().cloned().collect()))
}

/// The Open Tables search box: open tables only, in creation order.
pub fn search_open_tables(ledger: &LedgerState, query: &str) -> Result<Vec<Table>, ApiError> {
    debug!(query = %query, "search_open_tables command");

    let query = validate_search_query(query)?;
    Ok(ledger.with_ledger(|l| l.search_open(&query).into_iter().cloned().collect()))
}

/// Adds one unit of an arbitrary item template.
pub fn add_item(
    ledger: &LedgerState,
    table_id: &str,
    template: &ItemTemplate,
) -> Result<Table, ApiError> {
    debug!(table_id = %table_id, description = %template.description, "add_item command");
    Ok(ledger.with_ledger_mut(|l| l.add_item(table_id, template).map(Table::clone))?)
}

/// Adds one unit of a menu item, looked up by its catalog id.
pub fn add_menu_item(
    ledger: &LedgerState,
    menu: &MenuState,
    table_id: &str,
    menu_item_id: &str,
) -> Result<Table, ApiError> {
    debug!(table_id = %table_id, menu_item_id = %menu_item_id, "add_menu_item command");

    let template = menu
        .catalog()
        .find(menu_item_id)
        .map(|item| item.template())
        .ok_or_else(|| ApiError::not_found("Menu item", menu_item_id))?;

    Ok(ledger.with_ledger_mut(|l| l.add_item(table_id, &template).map(Table::clone))?)
}

/// Removes one unit of the item with `description`. Unknown items are ignored.
pub fn remove_item(
    ledger: &LedgerState,
    table_id: &str,
    description: &str,
) -> Result<Table, ApiError> {
    debug!(table_id = %table_id, description = %description, "remove_item command");
    Ok(ledger.with_ledger_mut(|l| l.remove_item(table_id, description).map(Table::clone))?)
}

/// Deletes a table regardless of status and returns what was removed.
pub fn delete_table(ledger: &LedgerState, table_id: &str) -> Result<Table, ApiError> {
    debug!(table_id = %table_id, "delete_table command");

    let removed = ledger.with_ledger_mut(|l| l.delete_table(table_id))?;
    info!(table_id = %removed.id(), status = %removed.status(), "Table deleted");

    Ok(removed)
}

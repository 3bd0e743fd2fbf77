//! # History Commands
//!
//! The Order History view: paid tables, newest first, and the revenue
//! cards above them.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Paid Orders: 12   Revenue: $412.50   Today: 3 / $96.20      │
//! ├──────────────────────────────────────────────────────────────┤
//! │  Patio 2   ord_…   credit   $18.98   2026-10-19 20:14        │
//! │  Bar       ord_…   cash     $4.99    2026-10-19 19:02        │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use chrono::Local;
use tabletop_core::validation::validate_search_query;
use tabletop_core::{RevenueSummary, Table};
use tracing::debug;

use crate::error::ApiError;
use crate::state::LedgerState;

/// Paid tables, most recently closed first.
pub fn list_paid_tables(ledger: &LedgerState) -> Result<Vec<Table>, ApiError> {
    debug!("list_paid_tables command");
    Ok(ledger.with_ledger(|l| l.paid_tables_by_recency().into_iter().cloned().collect()))
}

/// The Order History search box: paid tables only, most recently closed first.
pub fn search_paid_tables(ledger: &LedgerState, query: &str) -> Result<Vec<Table>, ApiError> {
    debug!(query = %query, "search_paid_tables command");

    let query = validate_search_query(query)?;
    Ok(ledger.with_ledger(|l| l.search_paid(&query).into_iter().cloned().collect()))
}

/// Counts and revenue over all paid tables, plus the subset closed today on
/// the register's local clock.
pub fn revenue_summary(ledger: &LedgerState) -> Result<RevenueSummary, ApiError> {
    debug!("revenue_summary command");

    let today = Local::now().date_naive();
    Ok(ledger.with_ledger(|l| RevenueSummary::from_tables(l.tables(), today, &Local)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabletop_core::{ItemTemplate, Money, PaymentMethod};

    fn paid_table(ledger: &LedgerState, name: &str, cents: i64) -> String {
        let item = ItemTemplate::new("Item", Money::from_cents(cents), "80141503", "E48");
        ledger
            .with_ledger_mut(|l| {
                let id = l.create_table(name)?.id().to_string();
                l.add_item(&id, &item)?;
                l.close_table(&id, PaymentMethod::Cash)?;
                Ok::<_, tabletop_core::CoreError>(id)
            })
            .unwrap()
    }

    #[test]
    fn test_paid_tables_newest_first() {
        let ledger = LedgerState::new();
        let first = paid_table(&ledger, "Patio 2", 1898);
        std::thread::sleep(std::time::Duration::from_millis(5));
        let second = paid_table(&ledger, "Bar", 499);
        ledger
            .with_ledger_mut(|l| l.create_table("Still Open").map(|_| ()))
            .unwrap();

        let paid = list_paid_tables(&ledger).unwrap();
        let ids: Vec<&str> = paid.iter().map(|t| t.id()).collect();
        assert_eq!(ids, [second.as_str(), first.as_str()]);
    }

    #[test]
    fn test_revenue_summary_counts_paid_only() {
        let ledger = LedgerState::new();
        paid_table(&ledger, "Patio 2", 1898);
        paid_table(&ledger, "Bar", 499);
        ledger
            .with_ledger_mut(|l| l.create_table("Still Open").map(|_| ()))
            .unwrap();

        let summary = revenue_summary(&ledger).unwrap();
        assert_eq!(summary.paid_count, 2);
        assert_eq!(summary.total_revenue.cents(), 2397);
        assert_eq!(summary.today_count, 2);
        assert_eq!(summary.today_revenue.cents(), 2397);
    }

    #[test]
    fn test_search_paid_tables() {
        let ledger = LedgerState::new();
        let first = paid_table(&ledger, "Patio 1", 1898);
        std::thread::sleep(std::time::Duration::from_millis(5));
        let second = paid_table(&ledger, "Patio 3", 499);
        paid_table(&ledger, "Bar", 449);
        ledger
            .with_ledger_mut(|l| l.create_table("Patio 2").map(|_| ()))
            .unwrap();

        let found = search_paid_tables(&ledger, "PATIO").unwrap();
        let ids: Vec<&str> = found.iter().map(|t| t.id()).collect();
        assert_eq!(ids, [second.as_str(), first.as_str()]);

        assert_eq!(search_paid_tables(&ledger, "").unwrap().len(), 3);
        assert!(search_paid_tables(&ledger, "terrace").unwrap().is_empty());
        assert!(search_paid_tables(&ledger, &"x".repeat(101)).is_err());
    }

    #[test]
    fn test_empty_history() {
        let ledger = LedgerState::new();
        assert!(list_paid_tables(&ledger).unwrap().is_empty());
        assert_eq!(revenue_summary(&ledger).unwrap().paid_count, 0);
    }
}

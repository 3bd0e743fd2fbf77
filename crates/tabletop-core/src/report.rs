//! # Revenue Report
//!
//! Projections over paid tables for the order history screen.
//!
//! ```text
//!   ┌──────────────┬──────────────┬──────────────┬──────────────┐
//!   │ Paid orders  │ Revenue      │ Today        │ Today's rev. │
//!   │ paid_count   │ total_revenue│ today_count  │ today_revenue│
//!   └──────────────┴──────────────┴──────────────┴──────────────┘
//! ```
//!
//! "Today" compares the calendar date of `closed_at`, seen in the caller's
//! time zone, with the date the caller passes in. The register passes the
//! local zone; the projection itself never reads the clock.

use chrono::{NaiveDate, TimeZone};
use serde::Serialize;
use ts_rs::TS;

use crate::money::Money;
use crate::types::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RevenueSummary {
    pub paid_count: usize,
    pub total_revenue: Money,
    pub today_count: usize,
    pub today_revenue: Money,
}

impl RevenueSummary {
    /// Summarizes the paid tables among `tables`; open tables are ignored.
    ///
    /// A table counts toward today when its `closed_at`, converted to `tz`,
    /// falls on `today`.
    pub fn from_tables<'a, I, Tz>(tables: I, today: NaiveDate, tz: &Tz) -> Self
    where
        I: IntoIterator<Item = &'a Table>,
        Tz: TimeZone,
    {
        let mut summary = RevenueSummary::default();

        for table in tables {
            let Some(closed_at) = table.closed_at() else {
                continue;
            };

            summary.paid_count += 1;
            summary.total_revenue += table.total();

            if closed_at.with_timezone(tz).date_naive() == today {
                summary.today_count += 1;
                summary.today_revenue += table.total();
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::LedgerStore;
    use crate::types::{ItemTemplate, PaymentMethod};
    use chrono::{Days, FixedOffset, Utc};

    fn ledger_with_sales() -> LedgerStore {
        let salad = ItemTemplate::new("Caesar Salad", Money::from_cents(949), "80141503", "E48");
        let coffee = ItemTemplate::new("Iced Coffee", Money::from_cents(499), "80141503", "E48");
        let mut ledger = LedgerStore::new();

        let a = ledger.create_table("Patio 2").unwrap().id().to_string();
        ledger.add_item(&a, &salad).unwrap();
        ledger.add_item(&a, &salad).unwrap();
        ledger.close_table(&a, PaymentMethod::Credit).unwrap();

        let b = ledger.create_table("Bar").unwrap().id().to_string();
        ledger.add_item(&b, &coffee).unwrap();
        ledger.close_table(&b, PaymentMethod::Cash).unwrap();

        let c = ledger.create_table("Still eating").unwrap().id().to_string();
        ledger.add_item(&c, &salad).unwrap();

        ledger
    }

    #[test]
    fn test_summary_counts_paid_tables_only() {
        let ledger = ledger_with_sales();
        let today = Utc::now().date_naive();
        let summary = RevenueSummary::from_tables(ledger.tables(), today, &Utc);

        assert_eq!(summary.paid_count, 2);
        assert_eq!(summary.total_revenue.cents(), 1898 + 499);
        assert_eq!(summary.today_count, 2);
        assert_eq!(summary.today_revenue, summary.total_revenue);
    }

    #[test]
    fn test_other_day_is_not_today() {
        let ledger = ledger_with_sales();
        let tomorrow = Utc::now().date_naive() + Days::new(1);
        let summary = RevenueSummary::from_tables(ledger.tables(), tomorrow, &Utc);

        assert_eq!(summary.paid_count, 2);
        assert_eq!(summary.today_count, 0);
        assert!(summary.today_revenue.is_zero());
    }

    #[test]
    fn test_today_follows_time_zone() {
        let closed_at = Utc.with_ymd_and_hms(2026, 10, 20, 2, 30, 0).unwrap();
        let mut table = Table::open("ord_1".into(), "Patio 2".into(), closed_at);
        table
            .push_unit(&ItemTemplate::new("Iced Coffee", Money::from_cents(499), "80141503", "E48"))
            .unwrap();
        table.mark_paid(PaymentMethod::Cash, closed_at);
        let tables = [table];

        // 02:30 UTC on the 20th is still the evening of the 19th at UTC-6.
        let mountain = FixedOffset::west_opt(6 * 3600).unwrap();
        let evening = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();

        let local = RevenueSummary::from_tables(&tables, evening, &mountain);
        assert_eq!(local.today_count, 1);
        assert_eq!(local.today_revenue.cents(), 499);

        let utc = RevenueSummary::from_tables(&tables, evening, &Utc);
        assert_eq!(utc.paid_count, 1);
        assert_eq!(utc.today_count, 0);
    }

    #[test]
    fn test_empty_ledger() {
        let ledger = LedgerStore::new();
        let summary = RevenueSummary::from_tables(ledger.tables(), Utc::now().date_naive(), &Utc);
        assert_eq!(summary, RevenueSummary::default());
    }

    #[test]
    fn test_serializes_camel_case() {
        let value = serde_json::to_value(RevenueSummary::default()).unwrap();
        assert!(value.get("paidCount").is_some());
        assert!(value.get("todayRevenue").is_some());
    }
}

//! # Ledger State
//!
//! Shares the single `LedgerStore` between commands and the settlement
//! workflow.
//!
//! ## Thread Safety
//! The ledger is wrapped in `Arc<Mutex<T>>` because:
//! 1. Several commands may read or modify tables concurrently
//! 2. Only one mutation may run at a time, and it runs to completion
//! 3. The settlement workflow needs a handle while a payment is in flight
//!
//! The lock is only ever held for synchronous ledger calls. Nothing awaits
//! while holding it, so a slow payment never blocks other tables.

use std::sync::{Arc, Mutex, PoisonError};

use tabletop_core::LedgerStore;

#[derive(Debug, Clone, Default)]
pub struct LedgerState {
    ledger: Arc<Mutex<LedgerStore>>,
}

impl LedgerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes a function with read access to the ledger.
    ///
    /// ## Usage
    /// ```rust
    /// use tabletop_register::state::LedgerState;
    ///
    /// let state = LedgerState::new();
    /// let count = state.with_ledger(|ledger| ledger.len());
    /// assert_eq!(count, 0);
    /// ```
    pub fn with_ledger<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&LedgerStore) -> R,
    {
        // Ledger methods check input and total overflow before they write,
        // so a poisoned lock still guards a consistent ledger.
        let ledger = self.ledger.lock().unwrap_or_else(PoisonError::into_inner);
        f(&ledger)
    }

    /// Executes a function with write access to the ledger.
    pub fn with_ledger_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut LedgerStore) -> R,
    {
        let mut ledger = self.ledger.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut ledger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_one_ledger() {
        let state = LedgerState::new();
        let other = state.clone();

        state.with_ledger_mut(|l| l.create_table("Patio 2").map(|t| t.id().to_string())).unwrap();
        assert_eq!(other.with_ledger(|l| l.len()), 1);
    }
}

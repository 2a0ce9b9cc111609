//! Business logic helpers for managing transactions.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::errors::LedgerError;
use crate::ledger::{
    NewTransaction, RecordKind, Snapshot, Transaction, TransactionFilter, TransactionPatch,
};

use super::{require_positive, require_text, require_transaction_totals, ServiceResult};

/// Provides validated CRUD helpers for snapshot transactions.
pub struct TransactionService;

impl TransactionService {
    /// Adds a new transaction dated `today` and returns its identifier.
    pub fn add(
        snapshot: &mut Snapshot,
        draft: NewTransaction,
        today: NaiveDate,
    ) -> ServiceResult<Uuid> {
        require_positive("amount", draft.amount)?;
        require_text("category", &draft.category)?;
        require_text("description", &draft.description)?;
        let txn = Transaction::from_draft(draft, today);
        require_transaction_totals(snapshot.transactions.iter().chain([&txn]))?;
        let id = snapshot.prepend_transaction(txn);
        snapshot.recompute_budget_spent();
        Ok(id)
    }

    /// Applies `patch` to the transaction identified by `id`.
    pub fn update(snapshot: &mut Snapshot, id: Uuid, patch: TransactionPatch) -> ServiceResult<()> {
        if let Some(amount) = patch.amount {
            require_positive("amount", amount)?;
        }
        if let Some(category) = patch.category.as_deref() {
            require_text("category", category)?;
        }
        if let Some(description) = patch.description.as_deref() {
            require_text("description", description)?;
        }
        let mut updated = snapshot
            .transaction(id)
            .cloned()
            .ok_or_else(|| LedgerError::not_found(RecordKind::Transaction, id))?;
        patch.apply(&mut updated);
        require_transaction_totals(
            snapshot
                .transactions
                .iter()
                .filter(|txn| txn.id != id)
                .chain([&updated]),
        )?;
        if let Some(txn) = snapshot.transaction_mut(id) {
            *txn = updated;
        }
        snapshot.recompute_budget_spent();
        Ok(())
    }

    /// Removes the transaction identified by `id`. Unknown ids are ignored.
    pub fn remove(snapshot: &mut Snapshot, id: Uuid) -> bool {
        let removed = snapshot.remove_transaction(id);
        snapshot.recompute_budget_spent();
        removed
    }

    /// Returns the transactions matching `filter`, most recent first.
    pub fn list<'a>(snapshot: &'a Snapshot, filter: &TransactionFilter) -> Vec<&'a Transaction> {
        filter.apply(&snapshot.transactions)
    }
}

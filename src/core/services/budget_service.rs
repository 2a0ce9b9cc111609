//! Budget allocation helpers.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::errors::LedgerError;
use crate::ledger::{Budget, BudgetPatch, BudgetUsage, RecordKind, Snapshot};

use super::{require_positive, require_text, require_total, ServiceResult};

pub struct BudgetService;

impl BudgetService {
    /// Adds a budget; `spent` is derived from the existing transactions.
    pub fn add(
        snapshot: &mut Snapshot,
        category: &str,
        allocated: Decimal,
    ) -> ServiceResult<Uuid> {
        require_text("category", category)?;
        require_positive("allocated", allocated)?;
        require_total(
            "total allocated",
            snapshot.budgets.iter().map(|b| b.allocated).chain([allocated]),
        )?;
        let budget = Budget::new(category, allocated);
        let id = budget.id;
        snapshot.budgets.push(budget);
        snapshot.recompute_budget_spent();
        Ok(id)
    }

    pub fn update(snapshot: &mut Snapshot, id: Uuid, patch: BudgetPatch) -> ServiceResult<()> {
        if let Some(category) = patch.category.as_deref() {
            require_text("category", category)?;
        }
        if let Some(allocated) = patch.allocated {
            require_positive("allocated", allocated)?;
        }
        let mut updated = snapshot
            .budget(id)
            .cloned()
            .ok_or_else(|| LedgerError::not_found(RecordKind::Budget, id))?;
        patch.apply(&mut updated);
        require_total(
            "total allocated",
            snapshot
                .budgets
                .iter()
                .filter(|b| b.id != id)
                .map(|b| b.allocated)
                .chain([updated.allocated]),
        )?;
        if let Some(budget) = snapshot.budget_mut(id) {
            *budget = updated;
        }
        snapshot.recompute_budget_spent();
        Ok(())
    }

    pub fn remove(snapshot: &mut Snapshot, id: Uuid) -> bool {
        snapshot.remove_budget(id)
    }

    /// Usage figures for every budget in stored order.
    pub fn usage(snapshot: &Snapshot) -> Vec<BudgetUsage> {
        snapshot.budgets.iter().map(BudgetUsage::from_budget).collect()
    }
}

//! Ledger record types, the persisted snapshot, and derived aggregates.

pub mod aggregates;
pub mod bill;
pub mod budget;
pub mod common;
pub mod filter;
pub mod goal;
pub mod investment;
pub mod settings;
pub mod snapshot;
pub mod transaction;

pub use aggregates::{
    recompute_budget_spent, BillTotals, BudgetStatus, BudgetUsage, GoalProgress,
};
pub use bill::{Bill, BillStatus};
pub use budget::{Budget, BudgetPatch};
pub use common::{Amounted, Identifiable, RecordKind, TransactionType};
pub use filter::TransactionFilter;
pub use goal::{Goal, GoalPriority, NewGoal};
pub use investment::Investment;
pub use settings::Settings;
pub use snapshot::Snapshot;
pub use transaction::{parse_tags, NewTransaction, Transaction, TransactionPatch};

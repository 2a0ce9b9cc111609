//! The single owner of ledger state.
//!
//! Every intent runs against a working copy of the snapshot. The copy only
//! replaces the live snapshot when the intent succeeds, so a rejected intent
//! leaves nothing half-applied. Successful intents are persisted immediately.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::core::clock::{Clock, SystemClock};
use crate::core::services::{
    BillService, BudgetService, GoalService, InvestmentService, LedgerTotals, NewBill,
    NewInvestment, SettingsService, SummaryService, TransactionService,
};
use crate::core::utils::ensure_dir;
use crate::errors::Result;
use crate::ledger::{BudgetPatch, NewGoal, NewTransaction, Snapshot, TransactionPatch};
use crate::storage::{
    export_file_name, export_snapshot, json_backend::write_atomic, load_snapshot,
    persist_snapshot, SnapshotSlot, DEFAULT_SLOT_KEY,
};

/// Where the snapshot held by a freshly opened store came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrigin {
    /// Parsed from the slot.
    Stored,
    /// The slot was empty; seed data was written.
    Seeded,
    /// The slot held unreadable data; seed data replaced it.
    Recovered,
}

pub struct LedgerStore {
    snapshot: Snapshot,
    origin: LoadOrigin,
    key: String,
    slot: Box<dyn SnapshotSlot>,
    clock: Box<dyn Clock>,
}

impl LedgerStore {
    /// Opens the store on the default key with the system clock.
    pub fn open(slot: Box<dyn SnapshotSlot>) -> Self {
        Self::open_with(slot, DEFAULT_SLOT_KEY, Box::new(SystemClock))
    }

    /// Loads the snapshot stored under `key`, falling back to seed data when
    /// the slot is empty or unreadable. Never fails.
    pub fn open_with(
        slot: Box<dyn SnapshotSlot>,
        key: impl Into<String>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let key = key.into();
        let today = clock.today();
        let (mut snapshot, origin) = match slot.read(&key) {
            Ok(Some(raw)) => match load_snapshot(&raw) {
                Ok(snapshot) => (snapshot, LoadOrigin::Stored),
                Err(err) => {
                    warn!(key = %key, error = %err, "stored data is unreadable; using defaults");
                    (Snapshot::with_defaults(today), LoadOrigin::Recovered)
                }
            },
            Ok(None) => (Snapshot::with_defaults(today), LoadOrigin::Seeded),
            Err(err) => {
                warn!(key = %key, error = %err, "failed to read stored data; using defaults");
                (Snapshot::with_defaults(today), LoadOrigin::Recovered)
            }
        };
        snapshot.recompute_budget_spent();

        let store = Self {
            snapshot,
            origin,
            key,
            slot,
            clock,
        };
        if origin != LoadOrigin::Stored {
            store.persist();
        }
        info!(
            key = %store.key,
            origin = ?origin,
            transactions = store.snapshot.transactions.len(),
            "ledger store opened"
        );
        store
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn origin(&self) -> LoadOrigin {
        self.origin
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Writes the current snapshot to the slot, reporting any failure.
    pub fn flush(&self) -> Result<()> {
        let raw = persist_snapshot(&self.snapshot)?;
        self.slot.write(&self.key, &raw)
    }

    pub fn add_transaction(&mut self, draft: NewTransaction) -> Result<Uuid> {
        self.apply("add_transaction", |snapshot, today| {
            TransactionService::add(snapshot, draft, today)
        })
    }

    pub fn update_transaction(&mut self, id: Uuid, patch: TransactionPatch) -> Result<()> {
        self.apply("update_transaction", |snapshot, _| {
            TransactionService::update(snapshot, id, patch)
        })
    }

    pub fn delete_transaction(&mut self, id: Uuid) -> bool {
        self.mutate("delete_transaction", |snapshot| {
            TransactionService::remove(snapshot, id)
        })
    }

    pub fn add_budget(&mut self, category: &str, allocated: Decimal) -> Result<Uuid> {
        self.apply("add_budget", |snapshot, _| {
            BudgetService::add(snapshot, category, allocated)
        })
    }

    pub fn update_budget(&mut self, id: Uuid, patch: BudgetPatch) -> Result<()> {
        self.apply("update_budget", |snapshot, _| {
            BudgetService::update(snapshot, id, patch)
        })
    }

    pub fn delete_budget(&mut self, id: Uuid) -> bool {
        self.mutate("delete_budget", |snapshot| BudgetService::remove(snapshot, id))
    }

    pub fn add_goal(&mut self, draft: NewGoal) -> Result<Uuid> {
        self.apply("add_goal", |snapshot, _| GoalService::add(snapshot, draft))
    }

    /// Returns the id of the savings transaction recorded for the contribution.
    pub fn contribute_to_goal(&mut self, goal_id: Uuid, amount: Decimal) -> Result<Uuid> {
        self.apply("contribute_to_goal", |snapshot, today| {
            GoalService::contribute(snapshot, goal_id, amount, today)
        })
    }

    pub fn delete_goal(&mut self, id: Uuid) -> bool {
        self.mutate("delete_goal", |snapshot| GoalService::remove(snapshot, id))
    }

    pub fn add_investment(&mut self, draft: NewInvestment) -> Result<Uuid> {
        self.apply("add_investment", |snapshot, _| {
            InvestmentService::add(snapshot, draft)
        })
    }

    pub fn delete_investment(&mut self, id: Uuid) -> bool {
        self.mutate("delete_investment", |snapshot| {
            InvestmentService::remove(snapshot, id)
        })
    }

    pub fn add_bill(&mut self, draft: NewBill) -> Result<Uuid> {
        self.apply("add_bill", |snapshot, _| BillService::add(snapshot, draft))
    }

    /// Returns the id of the payment transaction.
    pub fn pay_bill(&mut self, id: Uuid) -> Result<Uuid> {
        self.apply("pay_bill", |snapshot, today| {
            BillService::pay(snapshot, id, today)
        })
    }

    pub fn delete_bill(&mut self, id: Uuid) -> bool {
        self.mutate("delete_bill", |snapshot| BillService::remove(snapshot, id))
    }

    pub fn set_dark_mode(&mut self, enabled: bool) {
        self.mutate("set_dark_mode", |snapshot| {
            SettingsService::set_dark_mode(snapshot, enabled);
            true
        });
    }

    pub fn set_notifications(&mut self, enabled: bool) {
        self.mutate("set_notifications", |snapshot| {
            SettingsService::set_notifications(snapshot, enabled);
            true
        });
    }

    pub fn set_currency(&mut self, code: &str) -> Result<()> {
        self.apply("set_currency", |snapshot, _| {
            SettingsService::set_currency(snapshot, code)
        })
    }

    /// Recomputes every budget's `spent`. Safe to call at any time.
    pub fn recompute_budget_spent(&mut self) {
        let before = self.snapshot.budgets.clone();
        self.snapshot.recompute_budget_spent();
        if before != self.snapshot.budgets {
            self.persist();
        }
    }

    pub fn totals(&self) -> LedgerTotals {
        SummaryService::totals(&self.snapshot)
    }

    /// Pretty JSON of the whole snapshot. Does not touch the store.
    pub fn export_snapshot(&self) -> Result<String> {
        export_snapshot(&self.snapshot)
    }

    /// Writes `money-magnet-data-<date>.json` into `dir` and returns its path.
    pub fn export_to_dir(&self, dir: &Path) -> Result<PathBuf> {
        ensure_dir(dir)?;
        let path = dir.join(export_file_name(self.today()));
        write_atomic(&path, &self.export_snapshot()?)?;
        info!(path = %path.display(), "snapshot exported");
        Ok(path)
    }

    fn apply<T, F>(&mut self, action: &str, intent: F) -> Result<T>
    where
        F: FnOnce(&mut Snapshot, NaiveDate) -> Result<T>,
    {
        let today = self.clock.today();
        let mut working = self.snapshot.clone();
        match intent(&mut working, today) {
            Ok(value) => {
                self.snapshot = working;
                debug!(action, "intent applied");
                self.persist();
                Ok(value)
            }
            Err(err) => {
                debug!(action, error = %err, "intent rejected");
                Err(err)
            }
        }
    }

    /// Infallible intents. Persists only when something changed.
    fn mutate<F>(&mut self, action: &str, intent: F) -> bool
    where
        F: FnOnce(&mut Snapshot) -> bool,
    {
        let changed = intent(&mut self.snapshot);
        debug!(action, changed, "intent applied");
        if changed {
            self.persist();
        }
        changed
    }

    fn persist(&self) {
        if let Err(err) = self.flush() {
            warn!(key = %self.key, error = %err, "failed to persist snapshot; keeping in-memory state");
        }
    }
}

//! Bill tracking and payment.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::errors::LedgerError;
use crate::ledger::{Bill, BillStatus, BillTotals, NewTransaction, RecordKind, Snapshot, Transaction};

use super::{require_positive, require_text, require_transaction_totals, ServiceResult};

/// User-supplied fields for a new bill.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBill {
    pub name: String,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub category: String,
    pub recurring: bool,
}

impl NewBill {
    pub fn new(
        name: impl Into<String>,
        amount: Decimal,
        due_date: NaiveDate,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            amount,
            due_date,
            category: category.into(),
            recurring: false,
        }
    }

    pub fn recurring(mut self, recurring: bool) -> Self {
        self.recurring = recurring;
        self
    }
}

pub struct BillService;

impl BillService {
    pub fn add(snapshot: &mut Snapshot, draft: NewBill) -> ServiceResult<Uuid> {
        require_text("name", &draft.name)?;
        require_text("category", &draft.category)?;
        require_positive("amount", draft.amount)?;
        let bill = Bill::new(
            draft.name,
            draft.amount,
            draft.due_date,
            draft.category,
            draft.recurring,
        );
        let id = bill.id;
        snapshot.bills.push(bill);
        Ok(id)
    }

    /// Marks the bill paid and records the payment as an expense.
    /// Returns the id of the payment transaction.
    pub fn pay(snapshot: &mut Snapshot, id: Uuid, today: NaiveDate) -> ServiceResult<Uuid> {
        let bill = snapshot
            .bill(id)
            .ok_or_else(|| LedgerError::not_found(RecordKind::Bill, id))?;
        if bill.is_paid() {
            return Err(LedgerError::BillAlreadyPaid(id));
        }
        let draft = NewTransaction::expense(
            bill.amount,
            bill.category.clone(),
            format!("Payment for {}", bill.name),
        )
        .with_merchant(bill.name.clone())
        .with_tags(["bill", "payment"]);
        let txn = Transaction::from_draft(draft, today);
        require_transaction_totals(snapshot.transactions.iter().chain([&txn]))?;

        if let Some(bill) = snapshot.bill_mut(id) {
            bill.status = BillStatus::Paid;
        }
        let txn_id = snapshot.prepend_transaction(txn);
        snapshot.recompute_budget_spent();
        Ok(txn_id)
    }

    pub fn remove(snapshot: &mut Snapshot, id: Uuid) -> bool {
        snapshot.remove_bill(id)
    }

    pub fn totals(snapshot: &Snapshot) -> BillTotals {
        BillTotals::from_bills(&snapshot.bills)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 5).unwrap()
    }

    fn snapshot_with_bill() -> (Snapshot, Uuid) {
        let mut snapshot = Snapshot::default();
        snapshot.budgets.push(crate::ledger::Budget::new("Utilities", dec!(200)));
        let id = BillService::add(
            &mut snapshot,
            NewBill::new("Electric", dec!(85.40), today(), "Utilities").recurring(true),
        )
        .unwrap();
        (snapshot, id)
    }

    #[test]
    fn add_starts_pending() {
        let (snapshot, id) = snapshot_with_bill();
        let bill = snapshot.bill(id).unwrap();
        assert_eq!(bill.status, BillStatus::Pending);
        assert!(bill.recurring);
    }

    #[test]
    fn pay_flips_status_and_records_payment() {
        let (mut snapshot, id) = snapshot_with_bill();
        let txn_id = BillService::pay(&mut snapshot, id, today()).unwrap();

        assert!(snapshot.bill(id).unwrap().is_paid());
        let payment = snapshot.transaction(txn_id).unwrap();
        assert_eq!(snapshot.transactions[0].id, txn_id);
        assert_eq!(payment.amount, dec!(85.40));
        assert_eq!(payment.category, "Utilities");
        assert_eq!(payment.description, "Payment for Electric");
        assert_eq!(payment.merchant.as_deref(), Some("Electric"));
        assert_eq!(payment.tags, vec!["bill".to_string(), "payment".to_string()]);
        assert_eq!(snapshot.budgets[0].spent, dec!(85.40));
    }

    #[test]
    fn paying_twice_is_rejected() {
        let (mut snapshot, id) = snapshot_with_bill();
        BillService::pay(&mut snapshot, id, today()).unwrap();
        let before = snapshot.clone();
        let err = BillService::pay(&mut snapshot, id, today()).unwrap_err();
        assert!(matches!(err, LedgerError::BillAlreadyPaid(bill) if bill == id));
        assert_eq!(snapshot, before);
        assert_eq!(snapshot.transactions.len(), 1);
    }

    #[test]
    fn pay_unknown_bill_is_not_found() {
        let mut snapshot = Snapshot::default();
        let err = BillService::pay(&mut snapshot, Uuid::new_v4(), today()).unwrap_err();
        assert!(matches!(err, LedgerError::NotFound { kind: RecordKind::Bill, .. }));
        assert!(snapshot.transactions.is_empty());
    }

    #[test]
    fn totals_group_by_status() {
        let (mut snapshot, paid) = snapshot_with_bill();
        BillService::add(&mut snapshot, NewBill::new("Rent", dec!(1200), today(), "Housing"))
            .unwrap();
        BillService::pay(&mut snapshot, paid, today()).unwrap();
        let totals = BillService::totals(&snapshot);
        assert_eq!(totals.total, dec!(1285.40));
        assert_eq!(totals.paid, dec!(85.40));
        assert_eq!(totals.pending, dec!(1200));
        assert_eq!(totals.overdue, Decimal::ZERO);
    }

    #[test]
    fn add_rejects_missing_fields() {
        let mut snapshot = Snapshot::default();
        assert!(BillService::add(&mut snapshot, NewBill::new("", dec!(1), today(), "X")).is_err());
        assert!(BillService::add(&mut snapshot, NewBill::new("Gym", dec!(1), today(), "")).is_err());
        assert!(BillService::add(&mut snapshot, NewBill::new("Gym", dec!(0), today(), "Fitness")).is_err());
        assert!(snapshot.bills.is_empty());
    }

    #[test]
    fn payment_past_the_expense_limit_keeps_bill_pending() {
        let (mut snapshot, id) = snapshot_with_bill();
        snapshot.prepend_transaction(Transaction::from_draft(
            NewTransaction::expense(Decimal::MAX, "Utilities", "Everything"),
            today(),
        ));
        let before = snapshot.clone();

        let err = BillService::pay(&mut snapshot, id, today()).unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)), "unexpected error: {err:?}");
        assert_eq!(snapshot, before);
        assert_eq!(snapshot.bill(id).unwrap().status, BillStatus::Pending);
    }
}

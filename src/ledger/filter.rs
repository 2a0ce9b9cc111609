//! Transaction search used by list views.

use super::{common::TransactionType, transaction::Transaction};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    /// Case-insensitive match against description, category and merchant.
    pub search: Option<String>,
    pub category: Option<String>,
    pub kind: Option<TransactionType>,
}

impl TransactionFilter {
    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        self.search = (!term.trim().is_empty()).then_some(term);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn kind(mut self, kind: TransactionType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn matches(&self, txn: &Transaction) -> bool {
        self.matches_search(txn)
            && self
                .category
                .as_deref()
                .map_or(true, |category| txn.category == category)
            && self.kind.map_or(true, |kind| txn.kind == kind)
    }

    /// Returns matching transactions, keeping their stored order.
    pub fn apply<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        transactions.iter().filter(|txn| self.matches(txn)).collect()
    }

    fn matches_search(&self, txn: &Transaction) -> bool {
        let Some(term) = self.search.as_deref() else {
            return true;
        };
        let needle = term.trim().to_lowercase();
        txn.description.to_lowercase().contains(&needle)
            || txn.category.to_lowercase().contains(&needle)
            || txn
                .merchant
                .as_deref()
                .is_some_and(|merchant| merchant.to_lowercase().contains(&needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn sample() -> Vec<Transaction> {
        let date = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        vec![
            Transaction::new(dec!(9), "Coffee", "Latte", TransactionType::Expense, date)
                .with_merchant("Blue Bottle"),
            Transaction::new(dec!(3500), "Salary", "Monthly Salary", TransactionType::Income, date),
            Transaction::new(dec!(60), "Food", "Groceries", TransactionType::Expense, date),
        ]
    }

    #[test]
    fn empty_filter_matches_everything() {
        let txns = sample();
        assert_eq!(TransactionFilter::default().apply(&txns).len(), 3);
    }

    #[test]
    fn search_checks_merchant_case_insensitively() {
        let txns = sample();
        let hits = TransactionFilter::default().search("BOTTLE").apply(&txns);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].description, "Latte");
    }

    #[test]
    fn category_and_type_combine() {
        let txns = sample();
        let hits = TransactionFilter::default()
            .category("Salary")
            .kind(TransactionType::Expense)
            .apply(&txns);
        assert!(hits.is_empty());
        let hits = TransactionFilter::default()
            .kind(TransactionType::Expense)
            .apply(&txns);
        assert_eq!(hits.len(), 2);
    }
}

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::errors::LedgerError;
use crate::ledger::{Investment, Snapshot};

use super::{require_positive, require_text, ServiceResult};

/// User-supplied fields for a new portfolio position.
#[derive(Debug, Clone, PartialEq)]
pub struct NewInvestment {
    pub symbol: String,
    pub name: String,
    pub shares: Decimal,
    pub purchase_price: Decimal,
}

impl NewInvestment {
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        shares: Decimal,
        purchase_price: Decimal,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            shares,
            purchase_price,
        }
    }
}

pub struct InvestmentService;

impl InvestmentService {
    pub fn add(snapshot: &mut Snapshot, draft: NewInvestment) -> ServiceResult<Uuid> {
        require_text("symbol", &draft.symbol)?;
        require_text("name", &draft.name)?;
        require_positive("shares", draft.shares)?;
        require_positive("purchase price", draft.purchase_price)?;
        let investment = Investment::new(
            &draft.symbol,
            draft.name,
            draft.shares,
            draft.purchase_price,
        );
        snapshot
            .investments
            .iter()
            .chain([&investment])
            .try_fold(Decimal::ZERO, |total, inv| {
                inv.checked_value().and_then(|value| total.checked_add(value))
            })
            .ok_or_else(|| LedgerError::validation("portfolio value exceeds the supported range"))?;
        let id = investment.id;
        snapshot.investments.push(investment);
        Ok(id)
    }

    pub fn remove(snapshot: &mut Snapshot, id: Uuid) -> bool {
        snapshot.remove_investment(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn add_normalizes_symbol_and_seeds_price() {
        let mut snapshot = Snapshot::default();
        let id = InvestmentService::add(
            &mut snapshot,
            NewInvestment::new(" aapl ", "Apple Inc.", dec!(10), dec!(150.25)),
        )
        .unwrap();
        let position = snapshot.investment(id).unwrap();
        assert_eq!(position.symbol, "AAPL");
        assert_eq!(position.current_price, dec!(150.25));
        assert_eq!(position.gain_loss(), Decimal::ZERO);
    }

    #[test]
    fn add_rejects_incomplete_positions() {
        let mut snapshot = Snapshot::default();
        let drafts = [
            NewInvestment::new("", "Apple", dec!(1), dec!(1)),
            NewInvestment::new("AAPL", " ", dec!(1), dec!(1)),
            NewInvestment::new("AAPL", "Apple", dec!(0), dec!(1)),
            NewInvestment::new("AAPL", "Apple", dec!(1), dec!(-3)),
        ];
        for draft in drafts {
            assert!(InvestmentService::add(&mut snapshot, draft).is_err());
        }
        assert!(snapshot.investments.is_empty());
    }

    #[test]
    fn remove_reports_presence() {
        let mut snapshot = Snapshot::default();
        let id = InvestmentService::add(
            &mut snapshot,
            NewInvestment::new("VTI", "Total Market", dec!(3), dec!(220)),
        )
        .unwrap();
        assert!(InvestmentService::remove(&mut snapshot, id));
        assert!(!InvestmentService::remove(&mut snapshot, id));
    }

    #[test]
    fn add_rejects_position_too_large_to_value() {
        let mut snapshot = Snapshot::default();
        let err = InvestmentService::add(
            &mut snapshot,
            NewInvestment::new("BIG", "Big Co", Decimal::MAX, dec!(2)),
        )
        .unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
        assert!(snapshot.investments.is_empty());
    }
}

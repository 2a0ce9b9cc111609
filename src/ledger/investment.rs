//! Portfolio positions. Prices are user-entered; nothing refreshes them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{aggregates::percent_of, common::Identifiable};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    pub id: Uuid,
    pub symbol: String,
    pub name: String,
    pub shares: Decimal,
    pub purchase_price: Decimal,
    pub current_price: Decimal,
}

impl Investment {
    /// Creates a position whose current price starts at the purchase price.
    pub fn new(
        symbol: impl AsRef<str>,
        name: impl Into<String>,
        shares: Decimal,
        purchase_price: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            symbol: normalize_symbol(symbol.as_ref()),
            name: name.into().trim().to_string(),
            shares,
            purchase_price,
            current_price: purchase_price,
        }
    }

    pub fn total_value(&self) -> Decimal {
        self.shares.saturating_mul(self.current_price)
    }

    /// `shares × current price`, or `None` when the product overflows.
    pub fn checked_value(&self) -> Option<Decimal> {
        self.shares.checked_mul(self.current_price)
    }

    pub fn cost_basis(&self) -> Decimal {
        self.shares.saturating_mul(self.purchase_price)
    }

    pub fn gain_loss(&self) -> Decimal {
        self.price_change().saturating_mul(self.shares)
    }

    /// Percent change of the current price against the purchase price.
    pub fn change_percent(&self) -> Decimal {
        percent_of(self.price_change(), self.purchase_price)
    }

    fn price_change(&self) -> Decimal {
        self.current_price.saturating_sub(self.purchase_price)
    }
}

impl Identifiable for Investment {
    fn id(&self) -> Uuid {
        self.id
    }
}

pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn new_position_has_no_gain() {
        let inv = Investment::new(" aapl ", "Apple", dec!(10), dec!(150.25));
        assert_eq!(inv.symbol, "AAPL");
        assert_eq!(inv.current_price, inv.purchase_price);
        assert_eq!(inv.total_value(), dec!(1502.50));
        assert_eq!(inv.gain_loss(), Decimal::ZERO);
        assert_eq!(inv.change_percent(), Decimal::ZERO);
    }

    #[test]
    fn gain_loss_is_signed() {
        let mut inv = Investment::new("VTI", "Total Market", dec!(4), dec!(200));
        inv.current_price = dec!(180);
        assert_eq!(inv.gain_loss(), dec!(-80));
        assert_eq!(inv.change_percent(), dec!(-10));
    }

    #[test]
    fn huge_positions_saturate() {
        let inv = Investment::new("BIG", "Big Co", Decimal::MAX, dec!(2));
        assert_eq!(inv.total_value(), Decimal::MAX);
        assert_eq!(inv.cost_basis(), Decimal::MAX);
        assert_eq!(inv.gain_loss(), Decimal::ZERO);
    }
}

//! Invoice line-item types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One invoice line as the calculator sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    /// Quantity ordered. Must be non-negative.
    pub quantity: Decimal,
    /// Unit price. Must be non-negative.
    pub price: Decimal,
    /// Tax as a percentage (18 means 18%). Fractional values allowed.
    pub tax_percent: Decimal,
}

impl LineItem {
    /// Creates a line item.
    #[must_use]
    pub const fn new(quantity: Decimal, price: Decimal, tax_percent: Decimal) -> Self {
        Self {
            quantity,
            price,
            tax_percent,
        }
    }
}

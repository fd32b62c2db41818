//! Invoice total computation.

use rust_decimal::Decimal;

use super::error::InvoiceError;
use super::types::LineItem;

/// Invoice economics calculator.
pub struct InvoiceService;

impl InvoiceService {
    /// Computes the total of one line: `quantity * price * (1 + tax/100)`.
    ///
    /// # Errors
    ///
    /// Returns `InvoiceError::InvalidLineItem` for a negative quantity or
    /// price. (Out-of-range tax percentages are accepted as entered.)
    pub fn line_total(line: &LineItem) -> Result<Decimal, InvoiceError> {
        if line.quantity < Decimal::ZERO {
            return Err(InvoiceError::InvalidLineItem(
                "quantity cannot be negative".to_string(),
            ));
        }
        if line.price < Decimal::ZERO {
            return Err(InvoiceError::InvalidLineItem(
                "price cannot be negative".to_string(),
            ));
        }

        let base = line.quantity * line.price;
        let tax = base * line.tax_percent / Decimal::ONE_HUNDRED;
        Ok(base + tax)
    }

    /// Computes the grand total over all lines.
    ///
    /// The persisted invoice `amount` must equal this value.
    ///
    /// # Errors
    ///
    /// Returns `InvoiceError::EmptyInvoice` for zero lines and
    /// `InvoiceError::InvalidLineItem` for any invalid line.
    pub fn grand_total(lines: &[LineItem]) -> Result<Decimal, InvoiceError> {
        if lines.is_empty() {
            return Err(InvoiceError::EmptyInvoice);
        }

        let mut total = Decimal::ZERO;
        for line in lines {
            total += Self::line_total(line)?;
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case::with_tax(dec!(2), dec!(100), dec!(18), dec!(236))]
    #[case::without_tax(dec!(1), dec!(50), dec!(0), dec!(50))]
    #[case::fractional_tax(dec!(1), dec!(200), dec!(2.5), dec!(205))]
    #[case::zero_quantity(dec!(0), dec!(100), dec!(18), dec!(0))]
    fn test_line_total(
        #[case] quantity: Decimal,
        #[case] price: Decimal,
        #[case] tax_percent: Decimal,
        #[case] expected: Decimal,
    ) {
        let line = LineItem::new(quantity, price, tax_percent);
        assert_eq!(InvoiceService::line_total(&line).unwrap(), expected);
    }

    #[test]
    fn test_grand_total_sums_lines() {
        let lines = [
            LineItem::new(dec!(2), dec!(100), dec!(18)),
            LineItem::new(dec!(1), dec!(50), dec!(0)),
        ];
        assert_eq!(InvoiceService::grand_total(&lines).unwrap(), dec!(286));
    }

    #[test]
    fn test_negative_quantity_rejected() {
        let line = LineItem::new(dec!(-1), dec!(100), dec!(18));
        assert!(matches!(
            InvoiceService::line_total(&line),
            Err(InvoiceError::InvalidLineItem(_))
        ));
    }

    #[test]
    fn test_negative_price_rejected() {
        let line = LineItem::new(dec!(1), dec!(-100), dec!(0));
        assert!(matches!(
            InvoiceService::line_total(&line),
            Err(InvoiceError::InvalidLineItem(_))
        ));
    }

    #[test]
    fn test_empty_invoice_rejected() {
        assert_eq!(
            InvoiceService::grand_total(&[]),
            Err(InvoiceError::EmptyInvoice)
        );
    }

    #[test]
    fn test_one_bad_line_fails_the_invoice() {
        let lines = [
            LineItem::new(dec!(1), dec!(50), dec!(0)),
            LineItem::new(dec!(-2), dec!(10), dec!(0)),
        ];
        assert!(InvoiceService::grand_total(&lines).is_err());
    }

    proptest! {
        /// Grand total always equals the sum of the individual line totals.
        #[test]
        fn prop_grand_total_is_sum_of_lines(
            lines in prop::collection::vec(
                (0i64..10_000, 0i64..1_000_000_00, 0i64..100_00),
                1..10,
            )
        ) {
            let lines: Vec<LineItem> = lines
                .into_iter()
                .map(|(qty, price, tax)| LineItem::new(
                    Decimal::from(qty),
                    Decimal::new(price, 2),
                    Decimal::new(tax, 2),
                ))
                .collect();

            let expected: Decimal = lines
                .iter()
                .map(|l| InvoiceService::line_total(l).unwrap())
                .sum();

            prop_assert_eq!(InvoiceService::grand_total(&lines).unwrap(), expected);
        }
    }
}

use tracing::debug;

use super::{line_totals, PricingStrategy};
use crate::error::CoreResult;
use crate::money::Money;
use crate::types::LineItem;

/// Flat unit-price summation: Σ unit price × quantity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultPricing;

impl PricingStrategy for DefaultPricing {
    fn name(&self) -> &'static str {
        "default"
    }

    fn calculate_price(&self, items: &[LineItem]) -> CoreResult<Money> {
        let total = line_totals(items)?;
        debug!(strategy = self.name(), items = items.len(), total_cents = total.cents(), "Calculated price");
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::tests::items;

    #[test]
    fn test_single_item() {
        let total = DefaultPricing.calculate_price(&items(&[("mbp", 1)])).unwrap();
        assert_eq!(total.cents(), 139999);
    }

    #[test]
    fn test_multiple_identical_items() {
        let total = DefaultPricing.calculate_price(&items(&[("mbp", 3)])).unwrap();
        assert_eq!(total.cents(), 139999 * 3);
    }

    #[test]
    fn test_multiple_different_items() {
        let total = DefaultPricing.calculate_price(&items(&[("ipd", 2), ("mbp", 2)])).unwrap();
        assert_eq!(total.to_decimal(), 3899.96);
    }

    #[test]
    fn test_empty_order() {
        assert!(DefaultPricing.calculate_price(&[]).unwrap().is_zero());
    }

    #[test]
    fn test_zero_quantity() {
        assert!(DefaultPricing.calculate_price(&items(&[("ipd", 0)])).unwrap().is_zero());
    }

    #[test]
    fn test_large_quantity() {
        let total = DefaultPricing.calculate_price(&items(&[("mbp", 1000)])).unwrap();
        assert_eq!(total.cents(), 139_999_000);
    }

    #[test]
    fn test_designated_codes_get_no_discount() {
        let total = DefaultPricing.calculate_price(&items(&[("ipd", 2), ("mbp", 4), ("atv", 2)])).unwrap();
        assert_eq!(total.to_decimal(), 6918.94);
    }
}

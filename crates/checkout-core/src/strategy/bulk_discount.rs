use tracing::debug;

use super::{price_by_code, PricingStrategy};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::LineItem;
use crate::util::total_quantity;

/// Charges a flat discounted unit price for every unit of one product code.
///
/// There is no marginal threshold here: once this strategy is in play,
/// every unit of `code` costs `unit_price`. Whether it is in play is the
/// selector's decision.
///
/// ## Example
/// ```rust
/// use checkout_core::{BulkDiscountPricing, Catalog, LineItem, Money, PricingStrategy};
///
/// let catalog = Catalog::reference();
/// let items = vec![LineItem::new(catalog.lookup("ipd").unwrap(), 4).unwrap()];
///
/// let bulk = BulkDiscountPricing::new("ipd", Money::from_cents(49999));
/// assert_eq!(bulk.calculate_price(&items).unwrap().cents(), 199996);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkDiscountPricing {
    code: String,
    unit_price: Money,
}

impl BulkDiscountPricing {
    pub fn new(code: &str, unit_price: Money) -> Self {
        BulkDiscountPricing {
            code: code.to_string(),
            unit_price,
        }
    }

    /// Designated product code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Discounted unit price.
    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// Price of the designated code's items only.
    pub(crate) fn price_designated(&self, items: &[&LineItem]) -> CoreResult<Money> {
        self.unit_price
            .checked_multiply_quantity(total_quantity(items)?)
            .ok_or(CoreError::AmountOverflow("bulk discount total"))
    }
}

impl PricingStrategy for BulkDiscountPricing {
    fn name(&self) -> &'static str {
        "bulk_discount"
    }

    fn calculate_price(&self, items: &[LineItem]) -> CoreResult<Money> {
        let total = price_by_code(items, |code, group| {
            (code == self.code).then(|| self.price_designated(group))
        })?;
        debug!(
            strategy = self.name(),
            code = %self.code,
            items = items.len(),
            total_cents = total.cents(),
            "Calculated price"
        );
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::tests::items;
    use crate::strategy::DefaultPricing;

    fn bulk() -> BulkDiscountPricing {
        BulkDiscountPricing::new("ipd", Money::from_cents(49999))
    }

    #[test]
    fn test_four_ipads() {
        assert_eq!(bulk().calculate_price(&items(&[("ipd", 4)])).unwrap().to_decimal(), 1999.96);
    }

    #[test]
    fn test_five_ipads() {
        assert_eq!(bulk().calculate_price(&items(&[("ipd", 5)])).unwrap().to_decimal(), 2499.95);
    }

    #[test]
    fn test_discount_applies_below_selector_threshold() {
        // 3 × 499.99 + 2 × 1399.99
        let total = bulk().calculate_price(&items(&[("ipd", 3), ("mbp", 2)])).unwrap();
        assert_eq!(total.cents(), 149997 + 279998);
    }

    #[test]
    fn test_other_products_only() {
        let order = items(&[("mbp", 1)]);
        assert_eq!(
            bulk().calculate_price(&order).unwrap(),
            DefaultPricing.calculate_price(&order).unwrap()
        );
    }

    #[test]
    fn test_multiple_codes() {
        let total = bulk().calculate_price(&items(&[("ipd", 6), ("mbp", 1), ("atv", 2)])).unwrap();
        assert_eq!(total.to_decimal(), 4618.93);
    }

    #[test]
    fn test_split_lines_of_designated_code() {
        let total = bulk().calculate_price(&items(&[("ipd", 8), ("ipd", 2)])).unwrap();
        assert_eq!(total.to_decimal(), 4999.9);
    }

    #[test]
    fn test_large_quantity() {
        let total = bulk().calculate_price(&items(&[("ipd", 100)])).unwrap();
        assert_eq!(total.to_decimal(), 49999.0);
    }

    #[test]
    fn test_price_independent_of_other_codes() {
        let alone = bulk().calculate_price(&items(&[("ipd", 7)])).unwrap();
        let mixed = bulk().calculate_price(&items(&[("ipd", 7), ("vga", 3), ("atv", 5)])).unwrap();
        let others = DefaultPricing.calculate_price(&items(&[("vga", 3), ("atv", 5)])).unwrap();
        assert_eq!(alone.cents(), 7 * 49999);
        assert_eq!(mixed.cents(), alone.cents() + others.cents());
    }

    #[test]
    fn test_many_lines_each_code_priced() {
        let mut pairs = Vec::new();
        for i in 0..50 {
            pairs.push(("ipd", i % 10 + 1));
            pairs.push(("mbp", (i * 7) % 10 + 1));
        }
        let order = items(&pairs);
        let ipads: i64 = order.iter().filter(|i| i.code() == "ipd").map(LineItem::quantity).sum();
        let macs: i64 = order.iter().filter(|i| i.code() == "mbp").map(LineItem::quantity).sum();

        let total = bulk().calculate_price(&order).unwrap();
        assert_eq!(total.cents(), ipads * 49999 + macs * 139999);
    }
}

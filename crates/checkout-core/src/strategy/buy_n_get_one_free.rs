use std::num::NonZeroU32;

use tracing::debug;

use super::{price_by_code, PricingStrategy};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::LineItem;
use crate::util::total_quantity;

/// One unit in every `group_size` of a product code is free.
///
/// ## Chargeable Units
/// ```text
/// q = total units of the code across all lines
/// free       = ⌊q / N⌋
/// chargeable = q - free
///
/// N = 4:  q=3 → 3   q=4 → 3   q=5 → 4   q=7 → 5   q=8 → 6
/// ```
///
/// The unit price comes from the first line of the code; all lines of one
/// code share one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuyNGetOneFreePricing {
    code: String,
    group_size: NonZeroU32,
}

impl BuyNGetOneFreePricing {
    pub fn new(code: &str, group_size: NonZeroU32) -> Self {
        BuyNGetOneFreePricing {
            code: code.to_string(),
            group_size,
        }
    }

    /// Designated product code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// N, the size of a group containing one free unit.
    pub fn group_size(&self) -> NonZeroU32 {
        self.group_size
    }

    /// Units billed out of `quantity`.
    ///
    /// ## Example
    /// ```rust
    /// use std::num::NonZeroU32;
    /// use checkout_core::BuyNGetOneFreePricing;
    ///
    /// let rule = BuyNGetOneFreePricing::new("atv", NonZeroU32::new(4).unwrap());
    /// assert_eq!(rule.chargeable_units(8), 6);
    /// assert_eq!(rule.chargeable_units(100), 75);
    /// ```
    pub fn chargeable_units(&self, quantity: i64) -> i64 {
        let free = quantity / i64::from(self.group_size.get());
        quantity - free
    }

    /// Price of the designated code's items only.
    pub(crate) fn price_designated(&self, items: &[&LineItem]) -> CoreResult<Money> {
        let Some(first) = items.first() else {
            return Ok(Money::zero());
        };

        let quantity = total_quantity(items)?;
        first
            .product()
            .unit_price()
            .checked_multiply_quantity(self.chargeable_units(quantity))
            .ok_or(CoreError::AmountOverflow("buy-n-get-one-free total"))
    }
}

impl PricingStrategy for BuyNGetOneFreePricing {
    fn name(&self) -> &'static str {
        "buy_n_get_one_free"
    }

    fn calculate_price(&self, items: &[LineItem]) -> CoreResult<Money> {
        let total = price_by_code(items, |code, group| {
            (code == self.code).then(|| self.price_designated(group))
        })?;
        debug!(
            strategy = self.name(),
            code = %self.code,
            group_size = self.group_size.get(),
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

    fn free() -> BuyNGetOneFreePricing {
        BuyNGetOneFreePricing::new("atv", NonZeroU32::new(4).unwrap())
    }

    fn atv_total(qty: i64) -> Money {
        free().calculate_price(&items(&[("atv", qty)])).unwrap()
    }

    #[test]
    fn test_chargeable_units() {
        let rule = free();
        for (q, expected) in [(0, 0), (1, 1), (3, 3), (4, 3), (5, 4), (7, 5), (8, 6), (100, 75)] {
            assert_eq!(rule.chargeable_units(q), expected, "q={}", q);
        }
    }

    #[test]
    fn test_four_apple_tvs() {
        assert_eq!(atv_total(4).to_decimal(), 328.5);
    }

    #[test]
    fn test_five_apple_tvs() {
        assert_eq!(atv_total(5).to_decimal(), 438.0);
    }

    #[test]
    fn test_seven_apple_tvs() {
        assert_eq!(atv_total(7).to_decimal(), 657.0);
    }

    #[test]
    fn test_single_apple_tv() {
        assert_eq!(atv_total(1).to_decimal(), 109.5);
    }

    #[test]
    fn test_below_group_size_no_discount() {
        assert_eq!(atv_total(2).to_decimal(), 219.0);
        assert_eq!(atv_total(3).to_decimal(), 328.5);
    }

    #[test]
    fn test_large_quantity() {
        assert_eq!(atv_total(100).cents(), 75 * 10950);
    }

    #[test]
    fn test_no_apple_tvs() {
        let total = free().calculate_price(&items(&[("ipd", 1), ("vga", 2)])).unwrap();
        assert_eq!(total.to_decimal(), 609.99);
    }

    #[test]
    fn test_mixed_items() {
        let total = free().calculate_price(&items(&[("atv", 4), ("ipd", 1)])).unwrap();
        assert_eq!(total.to_decimal(), 878.49);

        let total = free().calculate_price(&items(&[("atv", 8), ("mbp", 1)])).unwrap();
        assert_eq!(total.cents(), 65700 + 139999);

        let total = free().calculate_price(&items(&[("atv", 3), ("ipd", 2)])).unwrap();
        assert_eq!(total.cents(), 32850 + 109998);
    }

    #[test]
    fn test_free_units_counted_across_lines() {
        // 2 + 2 = 4 units → one free, same as a single line of 4
        let split = free().calculate_price(&items(&[("atv", 2), ("vga", 1), ("atv", 2)])).unwrap();
        assert_eq!(split.cents(), 32850 + 3000);
    }

    #[test]
    fn test_twelve_apple_tvs_and_macbooks() {
        let total = free().calculate_price(&items(&[("atv", 12), ("mbp", 2)])).unwrap();
        assert_eq!(total.cents(), (12 - 12 / 4) * 10950 + 2 * 139999);
    }

    #[test]
    fn test_large_variety() {
        let total = free().calculate_price(&items(&[
            ("atv", 10),
            ("ipd", 2),
            ("mbp", 1),
            ("vga", 4),
        ])).unwrap();
        assert_eq!(total.to_decimal(), 3495.97);
    }

    #[test]
    fn test_group_size_one_makes_everything_free() {
        let rule = BuyNGetOneFreePricing::new("vga", NonZeroU32::new(1).unwrap());
        assert!(rule.calculate_price(&items(&[("vga", 9)])).unwrap().is_zero());
    }
}

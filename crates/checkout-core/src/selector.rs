//! # Strategy Selection
//!
//! Picks the pricing strategy for an order from its per-code quantities.
//!
//! ## Precedence (first match wins)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  bulk code ≥ bulk min  AND  free code ≥ free min   ──► Combine          │
//! │  bulk code ≥ bulk min                              ──► BulkDiscount     │
//! │  free code ≥ free min                              ──► BuyNGetOneFree   │
//! │  otherwise                                         ──► Default          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Quantities are totals across every line of a code. Thresholds are
//! inclusive. The selector keeps no state between calls.

use tracing::debug;

use crate::config::PromotionConfig;
use crate::error::CoreResult;
use crate::strategy::{DefaultPricing, PricingStrategy, Strategy};
use crate::types::Order;
use crate::util::quantities_by_code;

/// Selects the strategy that prices `order`.
///
/// ## Errors
/// `CoreError::AmountOverflow` if a code's summed quantity does not fit.
///
/// ## Example
/// ```rust
/// use checkout_core::{select_strategy, Catalog, LineItem, Order, PromotionConfig, StrategyKind, User};
///
/// let catalog = Catalog::reference();
/// let items = vec![
///     LineItem::new(catalog.lookup("ipd").unwrap(), 4).unwrap(),
///     LineItem::new(catalog.lookup("atv").unwrap(), 3).unwrap(),
/// ];
/// let order = Order::new(1, User::new(1, "Alice").unwrap(), items).unwrap();
///
/// let strategy = select_strategy(&order, &PromotionConfig::default()).unwrap();
/// assert_eq!(strategy.kind(), StrategyKind::Combine);
/// ```
pub fn select_strategy(order: &Order, config: &PromotionConfig) -> CoreResult<Strategy> {
    let quantities = quantities_by_code(order.items())?;
    let quantity_of = |code: &str| quantities.get(code).copied().unwrap_or(0);

    let bulk = &config.bulk_discount;
    let free = &config.buy_n_get_one_free;
    let bulk_quantity = quantity_of(&bulk.code);
    let free_quantity = quantity_of(&free.code);

    let bulk_applies = bulk_quantity >= bulk.min_quantity;
    let free_applies = free_quantity >= free.min_quantity;

    let strategy: Strategy = match (bulk_applies, free_applies) {
        (true, true) => config.combine_strategy().into(),
        (true, false) => config.bulk_discount_strategy().into(),
        (false, true) => config.buy_n_get_one_free_strategy().into(),
        (false, false) => DefaultPricing.into(),
    };

    debug!(
        order_id = order.id(),
        ?quantities,
        bulk_quantity,
        free_quantity,
        strategy = strategy.name(),
        "Selected pricing strategy"
    );

    Ok(strategy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::tests::items;
    use crate::strategy::StrategyKind;
    use crate::types::User;

    fn order(pairs: &[(&str, i64)]) -> Order {
        Order::new(1, User::new(1, "Alice").unwrap(), items(pairs)).unwrap()
    }

    fn kind(pairs: &[(&str, i64)]) -> StrategyKind {
        select_strategy(&order(pairs), &PromotionConfig::default()).unwrap().kind()
    }

    #[test]
    fn test_both_thresholds_select_combine() {
        assert_eq!(kind(&[("ipd", 4), ("atv", 3)]), StrategyKind::Combine);
        assert_eq!(kind(&[("atv", 7), ("ipd", 9)]), StrategyKind::Combine);
    }

    #[test]
    fn test_combine_with_other_products() {
        assert_eq!(
            kind(&[("mbp", 2), ("ipd", 5), ("vga", 1), ("atv", 4)]),
            StrategyKind::Combine
        );
    }

    #[test]
    fn test_bulk_threshold_only() {
        assert_eq!(kind(&[("ipd", 4)]), StrategyKind::BulkDiscount);
        assert_eq!(kind(&[("ipd", 5), ("atv", 2)]), StrategyKind::BulkDiscount);
    }

    #[test]
    fn test_free_threshold_only() {
        assert_eq!(kind(&[("atv", 3)]), StrategyKind::BuyNGetOneFree);
        assert_eq!(kind(&[("atv", 4), ("ipd", 2)]), StrategyKind::BuyNGetOneFree);
    }

    #[test]
    fn test_below_thresholds_select_default() {
        assert_eq!(kind(&[("mbp", 2)]), StrategyKind::Default);
        assert_eq!(kind(&[("atv", 2), ("ipd", 3)]), StrategyKind::Default);
        assert_eq!(kind(&[("ipd", 1), ("mbp", 2)]), StrategyKind::Default);
    }

    #[test]
    fn test_quantities_summed_across_lines() {
        assert_eq!(kind(&[("ipd", 2), ("mbp", 1), ("ipd", 2)]), StrategyKind::BulkDiscount);
        assert_eq!(kind(&[("atv", 1), ("atv", 1), ("atv", 1)]), StrategyKind::BuyNGetOneFree);
    }

    #[test]
    fn test_repeated_calls_are_independent() {
        let config = PromotionConfig::default();
        let combine = order(&[("ipd", 4), ("atv", 3)]);
        let plain = order(&[("vga", 1)]);

        assert_eq!(select_strategy(&combine, &config).unwrap().kind(), StrategyKind::Combine);
        assert_eq!(select_strategy(&plain, &config).unwrap().kind(), StrategyKind::Default);
        assert_eq!(select_strategy(&combine, &config).unwrap().kind(), StrategyKind::Combine);
    }

    #[test]
    fn test_thresholds_from_config() {
        let mut config = PromotionConfig::default();
        config.bulk_discount.code = "mbp".to_string();
        config.bulk_discount.min_quantity = 2;
        config.buy_n_get_one_free.min_quantity = 10;

        let selected = select_strategy(&order(&[("mbp", 2), ("atv", 5)]), &config).unwrap();
        assert_eq!(selected.kind(), StrategyKind::BulkDiscount);
        assert_eq!(selected, Strategy::BulkDiscount(config.bulk_discount_strategy()));
    }

    #[test]
    fn test_selected_strategy_prices_order() {
        let selected = select_strategy(&order(&[("ipd", 4), ("atv", 3)]), &PromotionConfig::default())
            .unwrap();
        let total = selected.calculate_price(&items(&[("ipd", 4), ("atv", 3)])).unwrap();
        assert_eq!(total.to_decimal(), 2328.46);
    }

    #[test]
    fn test_max_quantity_lines_still_select() {
        let max = crate::MAX_ITEM_QUANTITY;
        assert_eq!(kind(&[("ipd", max), ("ipd", max)]), StrategyKind::BulkDiscount);
        assert_eq!(kind(&[("atv", max), ("ipd", max)]), StrategyKind::Combine);
    }
}

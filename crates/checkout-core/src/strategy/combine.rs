use tracing::debug;

use super::{
    line_totals, price_by_code, BulkDiscountPricing, BuyNGetOneFreePricing, PricingStrategy,
};
use crate::error::CoreResult;
use crate::money::Money;
use crate::types::LineItem;

/// A specialized rule bound to the product code it prices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DesignatedRule {
    BulkDiscount(BulkDiscountPricing),
    BuyNGetOneFree(BuyNGetOneFreePricing),
}

impl DesignatedRule {
    pub fn code(&self) -> &str {
        match self {
            DesignatedRule::BulkDiscount(rule) => rule.code(),
            DesignatedRule::BuyNGetOneFree(rule) => rule.code(),
        }
    }

    fn price_designated(&self, items: &[&LineItem]) -> CoreResult<Money> {
        match self {
            DesignatedRule::BulkDiscount(rule) => rule.price_designated(items),
            DesignatedRule::BuyNGetOneFree(rule) => rule.price_designated(items),
        }
    }
}

/// Applies several specialized rules at once.
///
/// Each rule prices only the items of its own code; every other code is
/// priced by Default. The first rule wins if two rules name the same code,
/// so each item is still priced exactly once.
///
/// ## Example
/// ```rust
/// use checkout_core::{Catalog, LineItem, PricingStrategy, PromotionConfig};
///
/// let catalog = Catalog::reference();
/// let line = |code: &str, qty| LineItem::new(catalog.lookup(code).unwrap(), qty).unwrap();
/// let items = vec![line("ipd", 4), line("atv", 4), line("vga", 1)];
///
/// let combine = PromotionConfig::default().combine_strategy();
/// // 4 × 499.99 + 3 × 109.50 + 30.00
/// assert_eq!(combine.calculate_price(&items).unwrap().cents(), 199996 + 32850 + 3000);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CombinePricing {
    rules: Vec<DesignatedRule>,
}

impl CombinePricing {
    pub fn new<I>(rules: I) -> Self
    where
        I: IntoIterator<Item = DesignatedRule>,
    {
        CombinePricing {
            rules: rules.into_iter().collect(),
        }
    }

    /// Rules in the order they are consulted.
    pub fn rules(&self) -> &[DesignatedRule] {
        &self.rules
    }

    fn rule_for(&self, code: &str) -> Option<&DesignatedRule> {
        self.rules.iter().find(|rule| rule.code() == code)
    }
}

impl PricingStrategy for CombinePricing {
    fn name(&self) -> &'static str {
        "combine"
    }

    fn calculate_price(&self, items: &[LineItem]) -> CoreResult<Money> {
        let total = if self.rules.is_empty() {
            line_totals(items)?
        } else {
            price_by_code(items, |code, group| {
                self.rule_for(code).map(|rule| rule.price_designated(group))
            })?
        };
        debug!(
            strategy = self.name(),
            rules = self.rules.len(),
            items = items.len(),
            total_cents = total.cents(),
            "Calculated price"
        );
        Ok(total)
    }
}

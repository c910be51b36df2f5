//! # Pricing Strategies
//!
//! Four interchangeable ways of turning a list of line items into a total.
//!
//! ## Strategy Family
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      PricingStrategy (trait)                            │
//! │                                                                         │
//! │  DefaultPricing         Σ unit_price × quantity                        │
//! │                                                                         │
//! │  BulkDiscountPricing    designated code: Σ qty × discounted price      │
//! │                         everything else: Default                       │
//! │                                                                         │
//! │  BuyNGetOneFreePricing  designated code: (q - ⌊q/N⌋) × unit price      │
//! │                         everything else: Default                       │
//! │                                                                         │
//! │  CombinePricing         each designated code: its own rule             │
//! │                         everything else: Default                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Partitioning
//! Every non-default strategy groups the items by product code first.
//! Each group is priced by exactly one rule (the designated one for its code,
//! or Default), and the group totals are added. Groups are disjoint and
//! cover the input, so no item is dropped or counted twice.
//!
//! Totals are exact integer cents. Partial totals are summed without any
//! intermediate rounding, so a composed strategy equals the sum of its parts.
//! Every multiplication and addition is checked; a total that would leave
//! the `i64` cent range is `CoreError::AmountOverflow`, never a wrapped value.

mod bulk_discount;
mod buy_n_get_one_free;
mod combine;
mod default;

pub use bulk_discount::BulkDiscountPricing;
pub use buy_n_get_one_free::BuyNGetOneFreePricing;
pub use combine::{CombinePricing, DesignatedRule};
pub use default::DefaultPricing;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::LineItem;
use crate::util::group_by_code;

// =============================================================================
// Strategy Trait
// =============================================================================

/// A stateless policy computing a total price from line items.
///
/// Implementations hold configuration only, so one instance can price any
/// number of orders and can be shared across threads.
pub trait PricingStrategy: Send + Sync {
    /// Short human-readable name, used in logs.
    fn name(&self) -> &'static str;

    /// Total price of `items`. An empty slice always totals zero.
    ///
    /// ## Errors
    /// `CoreError::AmountOverflow` if the total does not fit in `Money`.
    fn calculate_price(&self, items: &[LineItem]) -> CoreResult<Money>;
}

impl<T: PricingStrategy + ?Sized> PricingStrategy for &T {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn calculate_price(&self, items: &[LineItem]) -> CoreResult<Money> {
        (**self).calculate_price(items)
    }
}

impl<T: PricingStrategy + ?Sized> PricingStrategy for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn calculate_price(&self, items: &[LineItem]) -> CoreResult<Money> {
        (**self).calculate_price(items)
    }
}

impl<T: PricingStrategy + ?Sized> PricingStrategy for Arc<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn calculate_price(&self, items: &[LineItem]) -> CoreResult<Money> {
        (**self).calculate_price(items)
    }
}

// =============================================================================
// Strategy Kind
// =============================================================================

/// Which of the four strategies a [`Strategy`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Default,
    BulkDiscount,
    BuyNGetOneFree,
    Combine,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::Default => write!(f, "default"),
            StrategyKind::BulkDiscount => write!(f, "bulk_discount"),
            StrategyKind::BuyNGetOneFree => write!(f, "buy_n_get_one_free"),
            StrategyKind::Combine => write!(f, "combine"),
        }
    }
}

// =============================================================================
// Strategy
// =============================================================================

/// Any one of the four strategies, as returned by the selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    Default(DefaultPricing),
    BulkDiscount(BulkDiscountPricing),
    BuyNGetOneFree(BuyNGetOneFreePricing),
    Combine(CombinePricing),
}

impl Strategy {
    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::Default(_) => StrategyKind::Default,
            Strategy::BulkDiscount(_) => StrategyKind::BulkDiscount,
            Strategy::BuyNGetOneFree(_) => StrategyKind::BuyNGetOneFree,
            Strategy::Combine(_) => StrategyKind::Combine,
        }
    }

    fn as_dyn(&self) -> &dyn PricingStrategy {
        match self {
            Strategy::Default(s) => s,
            Strategy::BulkDiscount(s) => s,
            Strategy::BuyNGetOneFree(s) => s,
            Strategy::Combine(s) => s,
        }
    }
}

impl PricingStrategy for Strategy {
    fn name(&self) -> &'static str {
        self.as_dyn().name()
    }

    fn calculate_price(&self, items: &[LineItem]) -> CoreResult<Money> {
        self.as_dyn().calculate_price(items)
    }
}

impl From<DefaultPricing> for Strategy {
    fn from(s: DefaultPricing) -> Self {
        Strategy::Default(s)
    }
}

impl From<BulkDiscountPricing> for Strategy {
    fn from(s: BulkDiscountPricing) -> Self {
        Strategy::BulkDiscount(s)
    }
}

impl From<BuyNGetOneFreePricing> for Strategy {
    fn from(s: BuyNGetOneFreePricing) -> Self {
        Strategy::BuyNGetOneFree(s)
    }
}

impl From<CombinePricing> for Strategy {
    fn from(s: CombinePricing) -> Self {
        Strategy::Combine(s)
    }
}

// =============================================================================
// Shared Helpers
// =============================================================================

/// Σ unit price × quantity, no promotion.
pub(crate) fn line_totals<'a, I>(items: I) -> CoreResult<Money>
where
    I: IntoIterator<Item = &'a LineItem>,
{
    Money::checked_sum(items.into_iter().map(LineItem::line_total))
        .ok_or(CoreError::AmountOverflow("line totals"))
}

/// Groups `items` by code and prices each group.
///
/// `designated` returns `Some(total)` for a code it owns; every other group
/// falls back to [`line_totals`].
pub(crate) fn price_by_code<F>(items: &[LineItem], designated: F) -> CoreResult<Money>
where
    F: Fn(&str, &[&LineItem]) -> Option<CoreResult<Money>>,
{
    group_by_code(items)
        .iter()
        .try_fold(Money::zero(), |total, (code, group)| {
            let part = match designated(code, group) {
                Some(part) => part?,
                None => line_totals(group.iter().copied())?,
            };
            total
                .checked_add(part)
                .ok_or(CoreError::AmountOverflow("order total"))
        })
}

// =============================================================================
// Unit Tests
// =============================================================================

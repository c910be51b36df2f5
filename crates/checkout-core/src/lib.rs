//! # checkout-core: Promotional Checkout Pricing
//!
//! Prices an order under whichever promotional strategy its contents
//! qualify for. Everything except config loading is pure computation.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Checkout Pricing Flow                            │
//! │                                                                         │
//! │  ┌──────────────┐    ┌──────────────────┐    ┌──────────────────────┐  │
//! │  │   Catalog    │───►│ Order            │───►│ select_strategy      │  │
//! │  │  Product     │    │  User, LineItems │    │  (PromotionConfig)   │  │
//! │  └──────────────┘    └──────────────────┘    └──────────┬───────────┘  │
//! │                                                         │ Strategy     │
//! │                                              ┌──────────▼───────────┐  │
//! │                                              │ CheckoutSession<S>   │  │
//! │                                              │  scan(..) → total()  │  │
//! │                                              └──────────────────────┘  │
//! │                                                                         │
//! │  Strategies: Default • BulkDiscount • BuyNGetOneFree • Combine          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product, LineItem, User, Order
//! - [`money`] - Money type with integer arithmetic
//! - [`strategy`] - The pricing strategy family
//! - [`selector`] - Picks a strategy for an order
//! - [`checkout`] - Scanning session
//! - [`config`] - Promotion configuration (TOML + environment)
//! - [`catalog`] - Products by code
//! - [`util`] - Grouping and rounding helpers
//! - [`error`] - Domain error types
//! - [`validation`] - Field rules used by the constructors
//!
//! ## Example Usage
//!
//! ```rust
//! use checkout_core::{checkout_total, Catalog, LineItem, Order, PromotionConfig, User};
//!
//! let catalog = Catalog::reference();
//! let line = |code: &str, qty| LineItem::new(catalog.lookup(code).unwrap(), qty).unwrap();
//!
//! let user = User::new(1, "Jane Doe").unwrap();
//! let order = Order::new(1, user, vec![line("ipd", 4), line("atv", 3)]).unwrap();
//!
//! // 4 × 499.99 (bulk) + 3 × 109.50 (under a full group, nothing free)
//! let total = checkout_total(&order, &PromotionConfig::default()).unwrap();
//! assert_eq!(total.to_string(), "$2328.46");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod money;
pub mod selector;
pub mod strategy;
pub mod types;
pub mod util;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::Catalog;
pub use checkout::CheckoutSession;
pub use config::PromotionConfig;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use selector::select_strategy;
pub use strategy::{
    BulkDiscountPricing, BuyNGetOneFreePricing, CombinePricing, DefaultPricing, DesignatedRule,
    PricingStrategy, Strategy, StrategyKind,
};
pub use types::*;

use tracing::debug;

// =============================================================================
// Constants
// =============================================================================

/// Largest quantity a single line item may carry.
///
/// A full line of a $1M product is 10^14 cents, far inside `i64`.
pub const MAX_ITEM_QUANTITY: i64 = 1_000_000;

/// Prices `order` end to end.
///
/// Selects the strategy for the order, scans every line item into a fresh
/// session priced by it, and returns the session total.
///
/// ## Errors
/// `CoreError::AmountOverflow` if the order total does not fit in `Money`.
pub fn checkout_total(order: &Order, config: &PromotionConfig) -> CoreResult<Money> {
    let strategy = select_strategy(order, config)?;
    let mut session = CheckoutSession::new(strategy);

    for item in order.items() {
        session.scan(item.clone())?;
    }

    let total = session.total()?;
    debug!(
        order_id = order.id(),
        strategy = session.strategy().name(),
        total = total.to_decimal(),
        "Checkout complete"
    );
    Ok(total)
}

//! # Checkout Session
//!
//! Accumulates scanned line items and prices them with one strategy.
//!
//! ## Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout Session Operations                          │
//! │                                                                         │
//! │  scan(item) ──────────► items.push(item)     (None → InvalidItem)       │
//! │                                                                         │
//! │  scan_code(catalog, code, qty) ──► lookup ──► scan(LineItem)            │
//! │                                                                         │
//! │  total() ─────────────► strategy.calculate_price(items)  (may overflow) │
//! │                                                                         │
//! │  clear() ─────────────► items.clear()        (strategy kept)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Scanning never merges lines: the same product scanned twice is two line
//! items, and the strategies sum quantities per code themselves.

use tracing::debug;

use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::strategy::PricingStrategy;
use crate::types::LineItem;

/// A checkout in progress.
///
/// The strategy is fixed at construction; the item list only grows until
/// [`CheckoutSession::clear`].
#[derive(Debug, Clone)]
pub struct CheckoutSession<S: PricingStrategy> {
    strategy: S,
    items: Vec<LineItem>,
}

impl<S: PricingStrategy> CheckoutSession<S> {
    /// Creates an empty session priced by `strategy`.
    pub fn new(strategy: S) -> Self {
        CheckoutSession {
            strategy,
            items: Vec::new(),
        }
    }

    /// Adds a line item.
    ///
    /// Accepts either a `LineItem` or an `Option<LineItem>`.
    ///
    /// ## Errors
    /// `CoreError::InvalidItem` when the item is absent.
    pub fn scan(&mut self, item: impl Into<Option<LineItem>>) -> CoreResult<()> {
        let item = item
            .into()
            .ok_or_else(|| CoreError::InvalidItem("no item to scan".into()))?;

        debug!(
            code = item.code(),
            name = item.product().name(),
            quantity = item.quantity(),
            "Scanned item"
        );
        self.items.push(item);
        Ok(())
    }

    /// Looks `code` up in `catalog` and scans `quantity` units of it.
    ///
    /// ## Errors
    /// - `CoreError::InvalidItem` for a code the catalog does not know
    /// - `CoreError::InvalidQuantity` for a quantity outside
    ///   `0..=MAX_ITEM_QUANTITY`
    pub fn scan_code(&mut self, catalog: &Catalog, code: &str, quantity: i64) -> CoreResult<()> {
        let product = catalog
            .lookup(code)
            .ok_or_else(|| CoreError::InvalidItem(format!("unknown product code '{}'", code)))?;

        self.scan(LineItem::new(product, quantity)?)
    }

    /// Total price of everything scanned so far.
    ///
    /// ## Errors
    /// `CoreError::AmountOverflow` if the total does not fit in `Money`.
    pub fn total(&self) -> CoreResult<Money> {
        self.strategy.calculate_price(&self.items)
    }

    /// Scanned items in scan order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Number of scanned line items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Removes every scanned item.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PromotionConfig;
    use crate::strategy::tests::items;
    use crate::strategy::DefaultPricing;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("checkout_core=debug")
            .with_test_writer()
            .try_init();
    }

    fn scan_all(session: &mut CheckoutSession<impl PricingStrategy>, pairs: &[(&str, i64)]) {
        for item in items(pairs) {
            session.scan(item).unwrap();
        }
    }

    #[test]
    fn test_scan_single_item() {
        init_tracing();
        let mut session = CheckoutSession::new(DefaultPricing);
        scan_all(&mut session, &[("ipd", 1)]);

        assert_eq!(session.len(), 1);
        assert_eq!(session.total().unwrap().cents(), 54999);
    }

    #[test]
    fn test_scan_absent_item_fails() {
        let mut session = CheckoutSession::new(DefaultPricing);
        let err = session.scan(None::<LineItem>).unwrap_err();

        assert!(matches!(err, CoreError::InvalidItem(_)));
        assert!(session.is_empty());
    }

    #[test]
    fn test_scan_multiple_items() {
        let mut session = CheckoutSession::new(DefaultPricing);
        scan_all(&mut session, &[("ipd", 1), ("mbp", 2)]);
        assert_eq!(session.total().unwrap().to_decimal(), 3349.97);
    }

    #[test]
    fn test_empty_session_totals_zero() {
        let session = CheckoutSession::new(PromotionConfig::default().combine_strategy());
        assert!(session.total().unwrap().is_zero());
        assert!(session.is_empty());
    }

    #[test]
    fn test_same_item_scanned_twice() {
        let mut session = CheckoutSession::new(DefaultPricing);
        scan_all(&mut session, &[("ipd", 1), ("ipd", 1)]);

        assert_eq!(session.len(), 2);
        assert_eq!(session.total().unwrap().to_decimal(), 1099.98);
    }

    #[test]
    fn test_zero_quantity_totals_zero() {
        let mut session = CheckoutSession::new(DefaultPricing);
        scan_all(&mut session, &[("ipd", 0)]);

        assert_eq!(session.len(), 1);
        assert!(session.total().unwrap().is_zero());
    }

    #[test]
    fn test_default_ignores_promotions() {
        let mut session = CheckoutSession::new(DefaultPricing);
        scan_all(&mut session, &[("ipd", 1), ("mbp", 2), ("atv", 3)]);
        assert_eq!(session.total().unwrap().to_decimal(), 3678.47);
    }

    #[test]
    fn test_scan_code() {
        init_tracing();
        let catalog = Catalog::reference();
        let mut session = CheckoutSession::new(PromotionConfig::default().buy_n_get_one_free_strategy());

        session.scan_code(&catalog, "atv", 4).unwrap();
        assert_eq!(session.total().unwrap().to_decimal(), 328.5);

        let err = session.scan_code(&catalog, "xyz", 1).unwrap_err();
        assert!(matches!(err, CoreError::InvalidItem(_)));

        let err = session.scan_code(&catalog, "atv", -1).unwrap_err();
        assert!(matches!(err, CoreError::InvalidQuantity { quantity: -1 }));

        assert_eq!(session.len(), 1);
    }

    #[test]
    fn test_scan_code_quantity_bound() {
        let catalog = Catalog::reference();
        let mut session = CheckoutSession::new(DefaultPricing);

        session.scan_code(&catalog, "mbp", crate::MAX_ITEM_QUANTITY).unwrap();
        assert_eq!(session.total().unwrap().cents(), crate::MAX_ITEM_QUANTITY * 139999);

        for quantity in [crate::MAX_ITEM_QUANTITY + 1, 100_000_000_000_000] {
            let err = session.scan_code(&catalog, "mbp", quantity).unwrap_err();
            assert!(matches!(err, CoreError::InvalidQuantity { .. }));
        }
        assert_eq!(session.len(), 1);
    }

    #[test]
    fn test_total_tracks_scans() {
        let mut session = CheckoutSession::new(PromotionConfig::default().bulk_discount_strategy());
        scan_all(&mut session, &[("ipd", 2)]);
        assert_eq!(session.total().unwrap().cents(), 2 * 49999);

        scan_all(&mut session, &[("ipd", 2)]);
        assert_eq!(session.total().unwrap().cents(), 4 * 49999);
    }

    #[test]
    fn test_clear_keeps_strategy() {
        let mut session = CheckoutSession::new(DefaultPricing);
        scan_all(&mut session, &[("mbp", 1)]);

        session.clear();
        assert!(session.is_empty());
        assert!(session.total().unwrap().is_zero());
        assert_eq!(session.strategy().name(), "default");
    }

    #[test]
    fn test_shared_strategy() {
        let strategy = PromotionConfig::default().combine_strategy();
        let mut first = CheckoutSession::new(&strategy);
        let mut second = CheckoutSession::new(&strategy);

        scan_all(&mut first, &[("atv", 4)]);
        scan_all(&mut second, &[("ipd", 5)]);

        assert_eq!(first.total().unwrap().to_decimal(), 328.5);
        assert_eq!(second.total().unwrap().to_decimal(), 2499.95);
    }
}

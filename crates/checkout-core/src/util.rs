//! # Utilities
//!
//! Rounding and grouping helpers shared by the pricing strategies and the
//! strategy selector.

use std::collections::BTreeMap;

use crate::error::{CoreError, CoreResult};
use crate::types::LineItem;

// =============================================================================
// Rounding
// =============================================================================

/// Rounds a decimal amount to two decimal places, half away from zero.
///
/// ## Example
/// ```rust
/// use checkout_core::util::round_off;
///
/// assert_eq!(round_off(328.5), 328.5);
/// assert_eq!(round_off(1099.984), 1099.98);
/// assert_eq!(round_off(-0.125), -0.13);
/// ```
pub fn round_off(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

// =============================================================================
// Grouping
// =============================================================================

/// Partitions `items` into buckets keyed by `key`.
///
/// Input order is preserved inside each bucket. Every item lands in exactly
/// one bucket; an empty key is an ordinary key.
///
/// ## Example
/// ```rust
/// use checkout_core::util::group_by;
///
/// let words = ["apple", "avocado", "banana", ""];
/// let groups = group_by(&words, |w| w.chars().next().map(String::from).unwrap_or_default());
///
/// assert_eq!(groups["a"], vec![&"apple", &"avocado"]);
/// assert_eq!(groups["b"], vec![&"banana"]);
/// assert_eq!(groups[""], vec![&""]);
/// ```
pub fn group_by<'a, T, K, F>(items: &'a [T], mut key: F) -> BTreeMap<K, Vec<&'a T>>
where
    K: Ord,
    F: FnMut(&T) -> K,
{
    let mut groups: BTreeMap<K, Vec<&'a T>> = BTreeMap::new();
    for item in items {
        groups.entry(key(item)).or_default().push(item);
    }
    groups
}

/// Flattens buckets produced by [`group_by`] back into one list.
pub fn ungroup<'a, K, T>(groups: BTreeMap<K, Vec<&'a T>>) -> Vec<&'a T> {
    groups.into_values().flatten().collect()
}

/// Groups line items by product code.
pub fn group_by_code(items: &[LineItem]) -> BTreeMap<String, Vec<&LineItem>> {
    group_by(items, |item| item.code().to_string())
}

/// Sums quantities per product code.
///
/// ## Errors
/// `CoreError::AmountOverflow` if one code's total quantity overflows.
pub fn quantities_by_code(items: &[LineItem]) -> CoreResult<BTreeMap<String, i64>> {
    group_by_code(items)
        .into_iter()
        .map(|(code, group)| Ok((code, total_quantity(&group)?)))
        .collect()
}

/// Total quantity across a bucket of line items.
pub(crate) fn total_quantity(items: &[&LineItem]) -> CoreResult<i64> {
    items
        .iter()
        .try_fold(0i64, |total, item| total.checked_add(item.quantity()))
        .ok_or(CoreError::AmountOverflow("total quantity"))
}

// =============================================================================
// Unit Tests
// =============================================================================

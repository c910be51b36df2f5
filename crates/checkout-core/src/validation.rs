//! # Validation Module
//!
//! Field validators used by the entity constructors in [`crate::types`].
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Where Input Is Rejected                            │
//! │                                                                         │
//! │  Product::new ──► validate_code, validate_product_name,                │
//! │                   validate_price                                       │
//! │  LineItem::new ─► validate_quantity, line total fits in Money          │
//! │  User::new ─────► validate_user_id, validate_user_name                 │
//! │  Order::new ────► validate_order_id, validate_order_items              │
//! │                                                                         │
//! │  Pricing strategies never re-check: malformed input cannot reach them  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use checkout_core::validation::{validate_code, validate_user_name};
//!
//! assert!(validate_code("ipd").is_ok());
//! assert!(validate_code("   ").is_err());
//! assert!(validate_user_name(" J ").is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Shortest accepted user name, after trimming.
pub const MIN_USER_NAME_LEN: usize = 2;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product code.
///
/// ## Rules
/// - Must not be empty after trimming
pub fn validate_code(code: &str) -> ValidationResult<()> {
    if code.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }

    Ok(())
}

/// Validates a product display name.
///
/// ## Rules
/// - Must not be empty after trimming
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    Ok(())
}

/// Validates a user name.
///
/// ## Rules
/// - At least [`MIN_USER_NAME_LEN`] characters after trimming
pub fn validate_user_name(name: &str) -> ValidationResult<()> {
    if name.trim().chars().count() < MIN_USER_NAME_LEN {
        return Err(ValidationError::TooShort {
            field: "name".to_string(),
            min: MIN_USER_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line item quantity.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (contributes nothing to a total)
/// - Must not exceed [`MAX_ITEM_QUANTITY`]
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Example
/// ```rust
/// use checkout_core::money::Money;
/// use checkout_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_cents(54999)).is_ok());
/// assert!(validate_price(Money::zero()).is_ok());     // Free item
/// assert!(validate_price(Money::from_cents(-1)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a user id (must be > 0).
pub fn validate_user_id(id: i64) -> ValidationResult<()> {
    if id <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "user id".to_string(),
        });
    }

    Ok(())
}

/// Validates an order id (must be > 0).
pub fn validate_order_id(id: i64) -> ValidationResult<()> {
    if id <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "order id".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates that an order has at least one line item.
pub fn validate_order_items(count: usize) -> ValidationResult<()> {
    if count == 0 {
        return Err(ValidationError::Required {
            field: "order items".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_code() {
        assert!(validate_code("ipd").is_ok());
        assert!(validate_code(" atv ").is_ok());

        assert!(validate_code("").is_err());
        assert!(validate_code("   ").is_err());
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Super iPad").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("\t").is_err());
    }

    #[test]
    fn test_validate_user_name() {
        assert!(validate_user_name("John").is_ok());
        assert!(validate_user_name("Jo").is_ok());

        assert_eq!(
            validate_user_name("  J  "),
            Err(ValidationError::TooShort {
                field: "name".to_string(),
                min: 2,
            })
        );
        assert!(validate_user_name("").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(0).is_ok());
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(1000).is_ok());
        assert!(validate_quantity(MAX_ITEM_QUANTITY).is_ok());

        assert!(validate_quantity(-1).is_err());
        assert_eq!(
            validate_quantity(MAX_ITEM_QUANTITY + 1),
            Err(ValidationError::OutOfRange {
                field: "quantity".to_string(),
                min: 0,
                max: MAX_ITEM_QUANTITY,
            })
        );
    }

    #[test]
    fn test_validate_ids() {
        assert!(validate_user_id(1).is_ok());
        assert!(validate_user_id(0).is_err());
        assert!(validate_user_id(-7).is_err());

        assert!(validate_order_id(42).is_ok());
        assert!(validate_order_id(0).is_err());
    }

    #[test]
    fn test_validate_order_items() {
        assert!(validate_order_items(1).is_ok());
        assert!(validate_order_items(0).is_err());
    }
}

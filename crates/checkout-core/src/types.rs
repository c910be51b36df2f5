//! # Domain Types
//!
//! Validated value objects consumed by the pricing core.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │◄──│    LineItem     │◄──│     Order       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  code (key)     │   │  product (Arc)  │   │  id (> 0)       │       │
//! │  │  name           │   │  quantity (>=0) │   │  user           │       │
//! │  │  unit_price     │   └─────────────────┘   │  items (>= 1)   │       │
//! │  └─────────────────┘                         └────────┬────────┘       │
//! │                                                       │                 │
//! │                                              ┌────────▼────────┐       │
//! │                                              │      User       │       │
//! │                                              │  id (> 0)       │       │
//! │                                              │  name (>= 2)    │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every constructor validates and returns `CoreResult`. Once built, a value
//! is well-formed for its whole lifetime: the pricing strategies rely on it.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::validation::{
    validate_code, validate_order_id, validate_order_items, validate_price,
    validate_product_name, validate_quantity, validate_user_id, validate_user_name,
};

// =============================================================================
// Product
// =============================================================================

/// A product available for sale. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    code: String,
    name: String,
    unit_price: Money,
}

impl Product {
    /// Creates a product. Code and name are trimmed.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::{Money, Product};
    ///
    /// let ipad = Product::new(" ipd ", "Super iPad", Money::from_cents(54999)).unwrap();
    /// assert_eq!(ipad.code(), "ipd");
    ///
    /// assert!(Product::new("", "Nameless", Money::zero()).is_err());
    /// ```
    pub fn new(code: &str, name: &str, unit_price: Money) -> CoreResult<Self> {
        validate_code(code).map_err(CoreError::InvalidProduct)?;
        validate_product_name(name).map_err(CoreError::InvalidProduct)?;
        validate_price(unit_price).map_err(CoreError::InvalidProduct)?;

        Ok(Product {
            code: code.trim().to_string(),
            name: name.trim().to_string(),
            unit_price,
        })
    }

    /// Product code, the catalog key.
    #[inline]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Display name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Regular unit price.
    #[inline]
    pub fn unit_price(&self) -> Money {
        self.unit_price
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {}) - {}", self.name, self.code, self.unit_price)
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// A (product, quantity) pairing scanned into an order or session.
///
/// The product is shared with the catalog through an `Arc`; the quantity
/// can be changed later but is re-validated every time. The line total is
/// computed once, so an existing line item always has a representable total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    product: Arc<Product>,
    quantity: i64,
    line_total: Money,
}

impl LineItem {
    /// Creates a line item.
    ///
    /// ## Errors
    /// `CoreError::InvalidQuantity` if `quantity < 0`, if it exceeds
    /// [`MAX_ITEM_QUANTITY`](crate::MAX_ITEM_QUANTITY), or if unit price ×
    /// quantity overflows.
    pub fn new(product: Arc<Product>, quantity: i64) -> CoreResult<Self> {
        let line_total = checked_line_total(&product, quantity)?;
        Ok(LineItem {
            product,
            quantity,
            line_total,
        })
    }

    /// The product this line refers to.
    #[inline]
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Shortcut for `self.product().code()`, the grouping key.
    #[inline]
    pub fn code(&self) -> &str {
        self.product.code()
    }

    /// Units on this line.
    #[inline]
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Replaces the quantity.
    ///
    /// ## Errors
    /// Same rules as [`LineItem::new`]; the old quantity is kept on error.
    pub fn set_quantity(&mut self, quantity: i64) -> CoreResult<()> {
        self.line_total = checked_line_total(&self.product, quantity)?;
        self.quantity = quantity;
        Ok(())
    }

    /// Unit price × quantity, without any promotion.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.line_total
    }
}

fn checked_line_total(product: &Product, quantity: i64) -> CoreResult<Money> {
    validate_quantity(quantity).map_err(|_| CoreError::InvalidQuantity { quantity })?;
    product
        .unit_price()
        .checked_multiply_quantity(quantity)
        .ok_or(CoreError::InvalidQuantity { quantity })
}

impl fmt::Display for LineItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - Quantity: {}", self.product, self.quantity)
    }
}

// =============================================================================
// User
// =============================================================================

/// The customer owning an order. Identity only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    id: i64,
    name: String,
}

impl User {
    /// Creates a user. The name is trimmed.
    ///
    /// ## Errors
    /// `CoreError::InvalidUser` for a non-positive id or a name shorter
    /// than two characters.
    pub fn new(id: i64, name: &str) -> CoreResult<Self> {
        validate_user_id(id).map_err(CoreError::InvalidUser)?;
        validate_user_name(name).map_err(CoreError::InvalidUser)?;

        Ok(User {
            id,
            name: name.trim().to_string(),
        })
    }

    #[inline]
    pub fn id(&self) -> i64 {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "User: {} (ID: {})", self.name, self.id)
    }
}

// =============================================================================
// Order
// =============================================================================

/// A fully-formed order: the input to strategy selection.
///
/// The item list is fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    id: i64,
    user: User,
    items: Vec<LineItem>,
}

impl Order {
    /// Creates an order.
    ///
    /// ## Errors
    /// `CoreError::InvalidOrder` for a non-positive id or an empty item list.
    pub fn new(id: i64, user: User, items: Vec<LineItem>) -> CoreResult<Self> {
        validate_order_id(id).map_err(CoreError::InvalidOrder)?;
        validate_order_items(items.len()).map_err(CoreError::InvalidOrder)?;

        Ok(Order { id, user, items })
    }

    #[inline]
    pub fn id(&self) -> i64 {
        self.id
    }

    #[inline]
    pub fn user(&self) -> &User {
        &self.user
    }

    /// Line items in the order they were given.
    #[inline]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Order {} - User: {} - Items: ", self.id, self.user.name)?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", item)?;
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

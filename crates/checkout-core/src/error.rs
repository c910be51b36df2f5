//! # Error Types
//!
//! Domain-specific error types for checkout-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  CoreError            - What callers of this crate see                 │
//! │  ├── InvalidQuantity  - LineItem quantity < 0 or above the maximum     │
//! │  ├── InvalidItem      - Session asked to scan nothing / unknown code   │
//! │  ├── InvalidProduct   ─┐                                               │
//! │  ├── InvalidUser       ├─ wrap a ValidationError with field detail     │
//! │  ├── InvalidOrder     ─┘                                               │
//! │  ├── AmountOverflow   - A total left the i64 cent range                │
//! │  └── Config*          - promotions.toml / environment problems         │
//! │                                                                         │
//! │  ValidationError      - Field-level rule that was broken               │
//! │                                                                         │
//! │  Flow: validator ──► ValidationError ──► CoreError::Invalid* ──► caller│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (code, quantity, field)
//! 3. Errors are enum variants, never String
//! 4. Nothing is clamped or defaulted: every error reaches the caller

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised by entity construction, checkout, and configuration.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A line item was given a quantity it cannot hold.
    ///
    /// ## When This Occurs
    /// - `LineItem::new(product, -1)`
    /// - `LineItem::set_quantity(MAX_ITEM_QUANTITY + 1)`
    /// - `CheckoutSession::scan_code(.., -1)`
    /// - unit price × quantity does not fit in `Money`
    #[error("Quantity out of range: {quantity}")]
    InvalidQuantity { quantity: i64 },

    /// A price calculation exceeded the representable amount.
    #[error("Amount overflow while calculating {0}")]
    AmountOverflow(&'static str),

    /// A checkout session was asked to scan an item that does not exist.
    ///
    /// ## When This Occurs
    /// - `scan(None)`
    /// - `scan_code` with a code the catalog does not know
    #[error("Invalid item: {0}")]
    InvalidItem(String),

    /// Product failed validation (empty code or name, negative price,
    /// duplicate code in a catalog).
    #[error("Invalid product: {0}")]
    InvalidProduct(ValidationError),

    /// User failed validation (non-positive id, short name).
    #[error("Invalid user: {0}")]
    InvalidUser(ValidationError),

    /// Order failed validation (non-positive id, no items).
    #[error("Invalid order: {0}")]
    InvalidOrder(ValidationError),

    /// Promotion configuration is inconsistent.
    #[error("Invalid promotion configuration: {0}")]
    InvalidConfig(String),

    /// Failed to read or parse promotions.toml.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to serialize or write promotions.toml.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),
}

impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        CoreError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for CoreError {
    fn from(err: toml::de::Error) -> Self {
        CoreError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for CoreError {
    fn from(err: toml::ser::Error) -> Self {
        CoreError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These describe which field broke which rule. Constructors wrap them in
/// the matching `CoreError::Invalid*` variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or more.
    #[error("{field} must be non-negative")]
    MustBeNonNegative { field: String },

    /// Value must be within a range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Duplicate value (e.g., duplicate product code).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

//! # Product Catalog
//!
//! Read-only lookup from product code to product.
//!
//! Products are handed out as `Arc<Product>` so the catalog and every line
//! item built from it point at the same immutable value.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::Product;

/// Code → product map.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: BTreeMap<String, Arc<Product>>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The four demo products used throughout the tests and docs.
    ///
    /// | code | name        | price    |
    /// |------|-------------|----------|
    /// | ipd  | Super iPad  | 549.99   |
    /// | mbp  | MacBook Pro | 1399.99  |
    /// | atv  | Apple TV    | 109.50   |
    /// | vga  | VGA adapter | 30.00    |
    pub fn reference() -> Self {
        let mut catalog = Self::new();
        for (code, name, cents) in [
            ("ipd", "Super iPad", 54999),
            ("mbp", "MacBook Pro", 139999),
            ("atv", "Apple TV", 10950),
            ("vga", "VGA adapter", 3000),
        ] {
            let product = Product::new(code, name, Money::from_cents(cents))
                .expect("reference products are valid");
            catalog
                .products
                .insert(product.code().to_string(), Arc::new(product));
        }
        catalog
    }

    /// Adds a product.
    ///
    /// ## Errors
    /// `CoreError::InvalidProduct` if a product with the same code exists.
    pub fn insert(&mut self, product: Product) -> CoreResult<Arc<Product>> {
        if self.products.contains_key(product.code()) {
            return Err(CoreError::InvalidProduct(ValidationError::Duplicate {
                field: "code".to_string(),
                value: product.code().to_string(),
            }));
        }

        let product = Arc::new(product);
        self.products
            .insert(product.code().to_string(), Arc::clone(&product));
        Ok(product)
    }

    /// Looks a product up by code.
    pub fn lookup(&self, code: &str) -> Option<Arc<Product>> {
        self.products.get(code).cloned()
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// All codes, sorted.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.products.keys().map(String::as_str)
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// A purchasable item in the neighbourhood catalog.
///
/// Reference data: the order flow only reads products, it never mutates them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    pub id: i64,
    pub sku: String,
    pub name: String,
    pub weight_grams: i64,
    pub fragile: bool,
}

impl Product {
    /// Weight contributed by `quantity` units of this product, or `None` if
    /// it does not fit in an `i64`.
    pub fn line_weight(&self, quantity: i64) -> Option<i64> {
        self.weight_grams.checked_mul(quantity)
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}g)", self.name, self.weight_grams)
    }
}

/// Catalog entry as declared in configuration, before it has a store identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewProduct {
    pub sku: String,
    pub name: String,
    #[serde(default)]
    pub weight_grams: i64,
    #[serde(default)]
    pub fragile: bool,
}

impl NewProduct {
    pub const MAX_SKU_LENGTH: usize = 50;
    pub const MAX_NAME_LENGTH: usize = 100;

    pub fn validate(&self) -> Result<(), ProductError> {
        let sku = self.sku.trim();
        if sku.is_empty() || sku.len() > Self::MAX_SKU_LENGTH {
            return Err(ProductError::InvalidSku(self.sku.clone()));
        }
        if self.name.trim().is_empty() || self.name.chars().count() > Self::MAX_NAME_LENGTH {
            return Err(ProductError::InvalidName(self.name.clone()));
        }
        if self.weight_grams < 0 {
            return Err(ProductError::NegativeWeight {
                sku: self.sku.clone(),
                weight: self.weight_grams,
            });
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    #[error("Invalid SKU: {0:?}")]
    InvalidSku(String),

    #[error("Invalid product name: {0:?}")]
    InvalidName(String),

    #[error("Product {sku} has negative weight {weight}g")]
    NegativeWeight {
        sku: String,
        weight: i64,
    },
}

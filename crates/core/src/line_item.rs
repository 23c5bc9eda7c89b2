//! Line Items

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::{prices::Price, variants::VariantSelections};

/// Opaque catalog identifier of a product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a new product identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Identifier of the supplier fulfilling a line item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SupplierId(String);

impl SupplierId {
    /// Creates a new supplier identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for SupplierId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

/// One distinct purchasable configuration in a cart.
///
/// `name`, `unit_price` and `image` are snapshots taken when the item was
/// added; they are not re-fetched from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Price,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<SupplierId>,
    #[serde(default, skip_serializing_if = "VariantSelections::is_empty")]
    pub variants: VariantSelections,
}

impl LineItem {
    /// The identity key of this line.
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey {
            product_id: self.product_id.clone(),
            variants: self.variants.clone(),
        }
    }

    /// True when this line has the given identity key.
    #[must_use]
    pub fn matches(&self, key: &LineKey) -> bool {
        self.product_id == key.product_id && self.variants == key.variants
    }

    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// The identity of a line item within a cart.
///
/// Two line items are the same item if and only if their product and their
/// full variant selections are equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineKey {
    pub product_id: ProductId,
    pub variants: VariantSelections,
}

impl LineKey {
    /// Creates a key from a product and its variant selections.
    pub fn new(product_id: impl Into<ProductId>, variants: VariantSelections) -> Self {
        Self {
            product_id: product_id.into(),
            variants,
        }
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

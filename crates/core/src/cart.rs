//! Cart collection and merge semantics.

use crate::{
    line_item::{LineItem, LineKey, ProductId},
    prices::Price,
};

/// Outcome of inserting a line item into a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The item was appended as a new line.
    Added,
    /// The quantity was folded into an existing line with the same key.
    Merged,
    /// The item was ignored (zero quantity).
    Rejected,
}

/// Derived cart figures for display and the checkout hand-off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartSummary {
    /// Number of distinct lines.
    pub lines: usize,
    /// Total number of units across all lines.
    pub units: u64,
    /// Total price in minor units.
    pub total: Price,
}

/// Ordered collection of line items for one actor.
///
/// Invariant: no two lines share a [`LineKey`]. Inserting a duplicate key
/// merges by summing quantities at the moment of insertion; duplicates are
/// never left in the collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Creates an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a cart from stored lines, re-applying the merge invariant.
    ///
    /// Lines that collide on their identity key are merged rather than kept
    /// as duplicates, and zero-quantity lines are dropped.
    pub fn from_items(items: impl IntoIterator<Item = LineItem>) -> Self {
        let mut cart = Self::new();

        for item in items {
            cart.insert(item);
        }

        cart
    }

    /// The lines of this cart, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// True when the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// The line with the given identity key, if present.
    #[must_use]
    pub fn find(&self, key: &LineKey) -> Option<&LineItem> {
        self.items.iter().find(|item| item.matches(key))
    }

    /// Inserts a line item, merging with an existing line on key collision.
    ///
    /// The first occurrence keeps its position and its name/price/image
    /// snapshot; only the quantity is summed.
    pub fn insert(&mut self, item: LineItem) -> InsertOutcome {
        if item.quantity == 0 {
            return InsertOutcome::Rejected;
        }

        let key = item.key();

        match self.items.iter_mut().find(|existing| existing.matches(&key)) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(item.quantity);
                InsertOutcome::Merged
            }
            None => {
                self.items.push(item);
                InsertOutcome::Added
            }
        }
    }

    /// Sets the quantity of the line with the given key.
    ///
    /// Quantities below one are rejected, not clamped; the call is a no-op
    /// for them and for unknown keys. Returns whether a change was applied.
    pub fn set_quantity(&mut self, key: &LineKey, quantity: u32) -> bool {
        if quantity < 1 {
            return false;
        }

        match self.items.iter_mut().find(|item| item.matches(key)) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Removes the single line with the given identity key.
    ///
    /// Returns whether a line was removed.
    pub fn remove(&mut self, key: &LineKey) -> bool {
        let before = self.items.len();

        self.items.retain(|item| !item.matches(key));

        self.items.len() < before
    }

    /// Removes every line for the given product, regardless of variants.
    ///
    /// Returns the number of lines removed.
    pub fn remove_product(&mut self, product_id: &ProductId) -> usize {
        let before = self.items.len();

        self.items.retain(|item| item.product_id != *product_id);

        before - self.items.len()
    }

    /// Empties the cart. Idempotent.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Total price of the cart: Σ(unit price × quantity).
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Line, unit, and price totals in one pass.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        CartSummary {
            lines: self.items.len(),
            units: self
                .items
                .iter()
                .map(|item| u64::from(item.quantity))
                .sum(),
            total: self.total_price(),
        }
    }
}

//! Checkout hand-off.

use serde::Serialize;

use inkcart_core::{Cart, LineItem, Price};

/// Snapshot of the cart packaged for the external payment flow.
///
/// The payment collaborator turns this into a payment-intent request; on
/// confirmed success it calls [`crate::store::CartStore::complete_checkout`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckoutDraft {
    pub lines: Vec<LineItem>,
    pub total: Price,
}

impl CheckoutDraft {
    pub(crate) fn from_cart(cart: &Cart) -> Self {
        Self {
            lines: cart.items().to_vec(),
            total: cart.total_price(),
        }
    }

    /// True when there is nothing to pay for.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

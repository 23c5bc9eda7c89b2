//! Pure cart domain: prices, variant selections, line items, and the cart
//! collection with its merge semantics. No I/O lives here.

pub mod cart;
pub mod line_item;
pub mod prices;
pub mod variants;

pub use cart::{Cart, CartSummary, InsertOutcome};
pub use line_item::{LineItem, LineKey, ProductId, SupplierId};
pub use prices::Price;
pub use variants::VariantSelections;

//! PostgreSQL cart persistence for authenticated users.

mod columns;
mod repository;
mod rows;

pub use columns::VariantAxis;

use async_trait::async_trait;
use tracing::debug;

use inkcart_core::Cart;

use crate::{database::Db, identity::Identity};

use self::{columns::ensure_representable, repository::PgCartLinesRepository, rows::CartLineRow};

use super::{CartPersistence, CartPersistenceError};

/// Remote cart store: one `cart_lines` row per line item, scoped to the
/// authenticated account by row-level security.
#[derive(Debug, Clone)]
pub struct PgCartPersistence {
    db: Db,
    repository: PgCartLinesRepository,
}

impl PgCartPersistence {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCartLinesRepository::new(),
        }
    }
}

#[async_trait]
impl CartPersistence for PgCartPersistence {
    #[tracing::instrument(skip_all, fields(user = identity.user().map(tracing::field::display)))]
    async fn load_cart(&self, identity: &Identity) -> Result<Cart, CartPersistenceError> {
        let user = identity
            .user()
            .ok_or(CartPersistenceError::IdentityRequired)?;

        let mut tx = self.db.begin_user_transaction(user).await?;

        let rows = self.repository.get_cart_lines(&mut tx, user).await?;

        tx.commit().await?;

        debug!(lines = rows.len(), "loaded cart");

        Ok(Cart::from_items(
            rows.into_iter().map(CartLineRow::into_line_item),
        ))
    }

    #[tracing::instrument(skip_all, fields(user = identity.user().map(tracing::field::display)))]
    async fn replace_cart(
        &self,
        identity: &Identity,
        cart: &Cart,
    ) -> Result<(), CartPersistenceError> {
        let user = identity
            .user()
            .ok_or(CartPersistenceError::IdentityRequired)?;

        // Reject unstorable axes before touching any row.
        ensure_representable(cart)?;

        // Delete and reinsert commit together; a failure anywhere leaves the
        // previously stored cart intact.
        let mut tx = self.db.begin_user_transaction(user).await?;

        self.repository.delete_cart_lines(&mut tx, user).await?;

        for item in cart.items() {
            self.repository.insert_cart_line(&mut tx, user, item).await?;
        }

        tx.commit().await?;

        debug!(lines = cart.len(), "replaced cart");

        Ok(())
    }
}
